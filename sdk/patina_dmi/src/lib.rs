//! Decoder for the SMBIOS/DMI entry point and structure table as described in the DMTF System Management BIOS
//! Reference Specification.
//!
//! This crate recognizes and validates the three entry point formats (`_DMI_`, `_SM_` and `_SM3_`), walks the
//! structure table they point to, resolves the string set trailing each structure, and decodes a set of common
//! structure types into typed views. Decoding borrows from caller-supplied buffers and never allocates per field.
//!
//! ```rust
//! use patina_dmi::{config::DecodeConfig, Smbios};
//!
//! fn firmware_vendor<'a>(entry: &'a [u8], table: &'a [u8]) -> Option<&'a str> {
//!     let smbios = Smbios::decode(entry, table, &DecodeConfig::default()).ok()?;
//!     let bios = smbios.table().views::<patina_dmi::tables::BiosInformation>().next()?;
//!     bios.vendor().ok().flatten()
//! }
//! # assert_eq!(firmware_vendor(&[], &[]), None);
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod checksum;
pub mod config;
pub mod entry;
pub mod error;
pub mod header;
pub mod record;
pub mod registry;
pub mod strings;
pub mod table;
pub mod tables;
pub mod walker;

#[cfg(test)]
mod test_support;

pub use entry::{EntryPoint, EntryPointKind, SmbiosVersion};
pub use error::DmiError;
pub use record::RawRecord;
pub use registry::DmiTable;
pub use table::Table;
pub use walker::{TableArea, TableWalker, WalkState};

use config::DecodeConfig;

/// A decoded entry point together with the structure table it describes.
#[derive(Debug, Clone)]
pub struct Smbios<'a> {
    entry_point: EntryPoint<'a>,
    table: Table<'a>,
}

impl<'a> Smbios<'a> {
    /// Decodes the entry point at the start of `entry` and walks `table`, the bytes found at the table address it
    /// reports.
    ///
    /// Entry point failures are returned as errors. A table walk that fails part way is not: the structures read
    /// before the failure and the error itself are available from [`Smbios::table`].
    pub fn decode(entry: &'a [u8], table: &'a [u8], config: &DecodeConfig) -> Result<Self, DmiError> {
        let entry_point = EntryPoint::parse(entry, config)?;
        let table = Table::collect(&entry_point.table_area(), table);
        if let Some(err) = table.error() {
            log::error!("SMBIOS table walk stopped after {} structures: {}", table.len(), err);
        }
        Ok(Self { entry_point, table })
    }

    pub fn entry_point(&self) -> &EntryPoint<'a> {
        &self.entry_point
    }

    /// The SMBIOS version the entry point reports, `None` for a legacy entry point with an invalid BCD revision.
    pub fn version(&self) -> Option<SmbiosVersion> {
        self.entry_point.version()
    }

    pub fn table(&self) -> &Table<'a> {
        &self.table
    }
}
