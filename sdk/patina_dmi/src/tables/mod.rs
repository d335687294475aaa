//! Typed views over individual structure types.
//!
//! Each view wraps a [`RawRecord`] and decodes fields on access. Fields added by later SMBIOS revisions return
//! `None` when the structure is too short to hold them. Enumerated fields come in pairs: `foo_raw()` gives the byte
//! as stored and `foo()` the decoded value, `None` for values this crate does not know.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::record::RawRecord;

/// Declares a `#[repr(u8)]` enumeration with a name table and a `TryFrom<u8>` that hands back unknown values.
macro_rules! named_values {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $value:literal => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $value,)+
        }

        impl $name {
            pub const fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err(value),
                }
            }
        }
    };
}

/// Implements [`TableView`] for a single-field wrapper struct.
macro_rules! table_view {
    ($view:ident, [$($table_type:expr),+]) => {
        impl<'a> $crate::tables::TableView<'a> for $view<'a> {
            const RECORD_TYPES: &'static [u8] = &[$($table_type as u8),+];

            fn from_record_unchecked(record: $crate::record::RawRecord<'a>) -> Self {
                Self { record }
            }

            fn record(&self) -> &$crate::record::RawRecord<'a> {
                &self.record
            }
        }
    };
}

pub mod baseboard;
pub mod bios;
pub mod cache;
pub mod chassis;
pub mod cooling;
pub mod oem_strings;
pub mod probe;
pub mod slots;
pub mod status;
pub mod system;

pub use baseboard::BaseboardInformation;
pub use bios::BiosInformation;
pub use cache::CacheInformation;
pub use chassis::ChassisInformation;
pub use cooling::CoolingDevice;
pub use oem_strings::OemStrings;
pub use probe::Probe;
pub use slots::SystemSlots;
pub use system::SystemInformation;

/// A typed view of one or more structure types.
pub trait TableView<'a>: Sized {
    /// Structure types this view decodes.
    const RECORD_TYPES: &'static [u8];

    /// Wraps `record` without checking its type.
    fn from_record_unchecked(record: RawRecord<'a>) -> Self;

    fn record(&self) -> &RawRecord<'a>;

    /// Wraps `record` if its type is one of [`Self::RECORD_TYPES`].
    fn from_record(record: RawRecord<'a>) -> Option<Self> {
        Self::RECORD_TYPES.contains(&record.record_type()).then(|| Self::from_record_unchecked(record))
    }

    fn handle(&self) -> u16 {
        self.record().handle()
    }
}

/// Decodes a `u16` measurement where `0x8000` means "unknown".
pub(crate) fn known_word(value: Option<u16>) -> Option<u16> {
    value.filter(|value| *value != 0x8000)
}
