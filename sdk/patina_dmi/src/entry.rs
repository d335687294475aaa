//! SMBIOS entry point recognition and validation.
//!
//! Three entry point layouts exist. Each starts with its own anchor and points at the structure table:
//!
//! | Anchor  | Revision | Size     | Table address |
//! |---------|----------|----------|---------------|
//! | `_DMI_` | legacy   | 15 bytes | 32-bit        |
//! | `_SM_`  | 2.1+     | 31 bytes | 32-bit        |
//! | `_SM3_` | 3.0+     | 24 bytes | 64-bit        |
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::{fmt, mem};

use zerocopy::{
    little_endian::{U16, U32, U64},
    FromBytes, Immutable, KnownLayout, Unaligned,
};

use crate::{
    checksum,
    config::{ChecksumPolicy, DecodeConfig},
    walker::TableArea,
    DmiError,
};

/// `_DMI_`, the anchor of the legacy entry point and of the intermediate structure inside a 2.1 entry point.
pub const LEGACY_ANCHOR: &[u8; 5] = b"_DMI_";
/// `_SM_`, the anchor of the 32-bit (2.1+) entry point.
pub const SMBIOS_ANCHOR: &[u8; 4] = b"_SM_";
/// `_SM3_`, the anchor of the 64-bit (3.0+) entry point.
pub const SMBIOS3_ANCHOR: &[u8; 5] = b"_SM3_";

/// Offset of the intermediate `_DMI_` structure inside a 2.1 entry point.
const INTERMEDIATE_OFFSET: usize = 0x10;
/// Some 2.1 firmware reports 0x1E instead of 0x1F in the length field.
const V21_ERRATA_LENGTH: usize = 0x1E;

#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
struct LegacyLayout {
    anchor: [u8; 5],
    checksum: u8,
    table_length: U16,
    table_address: U32,
    structure_count: U16,
    bcd_revision: u8,
}

#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
struct Smbios21Layout {
    anchor: [u8; 4],
    checksum: u8,
    length: u8,
    major_version: u8,
    minor_version: u8,
    max_structure_size: U16,
    entry_point_revision: u8,
    formatted_area: [u8; 5],
    intermediate: LegacyLayout,
}

#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
struct Smbios30Layout {
    anchor: [u8; 5],
    checksum: u8,
    length: u8,
    major_version: u8,
    minor_version: u8,
    docrev: u8,
    entry_point_revision: u8,
    reserved: u8,
    table_max_size: U32,
    table_address: U64,
}

/// SMBIOS version triple. Ordering is by major, then minor, then revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SmbiosVersion {
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
}

impl SmbiosVersion {
    pub const fn new(major: u8, minor: u8, revision: u8) -> Self {
        Self { major, minor, revision }
    }

    /// Decodes the packed BCD revision byte of a legacy entry point. `0x00` means no version was reported.
    pub const fn from_bcd(bcd: u8) -> Option<Self> {
        if bcd == 0 {
            return None;
        }
        Some(Self::new(bcd >> 4, bcd & 0x0F, 0))
    }

    pub fn is_at_least(&self, major: u8, minor: u8) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl fmt::Display for SmbiosVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

/// Which entry point layout was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPointKind {
    Legacy,
    V21,
    V30,
}

impl EntryPointKind {
    /// Recognition order. The first anchor found at offset 0 wins.
    pub const PRIORITY: [EntryPointKind; 3] = [EntryPointKind::Legacy, EntryPointKind::V21, EntryPointKind::V30];

    pub const fn anchor(&self) -> &'static [u8] {
        match self {
            EntryPointKind::Legacy => LEGACY_ANCHOR,
            EntryPointKind::V21 => SMBIOS_ANCHOR,
            EntryPointKind::V30 => SMBIOS3_ANCHOR,
        }
    }

    /// The nominal size of the layout.
    pub const fn structure_size(&self) -> usize {
        match self {
            EntryPointKind::Legacy => mem::size_of::<LegacyLayout>(),
            EntryPointKind::V21 => mem::size_of::<Smbios21Layout>(),
            EntryPointKind::V30 => mem::size_of::<Smbios30Layout>(),
        }
    }

    /// The smallest buffer the layout can be decoded from.
    pub const fn minimum_size(&self) -> usize {
        match self {
            EntryPointKind::V21 => V21_ERRATA_LENGTH,
            _ => self.structure_size(),
        }
    }

    /// Matches the anchors in [`Self::PRIORITY`] order against the start of `buffer`.
    pub fn detect(buffer: &[u8]) -> Option<EntryPointKind> {
        Self::PRIORITY.into_iter().find(|kind| buffer.starts_with(kind.anchor()))
    }
}

/// Fields of a legacy `_DMI_` entry point.
#[derive(Debug, Clone, Copy)]
pub struct LegacyEntryPoint<'a> {
    data: &'a [u8],
    layout: LegacyLayout,
}

/// Fields of a 32-bit `_SM_` entry point.
#[derive(Debug, Clone, Copy)]
pub struct EntryPoint21<'a> {
    data: &'a [u8],
    layout: Smbios21Layout,
    bcd_revision: Option<u8>,
}

/// Fields of a 64-bit `_SM3_` entry point.
#[derive(Debug, Clone, Copy)]
pub struct EntryPoint30<'a> {
    data: &'a [u8],
    layout: Smbios30Layout,
}

/// A validated entry point borrowed from the buffer it was decoded from.
#[derive(Debug, Clone, Copy)]
pub enum EntryPoint<'a> {
    Legacy(LegacyEntryPoint<'a>),
    V21(EntryPoint21<'a>),
    V30(EntryPoint30<'a>),
}

impl<'a> EntryPoint<'a> {
    /// Recognizes and validates the entry point at the start of `buffer`.
    pub fn parse(buffer: &'a [u8], config: &DecodeConfig) -> Result<Self, DmiError> {
        let Some(kind) = EntryPointKind::detect(buffer) else {
            log::error!("No SMBIOS entry point anchor in {} byte buffer.", buffer.len());
            return Err(DmiError::UnsupportedEntryPoint);
        };

        if buffer.len() < kind.minimum_size() {
            log::error!("{:?} entry point needs {} bytes, buffer has {}.", kind, kind.minimum_size(), buffer.len());
            Err(DmiError::TruncatedEntryPoint)?;
        }

        let entry_point = match kind {
            EntryPointKind::Legacy => EntryPoint::Legacy(LegacyEntryPoint::parse(buffer, config)?),
            EntryPointKind::V21 => EntryPoint::V21(EntryPoint21::parse(buffer, config)?),
            EntryPointKind::V30 => EntryPoint::V30(EntryPoint30::parse(buffer, config)?),
        };
        log::debug!(
            "SMBIOS {:?} entry point, version {:?}, table at {:#x} ({} bytes).",
            kind,
            entry_point.version(),
            entry_point.table_area().address,
            entry_point.table_area().length
        );
        Ok(entry_point)
    }

    pub fn kind(&self) -> EntryPointKind {
        match self {
            EntryPoint::Legacy(_) => EntryPointKind::Legacy,
            EntryPoint::V21(_) => EntryPointKind::V21,
            EntryPoint::V30(_) => EntryPointKind::V30,
        }
    }

    pub fn anchor(&self) -> &'static [u8] {
        self.kind().anchor()
    }

    pub fn checksum(&self) -> u8 {
        match self {
            EntryPoint::Legacy(ep) => ep.layout.checksum,
            EntryPoint::V21(ep) => ep.layout.checksum,
            EntryPoint::V30(ep) => ep.layout.checksum,
        }
    }

    /// The structure length the checksum covers.
    pub fn length(&self) -> usize {
        self.as_bytes().len()
    }

    /// The checksummed entry point bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        match self {
            EntryPoint::Legacy(ep) => ep.data,
            EntryPoint::V21(ep) => ep.data,
            EntryPoint::V30(ep) => ep.data,
        }
    }

    pub fn version(&self) -> Option<SmbiosVersion> {
        match self {
            EntryPoint::Legacy(ep) => ep.version(),
            EntryPoint::V21(ep) => Some(ep.version()),
            EntryPoint::V30(ep) => Some(ep.version()),
        }
    }

    pub fn table_area(&self) -> TableArea {
        match self {
            EntryPoint::Legacy(ep) => ep.table_area(),
            EntryPoint::V21(ep) => ep.table_area(),
            EntryPoint::V30(ep) => ep.table_area(),
        }
    }

    /// Number of structures in the table; 3.0 entry points do not report it.
    pub fn structure_count(&self) -> Option<u16> {
        self.table_area().structure_count
    }
}

fn verify_checksum(window: &[u8], what: &str, config: &DecodeConfig) -> Result<(), DmiError> {
    if checksum::is_valid(window) {
        return Ok(());
    }
    match config.checksum_policy {
        ChecksumPolicy::Strict => {
            log::error!("{} checksum mismatch: {} bytes sum to {:#04x}.", what, window.len(), checksum::sum(window));
            Err(DmiError::ChecksumMismatch)
        }
        ChecksumPolicy::Warn => {
            log::warn!("{} checksum mismatch ignored: {} bytes sum to {:#04x}.", what, window.len(), checksum::sum(window));
            Ok(())
        }
    }
}

/// Reads the declared length field and checks it against the layout minimum and the buffer.
fn declared_length(buffer: &[u8], field_offset: usize, minimum: usize) -> Result<usize, DmiError> {
    let length = buffer.get(field_offset).copied().ok_or(DmiError::TruncatedEntryPoint)? as usize;
    if length < minimum || length > buffer.len() {
        log::error!("Entry point declares length {:#x}; minimum {:#x}, buffer {:#x}.", length, minimum, buffer.len());
        Err(DmiError::TruncatedEntryPoint)?;
    }
    Ok(length)
}

impl<'a> LegacyEntryPoint<'a> {
    fn parse(buffer: &'a [u8], config: &DecodeConfig) -> Result<Self, DmiError> {
        let (layout, _) = LegacyLayout::read_from_prefix(buffer).map_err(|_| DmiError::TruncatedEntryPoint)?;
        let data = &buffer[..mem::size_of::<LegacyLayout>()];
        verify_checksum(data, "Legacy entry point", config)?;
        Ok(Self { data, layout })
    }

    pub fn version(&self) -> Option<SmbiosVersion> {
        SmbiosVersion::from_bcd(self.layout.bcd_revision)
    }

    pub fn bcd_revision(&self) -> u8 {
        self.layout.bcd_revision
    }

    pub fn table_area(&self) -> TableArea {
        TableArea {
            address: self.layout.table_address.get() as u64,
            length: self.layout.table_length.get() as usize,
            structure_count: Some(self.layout.structure_count.get()),
            version: self.version(),
        }
    }
}

impl<'a> EntryPoint21<'a> {
    fn parse(buffer: &'a [u8], config: &DecodeConfig) -> Result<Self, DmiError> {
        let length = declared_length(buffer, 5, V21_ERRATA_LENGTH)?;
        if length == V21_ERRATA_LENGTH {
            log::warn!("SMBIOS 2.1 entry point reports length {:#x}; accepting.", length);
        }

        // A 30-byte buffer lacks the trailing BCD revision; decode from a zero-padded copy.
        let full_size = mem::size_of::<Smbios21Layout>();
        let available = buffer.len().min(full_size);
        let mut raw = [0u8; mem::size_of::<Smbios21Layout>()];
        raw[..available].copy_from_slice(&buffer[..available]);
        let (layout, _) = Smbios21Layout::read_from_prefix(&raw[..]).map_err(|_| DmiError::TruncatedEntryPoint)?;

        let data = &buffer[..length];
        verify_checksum(data, "SMBIOS 2.1 entry point", config)?;

        if config.verify_intermediate_entry_point {
            if &layout.intermediate.anchor != LEGACY_ANCHOR {
                log::error!("SMBIOS 2.1 entry point intermediate anchor is {:02x?}.", layout.intermediate.anchor);
                Err(DmiError::UnsupportedEntryPoint)?;
            }
            if available == full_size {
                verify_checksum(&buffer[INTERMEDIATE_OFFSET..full_size], "SMBIOS 2.1 intermediate entry point", config)?;
            } else {
                log::warn!("SMBIOS 2.1 intermediate entry point is incomplete; checksum not verified.");
            }
        }

        let bcd_revision = (available == full_size).then_some(layout.intermediate.bcd_revision);
        Ok(Self { data, layout, bcd_revision })
    }

    pub fn version(&self) -> SmbiosVersion {
        SmbiosVersion::new(self.layout.major_version, self.layout.minor_version, 0)
    }

    pub fn max_structure_size(&self) -> u16 {
        self.layout.max_structure_size.get()
    }

    pub fn entry_point_revision(&self) -> u8 {
        self.layout.entry_point_revision
    }

    pub fn formatted_area(&self) -> [u8; 5] {
        self.layout.formatted_area
    }

    /// The BCD revision from the intermediate structure, when the buffer held it.
    pub fn bcd_revision(&self) -> Option<u8> {
        self.bcd_revision
    }

    pub fn table_area(&self) -> TableArea {
        let intermediate = &self.layout.intermediate;
        TableArea {
            address: intermediate.table_address.get() as u64,
            length: intermediate.table_length.get() as usize,
            structure_count: Some(intermediate.structure_count.get()),
            version: Some(self.version()),
        }
    }
}

impl<'a> EntryPoint30<'a> {
    fn parse(buffer: &'a [u8], config: &DecodeConfig) -> Result<Self, DmiError> {
        let length = declared_length(buffer, 6, mem::size_of::<Smbios30Layout>())?;
        let (layout, _) = Smbios30Layout::read_from_prefix(buffer).map_err(|_| DmiError::TruncatedEntryPoint)?;
        let data = &buffer[..length];
        verify_checksum(data, "SMBIOS 3.0 entry point", config)?;
        Ok(Self { data, layout })
    }

    pub fn version(&self) -> SmbiosVersion {
        SmbiosVersion::new(self.layout.major_version, self.layout.minor_version, self.layout.docrev)
    }

    pub fn entry_point_revision(&self) -> u8 {
        self.layout.entry_point_revision
    }

    /// Upper bound on the table size; the table ends at the end-of-table structure, which may come earlier.
    pub fn table_max_size(&self) -> u32 {
        self.layout.table_max_size.get()
    }

    pub fn table_area(&self) -> TableArea {
        TableArea {
            address: self.layout.table_address.get(),
            length: self.layout.table_max_size.get() as usize,
            structure_count: None,
            version: Some(self.version()),
        }
    }
}
