//! Cache Information (Type 7)
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use bitfield::bitfield;

use crate::{header::TableType, record::RawRecord, DmiError};

bitfield! {
    /// Cache configuration word (offset 05h).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct CacheConfiguration(u16);
    impl Debug;
    /// Cache level minus one: 0 is L1.
    pub u8, level_index, _: 2, 0;
    pub socketed, _: 3;
    pub u8, location_raw, _: 6, 5;
    pub enabled, _: 7;
    pub u8, mode_raw, _: 9, 8;
}

bitfield! {
    /// Cache size word (offsets 07h and 09h).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct CacheSize(u16);
    impl Debug;
    pub u16, size, _: 14, 0;
    /// Clear for 1K units, set for 64K units.
    pub granularity_64k, _: 15;
}

bitfield! {
    /// Cache size double word (offsets 13h and 17h, 3.1+).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct CacheSize2(u32);
    impl Debug;
    pub u32, size, _: 30, 0;
    pub granularity_64k, _: 31;
}

bitfield! {
    /// Supported and current SRAM type (offsets 0Bh and 0Dh).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct SramType(u16);
    impl Debug;
    pub other, _: 0;
    pub unknown, _: 1;
    pub non_burst, _: 2;
    pub burst, _: 3;
    pub pipeline_burst, _: 4;
    pub synchronous, _: 5;
    pub asynchronous, _: 6;
}

impl CacheConfiguration {
    /// Cache level, 1 through 8.
    pub fn level(&self) -> u8 {
        self.level_index() + 1
    }

    pub fn location(&self) -> CacheLocation {
        match self.location_raw() {
            0 => CacheLocation::Internal,
            1 => CacheLocation::External,
            2 => CacheLocation::Reserved,
            _ => CacheLocation::Unknown,
        }
    }

    pub fn mode(&self) -> CacheMode {
        match self.mode_raw() {
            0 => CacheMode::WriteThrough,
            1 => CacheMode::WriteBack,
            2 => CacheMode::VariesWithAddress,
            _ => CacheMode::Unknown,
        }
    }
}

impl CacheSize {
    pub fn kib(&self) -> u64 {
        let size = self.size() as u64;
        if self.granularity_64k() {
            size * 64
        } else {
            size
        }
    }
}

impl CacheSize2 {
    pub fn kib(&self) -> u64 {
        let size = self.size() as u64;
        if self.granularity_64k() {
            size * 64
        } else {
            size
        }
    }
}

named_values! {
    /// Location relative to the CPU module.
    pub enum CacheLocation {
        Internal = 0x00 => "Internal",
        External = 0x01 => "External",
        Reserved = 0x02 => "Reserved",
        Unknown = 0x03 => "Unknown",
    }
}

named_values! {
    pub enum CacheMode {
        WriteThrough = 0x00 => "Write-through",
        WriteBack = 0x01 => "Write-back",
        VariesWithAddress = 0x02 => "Varies with memory address",
        Unknown = 0x03 => "Unknown",
    }
}

named_values! {
    pub enum CacheErrorCorrection {
        Unspecified = 0x00 => "Unspecified",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        None = 0x03 => "None",
        Parity = 0x04 => "Parity",
        SingleBit = 0x05 => "Single-bit ECC",
        MultiBit = 0x06 => "Multi-bit ECC",
    }
}

named_values! {
    /// Logical cache type.
    pub enum CacheType {
        Unspecified = 0x00 => "Unspecified",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        Instruction = 0x03 => "Instruction",
        Data = 0x04 => "Data",
        Unified = 0x05 => "Unified",
    }
}

named_values! {
    pub enum CacheAssociativity {
        Unspecified = 0x00 => "Unspecified",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        DirectMapped = 0x03 => "Direct mapped",
        TwoWay = 0x04 => "2-way set-associative",
        FourWay = 0x05 => "4-way set-associative",
        Fully = 0x06 => "Fully associative",
        EightWay = 0x07 => "8-way set-associative",
        SixteenWay = 0x08 => "16-way set-associative",
        TwelveWay = 0x09 => "12-way set-associative",
        TwentyFourWay = 0x0A => "24-way set-associative",
        ThirtyTwoWay = 0x0B => "32-way set-associative",
        FortyEightWay = 0x0C => "48-way set-associative",
        SixtyFourWay = 0x0D => "64-way set-associative",
        TwentyWay = 0x0E => "20-way set-associative",
    }
}

/// One processor cache.
#[derive(Debug, Clone, Copy)]
pub struct CacheInformation<'a> {
    record: RawRecord<'a>,
}

table_view!(CacheInformation, [TableType::Cache]);

impl<'a> CacheInformation<'a> {
    pub fn socket_designation(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x04)
    }

    pub fn configuration(&self) -> Option<CacheConfiguration> {
        self.record.word(0x05).map(CacheConfiguration)
    }

    pub fn maximum_size(&self) -> Option<CacheSize> {
        self.record.word(0x07).map(CacheSize)
    }

    pub fn installed_size(&self) -> Option<CacheSize> {
        self.record.word(0x09).map(CacheSize)
    }

    pub fn supported_sram_type(&self) -> Option<SramType> {
        self.record.word(0x0B).map(SramType)
    }

    pub fn current_sram_type(&self) -> Option<SramType> {
        self.record.word(0x0D).map(SramType)
    }

    /// Speed in nanoseconds (2.1+); `None` when absent or unknown.
    pub fn speed_ns(&self) -> Option<u8> {
        self.record.byte(0x0F).filter(|speed| *speed != 0)
    }

    pub fn error_correction_raw(&self) -> Option<u8> {
        self.record.byte(0x10)
    }

    pub fn error_correction(&self) -> Option<CacheErrorCorrection> {
        CacheErrorCorrection::try_from(self.error_correction_raw()?).ok()
    }

    pub fn system_cache_type_raw(&self) -> Option<u8> {
        self.record.byte(0x11)
    }

    pub fn system_cache_type(&self) -> Option<CacheType> {
        CacheType::try_from(self.system_cache_type_raw()?).ok()
    }

    pub fn associativity_raw(&self) -> Option<u8> {
        self.record.byte(0x12)
    }

    pub fn associativity(&self) -> Option<CacheAssociativity> {
        CacheAssociativity::try_from(self.associativity_raw()?).ok()
    }

    /// 3.1+
    pub fn maximum_size2(&self) -> Option<CacheSize2> {
        self.record.dword(0x13).map(CacheSize2)
    }

    /// 3.1+
    pub fn installed_size2(&self) -> Option<CacheSize2> {
        self.record.dword(0x17).map(CacheSize2)
    }

    /// Maximum cache size in KiB, taken from the 3.1 field when the 16-bit one is saturated.
    pub fn maximum_size_kib(&self) -> Option<u64> {
        Some(Self::size_kib(self.maximum_size()?, self.maximum_size2()))
    }

    /// Installed cache size in KiB, taken from the 3.1 field when the 16-bit one is saturated.
    pub fn installed_size_kib(&self) -> Option<u64> {
        Some(Self::size_kib(self.installed_size()?, self.installed_size2()))
    }

    fn size_kib(size: CacheSize, size2: Option<CacheSize2>) -> u64 {
        match size2 {
            Some(size2) if size.0 == 0xFFFF => size2.kib(),
            _ => size.kib(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::{tables::TableView, test_support::record};
    use std::vec::Vec;

    fn l3_cache(max: u16, installed: u16, size2: Option<(u32, u32)>) -> Vec<u8> {
        let mut formatted = std::vec![1];
        // L3, internal, enabled, write-back.
        formatted.extend_from_slice(&0x0182u16.to_le_bytes());
        formatted.extend_from_slice(&max.to_le_bytes());
        formatted.extend_from_slice(&installed.to_le_bytes());
        formatted.extend_from_slice(&0x0020u16.to_le_bytes());
        formatted.extend_from_slice(&0x0020u16.to_le_bytes());
        formatted.extend_from_slice(&[0, 0x05, 0x05, 0x08]);
        if let Some((max2, installed2)) = size2 {
            formatted.extend_from_slice(&max2.to_le_bytes());
            formatted.extend_from_slice(&installed2.to_le_bytes());
        }
        record(7, 0x0007, &formatted, &["L3 Cache"])
    }

    #[test]
    fn test_configuration() {
        let bytes = l3_cache(0x8200, 0x8200, None);
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let cache = CacheInformation::from_record(raw).unwrap();
        let config = cache.configuration().unwrap();

        assert_eq!(config.level(), 3);
        assert!(!config.socketed());
        assert_eq!(config.location(), CacheLocation::Internal);
        assert!(config.enabled());
        assert_eq!(config.mode(), CacheMode::WriteBack);
        assert_eq!(config.mode().name(), "Write-back");
    }

    #[test]
    fn test_sizes_and_enumerations() {
        let bytes = l3_cache(0x8200, 0x8100, None);
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let cache = CacheInformation::from_record(raw).unwrap();

        assert_eq!(cache.socket_designation(), Ok(Some("L3 Cache")));
        assert_eq!(cache.maximum_size_kib(), Some(0x200 * 64));
        assert_eq!(cache.installed_size_kib(), Some(0x100 * 64));
        assert!(cache.supported_sram_type().unwrap().synchronous());
        assert!(!cache.current_sram_type().unwrap().burst());
        assert_eq!(cache.speed_ns(), None);
        assert_eq!(cache.error_correction(), Some(CacheErrorCorrection::SingleBit));
        assert_eq!(cache.system_cache_type(), Some(CacheType::Unified));
        assert_eq!(cache.associativity(), Some(CacheAssociativity::SixteenWay));
        assert_eq!(CacheAssociativity::SixteenWay.name(), "16-way set-associative");
        assert!(cache.maximum_size2().is_none());
    }

    #[test]
    fn test_saturated_size_uses_3_1_field() {
        let bytes = l3_cache(0xFFFF, 0xFFFF, Some((0x8000_0800, 0x0010_0000)));
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let cache = CacheInformation::from_record(raw).unwrap();

        assert_eq!(cache.maximum_size_kib(), Some(0x800 * 64));
        assert_eq!(cache.installed_size_kib(), Some(0x0010_0000));
    }

    #[test]
    fn test_1k_granularity() {
        let size = CacheSize(0x0100);
        assert!(!size.granularity_64k());
        assert_eq!(size.kib(), 256);
        assert_eq!(CacheSize2(0x8000_0002).kib(), 128);
    }

    #[test]
    fn test_2_0_structure_has_no_speed_or_type() {
        let bytes = record(7, 0x0007, &[1, 0x80, 0x01, 0x01, 0x00, 0x01, 0x00, 0x02, 0x00, 0x02, 0x00], &["L1"]);
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let cache = CacheInformation::from_record(raw).unwrap();
        assert_eq!(cache.configuration().map(|c| c.level()), Some(1));
        assert_eq!(cache.maximum_size_kib(), Some(1));
        assert_eq!(cache.installed_size_kib(), Some(1));
        assert!(cache.speed_ns().is_none());
        assert!(cache.system_cache_type().is_none());
        assert!(cache.associativity().is_none());
    }
}
