//! BIOS Information (Type 0)
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
    /// BIOS characteristics (offset 0Ah).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct BiosCharacteristics(u64);
    impl Debug;
    pub unknown, _: 2;
    pub not_supported, _: 3;
    pub isa, _: 4;
    pub mca, _: 5;
    pub eisa, _: 6;
    pub pci, _: 7;
    pub pcmcia, _: 8;
    pub plug_and_play, _: 9;
    pub apm, _: 10;
    pub upgradeable, _: 11;
    pub shadowing_allowed, _: 12;
    pub vl_vesa, _: 13;
    pub escd, _: 14;
    pub boot_from_cd, _: 15;
    pub selectable_boot, _: 16;
    pub rom_socketed, _: 17;
    pub boot_from_pcmcia, _: 18;
    pub edd, _: 19;
    pub print_screen, _: 26;
    pub keyboard_8042, _: 27;
    pub serial, _: 28;
    pub printer, _: 29;
    pub cga_mono_video, _: 30;
    pub nec_pc98, _: 31;
    /// Bits 32-47 are reserved for the BIOS vendor, bits 48-63 for the system vendor.
    pub u32, vendor_reserved, _: 63, 32;
}

bitfield! {
    /// BIOS characteristics extension byte 1 (offset 12h).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct BiosCharacteristicsExt1(u8);
    impl Debug;
    pub acpi, _: 0;
    pub usb_legacy, _: 1;
    pub agp, _: 2;
    pub i2o_boot, _: 3;
    pub ls120_boot, _: 4;
    pub atapi_zip_boot, _: 5;
    pub ieee1394_boot, _: 6;
    pub smart_battery, _: 7;
}

bitfield! {
    /// BIOS characteristics extension byte 2 (offset 13h).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct BiosCharacteristicsExt2(u8);
    impl Debug;
    pub boot_specification, _: 0;
    pub network_boot_key, _: 1;
    pub targeted_content_distribution, _: 2;
    pub uefi, _: 3;
    pub virtual_machine, _: 4;
    pub manufacturing_mode_supported, _: 5;
    pub manufacturing_mode_enabled, _: 6;
}

bitfield! {
    /// Extended BIOS ROM size (offset 18h, 3.1+). Bits 0-13 size, bits 14-15 unit.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ExtendedRomSize(u16);
    impl Debug;
    pub u16, size, _: 13, 0;
    pub u8, unit, _: 15, 14;
}

impl BiosCharacteristics {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl ExtendedRomSize {
    /// Size in bytes; `None` for the reserved units.
    pub fn bytes(&self) -> Option<u64> {
        let size = self.size() as u64;
        match self.unit() {
            0 => Some(size << 20),
            1 => Some(size << 30),
            _ => None,
        }
    }
}

/// Information about the system firmware.
#[derive(Debug, Clone, Copy)]
pub struct BiosInformation<'a> {
    record: RawRecord<'a>,
}

table_view!(BiosInformation, [TableType::Bios]);

impl<'a> BiosInformation<'a> {
    pub fn vendor(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x04)
    }

    pub fn version(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x05)
    }

    /// Segment of the BIOS runtime image in the legacy address space. 0 on UEFI systems.
    pub fn starting_segment(&self) -> Option<u16> {
        self.record.word(0x06)
    }

    pub fn release_date(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x08)
    }

    pub fn rom_size_raw(&self) -> Option<u8> {
        self.record.byte(0x09)
    }

    /// Size of the physical device holding the BIOS, in bytes.
    ///
    /// A raw size of `0xFF` defers to the extended size field.
    pub fn rom_size(&self) -> Option<u64> {
        match self.rom_size_raw()? {
            0xFF => self.extended_rom_size()?.bytes(),
            raw => Some((raw as u64 + 1) << 16),
        }
    }

    pub fn characteristics(&self) -> Option<BiosCharacteristics> {
        self.record.qword(0x0A).map(BiosCharacteristics)
    }

    pub fn characteristics_ext1(&self) -> Option<BiosCharacteristicsExt1> {
        self.record.byte(0x12).map(BiosCharacteristicsExt1)
    }

    pub fn characteristics_ext2(&self) -> Option<BiosCharacteristicsExt2> {
        self.record.byte(0x13).map(BiosCharacteristicsExt2)
    }

    /// System BIOS major and minor release. `None` when absent or reported as `FFh FFh`.
    pub fn system_bios_release(&self) -> Option<(u8, u8)> {
        self.release_pair(0x14)
    }

    /// Embedded controller firmware major and minor release. `None` when absent or reported as `FFh FFh`.
    pub fn ec_firmware_release(&self) -> Option<(u8, u8)> {
        self.release_pair(0x16)
    }

    pub fn extended_rom_size(&self) -> Option<ExtendedRomSize> {
        self.record.word(0x18).map(ExtendedRomSize)
    }

    fn release_pair(&self, offset: usize) -> Option<(u8, u8)> {
        match self.record.bytes::<2>(offset)? {
            [0xFF, 0xFF] => None,
            [major, minor] => Some((major, minor)),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::{tables::TableView, test_support::record};
    use std::vec::Vec;

    fn bios_3_1() -> Vec<u8> {
        let mut formatted = std::vec![1, 2, 0x00, 0xE0, 3, 0xFF];
        formatted.extend_from_slice(&0x0000_0001_0000_0880u64.to_le_bytes());
        formatted.extend_from_slice(&[0x03, 0x0D, 5, 19, 0xFF, 0xFF]);
        formatted.extend_from_slice(&0x4010u16.to_le_bytes());
        record(0, 0x0000, &formatted, &["Patina", "1.0.5", "10/19/2026"])
    }

    #[test]
    fn test_bios_fields() {
        let bytes = bios_3_1();
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let bios = BiosInformation::from_record(raw).unwrap();

        assert_eq!(bios.vendor(), Ok(Some("Patina")));
        assert_eq!(bios.version(), Ok(Some("1.0.5")));
        assert_eq!(bios.release_date(), Ok(Some("10/19/2026")));
        assert_eq!(bios.starting_segment(), Some(0xE000));
        assert_eq!(bios.system_bios_release(), Some((5, 19)));
        assert_eq!(bios.ec_firmware_release(), None);
    }

    #[test]
    fn test_characteristics() {
        let bytes = bios_3_1();
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let bios = BiosInformation::from_record(raw).unwrap();

        let characteristics = bios.characteristics().unwrap();
        assert!(characteristics.pci());
        assert!(characteristics.upgradeable());
        assert!(!characteristics.isa());
        assert_eq!(characteristics.vendor_reserved(), 1);

        let ext1 = bios.characteristics_ext1().unwrap();
        assert!(ext1.acpi());
        assert!(ext1.usb_legacy());
        let ext2 = bios.characteristics_ext2().unwrap();
        assert!(ext2.boot_specification());
        assert!(ext2.uefi());
        assert!(!ext2.virtual_machine());
    }

    #[test]
    fn test_extended_rom_size() {
        let bytes = bios_3_1();
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let bios = BiosInformation::from_record(raw).unwrap();

        let extended = bios.extended_rom_size().unwrap();
        assert_eq!(extended.size(), 16);
        assert_eq!(extended.unit(), 1);
        assert_eq!(bios.rom_size(), Some(16 << 30));
    }

    #[test]
    fn test_legacy_rom_size_and_missing_fields() {
        // A 2.0-era structure ends after the characteristics.
        let mut formatted = std::vec![1, 0, 0x00, 0xF0, 0, 0x0F];
        formatted.extend_from_slice(&0u64.to_le_bytes());
        let bytes = record(0, 0, &formatted, &["Vendor"]);
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let bios = BiosInformation::from_record(raw).unwrap();

        assert_eq!(bios.rom_size(), Some(1 << 20));
        assert_eq!(bios.version(), Ok(None));
        assert_eq!(bios.release_date(), Ok(None));
        assert!(bios.characteristics_ext1().is_none());
        assert!(bios.system_bios_release().is_none());
        assert!(bios.extended_rom_size().is_none());
    }

    #[test]
    fn test_reserved_unit_has_no_size() {
        assert_eq!(ExtendedRomSize(0x8010).bytes(), None);
        assert_eq!(ExtendedRomSize(0x0020).bytes(), Some(32 << 20));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let bytes = record(1, 0, &[0; 4], &[]);
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        assert!(BiosInformation::from_record(raw).is_none());
    }
}
