//! Baseboard (or Module) Information (Type 2)
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
    /// Baseboard feature flags (offset 09h).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct BaseboardFeatureFlags(u8);
    impl Debug;
    /// The board is a hosting board, e.g. a motherboard.
    pub hosting_board, _: 0;
    /// The board needs at least one daughter board or auxiliary card to function.
    pub requires_daughter_board, _: 1;
    pub removable, _: 2;
    /// The board can be replaced with a physically different board.
    pub replaceable, _: 3;
    pub hot_swappable, _: 4;
}

named_values! {
    /// Kind of board.
    pub enum BaseboardType {
        Unknown = 0x01 => "Unknown",
        Other = 0x02 => "Other",
        ServerBlade = 0x03 => "Server blade",
        ConnectivitySwitch = 0x04 => "Connectivity switch",
        SystemManagementModule = 0x05 => "System management module",
        ProcessorModule = 0x06 => "Processor module",
        IoModule = 0x07 => "I/O module",
        MemoryModule = 0x08 => "Memory module",
        DaughterBoard = 0x09 => "Daughter board",
        Motherboard = 0x0A => "Motherboard",
        ProcessorMemoryModule = 0x0B => "Processor/memory module",
        ProcessorIoModule = 0x0C => "Processor/IO module",
        InterconnectBoard = 0x0D => "Interconnect board",
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BaseboardInformation<'a> {
    record: RawRecord<'a>,
}

table_view!(BaseboardInformation, [TableType::Baseboard]);

impl<'a> BaseboardInformation<'a> {
    pub fn manufacturer(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x04)
    }

    pub fn product(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x05)
    }

    pub fn version(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x06)
    }

    pub fn serial_number(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x07)
    }

    pub fn asset_tag(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x08)
    }

    pub fn feature_flags(&self) -> Option<BaseboardFeatureFlags> {
        self.record.byte(0x09).map(BaseboardFeatureFlags)
    }

    pub fn location_in_chassis(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x0A)
    }

    /// Handle of the chassis structure the board sits in.
    pub fn chassis_handle(&self) -> Option<u16> {
        self.record.handle_ref(0x0B)
    }

    pub fn board_type_raw(&self) -> Option<u8> {
        self.record.byte(0x0D)
    }

    pub fn board_type(&self) -> Option<BaseboardType> {
        BaseboardType::try_from(self.board_type_raw()?).ok()
    }

    /// Handles of the structures contained on this board.
    ///
    /// Handles past the declared length are dropped, so a structure that overstates its count yields fewer.
    pub fn contained_object_handles(&self) -> impl Iterator<Item = u16> + 'a {
        let record = self.record;
        let count = record.byte(0x0E).unwrap_or(0) as usize;
        (0..count).map_while(move |idx| record.word(0x0F + 2 * idx))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::{tables::TableView, test_support::record};
    use std::vec::Vec;

    fn baseboard(count: u8, handles: &[u16]) -> Vec<u8> {
        let mut formatted = std::vec![1, 2, 3, 4, 0, 0x09, 5];
        formatted.extend_from_slice(&0x0003u16.to_le_bytes());
        formatted.push(0x0A);
        formatted.push(count);
        for handle in handles {
            formatted.extend_from_slice(&handle.to_le_bytes());
        }
        record(2, 0x0002, &formatted, &["Acme", "Board", "1.0", "BB-01", "Top"])
    }

    #[test]
    fn test_baseboard_fields() {
        let bytes = baseboard(0, &[]);
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let board = BaseboardInformation::from_record(raw).unwrap();

        assert_eq!(board.manufacturer(), Ok(Some("Acme")));
        assert_eq!(board.product(), Ok(Some("Board")));
        assert_eq!(board.version(), Ok(Some("1.0")));
        assert_eq!(board.serial_number(), Ok(Some("BB-01")));
        assert_eq!(board.asset_tag(), Ok(None));
        assert_eq!(board.location_in_chassis(), Ok(Some("Top")));
        assert_eq!(board.chassis_handle(), Some(3));
        assert_eq!(board.board_type(), Some(BaseboardType::Motherboard));
        assert_eq!(board.board_type().map(|t| t.name()), Some("Motherboard"));

        let flags = board.feature_flags().unwrap();
        assert!(flags.hosting_board());
        assert!(!flags.requires_daughter_board());
        assert!(flags.replaceable());
        assert_eq!(board.contained_object_handles().count(), 0);
    }

    #[test]
    fn test_contained_handles() {
        let bytes = baseboard(3, &[0x10, 0x11, 0x12]);
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let board = BaseboardInformation::from_record(raw).unwrap();
        let handles: Vec<u16> = board.contained_object_handles().collect();
        assert_eq!(handles, [0x10, 0x11, 0x12]);
    }

    #[test]
    fn test_overstated_handle_count_is_bounded() {
        let bytes = baseboard(5, &[0x20, 0x21]);
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let board = BaseboardInformation::from_record(raw).unwrap();
        let handles: Vec<u16> = board.contained_object_handles().collect();
        assert_eq!(handles, [0x20, 0x21]);
    }

    #[test]
    fn test_minimal_structure() {
        let bytes = record(2, 0x0002, &[1, 0, 0, 0], &["Acme"]);
        let (raw, _) = RawRecord::parse(&bytes, 0).unwrap();
        let board = BaseboardInformation::from_record(raw).unwrap();
        assert_eq!(board.manufacturer(), Ok(Some("Acme")));
        assert_eq!(board.asset_tag(), Ok(None));
        assert!(board.feature_flags().is_none());
        assert!(board.chassis_handle().is_none());
        assert!(board.board_type().is_none());
        assert_eq!(board.contained_object_handles().count(), 0);
    }
}
