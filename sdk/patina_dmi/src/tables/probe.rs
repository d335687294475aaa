//! Voltage Probe (Type 26), Temperature Probe (Type 28) and Electrical Current Probe (Type 29)
//!
//! The three probe structures share one layout and differ only in the unit of their readings.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use bitfield::bitfield;

use crate::{
    header::TableType,
    record::RawRecord,
    tables::{known_word, status::DeviceStatus},
    DmiError,
};

bitfield! {
    /// Location and status byte (offset 05h).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ProbeLocationAndStatus(u8);
    impl Debug;
    pub u8, location_raw, _: 4, 0;
    pub u8, status_raw, _: 7, 5;
}

impl ProbeLocationAndStatus {
    pub fn location(&self) -> Option<ProbeLocation> {
        ProbeLocation::try_from(self.location_raw()).ok()
    }

    pub fn status(&self) -> Option<DeviceStatus> {
        DeviceStatus::try_from(self.status_raw()).ok()
    }
}

named_values! {
    pub enum ProbeLocation {
        Unspecified = 0x00 => "Unspecified",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        Processor = 0x03 => "Processor",
        Disk = 0x04 => "Disk",
        PeripheralBay = 0x05 => "Peripheral bay",
        SystemManagementModule = 0x06 => "System management module",
        Motherboard = 0x07 => "Motherboard",
        MemoryModule = 0x08 => "Memory module",
        ProcessorModule = 0x09 => "Processor module",
        PowerUnit = 0x0A => "Power unit",
        AddInCard = 0x0B => "Add-in card",
        FrontPanelBoard = 0x0C => "Front panel board",
        BackPanelLocation = 0x0D => "Back panel location",
        PowerSystemBoard = 0x0E => "Power system board",
        DriveBackPlane = 0x0F => "Drive back plane",
    }
}

/// What a probe measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Readings in millivolts, resolution in tenths of millivolts.
    Voltage,
    /// Readings in tenths of degrees Celsius, resolution in thousandths of degrees.
    Temperature,
    /// Readings in milliamps, resolution in tenths of milliamps.
    Current,
}

#[derive(Debug, Clone, Copy)]
pub struct Probe<'a> {
    record: RawRecord<'a>,
}

table_view!(Probe, [TableType::VoltageProbe, TableType::TemperatureProbe, TableType::CurrentProbe]);

impl<'a> Probe<'a> {
    pub fn kind(&self) -> ProbeKind {
        match TableType::from_raw(self.record.record_type()) {
            Some(TableType::VoltageProbe) => ProbeKind::Voltage,
            Some(TableType::TemperatureProbe) => ProbeKind::Temperature,
            _ => ProbeKind::Current,
        }
    }

    pub fn description(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x04)
    }

    pub fn location_and_status(&self) -> Option<ProbeLocationAndStatus> {
        self.record.byte(0x05).map(ProbeLocationAndStatus)
    }

    pub fn maximum_value(&self) -> Option<u16> {
        known_word(self.record.word(0x06))
    }

    pub fn minimum_value(&self) -> Option<u16> {
        known_word(self.record.word(0x08))
    }

    pub fn resolution(&self) -> Option<u16> {
        known_word(self.record.word(0x0A))
    }

    pub fn tolerance(&self) -> Option<u16> {
        known_word(self.record.word(0x0C))
    }

    /// Accuracy in hundredths of a percent.
    pub fn accuracy(&self) -> Option<u16> {
        known_word(self.record.word(0x0E))
    }

    pub fn oem_defined(&self) -> Option<u32> {
        self.record.dword(0x10)
    }

    /// Present only when the structure is longer than 14h bytes.
    pub fn nominal_value(&self) -> Option<u16> {
        known_word(self.record.word(0x14))
    }
}
