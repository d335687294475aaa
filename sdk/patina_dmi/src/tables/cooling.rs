//! Cooling Device (Type 27)
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
    /// Device type and status byte (offset 06h).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct CoolingTypeAndStatus(u8);
    impl Debug;
    pub u8, device_type_raw, _: 4, 0;
    pub u8, status_raw, _: 7, 5;
}

impl CoolingTypeAndStatus {
    pub fn device_type(&self) -> Option<CoolingDeviceType> {
        CoolingDeviceType::try_from(self.device_type_raw()).ok()
    }

    pub fn status(&self) -> Option<DeviceStatus> {
        DeviceStatus::try_from(self.status_raw()).ok()
    }
}

named_values! {
    pub enum CoolingDeviceType {
        Unspecified = 0x00 => "Unspecified",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        Fan = 0x03 => "Fan",
        CentrifugalBlower = 0x04 => "Centrifugal blower",
        ChipFan = 0x05 => "Chip fan",
        CabinetFan = 0x06 => "Cabinet fan",
        PowerSupplyFan = 0x07 => "Power supply fan",
        HeatPipe = 0x08 => "Heat pipe",
        IntegratedRefrigeration = 0x09 => "Integrated refrigeration",
        ActiveCooling = 0x10 => "Active cooling",
        PassiveCooling = 0x11 => "Passive cooling",
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CoolingDevice<'a> {
    record: RawRecord<'a>,
}

table_view!(CoolingDevice, [TableType::CoolingDevice]);

impl<'a> CoolingDevice<'a> {
    /// Handle of the temperature probe monitoring this device.
    pub fn temperature_probe_handle(&self) -> Option<u16> {
        self.record.handle_ref(0x04)
    }

    pub fn type_and_status(&self) -> Option<CoolingTypeAndStatus> {
        self.record.byte(0x06).map(CoolingTypeAndStatus)
    }

    /// Devices sharing a non-zero unit group are redundant with each other.
    pub fn cooling_unit_group(&self) -> Option<u8> {
        self.record.byte(0x07).filter(|group| *group != 0)
    }

    pub fn oem_defined(&self) -> Option<u32> {
        self.record.dword(0x08)
    }

    /// Nominal speed in revolutions per minute.
    pub fn nominal_speed(&self) -> Option<u16> {
        known_word(self.record.word(0x0C))
    }

    /// 2.7+
    pub fn description(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x0E)
    }
}
