//! Dispatch from raw structures to typed views.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::{
    header::{is_oem_type, TableType},
    record::RawRecord,
    tables::{
        BaseboardInformation, BiosInformation, CacheInformation, ChassisInformation, CoolingDevice, OemStrings, Probe,
        SystemInformation, SystemSlots, TableView,
    },
};

/// A structure decoded into the typed view for its type.
///
/// Types without a dedicated view keep the [`RawRecord`], so nothing walked is ever dropped.
#[derive(Debug, Clone, Copy)]
pub enum DmiTable<'a> {
    Bios(BiosInformation<'a>),
    System(SystemInformation<'a>),
    Baseboard(BaseboardInformation<'a>),
    Chassis(ChassisInformation<'a>),
    Cache(CacheInformation<'a>),
    SystemSlots(SystemSlots<'a>),
    OemStrings(OemStrings<'a>),
    VoltageProbe(Probe<'a>),
    CoolingDevice(CoolingDevice<'a>),
    TemperatureProbe(Probe<'a>),
    CurrentProbe(Probe<'a>),
    Inactive(RawRecord<'a>),
    EndOfTable(RawRecord<'a>),
    /// Types 128 through 255.
    Oem(RawRecord<'a>),
    /// Defined or reserved types this crate has no view for.
    Unrecognized(RawRecord<'a>),
}

impl<'a> DmiTable<'a> {
    pub fn from_record(record: RawRecord<'a>) -> Self {
        let Some(table_type) = TableType::from_raw(record.record_type()) else {
            if is_oem_type(record.record_type()) {
                return DmiTable::Oem(record);
            }
            return DmiTable::Unrecognized(record);
        };

        match table_type {
            TableType::Bios => DmiTable::Bios(BiosInformation::from_record_unchecked(record)),
            TableType::System => DmiTable::System(SystemInformation::from_record_unchecked(record)),
            TableType::Baseboard => DmiTable::Baseboard(BaseboardInformation::from_record_unchecked(record)),
            TableType::Chassis => DmiTable::Chassis(ChassisInformation::from_record_unchecked(record)),
            TableType::Cache => DmiTable::Cache(CacheInformation::from_record_unchecked(record)),
            TableType::SystemSlots => DmiTable::SystemSlots(SystemSlots::from_record_unchecked(record)),
            TableType::OemStrings => DmiTable::OemStrings(OemStrings::from_record_unchecked(record)),
            TableType::VoltageProbe => DmiTable::VoltageProbe(Probe::from_record_unchecked(record)),
            TableType::CoolingDevice => DmiTable::CoolingDevice(CoolingDevice::from_record_unchecked(record)),
            TableType::TemperatureProbe => DmiTable::TemperatureProbe(Probe::from_record_unchecked(record)),
            TableType::CurrentProbe => DmiTable::CurrentProbe(Probe::from_record_unchecked(record)),
            TableType::Inactive => DmiTable::Inactive(record),
            TableType::EndOfTable => DmiTable::EndOfTable(record),
            _ => DmiTable::Unrecognized(record),
        }
    }

    /// The structure underneath the view.
    pub fn record(&self) -> &RawRecord<'a> {
        match self {
            DmiTable::Bios(view) => view.record(),
            DmiTable::System(view) => view.record(),
            DmiTable::Baseboard(view) => view.record(),
            DmiTable::Chassis(view) => view.record(),
            DmiTable::Cache(view) => view.record(),
            DmiTable::SystemSlots(view) => view.record(),
            DmiTable::OemStrings(view) => view.record(),
            DmiTable::VoltageProbe(view) | DmiTable::TemperatureProbe(view) | DmiTable::CurrentProbe(view) => {
                view.record()
            }
            DmiTable::CoolingDevice(view) => view.record(),
            DmiTable::Inactive(record)
            | DmiTable::EndOfTable(record)
            | DmiTable::Oem(record)
            | DmiTable::Unrecognized(record) => record,
        }
    }

    pub fn handle(&self) -> u16 {
        self.record().handle()
    }

    /// Name of the structure type, `None` for OEM and reserved types.
    pub fn name(&self) -> Option<&'static str> {
        TableType::from_raw(self.record().record_type()).map(|table_type| table_type.name())
    }
}

impl<'a> From<RawRecord<'a>> for DmiTable<'a> {
    fn from(record: RawRecord<'a>) -> Self {
        DmiTable::from_record(record)
    }
}
