//! System Information (Type 1)
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use r_efi::efi;

use crate::{header::TableType, record::RawRecord, DmiError};

named_values! {
    /// Event that caused the system to power up.
    pub enum SystemWakeup {
        Reserved = 0x00 => "Reserved",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        ApmTimer = 0x03 => "APM timer",
        ModemRing = 0x04 => "Modem ring",
        LanRemote = 0x05 => "LAN remote",
        PowerSwitch = 0x06 => "Power switch",
        PciPme = 0x07 => "PCI PME#",
        AcPowerRestored = 0x08 => "AC power restored",
    }
}

/// Attributes of the overall system.
#[derive(Debug, Clone, Copy)]
pub struct SystemInformation<'a> {
    record: RawRecord<'a>,
}

table_view!(SystemInformation, [TableType::System]);

impl<'a> SystemInformation<'a> {
    pub fn manufacturer(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x04)
    }

    pub fn product_name(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x05)
    }

    pub fn version(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x06)
    }

    pub fn serial_number(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x07)
    }

    /// The 16 UUID bytes as stored (2.1+).
    pub fn uuid_bytes(&self) -> Option<[u8; 16]> {
        self.record.bytes(0x08)
    }

    /// The system UUID, decoded with the little-endian field order SMBIOS 2.6 made normative.
    ///
    /// All-zero ("not present") and all-`FFh` ("not set") values give `None`.
    pub fn uuid(&self) -> Option<efi::Guid> {
        let bytes = self.uuid_bytes()?;
        if bytes.iter().all(|b| *b == 0x00) || bytes.iter().all(|b| *b == 0xFF) {
            return None;
        }
        Some(efi::Guid::from_bytes(&bytes))
    }

    pub fn wakeup_type_raw(&self) -> Option<u8> {
        self.record.byte(0x18)
    }

    pub fn wakeup_type(&self) -> Option<SystemWakeup> {
        SystemWakeup::try_from(self.wakeup_type_raw()?).ok()
    }

    /// 2.4+
    pub fn sku_number(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x19)
    }

    /// 2.4+
    pub fn family(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x1A)
    }
}
