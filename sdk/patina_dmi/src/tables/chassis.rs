//! System Enclosure or Chassis (Type 3)
//!
//! The SKU number field follows the variable-length contained element list, so its offset depends on the
//! element count and size read from the structure itself.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use bitfield::bitfield;

use crate::{header::TableType, record::RawRecord, tables::baseboard::BaseboardType, DmiError};

const ELEMENTS_OFFSET: usize = 0x15;

bitfield! {
    /// Chassis type byte (offset 05h).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ChassisTypeField(u8);
    impl Debug;
    pub u8, kind, _: 6, 0;
    pub lock_present, _: 7;
}

named_values! {
    pub enum ChassisType {
        Unspecified = 0x00 => "Unspecified",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        Desktop = 0x03 => "Desktop",
        LowProfileDesktop = 0x04 => "Low-profile desktop",
        PizzaBox = 0x05 => "Pizza box",
        MiniTower = 0x06 => "Mini tower",
        Tower = 0x07 => "Tower",
        Portable = 0x08 => "Portable",
        Laptop = 0x09 => "Laptop",
        Notebook = 0x0A => "Notebook",
        Handheld = 0x0B => "Handheld",
        DockingStation = 0x0C => "Docking station",
        AllInOne = 0x0D => "All-in-one",
        SubNotebook = 0x0E => "Sub-notebook",
        SpaceSaving = 0x0F => "Space-saving",
        LunchBox = 0x10 => "Lunch box",
        MainServerChassis = 0x11 => "Main server chassis",
        ExpansionChassis = 0x12 => "Expansion chassis",
        SubChassis = 0x13 => "Sub-chassis",
        BusExpansionChassis = 0x14 => "Bus expansion chassis",
        PeripheralChassis = 0x15 => "Peripheral chassis",
        RaidChassis = 0x16 => "RAID chassis",
        RackMountChassis = 0x17 => "Rack-mount chassis",
        SealedCasePc = 0x18 => "Sealed-case PC",
        MultiSystemChassis = 0x19 => "Multi-system chassis",
        CompactPci = 0x1A => "Compact PCI",
        AdvancedTca = 0x1B => "Advanced TCA",
        Blade = 0x1C => "Blade",
        BladeEnclosure = 0x1D => "Blade chassis",
        Tablet = 0x1E => "Tablet",
        Convertible = 0x1F => "Convertible",
        Detachable = 0x20 => "Detachable",
        IotGateway = 0x21 => "IoT gateway",
        EmbeddedPc = 0x22 => "Embedded PC",
        MiniPc = 0x23 => "Mini PC",
        StickPc = 0x24 => "Stick PC",
    }
}

named_values! {
    /// Boot-up, power supply and thermal state.
    pub enum ChassisState {
        Unspecified = 0x00 => "Unspecified",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        Safe = 0x03 => "Safe",
        Warning = 0x04 => "Warning",
        Critical = 0x05 => "Critical",
        NonRecoverable = 0x06 => "Non-recoverable",
    }
}

named_values! {
    pub enum ChassisSecurityStatus {
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        None = 0x03 => "None",
        ExternalInterfaceLockedOut = 0x04 => "External interface locked out",
        ExternalInterfaceEnabled = 0x05 => "External interface enabled",
    }
}

/// One entry of the contained element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainedElement<'a> {
    data: &'a [u8],
}

impl<'a> ContainedElement<'a> {
    /// The element as stored, `element record length` bytes long.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn element_type_raw(&self) -> Option<u8> {
        self.data.first().copied()
    }

    /// The SMBIOS structure type of the element, when bit 7 of the type byte is set.
    pub fn structure_type(&self) -> Option<u8> {
        self.element_type_raw().filter(|raw| raw & 0x80 != 0).map(|raw| raw & 0x7F)
    }

    /// The board type of the element, when bit 7 of the type byte is clear.
    pub fn baseboard_type(&self) -> Option<BaseboardType> {
        let raw = self.element_type_raw().filter(|raw| raw & 0x80 == 0)?;
        BaseboardType::try_from(raw).ok()
    }

    pub fn minimum(&self) -> Option<u8> {
        self.data.get(1).copied()
    }

    pub fn maximum(&self) -> Option<u8> {
        self.data.get(2).copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChassisInformation<'a> {
    record: RawRecord<'a>,
}

table_view!(ChassisInformation, [TableType::Chassis]);

impl<'a> ChassisInformation<'a> {
    pub fn manufacturer(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x04)
    }

    pub fn type_field(&self) -> Option<ChassisTypeField> {
        self.record.byte(0x05).map(ChassisTypeField)
    }

    pub fn chassis_type(&self) -> Option<ChassisType> {
        ChassisType::try_from(self.type_field()?.kind()).ok()
    }

    pub fn lock_present(&self) -> Option<bool> {
        self.type_field().map(|field| field.lock_present())
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

    pub fn bootup_state(&self) -> Option<ChassisState> {
        self.state(0x09)
    }

    pub fn power_supply_state(&self) -> Option<ChassisState> {
        self.state(0x0A)
    }

    pub fn thermal_state(&self) -> Option<ChassisState> {
        self.state(0x0B)
    }

    pub fn security_status(&self) -> Option<ChassisSecurityStatus> {
        ChassisSecurityStatus::try_from(self.record.byte(0x0C)?).ok()
    }

    /// 2.3+
    pub fn oem_defined(&self) -> Option<u32> {
        self.record.dword(0x0D)
    }

    /// Height in rack units; `None` when absent or unspecified.
    pub fn height(&self) -> Option<u8> {
        self.record.byte(0x11).filter(|height| *height != 0)
    }

    /// `None` when absent or unspecified.
    pub fn power_cords(&self) -> Option<u8> {
        self.record.byte(0x12).filter(|cords| *cords != 0)
    }

    /// Contained elements that fit within the declared length.
    pub fn contained_elements(&self) -> impl Iterator<Item = ContainedElement<'a>> + 'a {
        let record = self.record;
        // A zero element size describes no elements, whatever the count says.
        let (count, size) = self.element_layout().filter(|(_, size)| *size != 0).unwrap_or((0, 0));
        (0..count)
            .map_while(move |idx| record.field_if_present(ELEMENTS_OFFSET + idx * size, size))
            .map(|data| ContainedElement { data })
    }

    /// 2.7+. Located right after the contained element list.
    pub fn sku_number(&self) -> Result<Option<&'a str>, DmiError> {
        let Some((count, size)) = self.element_layout() else {
            return Ok(None);
        };
        self.record.string(ELEMENTS_OFFSET + count * size)
    }

    fn element_layout(&self) -> Option<(usize, usize)> {
        let count = self.record.byte(0x13)? as usize;
        let size = self.record.byte(0x14)? as usize;
        Some((count, size))
    }

    fn state(&self, offset: usize) -> Option<ChassisState> {
        ChassisState::try_from(self.record.byte(offset)?).ok()
    }
}
