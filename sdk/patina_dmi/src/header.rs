//! Structure header and structure type definitions.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use zerocopy::{little_endian::U16, FromBytes, Immutable, KnownLayout, Unaligned};

/// Handle value meaning "no structure referenced".
pub const HANDLE_NONE: u16 = 0xFFFF;
/// Structure type of the inactive placeholder.
pub const TYPE_INACTIVE: u8 = 0x7E;
/// Structure type of the end-of-table marker.
pub const TYPE_END_OF_TABLE: u8 = 0x7F;
/// First structure type available for OEM definitions.
pub const OEM_TYPE_BEGIN: u8 = 128;

/// Returns `true` for structure types 128-255.
pub const fn is_oem_type(record_type: u8) -> bool {
    record_type >= OEM_TYPE_BEGIN
}

#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
struct HeaderLayout {
    record_type: u8,
    length: u8,
    handle: U16,
}

/// The fixed 4-byte header at the start of every structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHeader {
    pub record_type: u8,
    /// Header plus formatted area; the string set is not included.
    pub length: u8,
    pub handle: u16,
}

impl RecordHeader {
    pub const SIZE: usize = core::mem::size_of::<HeaderLayout>();

    /// Reads a header from the start of `bytes`; `None` when fewer than [`Self::SIZE`] bytes are available.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (layout, _) = HeaderLayout::read_from_prefix(bytes).ok()?;
        Some(Self { record_type: layout.record_type, length: layout.length, handle: layout.handle.get() })
    }

    pub fn table_type(&self) -> Option<TableType> {
        TableType::from_raw(self.record_type)
    }

    pub fn is_end_of_table(&self) -> bool {
        self.record_type == TYPE_END_OF_TABLE
    }

    pub fn is_inactive(&self) -> bool {
        self.record_type == TYPE_INACTIVE
    }

    pub fn is_oem(&self) -> bool {
        is_oem_type(self.record_type)
    }
}

macro_rules! table_types {
    ($($(#[$doc:meta])* $variant:ident = $value:literal => $name:literal,)+) => {
        /// Structure types defined by the SMBIOS specification.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum TableType {
            $($(#[$doc])* $variant = $value,)+
        }

        impl TableType {
            /// Maps a raw type byte to a defined type. Reserved and OEM values give `None`.
            pub const fn from_raw(value: u8) -> Option<Self> {
                match value {
                    $($value => Some(TableType::$variant),)+
                    _ => None,
                }
            }

            /// Human-readable name of the structure type.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(TableType::$variant => $name,)+
                }
            }
        }
    };
}

table_types! {
    Bios = 0 => "BIOS information",
    System = 1 => "System information",
    Baseboard = 2 => "Baseboard or module information",
    Chassis = 3 => "System enclosure or chassis",
    Processor = 4 => "Processor information",
    MemoryController = 5 => "Memory controller information",
    MemoryModule = 6 => "Memory module information",
    Cache = 7 => "Cache information",
    PortConnector = 8 => "Port connector information",
    SystemSlots = 9 => "System slots",
    OnboardDevice = 10 => "Onboard devices information",
    OemStrings = 11 => "OEM strings",
    SystemConfigurationOptions = 12 => "System configuration options",
    BiosLanguage = 13 => "BIOS language information",
    GroupAssociations = 14 => "Group associations",
    SystemEventLog = 15 => "System event log",
    PhysicalMemoryArray = 16 => "Physical memory array",
    MemoryDevice = 17 => "Memory device",
    MemoryError32 = 18 => "32-bit memory error information",
    MemoryArrayMappedAddress = 19 => "Memory array mapped address",
    MemoryDeviceMappedAddress = 20 => "Memory device mapped address",
    PointingDevice = 21 => "Built-in pointing device",
    PortableBattery = 22 => "Portable battery",
    SystemReset = 23 => "System reset",
    HardwareSecurity = 24 => "Hardware security",
    SystemPowerControls = 25 => "System power controls",
    VoltageProbe = 26 => "Voltage probe",
    CoolingDevice = 27 => "Cooling device",
    TemperatureProbe = 28 => "Temperature probe",
    CurrentProbe = 29 => "Electrical current probe",
    OutOfBandRemoteAccess = 30 => "Out-of-band remote access",
    BootIntegrityServices = 31 => "Boot Integrity Services (BIS) entry point",
    SystemBoot = 32 => "System boot information",
    MemoryError64 = 33 => "64-bit memory error information",
    ManagementDevice = 34 => "Management device",
    ManagementDeviceComponent = 35 => "Management device component",
    ManagementDeviceThreshold = 36 => "Management device threshold data",
    MemoryChannel = 37 => "Memory channel",
    IpmiDevice = 38 => "IPMI device information",
    PowerSupply = 39 => "System power supply",
    AdditionalInformation = 40 => "Additional information",
    OnboardDeviceExtended = 41 => "Onboard devices extended information",
    ManagementControllerHostInterface = 42 => "Management controller host interface",
    TpmDevice = 43 => "TPM device",
    ProcessorAdditional = 44 => "Processor additional information",
    FirmwareInventory = 45 => "Firmware inventory information",
    StringProperty = 46 => "String property",
    /// Placeholder left in the table for a structure that was removed.
    Inactive = 126 => "Inactive",
    /// Terminates the table.
    EndOfTable = 127 => "End of table",
}

impl From<TableType> for u8 {
    fn from(value: TableType) -> Self {
        value as u8
    }
}
