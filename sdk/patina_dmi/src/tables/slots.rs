//! System Slots (Type 9)
//!
//! Fields from the 3.2 data bus width onward sit after a variable list of peer devices, so their offsets depend
//! on the peer grouping count at 12h.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::{header::TableType, record::RawRecord, DmiError};

const PEER_GROUPS_OFFSET: usize = 0x13;
const PEER_GROUP_SIZE: usize = 5;

named_values! {
    pub enum SlotUsage {
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        Available = 0x03 => "Available",
        InUse = 0x04 => "In use",
        Unavailable = 0x05 => "Unavailable",
    }
}

named_values! {
    /// Physical height of the slot (3.5+).
    pub enum SystemSlotHeight {
        NotApplicable = 0x00 => "Not applicable",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        FullHeight = 0x03 => "Full height",
        LowProfile = 0x04 => "Low-profile",
    }
}

/// A device sharing the slot, as listed in the peer group table (3.2+).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerDevice {
    pub segment_group_number: u16,
    pub bus_number: u8,
    pub device_function_number: u8,
    pub data_bus_width: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct SystemSlots<'a> {
    record: RawRecord<'a>,
}

table_view!(SystemSlots, [TableType::SystemSlots]);

impl<'a> SystemSlots<'a> {
    pub fn slot_designation(&self) -> Result<Option<&'a str>, DmiError> {
        self.record.string(0x04)
    }

    pub fn slot_type_raw(&self) -> Option<u8> {
        self.record.byte(0x05)
    }

    pub fn slot_data_bus_width_raw(&self) -> Option<u8> {
        self.record.byte(0x06)
    }

    pub fn current_usage_raw(&self) -> Option<u8> {
        self.record.byte(0x07)
    }

    pub fn current_usage(&self) -> Option<SlotUsage> {
        SlotUsage::try_from(self.current_usage_raw()?).ok()
    }

    pub fn slot_length_raw(&self) -> Option<u8> {
        self.record.byte(0x08)
    }

    pub fn slot_id(&self) -> Option<u16> {
        self.record.word(0x09)
    }

    pub fn characteristics1(&self) -> Option<u8> {
        self.record.byte(0x0B)
    }

    /// 2.1+
    pub fn characteristics2(&self) -> Option<u8> {
        self.record.byte(0x0C)
    }

    /// 2.6+
    pub fn segment_group_number(&self) -> Option<u16> {
        self.record.word(0x0D)
    }

    /// 2.6+
    pub fn bus_number(&self) -> Option<u8> {
        self.record.byte(0x0F)
    }

    /// 2.6+. Device number in bits 7:3, function number in bits 2:0.
    pub fn device_function_number(&self) -> Option<u8> {
        self.record.byte(0x10)
    }

    /// 3.2+
    pub fn data_bus_width(&self) -> Option<u8> {
        self.record.byte(0x11)
    }

    /// 3.2+
    pub fn peer_grouping_count(&self) -> Option<u8> {
        self.record.byte(0x12)
    }

    /// Peer devices that fit in the structure; a short structure ends the list early.
    pub fn peer_devices(&self) -> impl Iterator<Item = PeerDevice> + 'a {
        let record = self.record;
        let count = self.peer_grouping_count().unwrap_or(0) as usize;
        (0..count)
            .map_while(move |idx| record.bytes::<PEER_GROUP_SIZE>(PEER_GROUPS_OFFSET + idx * PEER_GROUP_SIZE))
            .map(|group| PeerDevice {
                segment_group_number: u16::from_le_bytes([group[0], group[1]]),
                bus_number: group[2],
                device_function_number: group[3],
                data_bus_width: group[4],
            })
    }

    /// 3.4+
    pub fn slot_information(&self) -> Option<u8> {
        self.record.byte(self.after_peer_groups()?)
    }

    /// 3.4+
    pub fn slot_physical_width_raw(&self) -> Option<u8> {
        self.record.byte(self.after_peer_groups()? + 0x01)
    }

    /// Slot pitch in units of 1/100 millimeter (3.4+); `None` when absent or not given.
    pub fn slot_pitch(&self) -> Option<u16> {
        self.record.word(self.after_peer_groups()? + 0x02).filter(|pitch| *pitch != 0)
    }

    /// 3.5+
    pub fn slot_height_raw(&self) -> Option<u8> {
        self.record.byte(self.after_peer_groups()? + 0x04)
    }

    pub fn slot_height(&self) -> Option<SystemSlotHeight> {
        SystemSlotHeight::try_from(self.slot_height_raw()?).ok()
    }

    fn after_peer_groups(&self) -> Option<usize> {
        let count = self.peer_grouping_count()? as usize;
        Some(PEER_GROUPS_OFFSET + count * PEER_GROUP_SIZE)
    }
}
