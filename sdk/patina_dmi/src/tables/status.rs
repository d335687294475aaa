//! Status values shared by probes and cooling devices.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!

named_values! {
    /// Health of a probe or cooling device, from the 3-bit status subfield.
    pub enum DeviceStatus {
        Unspecified = 0x00 => "Unspecified",
        Other = 0x01 => "Other",
        Unknown = 0x02 => "Unknown",
        Ok = 0x03 => "OK",
        NonCritical = 0x04 => "Non-critical",
        Critical = 0x05 => "Critical",
        NonRecoverable = 0x06 => "Non-recoverable",
    }
}
