//! Error type for SMBIOS/DMI decoding.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::fmt;

use r_efi::efi;

/// Failures reported while decoding an entry point or walking the structure table.
///
/// The offending offset and values are logged where the failure is detected; the error itself carries only the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmiError {
    /// The buffer is empty or does not start with `_DMI_`, `_SM_` or `_SM3_`.
    UnsupportedEntryPoint,
    /// The buffer, or the declared structure length, is shorter than the recognized entry point layout.
    TruncatedEntryPoint,
    /// The entry point bytes do not sum to zero.
    ChecksumMismatch,
    /// A record declares a length below the 4-byte header or beyond the end of the table area.
    InvalidRecordLength,
    /// A record's string set has no double-NUL terminator before the end of the table area.
    TruncatedStringSet,
    /// A string index refers past the last string of the record.
    StringIndexOutOfRange,
    /// A referenced string is not valid UTF-8.
    InvalidStringEncoding,
}

impl DmiError {
    /// Returns `true` for errors raised while walking the structure table, as opposed to entry point errors.
    pub fn is_walk_error(&self) -> bool {
        matches!(self, DmiError::InvalidRecordLength | DmiError::TruncatedStringSet)
    }
}

impl fmt::Display for DmiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DmiError::UnsupportedEntryPoint => "no supported SMBIOS entry point anchor",
            DmiError::TruncatedEntryPoint => "SMBIOS entry point is truncated",
            DmiError::ChecksumMismatch => "SMBIOS entry point checksum mismatch",
            DmiError::InvalidRecordLength => "invalid SMBIOS structure length",
            DmiError::TruncatedStringSet => "unterminated SMBIOS string set",
            DmiError::StringIndexOutOfRange => "SMBIOS string index out of range",
            DmiError::InvalidStringEncoding => "SMBIOS string is not valid UTF-8",
        };
        f.write_str(text)
    }
}

impl core::error::Error for DmiError {}

impl From<DmiError> for efi::Status {
    fn from(value: DmiError) -> Self {
        match value {
            DmiError::UnsupportedEntryPoint => efi::Status::UNSUPPORTED,
            DmiError::TruncatedEntryPoint => efi::Status::BUFFER_TOO_SMALL,
            DmiError::ChecksumMismatch => efi::Status::CRC_ERROR,
            DmiError::InvalidRecordLength | DmiError::TruncatedStringSet => efi::Status::VOLUME_CORRUPTED,
            DmiError::StringIndexOutOfRange => efi::Status::NOT_FOUND,
            DmiError::InvalidStringEncoding => efi::Status::INVALID_PARAMETER,
        }
    }
}
