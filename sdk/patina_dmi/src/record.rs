//! Raw structures and length-gated field access.
//!
//! Later SMBIOS revisions append fields to existing structure types. A field documented at offset `o` with size `s`
//! exists in a given structure only if its declared length covers `o + s`; older firmware simply stops earlier.
//! [`RawRecord::field_if_present`] makes that check once, so typed views never read past a structure.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::fmt;

use crate::{
    header::{RecordHeader, HANDLE_NONE},
    strings::StringSet,
    DmiError,
};

/// One structure borrowed from the table buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    header: RecordHeader,
    data: &'a [u8],
    strings: StringSet<'a>,
    offset: usize,
}

impl<'a> RawRecord<'a> {
    /// Decodes the structure at the start of `bytes`, which is taken to be everything left in the table area.
    ///
    /// `offset` is the position of `bytes` within the table and is only kept for diagnostics. On success returns the
    /// record and the number of bytes it spans, string set included.
    pub fn parse(bytes: &'a [u8], offset: usize) -> Result<(Self, usize), DmiError> {
        let header = RecordHeader::parse(bytes).ok_or(DmiError::InvalidRecordLength)?;
        let length = header.length as usize;

        if length < RecordHeader::SIZE || length > bytes.len() {
            log::error!(
                "Structure at offset {:#x} (type {}, handle {:#06x}) declares length {:#x}; {:#x} bytes remain.",
                offset,
                header.record_type,
                header.handle,
                length,
                bytes.len()
            );
            Err(DmiError::InvalidRecordLength)?;
        }

        let Some((strings, string_size)) = StringSet::scan(&bytes[length..]) else {
            log::error!(
                "Structure at offset {:#x} (type {}, handle {:#06x}) has no string set terminator.",
                offset,
                header.record_type,
                header.handle
            );
            return Err(DmiError::TruncatedStringSet);
        };

        Ok((Self { header, data: &bytes[..length], strings, offset }, length + string_size))
    }

    pub fn header(&self) -> RecordHeader {
        self.header
    }

    pub fn record_type(&self) -> u8 {
        self.header.record_type
    }

    pub fn handle(&self) -> u16 {
        self.header.handle
    }

    /// Declared length: header plus formatted area.
    pub fn length(&self) -> usize {
        self.header.length as usize
    }

    /// Position of the structure within the table.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Header and formatted area.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// The formatted area following the header.
    pub fn formatted(&self) -> &'a [u8] {
        &self.data[RecordHeader::SIZE..]
    }

    pub fn strings(&self) -> StringSet<'a> {
        self.strings
    }

    /// Returns the `size` bytes at `offset` (counted from the start of the header) if the declared length covers
    /// them, `None` otherwise.
    pub fn field_if_present(&self, offset: usize, size: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(size)?;
        if end > self.length() {
            return None;
        }
        self.data.get(offset..end)
    }

    pub fn bytes<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.field_if_present(offset, N)?.try_into().ok()
    }

    pub fn byte(&self, offset: usize) -> Option<u8> {
        self.bytes::<1>(offset).map(|[b]| b)
    }

    pub fn word(&self, offset: usize) -> Option<u16> {
        self.bytes(offset).map(u16::from_le_bytes)
    }

    pub fn dword(&self, offset: usize) -> Option<u32> {
        self.bytes(offset).map(u32::from_le_bytes)
    }

    pub fn qword(&self, offset: usize) -> Option<u64> {
        self.bytes(offset).map(u64::from_le_bytes)
    }

    /// Resolves the string whose index is stored in the byte at `offset`.
    ///
    /// A field beyond the declared length reads as absent, like index 0.
    pub fn string(&self, offset: usize) -> Result<Option<&'a str>, DmiError> {
        match self.byte(offset) {
            Some(index) => self.strings.resolve(index),
            None => Ok(None),
        }
    }

    /// Reads a handle reference; `0xFFFF` and absent fields give `None`.
    pub fn handle_ref(&self, offset: usize) -> Option<u16> {
        self.word(offset).filter(|handle| *handle != HANDLE_NONE)
    }
}

impl fmt::Debug for RawRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawRecord")
            .field("type", &self.header.record_type)
            .field("handle", &format_args!("{:#06x}", self.header.handle))
            .field("length", &self.header.length)
            .field("offset", &format_args!("{:#x}", self.offset))
            .field("strings", &self.strings)
            .finish()
    }
}
