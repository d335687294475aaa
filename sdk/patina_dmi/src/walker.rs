//! Structure table walking.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::iter::FusedIterator;

use crate::{entry::SmbiosVersion, header::RecordHeader, record::RawRecord, DmiError};

/// Location and extent of the structure table, as reported by the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableArea {
    /// Physical address of the table. Informational; the caller supplies the table bytes.
    pub address: u64,
    /// Table length in bytes. For 3.0 entry points this is an upper bound.
    pub length: usize,
    /// Structure count reported by 32-bit entry points.
    pub structure_count: Option<u16>,
    pub version: Option<SmbiosVersion>,
}

impl TableArea {
    /// Describes a table without an entry point, e.g. a table image obtained on its own.
    pub const fn new(address: u64, length: usize) -> Self {
        Self { address, length, structure_count: None, version: None }
    }

    /// Opens a new walk over `table`. Each call starts from the first structure.
    pub fn walk<'a>(&self, table: &'a [u8]) -> TableWalker<'a> {
        TableWalker::new(self, table)
    }
}

/// Progress of a [`TableWalker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// More structures may follow.
    Ready,
    /// The end-of-table structure was emitted.
    EndOfTable,
    /// Fewer than 4 bytes were left in the table area; the table ended without an end-of-table structure.
    Truncated,
    /// A structure was rejected; the error was yielded.
    Failed,
}

impl WalkState {
    /// Returns `true` once the walk will yield nothing more.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WalkState::Ready)
    }

    /// Returns `true` for the two non-error terminal states.
    pub fn is_success(&self) -> bool {
        matches!(self, WalkState::EndOfTable | WalkState::Truncated)
    }
}

/// Forward-only iterator over the structures of a table.
///
/// Yields `Ok` for every structure, including the end-of-table structure. A rejected structure yields one `Err`
/// and ends the walk.
#[derive(Debug, Clone)]
pub struct TableWalker<'a> {
    data: &'a [u8],
    offset: usize,
    emitted: usize,
    state: WalkState,
}

impl<'a> TableWalker<'a> {
    /// Walks `table`, bounded to the length declared by `area`.
    pub fn new(area: &TableArea, table: &'a [u8]) -> Self {
        if table.len() < area.length {
            log::warn!("Table buffer holds {:#x} of {:#x} declared bytes; walking what is present.", table.len(), area.length);
        }
        let end = area.length.min(table.len());
        Self::from_bytes(&table[..end])
    }

    /// Walks all of `data`.
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self { data, offset: 0, emitted: 0, state: WalkState::Ready }
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Offset of the next structure within the table.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of structures yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl<'a> Iterator for TableWalker<'a> {
    type Item = Result<RawRecord<'a>, DmiError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state.is_terminal() {
            return None;
        }

        let remaining = &self.data[self.offset..];
        if remaining.len() < RecordHeader::SIZE {
            if !remaining.is_empty() {
                log::warn!("Ignoring {} trailing bytes at table offset {:#x}.", remaining.len(), self.offset);
            }
            log::warn!("Table ended after {} structures without an end-of-table structure.", self.emitted);
            self.state = WalkState::Truncated;
            return None;
        }

        match RawRecord::parse(remaining, self.offset) {
            Ok((record, size)) => {
                log::trace!("{:?}", record);
                self.offset += size;
                self.emitted += 1;
                if record.header().is_end_of_table() {
                    self.state = WalkState::EndOfTable;
                }
                Some(Ok(record))
            }
            Err(err) => {
                self.state = WalkState::Failed;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for TableWalker<'_> {}
