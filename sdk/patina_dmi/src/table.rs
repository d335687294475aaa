//! A fully walked structure table.
//!
//! [`Table::collect`] drains a [`TableWalker`](crate::walker::TableWalker) and keeps what it produced: every
//! structure in stream order, the state the walk ended in and the error that stopped it, if any. Structures read
//! before a failure stay available.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::{
    record::RawRecord,
    registry::DmiTable,
    tables::TableView,
    walker::{TableArea, WalkState},
    DmiError,
};

#[derive(Debug, Clone)]
pub struct Table<'a> {
    records: Vec<RawRecord<'a>>,
    handles: HashMap<u16, usize>,
    state: WalkState,
    error: Option<DmiError>,
}

impl<'a> Table<'a> {
    /// Walks `table` as described by `area` and collects the result.
    pub fn collect(area: &TableArea, table: &'a [u8]) -> Self {
        let mut walker = area.walk(table);
        let mut records = Vec::new();
        let mut error = None;

        for result in walker.by_ref() {
            match result {
                Ok(record) => records.push(record),
                Err(err) => error = Some(err),
            }
        }

        if let Some(count) = area.structure_count {
            if count as usize != records.len() {
                log::warn!("Entry point declares {} structures; the table holds {}.", count, records.len());
            }
        }

        let mut handles: HashMap<u16, usize> = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if let Some(first) = handles.get(&record.handle()) {
                log::warn!(
                    "Duplicate handle {:#06x} at table offset {:#x}; keeping the structure at {:#x}.",
                    record.handle(),
                    record.offset(),
                    records[*first].offset()
                );
                continue;
            }
            handles.insert(record.handle(), idx);
        }

        log::info!("Collected {} SMBIOS structures ({:?}).", records.len(), walker.state());
        Self { records, handles, state: walker.state(), error }
    }

    /// Every structure walked, in table order.
    pub fn records(&self) -> &[RawRecord<'a>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    /// The error that ended the walk, if it failed.
    pub fn error(&self) -> Option<DmiError> {
        self.error
    }

    /// Returns `true` when the walk reached the end-of-table structure.
    pub fn is_complete(&self) -> bool {
        self.state == WalkState::EndOfTable
    }

    /// Looks up a structure by handle. With duplicate handles the first structure wins.
    pub fn by_handle(&self, handle: u16) -> Option<&RawRecord<'a>> {
        self.handles.get(&handle).map(|idx| &self.records[*idx])
    }

    /// Structures of the given raw type, in table order.
    pub fn of_type(&self, record_type: u8) -> impl Iterator<Item = &RawRecord<'a>> + '_ {
        self.records.iter().filter(move |record| record.record_type() == record_type)
    }

    /// Every structure `T` decodes, in table order.
    pub fn views<T: TableView<'a>>(&self) -> impl Iterator<Item = T> + use<'_, 'a, T> {
        self.records.iter().filter_map(|record| T::from_record(*record))
    }

    /// Every structure dispatched to its typed view, in table order.
    pub fn decoded(&self) -> impl Iterator<Item = DmiTable<'a>> + '_ {
        self.records.iter().map(|record| DmiTable::from_record(*record))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::{
        tables::{BiosInformation, SystemInformation},
        test_support::{concat, end_of_table, record, take_warnings},
    };
    use std::vec::Vec;

    fn sample_table() -> Vec<u8> {
        concat(&[
            record(0, 0x0000, &[1, 2, 0, 0, 3, 0], &["Acme", "1.0", "01/01/2024"]),
            record(1, 0x0001, &[1, 2, 0, 0], &["Acme", "Model X"]),
            record(0xC0, 0x0002, &[0xAA], &[]),
            record(1, 0x0003, &[1, 0, 0, 0], &["Second"]),
            end_of_table(0x0004),
        ])
    }

    #[test]
    fn test_collect_complete_table() {
        let bytes = sample_table();
        let table = Table::collect(&TableArea::new(0, bytes.len()), &bytes);

        assert_eq!(table.len(), 5);
        assert!(table.is_complete());
        assert_eq!(table.error(), None);
        assert_eq!(table.by_handle(0x0002).map(|r| r.record_type()), Some(0xC0));
        assert!(table.by_handle(0x0010).is_none());
        assert_eq!(table.of_type(1).count(), 2);

        let vendors: Vec<_> = table.views::<BiosInformation>().map(|bios| bios.vendor()).collect();
        assert_eq!(vendors, [Ok(Some("Acme"))]);
        let products: Vec<_> = table.views::<SystemInformation>().map(|system| system.manufacturer()).collect();
        assert_eq!(products, [Ok(Some("Acme")), Ok(Some("Second"))]);

        let decoded: Vec<_> = table.decoded().collect();
        assert!(matches!(decoded[2], DmiTable::Oem(_)));
        assert!(matches!(decoded[4], DmiTable::EndOfTable(_)));
    }

    #[test]
    fn test_failed_walk_keeps_prior_records() {
        let mut bad = record(2, 0x0005, &[], &[]);
        bad[1] = 0x40;
        let bytes = concat(&[record(0, 0, &[0; 6], &[]), record(1, 1, &[0; 4], &[]), bad, end_of_table(6)]);
        let table = Table::collect(&TableArea::new(0, bytes.len()), &bytes);

        assert_eq!(table.len(), 2);
        assert_eq!(table.state(), WalkState::Failed);
        assert_eq!(table.error(), Some(DmiError::InvalidRecordLength));
        assert!(!table.is_complete());
        assert_eq!(table.views::<BiosInformation>().count(), 1);
    }

    #[test]
    fn test_duplicate_handle_keeps_first() {
        let bytes = concat(&[record(1, 7, &[1, 0, 0, 0], &["First"]), record(1, 7, &[1, 0, 0, 0], &["Second"])]);
        _ = take_warnings();
        let table = Table::collect(&TableArea::new(0, bytes.len()), &bytes);

        assert_eq!(table.len(), 2);
        assert_eq!(table.state(), WalkState::Truncated);
        assert_eq!(table.by_handle(7).map(|r| r.string(4)), Some(Ok(Some("First"))));
        assert!(take_warnings().iter().any(|line| line.contains("Duplicate handle 0x0007")));
    }

    #[test]
    fn test_structure_count_mismatch_is_diagnostic_only() {
        let bytes = sample_table();
        let area = TableArea { structure_count: Some(9), ..TableArea::new(0, bytes.len()) };
        _ = take_warnings();
        let table = Table::collect(&area, &bytes);

        assert!(table.is_complete());
        assert_eq!(table.len(), 5);
        assert!(take_warnings().iter().any(|line| line.contains("declares 9 structures")));
    }

    fn first_bios<'a>(table: &Table<'a>) -> Option<BiosInformation<'a>> {
        table.views().next()
    }

    #[test]
    fn test_views_outlive_table_borrow() {
        let bytes = sample_table();
        let vendor = {
            let table = Table::collect(&TableArea::new(0, bytes.len()), &bytes);
            first_bios(&table).map(|bios| bios.vendor())
        };
        assert_eq!(vendor, Some(Ok(Some("Acme"))));
    }

    #[test]
    fn test_empty_area() {
        let table = Table::collect(&TableArea::new(0, 0), &[]);
        assert!(table.is_empty());
        assert_eq!(table.state(), WalkState::Truncated);
        assert_eq!(table.error(), None);
    }
}
