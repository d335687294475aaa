//! OEM Strings (Type 11)
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::{header::TableType, record::RawRecord, DmiError};

/// Free-form strings supplied by the OEM.
#[derive(Debug, Clone, Copy)]
pub struct OemStrings<'a> {
    record: RawRecord<'a>,
}

table_view!(OemStrings, [TableType::OemStrings]);

impl<'a> OemStrings<'a> {
    pub fn count(&self) -> u8 {
        self.record.byte(0x04).unwrap_or(0)
    }

    /// Resolves strings 1 through [`Self::count`], in order.
    pub fn strings(&self) -> impl Iterator<Item = Result<Option<&'a str>, DmiError>> + 'a {
        let strings = self.record.strings();
        (1..=self.count()).map(move |index| strings.resolve(index))
    }
}
