//! String sets trailing each structure's formatted area.
//!
//! A string set is a run of NUL-terminated strings followed by one more NUL. Formatted fields refer to strings by
//! 1-based index; index 0 means "no string".
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::{fmt, str};

use crate::DmiError;

/// The strings of one structure, borrowed from the table buffer.
///
/// The bytes held exclude the double-NUL terminator, so an empty set and a set holding one empty string differ:
/// the first holds no bytes, the second holds a single NUL.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct StringSet<'a> {
    data: &'a [u8],
}

impl<'a> StringSet<'a> {
    /// Builds a set from the bytes between the end of the formatted area and the terminating double NUL.
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Locates the string set starting at `bytes[0]`.
    ///
    /// Returns the set and the number of bytes it occupies including the terminator, or `None` when no terminator
    /// is found.
    pub(crate) fn scan(bytes: &'a [u8]) -> Option<(Self, usize)> {
        let terminator = bytes.windows(2).position(|pair| pair == [0, 0])?;
        Some((Self::new(&bytes[..terminator]), terminator + 2))
    }

    /// Number of strings in the set.
    pub fn len(&self) -> usize {
        if self.data.is_empty() {
            0
        } else {
            self.data.iter().filter(|b| **b == 0).count() + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw bytes of the set, without the terminator.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Resolves a 1-based string index to the bytes of that string.
    pub fn resolve_bytes(&self, index: u8) -> Result<Option<&'a [u8]>, DmiError> {
        if index == 0 {
            return Ok(None);
        }
        match self.iter().nth(index as usize - 1) {
            Some(bytes) => Ok(Some(bytes)),
            None => {
                log::error!("String index {} out of range; structure has {} strings.", index, self.len());
                Err(DmiError::StringIndexOutOfRange)
            }
        }
    }

    /// Resolves a 1-based string index to text. Index 0 is absent; an index past the last string is an error.
    pub fn resolve(&self, index: u8) -> Result<Option<&'a str>, DmiError> {
        match self.resolve_bytes(index)? {
            Some(bytes) => str::from_utf8(bytes).map(Some).map_err(|_| {
                log::error!("String {} is not valid UTF-8: {:02x?}", index, bytes);
                DmiError::InvalidStringEncoding
            }),
            None => Ok(None),
        }
    }

    /// Iterates the raw strings in index order.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let data = self.data;
        data.split(|b| *b == 0).take(self.len())
    }
}

impl fmt::Debug for StringSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for bytes in self.iter() {
            match str::from_utf8(bytes) {
                Ok(text) => list.entry(&text),
                Err(_) => list.entry(&bytes),
            };
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::{format, vec::Vec};

    #[test]
    fn test_resolve_by_index() {
        let (set, consumed) = StringSet::scan(b"Acme\0Model X\0\0trailing").unwrap();
        assert_eq!(consumed, 14);
        assert_eq!(set.len(), 2);
        assert_eq!(set.resolve(1), Ok(Some("Acme")));
        assert_eq!(set.resolve(2), Ok(Some("Model X")));
        assert_eq!(set.resolve(0), Ok(None));
        assert_eq!(set.resolve(3), Err(DmiError::StringIndexOutOfRange));
    }

    #[test]
    fn test_empty_set() {
        let (set, consumed) = StringSet::scan(&[0, 0, 0x01]).unwrap();
        assert_eq!(consumed, 2);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter().count(), 0);
        assert_eq!(set.resolve(1), Err(DmiError::StringIndexOutOfRange));
    }

    #[test]
    fn test_leading_empty_string_is_distinct_from_empty_set() {
        let (set, consumed) = StringSet::scan(b"\0A\0\0").unwrap();
        assert_eq!(consumed, 4);
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        assert_eq!(set.resolve(1), Ok(Some("")));
        assert_eq!(set.resolve(2), Ok(Some("A")));
    }

    #[test]
    fn test_missing_terminator() {
        assert!(StringSet::scan(b"Acme\0Model").is_none());
        assert!(StringSet::scan(b"Acme\0").is_none());
        assert!(StringSet::scan(&[0]).is_none());
        assert!(StringSet::scan(&[]).is_none());
    }

    #[test]
    fn test_invalid_utf8() {
        let (set, _) = StringSet::scan(&[0xC3, 0x28, 0, 0]).unwrap();
        assert_eq!(set.resolve_bytes(1), Ok(Some(&[0xC3u8, 0x28][..])));
        assert_eq!(set.resolve(1), Err(DmiError::InvalidStringEncoding));
    }

    #[test]
    fn test_iter_and_debug() {
        let (set, _) = StringSet::scan(b"one\0two\0three\0\0").unwrap();
        let all: Vec<&[u8]> = set.iter().collect();
        let expected: [&[u8]; 3] = [b"one", b"two", b"three"];
        assert_eq!(all, expected);
        assert_eq!(format!("{set:?}"), r#"["one", "two", "three"]"#);
    }
}
