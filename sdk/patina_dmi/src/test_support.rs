//! Unit test helpers: a capturing logger and builders for raw SMBIOS bytes.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
extern crate std;

use std::{
    cell::RefCell,
    format,
    io::{self, Write},
    string::String,
    vec,
    vec::Vec,
};

use log::Log;

use crate::checksum;

std::thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

#[allow(dead_code)]
#[cfg_attr(test, ctor::ctor)]
fn setup_test_logger() {
    _ = log::set_logger(&CaptureLogger);
    log::set_max_level(log::LevelFilter::Trace);
}

/// Echoes every record to stdout and keeps a per-thread copy so a test can inspect what its own calls logged.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        cfg!(test)
    }

    fn log(&self, record: &log::Record) {
        let line = format!("{}", record.args());
        _ = io::stdout().write_fmt(format_args!("{line}\n"));
        CAPTURED.with(|captured| captured.borrow_mut().push((record.level(), line)));
    }

    fn flush(&self) {
        _ = io::stdout().flush()
    }
}

/// Drains the records logged so far on the calling thread.
pub(crate) fn take_logs() -> Vec<(log::Level, String)> {
    CAPTURED.with(|captured| core::mem::take(&mut *captured.borrow_mut()))
}

/// Drains the calling thread's log and returns only the warnings.
pub(crate) fn take_warnings() -> Vec<String> {
    take_logs().into_iter().filter(|(level, _)| *level == log::Level::Warn).map(|(_, line)| line).collect()
}

/// Serializes one structure: header, formatted area and string set.
pub(crate) fn record(record_type: u8, handle: u16, formatted: &[u8], strings: &[&str]) -> Vec<u8> {
    let length = u8::try_from(4 + formatted.len()).unwrap();
    let mut bytes = vec![record_type, length];
    bytes.extend_from_slice(&handle.to_le_bytes());
    bytes.extend_from_slice(formatted);
    if strings.is_empty() {
        bytes.extend_from_slice(&[0, 0]);
    } else {
        for s in strings {
            bytes.extend_from_slice(s.as_bytes());
            bytes.push(0);
        }
        bytes.push(0);
    }
    bytes
}

pub(crate) fn end_of_table(handle: u16) -> Vec<u8> {
    record(127, handle, &[], &[])
}

pub(crate) fn concat(records: &[Vec<u8>]) -> Vec<u8> {
    records.iter().flatten().copied().collect()
}

/// A 15-byte `_DMI_` entry point with a correct checksum.
pub(crate) fn legacy_entry_point(table_length: u16, table_address: u32, count: u16, bcd_revision: u8) -> Vec<u8> {
    let mut bytes = b"_DMI_".to_vec();
    bytes.push(0);
    bytes.extend_from_slice(&table_length.to_le_bytes());
    bytes.extend_from_slice(&table_address.to_le_bytes());
    bytes.extend_from_slice(&count.to_le_bytes());
    bytes.push(bcd_revision);
    bytes[5] = checksum::complement(&bytes);
    bytes
}

/// A 31-byte `_SM_` entry point with correct outer and intermediate checksums.
pub(crate) fn entry_point_21(major: u8, minor: u8, table_length: u16, table_address: u32, count: u16) -> Vec<u8> {
    let mut bytes = b"_SM_".to_vec();
    bytes.extend_from_slice(&[0, 0x1F, major, minor]);
    bytes.extend_from_slice(&0x100u16.to_le_bytes());
    bytes.push(0);
    bytes.extend_from_slice(&[0; 5]);
    bytes.extend_from_slice(&legacy_entry_point(table_length, table_address, count, (major << 4) | (minor & 0xF)));
    bytes[4] = checksum::complement(&bytes);
    bytes
}

/// A 24-byte `_SM3_` entry point with a correct checksum.
pub(crate) fn entry_point_30(major: u8, minor: u8, docrev: u8, max_size: u32, table_address: u64) -> Vec<u8> {
    let mut bytes = b"_SM3_".to_vec();
    bytes.extend_from_slice(&[0, 0x18, major, minor, docrev, 0x01, 0x00]);
    bytes.extend_from_slice(&max_size.to_le_bytes());
    bytes.extend_from_slice(&table_address.to_le_bytes());
    bytes[5] = checksum::complement(&bytes);
    bytes
}
