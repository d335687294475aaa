//! 8-bit modular checksums used by the SMBIOS entry point structures.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!

/// Sum of all bytes, wrapping at 256.
pub fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, val| sum.wrapping_add(*val))
}

/// Returns `true` when the bytes sum to zero modulo 256.
pub fn is_valid(bytes: &[u8]) -> bool {
    sum(bytes) == 0
}

/// The checksum byte that makes `bytes` plus that byte sum to zero.
///
/// The range passed in must not include the checksum byte itself (or must hold it as zero).
pub fn complement(bytes: &[u8]) -> u8 {
    0u8.wrapping_sub(sum(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_range_is_valid() {
        assert_eq!(sum(&[]), 0);
        assert!(is_valid(&[]));
    }

    #[test]
    fn test_sum_wraps() {
        assert_eq!(sum(&[0xFF, 0x01]), 0);
        assert_eq!(sum(&[0x80, 0x80, 0x05]), 0x05);
        assert!(is_valid(&[0xFF, 0x01]));
        assert!(!is_valid(&[0xFF, 0x02]));
    }

    #[test]
    fn test_single_byte_change_flips_validity() {
        let mut bytes = [0x5Fu8, 0x53, 0x4D, 0x5F, 0x00, 0x1F, 0x02, 0x08];
        bytes[4] = complement(&bytes);
        assert!(is_valid(&bytes));

        for idx in 0..bytes.len() {
            let mut corrupted = bytes;
            corrupted[idx] = corrupted[idx].wrapping_add(1);
            assert!(!is_valid(&corrupted), "byte {idx} changed but checksum still valid");
        }
    }

    #[test]
    fn test_complement_of_valid_range_is_zero() {
        let bytes = [0x10u8, 0xF0];
        assert!(is_valid(&bytes));
        assert_eq!(complement(&bytes), 0);
    }
}
