//! SMBIOS/DMI Decode Configuration
//!
//! ## Configuration Usage
//!
//! The default configuration rejects any entry point whose checksum does not verify. Platforms known to ship
//! firmware with stale checksums can relax that:
//!
//! ```rust
//! use patina_dmi::config::{ChecksumPolicy, DecodeConfig};
//!
//! let config = DecodeConfig::default().with_checksum_policy(ChecksumPolicy::Warn);
//! assert_eq!(config.checksum_policy, ChecksumPolicy::Warn);
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!

/// What to do when an entry point checksum does not sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Fail with [`DmiError::ChecksumMismatch`](crate::DmiError::ChecksumMismatch).
    Strict,
    /// Log a warning and keep decoding.
    Warn,
}

/// Default: checksum mismatches are fatal.
pub const DEFAULT_CHECKSUM_POLICY: ChecksumPolicy = ChecksumPolicy::Strict;
/// Default: the intermediate `_DMI_` structure embedded in a 2.1 entry point is verified.
pub const DEFAULT_VERIFY_INTERMEDIATE_ENTRY_POINT: bool = true;

/// Knobs for entry point validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Handling of entry point checksum mismatches.
    pub checksum_policy: ChecksumPolicy,
    /// Whether the intermediate anchor and checksum of a `_SM_` entry point are checked.
    pub verify_intermediate_entry_point: bool,
}

impl DecodeConfig {
    pub const fn with_checksum_policy(mut self, policy: ChecksumPolicy) -> Self {
        self.checksum_policy = policy;
        self
    }

    pub const fn with_intermediate_verification(mut self, verify: bool) -> Self {
        self.verify_intermediate_entry_point = verify;
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            checksum_policy: DEFAULT_CHECKSUM_POLICY,
            verify_intermediate_entry_point: DEFAULT_VERIFY_INTERMEDIATE_ENTRY_POINT,
        }
    }
}
