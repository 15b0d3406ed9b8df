// Network Preferences - Validation Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Input validation for the address fields of the IP settings form.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{Error, Result};

/// Dotted-quad pattern. Each group is checked numerically against 0-255.
static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|[01][0-9]{2}|[0-9]{1,2})(\.(25[0-5]|2[0-4][0-9]|[01][0-9]{2}|[0-9]{1,2})){3}$",
    )
    .expect("IPv4 pattern is valid")
});

/// Check whether `value` is a dotted-quad IPv4 address.
pub fn validate(value: &str) -> bool {
    IPV4_PATTERN.is_match(value)
}

/// Validate a required address field.
///
/// `label` is the user-facing label of the field; it names the field in the
/// returned error.
pub fn validate_field(label: &str, value: &str) -> Result<()> {
    if validate(value) {
        Ok(())
    } else {
        Err(Error::invalid_field(label))
    }
}

/// Validate an optional address field. Empty means absent and passes.
pub fn validate_optional_field(label: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    validate_field(label, value)
}
