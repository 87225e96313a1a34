//!
//! Utilities for handling signature strings
//!

use crate::order::VerifyDataEntry;
use std::fmt::Write;

/// Construct the signature string from ordered entries
///
/// One `name: value` line per entry, separated by a single `\n`, no trailing new-line
#[inline]
#[must_use]
pub fn construct(entries: &[VerifyDataEntry<'_>]) -> String {
    let mut signature_string = String::new();
    for (name, value) in entries {
        let _ = writeln!(signature_string, "{name}: {value}");
    }

    // Remove the last new-line
    signature_string.pop();

    signature_string
}
