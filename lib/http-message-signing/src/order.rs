//!
//! Decide the order in which fields end up in the signature string
//!

use crate::collect::VerifyData;
use miette::Diagnostic;
use thiserror::Error;

/// Ordering error
#[derive(Debug, Diagnostic, Error)]
pub enum OrderError {
    /// A covered field is missing from the collected data
    #[error("Covered fields must be a subset of available data (missing `{0}`)")]
    NotSubset(String),
}

/// Single field of the signature string
pub type VerifyDataEntry<'a> = (&'a str, &'a str);

/// Split a whitespace-delimited list of covered fields
#[inline]
pub fn split_covered_fields(raw: &str) -> impl Iterator<Item = &str> + Clone {
    raw.split_whitespace()
}

/// Order the collected fields
///
/// - With covered fields: exactly the listed fields, in the listed order. Every listed field has to exist.
/// - Without: every collected field, sorted by name (byte-wise, never locale-aware)
pub fn order<'a, 'b, I>(
    verify_data: &'a VerifyData,
    covered_fields: Option<I>,
) -> Result<Vec<VerifyDataEntry<'a>>, OrderError>
where
    I: IntoIterator<Item = &'b str>,
{
    let Some(covered_fields) = covered_fields else {
        return Ok(verify_data.iter().collect());
    };

    covered_fields
        .into_iter()
        .map(|name| {
            let name = name.to_ascii_lowercase();
            verify_data
                .get_entry(&name)
                .ok_or(OrderError::NotSubset(name))
        })
        .collect()
}
