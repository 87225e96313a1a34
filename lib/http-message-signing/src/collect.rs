//!
//! Collect the universe of fields a signature string can be built from
//!

use crate::{
    digest::{self, Algorithm},
    Message, DIGEST_HEADER, SIGNATURE_HEADER, SIGNATURE_INPUT_HEADER,
};
use http::{header::InvalidHeaderName, HeaderName};
use miette::Diagnostic;
use std::collections::{btree_map::Entry, BTreeMap, HashSet};
use thiserror::Error;

/// Pseudo-field covering the method and the request target
pub const REQUEST_TARGET: &str = "(request-target)";

/// Pseudo-field covering the creation timestamp
pub const CREATED: &str = "(created)";

/// Pseudo-field covering the expiration timestamp
pub const EXPIRES: &str = "(expires)";

/// Field collection error
#[derive(Debug, Diagnostic, Error)]
pub enum CollectError {
    /// `Digest` header was presented without a body
    #[error("Digest header present without a body")]
    DigestWithoutBody,

    /// `Digest` header describes a different body
    #[error("Digest header doesn't match the body")]
    DigestMismatch,

    /// Two header names are equal when compared case-insensitively
    #[error("Duplicate field `{0}`")]
    DuplicateField(String),

    /// Value contains a carriage return or line feed
    #[error("Field `{0}` contains a line break")]
    InvalidFieldValue(String),

    /// Header name isn't a valid HTTP field name
    #[error(transparent)]
    InvalidFieldName(#[from] InvalidHeaderName),

    /// `Digest` header uses an algorithm we don't support
    #[error("Unknown digest algorithm")]
    UnknownDigestAlgorithm,

    /// Header occurred multiple times on the wire
    #[error("Field `{0}` has multiple values")]
    UnsupportedFieldShape(String),
}

/// Timestamps bound into the pseudo-fields
#[derive(Clone, Copy, Debug, Default)]
pub struct Timestamps {
    /// UNIX timestamp the signature was created at
    pub created: u64,

    /// UNIX timestamp the signature expires at
    pub expires: Option<u64>,
}

/// Mapping of lower-cased field names to their values
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerifyData {
    fields: BTreeMap<String, String>,
}

impl VerifyData {
    /// Look up the value of a field (the name has to be lower-case)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Look up a field and return it together with its name
    #[must_use]
    pub fn get_entry(&self, name: &str) -> Option<(&str, &str)> {
        self.fields
            .get_key_value(name)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterate over all fields, sorted by their name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Construct the mapping from name/value pairs
    ///
    /// Names are lower-cased. Names that collide after lower-casing are rejected, not merged.
    pub fn try_from_iter<I, N, V>(iter: I) -> Result<Self, CollectError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<String>,
    {
        let mut verify_data = Self::default();
        for (name, value) in iter {
            verify_data.insert_unique(name.as_ref().to_ascii_lowercase(), value.into())?;
        }

        Ok(verify_data)
    }

    fn insert_unique(&mut self, name: String, value: String) -> Result<(), CollectError> {
        // Every field has to stay on a single line of the signature string
        if value.contains(['\r', '\n']) {
            return Err(CollectError::InvalidFieldValue(name));
        }

        match self.fields.entry(name) {
            Entry::Occupied(entry) => Err(CollectError::DuplicateField(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }
}

/// Collect the fields of a message
///
/// `digest_algorithm` is used when a body is present but no `Digest` header was presented.
/// Otherwise the algorithm named by the header wins.
pub fn collect(
    message: &Message<'_>,
    timestamps: Timestamps,
    digest_algorithm: Algorithm,
) -> Result<VerifyData, CollectError> {
    let mut verify_data = VerifyData::default();
    let mut seen_names = HashSet::with_capacity(message.headers.len());

    for (name, value) in message.headers.iter() {
        let name = HeaderName::from_bytes(name.to_ascii_lowercase().as_bytes())?;
        if !seen_names.insert(name.clone()) {
            return Err(CollectError::DuplicateField(name.as_str().to_owned()));
        }

        let value = value
            .as_single()
            .ok_or_else(|| CollectError::UnsupportedFieldShape(name.as_str().to_owned()))?;

        // The signature itself can't be part of what it signs
        if name == SIGNATURE_HEADER || name == SIGNATURE_INPUT_HEADER {
            continue;
        }

        verify_data.insert_unique(name.as_str().to_owned(), value.to_owned())?;
    }

    match (message.body, verify_data.get(DIGEST_HEADER.as_str())) {
        (Some(body), Some(presented)) => match digest::check(presented, body) {
            digest::Check::Match => {}
            digest::Check::Mismatch => return Err(CollectError::DigestMismatch),
            digest::Check::UnknownAlgorithm => return Err(CollectError::UnknownDigestAlgorithm),
        },
        (Some(body), None) => {
            let value = digest_algorithm.header_value(body);
            verify_data.insert_unique(DIGEST_HEADER.as_str().to_owned(), value)?;
        }
        (None, Some(..)) => return Err(CollectError::DigestWithoutBody),
        (None, None) => {}
    }

    let request_target = format!(
        "{} {}",
        message.method.as_str().to_lowercase(),
        message.url
    );
    verify_data.insert_unique(REQUEST_TARGET.into(), request_target)?;
    verify_data.insert_unique(CREATED.into(), timestamps.created.to_string())?;

    if let Some(expires) = timestamps.expires {
        verify_data.insert_unique(EXPIRES.into(), expires.to_string())?;
    }

    Ok(verify_data)
}
