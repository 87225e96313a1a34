//!
//! Body digests
//!

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::str::FromStr;
use strum::{AsRefStr, EnumString};
use subtle::ConstantTimeEq;

/// Hash algorithm used for the `Digest` header
#[derive(AsRefStr, Clone, Copy, Debug, Default, Deserialize, EnumString, PartialEq, Eq, Serialize)]
#[non_exhaustive]
#[strum(ascii_case_insensitive)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "sha-256")]
    #[strum(serialize = "SHA-256")]
    Sha256,

    #[serde(rename = "sha-512")]
    #[strum(serialize = "SHA-512")]
    Sha512,
}

impl Algorithm {
    /// Hash the data with this algorithm
    #[must_use]
    pub fn digest(&self, data: impl AsRef<[u8]>) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// Compute the full header value (`<algorithm>=<base64 hash>`)
    #[must_use]
    pub fn header_value(&self, body: &[u8]) -> String {
        let encoded_digest = base64_simd::STANDARD.encode_to_string(self.digest(body));
        format!("{}={encoded_digest}", self.as_ref())
    }
}

/// Outcome of checking a presented `Digest` header against a body
#[derive(Debug, PartialEq, Eq)]
pub enum Check {
    /// Header matches the body
    Match,

    /// Header is well-formed but describes a different body
    Mismatch,

    /// Header names an algorithm we don't know
    UnknownAlgorithm,
}

/// Recompute the digest of the body with the algorithm the header names and compare them
///
/// The comparison runs in constant time
#[must_use]
pub fn check(header_value: &str, body: &[u8]) -> Check {
    let Some((algorithm_name, presented_hash)) = header_value.split_once('=') else {
        return Check::Mismatch;
    };

    let Ok(algorithm) = Algorithm::from_str(algorithm_name.trim()) else {
        return Check::UnknownAlgorithm;
    };

    let expected_hash = base64_simd::STANDARD.encode_to_string(algorithm.digest(body));
    if bool::from(
        expected_hash
            .as_bytes()
            .ct_eq(presented_hash.trim().as_bytes()),
    ) {
        Check::Match
    } else {
        Check::Mismatch
    }
}
