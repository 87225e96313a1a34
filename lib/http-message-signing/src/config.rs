//!
//! Signing defaults, loadable from TOML
//!
//! ```toml
//! algorithm = "hs2019"
//! covered-fields = ["(request-target)", "(created)", "host", "digest"]
//! expires-in = 300
//! digest-algorithm = "sha-256"
//! ```
//!

use crate::{digest::Algorithm, DEFAULT_ALGORITHM};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::str::FromStr;
use thiserror::Error;

/// Configuration parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Malformed TOML or unexpected values
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

fn default_algorithm() -> SmolStr {
    SmolStr::new(DEFAULT_ALGORITHM)
}

/// Defaults applied by [`HttpSigner::from_config`](crate::HttpSigner::from_config)
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Configuration {
    /// Algorithm tag embedded into the `Signature` header
    #[serde(default = "default_algorithm")]
    pub algorithm: SmolStr,

    /// Fields to cover, in order. All collected fields when absent.
    #[serde(default)]
    pub covered_fields: Option<Vec<SmolStr>>,

    /// Lifetime of the signature in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,

    /// Digest algorithm for bodies without a `Digest` header
    #[serde(default)]
    pub digest_algorithm: Algorithm,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            covered_fields: None,
            expires_in: None,
            digest_algorithm: Algorithm::default(),
        }
    }
}

impl FromStr for Configuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(Error::from)
    }
}
