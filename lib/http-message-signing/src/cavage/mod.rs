//!
//! Single-field `Signature` header, as described by the cavage draft
//!
//! ```text
//! keyId="key1",algorithm="hs2019",created=1577836800,headers="(created) (request-target) host",signature="..."
//! ```
//!

mod parse;
mod serialise;

pub use self::parse::{parse, ParseError};
pub use self::serialise::{serialise, SerialiseError};

/// Parsed or to-be-serialised `Signature` header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    /// Identifier of the key the signature was created with
    pub key_id: &'a str,

    /// Algorithm tag
    ///
    /// Purely informational. The verifier decides the algorithm based on the key.
    pub algorithm: Option<&'a str>,

    /// Covered fields, in signature string order
    pub headers: Vec<&'a str>,

    /// Base64-encoded signature
    pub signature: &'a str,

    /// UNIX timestamp the signature was created at
    pub created: u64,

    /// UNIX timestamp the signature expires at
    pub expires: Option<u64>,
}
