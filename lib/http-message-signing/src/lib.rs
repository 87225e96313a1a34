//!
//! HTTP message signing
//!
//! Builds the canonical signature string over a set of HTTP fields, signs it through a caller-provided
//! capability and verifies it again on the receiving end.
//!
//! The cryptography itself is out of scope. Bring your own [`crypto::Signer`] and [`crypto::Verifier`],
//! or enable the `crypto` feature for adapters over `ring`.
//!

use http::HeaderName;

pub mod cavage;
pub mod clock;
pub mod collect;
pub mod config;
pub mod crypto;
pub mod digest;
pub mod message;
pub mod order;
pub mod signature_input;
pub mod signature_string;
pub mod structured;

mod error;
mod sign;
mod verify;

pub use self::clock::Clock;
pub use self::config::Configuration;
pub use self::error::{Error, ErrorKind};
pub use self::message::{FieldValue, Headers, Message};
pub use self::sign::{HttpSigner, HttpSignerBuilder, HttpSignerBuilderError, SignatureOutput};
pub use self::verify::verify;

/// Type-erased error returned by the signing and verifying capabilities
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Name of the header carrying the signature and its metadata
pub static SIGNATURE_HEADER: HeaderName = HeaderName::from_static("signature");

/// Name of the companion header used when multiple signatures coexist on one message
pub static SIGNATURE_INPUT_HEADER: HeaderName = HeaderName::from_static("signature-input");

/// Name of the header carrying the body digest
pub static DIGEST_HEADER: HeaderName = HeaderName::from_static("digest");

/// Algorithm tag embedded into the signature header unless configured otherwise
pub const DEFAULT_ALGORITHM: &str = "hs2019";
