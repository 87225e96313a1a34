//!
//! Signing and verification capabilities
//!
//! The orchestrators only ever talk to these traits. With the `crypto` feature enabled, implementations
//! backed by `ring` are available.
//!

use crate::BoxError;
use std::future::Future;

#[cfg(feature = "crypto")]
mod sign;
#[cfg(feature = "crypto")]
mod verify;

#[cfg(feature = "crypto")]
pub mod parse;

#[cfg(feature = "crypto")]
pub use self::sign::{KeySigner, SigningKey};
#[cfg(feature = "crypto")]
pub use self::verify::PublicKeyVerifier;

/// Capability to sign a signature string
pub trait Signer {
    /// Error the signing operation can fail with
    type Error: Into<BoxError>;

    /// Identifier of the key, embedded into the signature header
    fn key_id(&self) -> &str;

    /// Sign the data and return the raw signature bytes
    fn sign(&self, data: &[u8]) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send;
}

/// Capability to verify a signature over a signature string
pub trait Verifier {
    /// Error the verification operation can fail with
    ///
    /// Return this for operational problems (unreachable key store, I/O failures).
    /// A signature that simply doesn't match is `Ok(false)`.
    type Error: Into<BoxError>;

    /// Verify the signature over the data with the key identified by `key_id`
    fn verify(
        &self,
        key_id: &str,
        data: &[u8],
        signature: &[u8],
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
