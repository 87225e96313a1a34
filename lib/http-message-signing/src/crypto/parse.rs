//!
//! Parse PKCS#8 PEM keys into the `ring` adapters
//!

use super::SigningKey as SigningKeyTrait;
use const_oid::db::{rfc5912::RSA_ENCRYPTION, rfc8410::ID_ED_25519};
use miette::Diagnostic;
use pkcs8::{Document, PrivateKeyInfo, SecretDocument, SubjectPublicKeyInfoRef};
use ring::{
    error::Unspecified,
    signature::{
        Ed25519KeyPair, RsaKeyPair, UnparsedPublicKey, VerificationAlgorithm, ED25519,
        RSA_PKCS1_2048_8192_SHA256,
    },
};
use thiserror::Error;

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Malformed DER structure
    #[error(transparent)]
    Der(#[from] pkcs8::der::Error),

    /// Key rejected by `ring`
    #[error(transparent)]
    KeyRejected(#[from] ring::error::KeyRejected),

    /// Key is missing a component
    #[error("Malformed key")]
    MalformedKey,

    /// Malformed PKCS#8 document
    #[error(transparent)]
    Pkcs8(#[from] pkcs8::Error),

    /// Algorithm isn't RSA or Ed25519
    #[error("Unknown key type")]
    UnknownKeyType,
}

/// Parse a public key from its SPKI PEM form
///
/// Supports RSA (PKCS#1 v1.5 with SHA-256) and Ed25519
#[inline]
pub fn public_key(pem: &str) -> Result<UnparsedPublicKey<Vec<u8>>, Error> {
    let (_tag, document) = Document::from_pem(pem)?;
    let spki: SubjectPublicKeyInfoRef<'_> = document.decode_msg()?;

    let algorithm: &'static dyn VerificationAlgorithm = if spki.algorithm.oid == RSA_ENCRYPTION {
        &RSA_PKCS1_2048_8192_SHA256
    } else if spki.algorithm.oid == ID_ED_25519 {
        &ED25519
    } else {
        return Err(Error::UnknownKeyType);
    };

    let raw = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::MalformedKey)?
        .to_vec();

    Ok(UnparsedPublicKey::new(algorithm, raw))
}

/// Any of the signing keys [`private_key`] can produce
#[non_exhaustive]
pub enum SigningKey {
    /// Ed25519
    Ed25519(Ed25519KeyPair),

    /// RSA
    Rsa(RsaKeyPair),
}

impl SigningKeyTrait for SigningKey {
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, Unspecified> {
        match self {
            Self::Ed25519(key) => SigningKeyTrait::sign(key, msg),
            Self::Rsa(key) => SigningKeyTrait::sign(key, msg),
        }
    }
}

/// Parse a private key from its PKCS#8 PEM form
///
/// Decoding is constant-time and temporary buffers are zeroized.
/// Supports RSA and Ed25519
#[inline]
pub fn private_key(pem: &str) -> Result<SigningKey, Error> {
    let (_tag, document) = SecretDocument::from_pem(pem)?;
    let info: PrivateKeyInfo<'_> = document.decode_msg()?;

    let key = if info.algorithm.oid == RSA_ENCRYPTION {
        SigningKey::Rsa(RsaKeyPair::from_der(info.private_key)?)
    } else if info.algorithm.oid == ID_ED_25519 {
        // Accepts both PKCS#8 v1 and v2 documents
        SigningKey::Ed25519(Ed25519KeyPair::from_pkcs8_maybe_unchecked(
            document.as_bytes(),
        )?)
    } else {
        return Err(Error::UnknownKeyType);
    };

    Ok(key)
}
