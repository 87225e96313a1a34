use crate::{cavage::SerialiseError, collect::CollectError, order::OrderError, BoxError};
use miette::Diagnostic;
use std::time::SystemTimeError;
use thiserror::Error;

/// Coarse classification of an [`Error`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The message handed to the signer couldn't be signed as-is
    InvalidInput,

    /// The signing capability failed
    SignFailed,

    /// The verifying capability failed
    VerifyFailed,
}

/// Operational error of the signing and verification orchestrators
///
/// Verification never reports malformed or tampered input through this type. Those cases resolve to `Ok(false)`.
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Field collection failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Collect(#[from] CollectError),

    /// Fields couldn't be ordered
    #[error(transparent)]
    #[diagnostic(transparent)]
    Order(#[from] OrderError),

    /// Signature header couldn't be serialised
    #[error(transparent)]
    #[diagnostic(transparent)]
    Serialise(#[from] SerialiseError),

    /// Signing capability panicked
    #[error("An error occurred when signing signature header")]
    SignPanicked,

    /// Signing capability returned an error
    #[error("Failed to sign signature header")]
    SignRejected(#[source] BoxError),

    /// Clock reported a time before the UNIX epoch
    #[error(transparent)]
    SystemTime(#[from] SystemTimeError),

    /// Verifying capability panicked
    #[error("An error occurred when verifying signature header")]
    VerifyPanicked,

    /// Verifying capability returned an error
    #[error("Failed to verify signature header")]
    VerifyRejected(#[source] BoxError),
}

impl Error {
    /// Classify the error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Collect(..) | Self::Order(..) | Self::Serialise(..) | Self::SystemTime(..) => {
                ErrorKind::InvalidInput
            }
            Self::SignPanicked | Self::SignRejected(..) => ErrorKind::SignFailed,
            Self::VerifyPanicked | Self::VerifyRejected(..) => ErrorKind::VerifyFailed,
        }
    }
}
