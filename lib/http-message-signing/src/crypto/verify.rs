use super::Verifier;
use ring::signature::UnparsedPublicKey;
use std::{
    convert::Infallible,
    future::{self, Future},
};
use tracing::debug;

/// [`Verifier`] over a single public key
///
/// Signatures naming any other key id are rejected like any other invalid signature
pub struct PublicKeyVerifier<B = Vec<u8>> {
    key_id: String,
    key: UnparsedPublicKey<B>,
}

impl<B> PublicKeyVerifier<B> {
    /// Bind a public key to its identifier
    pub fn new(key_id: impl Into<String>, key: UnparsedPublicKey<B>) -> Self {
        Self {
            key_id: key_id.into(),
            key,
        }
    }
}

impl<B> Verifier for PublicKeyVerifier<B>
where
    B: AsRef<[u8]>,
{
    type Error = Infallible;

    fn verify(
        &self,
        key_id: &str,
        data: &[u8],
        signature: &[u8],
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        let is_valid = if key_id == self.key_id {
            self.key.verify(data, signature).is_ok()
        } else {
            debug!(key_id, "unknown key id");
            false
        };

        future::ready(Ok(is_valid))
    }
}
