use super::Signer;
use ring::{
    error::Unspecified,
    rand::SystemRandom,
    signature::{Ed25519KeyPair, RsaKeyPair, RSA_PKCS1_SHA256},
};
use std::future::{self, Future};

/// Signing key definition
pub trait SigningKey {
    /// Sign a message
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, Unspecified>;
}

impl SigningKey for Ed25519KeyPair {
    #[inline]
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, Unspecified> {
        Ok(self.sign(msg).as_ref().to_vec())
    }
}

impl SigningKey for RsaKeyPair {
    #[inline]
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, Unspecified> {
        let mut buf = vec![0; self.public().modulus_len()];

        let rng = SystemRandom::new();
        self.sign(&RSA_PKCS1_SHA256, &rng, msg, &mut buf)?;

        Ok(buf)
    }
}

/// [`Signer`] over a local signing key
pub struct KeySigner<K> {
    key_id: String,
    key: K,
}

impl<K> KeySigner<K> {
    /// Bind a signing key to its identifier
    pub fn new(key_id: impl Into<String>, key: K) -> Self {
        Self {
            key_id: key_id.into(),
            key,
        }
    }
}

impl<K> Signer for KeySigner<K>
where
    K: SigningKey,
{
    type Error = Unspecified;

    fn key_id(&self) -> &str {
        &self.key_id
    }

    fn sign(&self, data: &[u8]) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send {
        future::ready(self.key.sign(data))
    }
}
