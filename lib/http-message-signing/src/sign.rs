use crate::{
    cavage::{self, SignatureHeader},
    clock::Clock,
    collect::{self, Timestamps},
    config::Configuration,
    crypto::Signer,
    digest::Algorithm,
    order, signature_string, BoxError, Error, Message, DEFAULT_ALGORITHM, DIGEST_HEADER,
};
use derive_builder::Builder;
use futures_util::FutureExt;
use smol_str::SmolStr;
use std::{
    panic::{self, AssertUnwindSafe},
    time::{Duration, SystemTime},
};
use tracing::{debug, instrument, warn};

/// Header values produced by [`HttpSigner::sign`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureOutput {
    /// Value of the `Digest` header, present whenever the message has a body
    pub digest: Option<String>,

    /// Value of the `Signature` header
    pub signature: String,
}

/// Signs HTTP messages
#[derive(Builder, Clone, Debug)]
pub struct HttpSigner {
    /// Clock the `created` timestamp is read from
    ///
    /// Default: system clock
    #[builder(default)]
    clock: Clock,

    /// Algorithm tag embedded into the header
    ///
    /// Default: `hs2019`
    #[builder(default = "DEFAULT_ALGORITHM.into()", setter(into))]
    algorithm: SmolStr,

    /// Fields to cover, in order
    ///
    /// Default: every collected field, sorted by name
    #[builder(default, setter(strip_option))]
    covered_fields: Option<Vec<SmolStr>>,

    /// Lifetime of the signature
    ///
    /// Default: the signature doesn't expire
    #[builder(default, setter(strip_option))]
    expires_in: Option<Duration>,

    /// Digest algorithm for bodies that don't come with a `Digest` header
    ///
    /// Default: SHA-256
    #[builder(default)]
    digest_algorithm: Algorithm,
}

impl HttpSigner {
    /// Return a builder for the signer
    #[must_use]
    pub fn builder() -> HttpSignerBuilder {
        HttpSignerBuilder::default()
    }

    /// Construct a signer from its configuration, reading time from the system clock
    #[must_use]
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            clock: Clock::new(),
            algorithm: config.algorithm.clone(),
            covered_fields: config.covered_fields.clone(),
            expires_in: config.expires_in.map(Duration::from_secs),
            digest_algorithm: config.digest_algorithm,
        }
    }

    /// Sign a message
    ///
    /// # Errors
    ///
    /// - The message can't be collected or ordered
    /// - The key id or algorithm tag contains a double quote
    /// - The clock reads a time before the UNIX epoch
    /// - The signer returned an error or panicked
    #[instrument(skip_all, fields(key_id = signer.key_id()))]
    pub async fn sign<S>(
        &self,
        message: &Message<'_>,
        signer: &S,
    ) -> Result<SignatureOutput, Error>
    where
        S: Signer,
    {
        let created = self
            .clock
            .now()
            .duration_since(SystemTime::UNIX_EPOCH)?
            .as_secs();
        let expires = self
            .expires_in
            .map(|expires_in| created.saturating_add(expires_in.as_secs()));

        let verify_data = collect::collect(
            message,
            Timestamps { created, expires },
            self.digest_algorithm,
        )?;

        let covered_fields = self
            .covered_fields
            .as_ref()
            .map(|fields| fields.iter().map(SmolStr::as_str));
        let entries = order::order(&verify_data, covered_fields)?;
        let signature_string = signature_string::construct(&entries);

        debug!(fields = entries.len(), "constructed signature string");

        let sign_future = panic::catch_unwind(AssertUnwindSafe(|| {
            signer.sign(signature_string.as_bytes())
        }))
        .map_err(|_| {
            warn!("signer panicked");
            Error::SignPanicked
        })?;

        let signature = match AssertUnwindSafe(sign_future).catch_unwind().await {
            Ok(Ok(signature)) => signature,
            Ok(Err(error)) => {
                let error: BoxError = error.into();
                warn!(%error, "signer returned an error");
                return Err(Error::SignRejected(error));
            }
            Err(..) => {
                warn!("signer panicked");
                return Err(Error::SignPanicked);
            }
        };

        let signature = base64_simd::STANDARD.encode_to_string(signature);
        let header = SignatureHeader {
            key_id: signer.key_id(),
            algorithm: Some(self.algorithm.as_str()),
            headers: entries.iter().map(|(name, _)| *name).collect(),
            signature: &signature,
            created,
            expires,
        };

        let digest = message
            .body
            .and_then(|_| verify_data.get(DIGEST_HEADER.as_str()))
            .map(str::to_owned);

        Ok(SignatureOutput {
            digest,
            signature: cavage::serialise(&header)?,
        })
    }
}
