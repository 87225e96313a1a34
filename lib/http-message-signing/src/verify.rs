use crate::{
    cavage,
    collect::{self, Timestamps},
    crypto::Verifier,
    digest::Algorithm,
    message::Headers,
    order, signature_string, BoxError, Error, Message, SIGNATURE_HEADER,
};
use futures_util::FutureExt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, instrument, warn};

/// Exactly one `Signature` header with a single value
fn signature_header(headers: &Headers) -> Option<&str> {
    let mut values = headers.get_all(SIGNATURE_HEADER.as_str());
    match (values.next(), values.next()) {
        (Some(value), None) => value.as_single(),
        _ => None,
    }
}

/// Verify the signature of a message
///
/// Anything wrong with the message itself (missing or malformed signature header, unknown covered fields,
/// duplicate headers, digest mismatches, bad signatures) resolves to `Ok(false)`.
///
/// # Errors
///
/// Only if the verifier returned an error or panicked
#[instrument(skip_all)]
pub async fn verify<V>(message: &Message<'_>, verifier: &V) -> Result<bool, Error>
where
    V: Verifier,
{
    let Some(raw_header) = signature_header(message.headers) else {
        debug!("signature header is absent, duplicated or has multiple values");
        return Ok(false);
    };

    let header = match cavage::parse(raw_header) {
        Ok(header) => header,
        Err(error) => {
            debug!(?error, "malformed signature header");
            return Ok(false);
        }
    };

    let Ok(signature) = base64_simd::STANDARD.decode_to_vec(header.signature) else {
        debug!("signature isn't valid base64");
        return Ok(false);
    };

    let timestamps = Timestamps {
        created: header.created,
        expires: header.expires,
    };
    let verify_data = match collect::collect(message, timestamps, Algorithm::default()) {
        Ok(verify_data) => verify_data,
        Err(error) => {
            debug!(?error, "failed to collect fields");
            return Ok(false);
        }
    };

    let entries = match order::order(&verify_data, Some(header.headers.iter().copied())) {
        Ok(entries) => entries,
        Err(error) => {
            debug!(?error, "failed to order fields");
            return Ok(false);
        }
    };
    let signature_string = signature_string::construct(&entries);

    let verify_future = panic::catch_unwind(AssertUnwindSafe(|| {
        verifier.verify(header.key_id, signature_string.as_bytes(), &signature)
    }))
    .map_err(|_| {
        warn!(key_id = header.key_id, "verifier panicked");
        Error::VerifyPanicked
    })?;

    match AssertUnwindSafe(verify_future).catch_unwind().await {
        Ok(Ok(is_valid)) => {
            if !is_valid {
                debug!(key_id = header.key_id, "signature rejected");
            }

            Ok(is_valid)
        }
        Ok(Err(error)) => {
            let error: BoxError = error.into();
            warn!(key_id = header.key_id, %error, "verifier returned an error");
            Err(Error::VerifyRejected(error))
        }
        Err(..) => {
            warn!(key_id = header.key_id, "verifier panicked");
            Err(Error::VerifyPanicked)
        }
    }
}
