use crate::{
    args::VerifyArgs,
    util::{self, error_kaomoji, success_kaomoji},
};
use http_message_signing::{
    crypto::{parse, PublicKeyVerifier},
    Message,
};

pub async fn run(args: VerifyArgs) -> miette::Result<()> {
    let public_key = util::read_to_string(&args.key).await?;
    let verifier = PublicKeyVerifier::new(args.key_id, parse::public_key(&public_key)?);

    let headers = util::parse_headers(&args.message.headers)?;
    let body = util::read_body(&args.message).await?;
    let mut message = Message::new(&headers, &args.message.method, &args.message.url);
    if let Some(ref body) = body {
        message = message.with_body(body);
    }

    if http_message_signing::verify(&message, &verifier).await? {
        println!("✅ Signature is valid! {}", success_kaomoji());
        Ok(())
    } else {
        miette::bail!("Signature is invalid {}", error_kaomoji());
    }
}
