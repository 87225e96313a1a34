use crate::{
    args::SignArgs,
    util::{self, success_kaomoji},
};
use http_message_signing::{
    crypto::{parse, KeySigner},
    Configuration, HttpSigner, Message,
};

pub async fn run(args: SignArgs) -> miette::Result<()> {
    let config = match args.config {
        Some(ref path) => {
            let raw_config = util::read_to_string(path).await?;
            match raw_config.parse::<Configuration>() {
                Ok(config) => config,
                Err(err) => return Err(miette::Error::new(err).with_source_code(raw_config)),
            }
        }
        None => Configuration::default(),
    };

    let private_key = util::read_to_string(&args.key).await?;
    let signer = KeySigner::new(args.key_id, parse::private_key(&private_key)?);

    let headers = util::parse_headers(&args.message.headers)?;
    let body = util::read_body(&args.message).await?;
    let mut message = Message::new(&headers, &args.message.method, &args.message.url);
    if let Some(ref body) = body {
        message = message.with_body(body);
    }

    let output = HttpSigner::from_config(&config)
        .sign(&message, &signer)
        .await?;

    tracing::info!("signed message {}", success_kaomoji());

    if let Some(digest) = output.digest {
        println!("Digest: {digest}");
    }
    println!("Signature: {}", output.signature);

    Ok(())
}
