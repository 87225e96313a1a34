use crate::{
    args::{ParseHeaderArgs, ParseInputArgs, SignatureScheme},
    util::{error_kaomoji, success_kaomoji},
};
use http_message_signing::{cavage, signature_input, structured};

pub fn header(args: ParseHeaderArgs) -> miette::Result<()> {
    if args.scheme != SignatureScheme::Cavage {
        miette::bail!(
            "Only the Cavage scheme is supported at this time. {}",
            error_kaomoji()
        );
    }

    let header = match cavage::parse(&args.header) {
        Ok(header) => header,
        Err(err) => return Err(miette::Error::new(err).with_source_code(args.header)),
    };

    println!("✅ Header is valid! {}", success_kaomoji());
    println!("key id: {}", header.key_id);
    if let Some(algorithm) = header.algorithm {
        println!("algorithm: {algorithm}");
    }
    println!("created: {}", header.created);
    if let Some(expires) = header.expires {
        println!("expires: {expires}");
    }
    println!("covered fields: {}", header.headers.join(" "));

    Ok(())
}

pub fn input(args: ParseInputArgs) -> miette::Result<()> {
    let set = match signature_input::parse(&args.signature, &args.signature_input) {
        Ok(set) => set,
        Err(signature_input::ParseError::Syntax(err)) => {
            // The span points into whichever header failed to parse
            let source = if structured::parse_dictionary(&args.signature_input).is_err() {
                args.signature_input
            } else {
                args.signature
            };
            return Err(miette::Error::new(err).with_source_code(source));
        }
        Err(err) => return Err(err.into()),
    };

    println!("✅ Headers are valid! {}", success_kaomoji());
    for (id, input) in set.iter() {
        println!("{id}:");
        println!("  key id: {}", input.key_id);
        println!("  algorithm: {}", input.alg);
        println!("  created: {}", input.created);
        if let Some(expires) = input.expires {
            println!("  expires: {expires}");
        }
        if let Some(ref nonce) = input.nonce {
            println!("  nonce: {nonce}");
        }
        println!(
            "  covered fields: {}",
            input.covered_field_names().collect::<Vec<_>>().join(" ")
        );
    }

    Ok(())
}
