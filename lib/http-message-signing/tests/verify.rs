use self::data::{attach, headers, BODY, KEY_ID};
use http::Method;
use http_message_signing::{
    crypto::{self, PublicKeyVerifier, Verifier},
    Clock, Error, ErrorKind, Headers, HttpSigner, Message,
};
use std::{convert::Infallible, future::Future, io};


fn signer() -> HttpSigner {
    HttpSigner::builder()
        .clock(Clock::fixed_unix(1_577_836_800))
        .build()
        .unwrap()
}

async fn signed_headers(message: &Message<'_>) -> Headers {
    let output = signer()
        .sign(message, &self::data::ed25519_signer())
        .await
        .unwrap();

    attach(message.headers, &output)
}

struct Rejecting;

impl Verifier for Rejecting {
    type Error = io::Error;

    fn verify(
        &self,
        _key_id: &str,
        _data: &[u8],
        _signature: &[u8],
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        std::future::ready(Err(io::Error::other("key store unreachable")))
    }
}

struct Panicking;

impl Verifier for Panicking {
    type Error = Infallible;

    #[allow(unreachable_code)]
    fn verify(
        &self,
        _key_id: &str,
        _data: &[u8],
        _signature: &[u8],
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        panic!("verifier blew up");
        std::future::ready(Ok(true))
    }
}

struct PanickingFuture;

impl Verifier for PanickingFuture {
    type Error = Infallible;

    #[allow(unreachable_code)]
    fn verify(
        &self,
        _key_id: &str,
        _data: &[u8],
        _signature: &[u8],
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        async {
            panic!("verifier future blew up");
            Ok::<_, Infallible>(true)
        }
    }
}

#[tokio::test]
async fn round_trip() {
    let headers = headers();
    let message = Message::new(&headers, &Method::POST, "/inbox").with_body(BODY);
    let signed = signed_headers(&message).await;

    let message = Message::new(&signed, &Method::POST, "/inbox").with_body(BODY);
    assert!(http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn rsa_round_trip() {
    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/users/test");
    let output = signer()
        .sign(
            &message,
            &crypto::KeySigner::new(KEY_ID, self::data::rsa_key()),
        )
        .await
        .unwrap();

    let signed = attach(&headers, &output);
    let message = Message::new(&signed, &Method::GET, "/users/test");
    assert!(http_message_signing::verify(&message, &self::data::rsa_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn pem_round_trip() {
    let (private_key, public_key) = self::data::ed25519_pem_pair();
    let signing_key = crypto::parse::private_key(&private_key).unwrap();
    let public_key = crypto::parse::public_key(&public_key).unwrap();

    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/");
    let output = signer()
        .sign(&message, &crypto::KeySigner::new(KEY_ID, signing_key))
        .await
        .unwrap();

    let signed = attach(&headers, &output);
    let message = Message::new(&signed, &Method::GET, "/");
    let verifier = PublicKeyVerifier::new(KEY_ID, public_key);
    assert!(http_message_signing::verify(&message, &verifier)
        .await
        .unwrap());
}

#[tokio::test]
async fn lowercased_names_verify_the_same() {
    let headers = headers();
    let message = Message::new(&headers, &Method::POST, "/inbox").with_body(BODY);
    let signed = signed_headers(&message).await;

    let lowercased = signed
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect::<Headers>();
    let message = Message::new(&lowercased, &Method::POST, "/inbox").with_body(BODY);

    assert!(http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn duplicate_digest_headers() {
    let headers = headers();
    let message = Message::new(&headers, &Method::POST, "/inbox").with_body(BODY);
    let signed = signed_headers(&message).await;

    let digest = signed
        .get_all("digest")
        .next()
        .and_then(|value| value.as_single())
        .unwrap()
        .to_owned();
    let other_digest = http_message_signing::digest::Algorithm::Sha512.header_value(BODY);

    for duplicate in [digest, other_digest] {
        let headers = signed.clone().with("digest", duplicate.as_str());
        let message = Message::new(&headers, &Method::POST, "/inbox").with_body(BODY);

        assert!(
            !http_message_signing::verify(&message, &self::data::ed25519_verifier())
                .await
                .unwrap(),
            "duplicate `digest: {duplicate}` was accepted"
        );
    }
}

#[tokio::test]
async fn ignores_uncovered_headers() {
    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/");
    let output = HttpSigner::builder()
        .clock(Clock::fixed_unix(1_577_836_800))
        .covered_fields(vec!["(request-target)".into(), "host".into(), "date".into()])
        .build()
        .unwrap()
        .sign(&message, &self::data::ed25519_signer())
        .await
        .unwrap();

    let signed = attach(&headers, &output).with("extraHeader", "value");
    let message = Message::new(&signed, &Method::GET, "/");

    assert!(http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn unknown_covered_field() {
    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/");
    let output = HttpSigner::builder()
        .covered_fields(vec!["host".into(), "date".into()])
        .build()
        .unwrap()
        .sign(&message, &self::data::ed25519_signer())
        .await
        .unwrap();

    let without_date = Headers::new()
        .with("Host", "example.com")
        .with("Signature", output.signature.as_str());
    let message = Message::new(&without_date, &Method::GET, "/");

    assert!(!http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn tampered_method() {
    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/");
    let signed = signed_headers(&message).await;

    let message = Message::new(&signed, &Method::DELETE, "/");
    assert!(!http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn tampered_body() {
    let headers = headers();
    let message = Message::new(&headers, &Method::POST, "/inbox").with_body(BODY);
    let signed = signed_headers(&message).await;

    let message = Message::new(&signed, &Method::POST, "/inbox").with_body(b"{}");
    assert!(!http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn digest_without_body() {
    let headers = headers();
    let message = Message::new(&headers, &Method::POST, "/inbox").with_body(BODY);
    let signed = signed_headers(&message).await;

    let message = Message::new(&signed, &Method::POST, "/inbox");
    assert!(!http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn digest_array() {
    let headers = headers();
    let message = Message::new(&headers, &Method::POST, "/inbox").with_body(BODY);
    let signed = signed_headers(&message).await;

    let with_array = signed
        .iter()
        .map(|(name, value)| {
            let value = if name.eq_ignore_ascii_case("digest") {
                let digest = value.as_single().unwrap().to_owned();
                vec![digest.clone(), digest].into()
            } else {
                value.clone()
            };

            (name, value)
        })
        .collect::<Headers>();

    let message = Message::new(&with_array, &Method::POST, "/inbox").with_body(BODY);
    assert!(!http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn missing_metadata() {
    let signature = {
        let headers = Headers::new().with("Host", "example.com");
        let message = Message::new(&headers, &Method::GET, "/");
        let output = signer()
            .sign(&message, &self::data::ed25519_signer())
            .await
            .unwrap();
        let header = http_message_signing::cavage::parse(&output.signature).unwrap();
        header.signature.to_owned()
    };

    let key_id = format!(r#"keyId="{KEY_ID}""#);
    let created = "created=1577836800".to_owned();
    let covered = r#"headers="(created) (request-target) host""#.to_owned();
    let signature = format!(r#"signature="{signature}""#);

    // The complete header has to verify, otherwise the other cases prove nothing
    let cases = [
        (true, vec![&key_id, &created, &covered, &signature]),
        (false, vec![&created, &covered, &signature]),
        (false, vec![&key_id, &covered, &signature]),
        (false, vec![&key_id, &created, &signature]),
        (false, vec![&key_id, &created, &covered]),
    ];

    for (expected, parameters) in cases {
        let raw_header = parameters
            .into_iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let headers = Headers::new()
            .with("Host", "example.com")
            .with("Signature", raw_header.as_str());
        let message = Message::new(&headers, &Method::GET, "/");

        let is_valid = http_message_signing::verify(&message, &self::data::ed25519_verifier())
            .await
            .unwrap();
        assert_eq!(is_valid, expected, "unexpected result for {raw_header}");
    }
}

#[tokio::test]
async fn undecodable_signature() {
    let headers = Headers::new().with("Host", "example.com").with(
        "Signature",
        format!(
            r#"keyId="{KEY_ID}",created=1577836800,headers="host",signature="not base64!""#
        ),
    );
    let message = Message::new(&headers, &Method::GET, "/");

    assert!(!http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn absent_signature() {
    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/");

    assert!(!http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn wrong_key() {
    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/");
    let signed = signed_headers(&message).await;

    let message = Message::new(&signed, &Method::GET, "/");
    assert!(!http_message_signing::verify(&message, &self::data::rsa_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn foreign_key_id() {
    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/");
    let signed = signed_headers(&message).await;
    let message = Message::new(&signed, &Method::GET, "/");

    let verifier = PublicKeyVerifier::new(
        "https://example.com/users/someone-else#main-key",
        ring::signature::UnparsedPublicKey::new(&ring::signature::ED25519, Vec::new()),
    );
    assert!(!http_message_signing::verify(&message, &verifier)
        .await
        .unwrap());
}

#[tokio::test]
async fn rejecting_verifier() {
    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/");
    let signed = signed_headers(&message).await;
    let message = Message::new(&signed, &Method::GET, "/");

    let error = http_message_signing::verify(&message, &Rejecting)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::VerifyRejected(..)));
    assert_eq!(error.kind(), ErrorKind::VerifyFailed);
    assert_eq!(error.to_string(), "Failed to verify signature header");
}

#[tokio::test]
async fn panicking_verifier() {
    let headers = headers();
    let message = Message::new(&headers, &Method::GET, "/");
    let signed = signed_headers(&message).await;
    let message = Message::new(&signed, &Method::GET, "/");

    let error = http_message_signing::verify(&message, &Panicking)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::VerifyPanicked));
    assert_eq!(error.kind(), ErrorKind::VerifyFailed);
    assert_eq!(
        error.to_string(),
        "An error occurred when verifying signature header"
    );

    let error = http_message_signing::verify(&message, &PanickingFuture)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::VerifyPanicked));
}

#[tokio::test]
async fn get_resource_scenario() {
    let headers = Headers::new().with("Host", "example");
    let message = Message::new(&headers, &Method::GET, "/resource");
    let output = signer()
        .sign(&message, &self::data::ed25519_signer())
        .await
        .unwrap();
    assert_eq!(output.digest, None);

    let signed = attach(&headers, &output);
    let message = Message::new(&signed, &Method::GET, "/resource");
    assert!(http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());

    let message = Message::new(&signed, &Method::PUT, "/resource");
    assert!(!http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}

#[tokio::test]
async fn http_request_parts() {
    let request = http::Request::builder()
        .method(Method::POST)
        .uri("https://example.com/inbox?page=1")
        .header("Host", "example.com")
        .body(())
        .unwrap();
    let (parts, ()) = request.into_parts();

    let headers = Headers::try_from(&parts.headers).unwrap();
    let message = Message::from_parts(&parts, &headers, Some(BODY));
    assert_eq!(message.url, "/inbox?page=1");

    let signed = signed_headers(&message).await;
    let message = Message::from_parts(&parts, &signed, Some(BODY));
    assert!(http_message_signing::verify(&message, &self::data::ed25519_verifier())
        .await
        .unwrap());
}
