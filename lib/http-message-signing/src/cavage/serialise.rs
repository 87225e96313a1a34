use super::SignatureHeader;
use miette::Diagnostic;
use std::fmt::Write;
use thiserror::Error;

/// Signature header serialisation error
#[derive(Debug, Diagnostic, Error)]
pub enum SerialiseError {
    /// Quoted parameter contains a character that can't be represented inside the quotes
    #[error("Parameter `{0}` contains a double quote")]
    #[diagnostic(help("the cavage header has no escaping mechanism"))]
    InvalidCharacter(&'static str),
}

fn quoted<'a>(name: &'static str, value: &'a str) -> Result<&'a str, SerialiseError> {
    if value.contains('"') {
        return Err(SerialiseError::InvalidCharacter(name));
    }

    Ok(value)
}

/// Serialise the signature header into its wire representation
///
/// # Errors
///
/// - A quoted parameter contains a double quote
#[inline]
pub fn serialise(header: &SignatureHeader<'_>) -> Result<String, SerialiseError> {
    let mut buffer = String::new();

    let _ = write!(buffer, "keyId=\"{}\"", quoted("keyId", header.key_id)?);

    if let Some(algorithm) = header.algorithm {
        let _ = write!(buffer, ",algorithm=\"{}\"", quoted("algorithm", algorithm)?);
    }

    let _ = write!(buffer, ",created={}", header.created);

    if let Some(expires) = header.expires {
        let _ = write!(buffer, ",expires={expires}");
    }

    buffer.push_str(",headers=\"");
    for item in itertools::intersperse(header.headers.iter().copied(), " ") {
        buffer.push_str(quoted("headers", item)?);
    }
    buffer.push('"');

    let _ = write!(
        buffer,
        ",signature=\"{}\"",
        quoted("signature", header.signature)?
    );

    Ok(buffer)
}

#[cfg(test)]
mod test {
    use super::{serialise, SerialiseError};
    use crate::cavage::{parse, SignatureHeader};

    #[test]
    fn serialise_header() {
        let header = SignatureHeader {
            key_id: "key1",
            algorithm: Some("hs2019"),
            headers: vec!["(created)", "(request-target)", "host"],
            signature: "c2ln",
            created: 1_577_836_800,
            expires: None,
        };

        assert_eq!(
            serialise(&header).unwrap(),
            r#"keyId="key1",algorithm="hs2019",created=1577836800,headers="(created) (request-target) host",signature="c2ln""#
        );
    }

    #[test]
    fn parses_what_it_serialises() {
        let header = SignatureHeader {
            key_id: "https://example.com/users/a#main-key",
            algorithm: None,
            headers: vec!["(request-target)", "digest"],
            signature: "c2lnbmF0dXJl",
            created: 1,
            expires: Some(2),
        };

        let serialised = serialise(&header).unwrap();
        assert_eq!(parse(&serialised).unwrap(), header);
    }

    #[test]
    fn rejects_double_quotes() {
        let header = SignatureHeader {
            key_id: "a",
            algorithm: None,
            headers: vec!["host"],
            signature: "c2ln",
            created: 1,
            expires: None,
        };

        let cases = [
            (
                "keyId",
                SignatureHeader {
                    key_id: r#"a",keyId="b"#,
                    ..header.clone()
                },
            ),
            (
                "algorithm",
                SignatureHeader {
                    algorithm: Some(r#"hs2019""#),
                    ..header.clone()
                },
            ),
            (
                "signature",
                SignatureHeader {
                    signature: r#"c2ln","#,
                    ..header.clone()
                },
            ),
        ];

        for (field, header) in cases {
            assert!(
                matches!(serialise(&header), Err(SerialiseError::InvalidCharacter(name)) if name == field),
                "expected `{field}` to be rejected"
            );
        }
    }
}
