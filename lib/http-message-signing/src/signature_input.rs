//!
//! Metadata of `Signature-Input`/`Signature` header pairs
//!
//! ```text
//! Signature-Input: sig1=("@method" "host");created=1618884475;keyid="test-key";alg="ed25519"
//! Signature: sig1=:base64signature:
//! ```
//!

use crate::structured::{self, BareItem, MemberValue, Parameters};
use miette::Diagnostic;
use thiserror::Error;

/// Metadata parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum ParseError {
    /// Signature identifier was used multiple times
    #[error("Duplicate signature id `{0}`")]
    DuplicateSignatureId(String),

    /// Required field is absent, empty or has the wrong type
    #[error("Signature input is missing the required field `{field}`")]
    MissingRequiredField {
        /// Identifier of the affected signature
        id: String,

        /// Name of the field
        field: &'static str,
    },

    /// No signature exists for a signature input
    #[error("No signature found for id `{id}`")]
    SignatureNotFound {
        /// Identifier of the affected signature
        id: String,
    },

    /// Header isn't a valid structured field dictionary
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] structured::Error),
}

/// Field covered by a signature
#[derive(Clone, Debug, PartialEq)]
pub struct CoveredField {
    /// Lower-cased name of the field
    pub name: String,

    /// Parameters attached to the field
    pub params: Parameters,
}

/// Metadata of a single signature
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureInput {
    /// Identifier of the key
    pub key_id: String,

    /// UNIX timestamp the signature was created at
    pub created: u64,

    /// UNIX timestamp the signature expires at
    pub expires: Option<u64>,

    /// Algorithm identifier
    pub alg: String,

    /// Nonce
    pub nonce: Option<String>,

    /// Covered fields, in signature string order
    pub covered_fields: Vec<CoveredField>,

    /// Base64-encoded signature
    pub signature: String,
}

impl SignatureInput {
    /// Names of the covered fields, in order
    pub fn covered_field_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.covered_fields.iter().map(|field| field.name.as_str())
    }

    /// Decode the signature into its raw bytes
    pub fn decode_signature(&self) -> Result<Vec<u8>, base64_simd::Error> {
        base64_simd::STANDARD.decode_to_vec(&self.signature)
    }
}

/// All signatures present on a message, keyed by their identifier
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignatureInputSet {
    entries: Vec<(String, SignatureInput)>,
}

impl SignatureInputSet {
    /// Look up a signature by its identifier
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SignatureInput> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, input)| input)
    }

    /// Iterate over the signatures in the order they were presented
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SignatureInput)> {
        self.entries.iter().map(|(id, input)| (id.as_str(), input))
    }

    /// Number of signatures
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no signatures
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

fn timestamp(value: Option<&BareItem>) -> Option<u64> {
    value
        .and_then(BareItem::as_integer)
        .and_then(|value| u64::try_from(value).ok())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn parse_member(id: &str, value: &MemberValue) -> Result<SignatureInput, ParseError> {
    let missing = |field| ParseError::MissingRequiredField {
        id: id.to_owned(),
        field,
    };

    let MemberValue::InnerList(list) = value else {
        return Err(missing("covered fields"));
    };

    let covered_fields = list
        .items
        .iter()
        .map(|item| {
            let name = item
                .bare_item
                .as_str()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| missing("covered fields"))?;

            Ok(CoveredField {
                name: name.to_lowercase(),
                params: item.params.clone(),
            })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    if covered_fields.is_empty() {
        return Err(missing("covered fields"));
    }

    let params = &list.params;
    let key_id = non_empty(params.get("keyid").and_then(BareItem::as_string))
        .ok_or_else(|| missing("keyid"))?;
    let created = timestamp(params.get("created")).ok_or_else(|| missing("created"))?;
    let alg = non_empty(params.get("alg").and_then(BareItem::as_str)).ok_or_else(|| missing("alg"))?;

    let expires = match params.get("expires") {
        Some(value) => Some(timestamp(Some(value)).ok_or_else(|| missing("expires"))?),
        None => None,
    };
    let nonce = match params.get("nonce") {
        Some(value) => Some(value.as_string().ok_or_else(|| missing("nonce"))?),
        None => None,
    };

    Ok(SignatureInput {
        key_id: key_id.to_owned(),
        created,
        expires,
        alg: alg.to_owned(),
        nonce: nonce.map(str::to_owned),
        covered_fields,
        signature: String::new(),
    })
}

fn signature_value(value: &MemberValue) -> Option<&str> {
    let item = match value {
        MemberValue::Item(item) => item,
        MemberValue::InnerList(list) => list.items.first()?,
    };

    item.bare_item
        .as_byte_sequence()
        .or_else(|| item.bare_item.as_string())
}

/// Parse the values of the `Signature` and `Signature-Input` headers
///
/// Fails on the first malformed entry
pub fn parse(
    signature_header: &str,
    signature_input_header: &str,
) -> Result<SignatureInputSet, ParseError> {
    let signature_inputs = structured::parse_dictionary(signature_input_header)?;
    let signatures = structured::parse_dictionary(signature_header)?;

    let mut set = SignatureInputSet::default();
    for (id, value) in &signature_inputs {
        if set.contains(id) {
            return Err(ParseError::DuplicateSignatureId(id.clone()));
        }

        if id.is_empty() {
            return Err(ParseError::MissingRequiredField {
                id: id.clone(),
                field: "signature id",
            });
        }

        let mut input = parse_member(id, value)?;

        let signature = signatures
            .iter()
            .find(|(signature_id, _)| signature_id == id)
            .and_then(|(_, value)| signature_value(value))
            .ok_or_else(|| ParseError::SignatureNotFound { id: id.clone() })?;
        input.signature = signature.to_owned();

        set.entries.push((id.clone(), input));
    }

    Ok(set)
}
