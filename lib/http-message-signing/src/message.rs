//!
//! Raw message input
//!
//! Header names are kept exactly as they were presented. Normalisation happens during collection,
//! that way differently-cased duplicates stay observable.
//!

use http::{header::ToStrError, request::Parts, HeaderMap, Method};

/// Value of a header as it was presented
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Header occurred exactly once
    Single(String),

    /// Header occurred multiple times on the wire
    Multiple(Vec<String>),
}

impl FieldValue {
    /// Return the value if the header occurred exactly once
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multiple(..) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Multiple(value)
    }
}

/// Header list with the names preserved verbatim
#[derive(Clone, Debug, Default)]
pub struct Headers {
    entries: Vec<(String, FieldValue)>,
}

impl Headers {
    /// Construct an empty header list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header
    ///
    /// Existing entries are never replaced, not even if the name matches exactly
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<FieldValue>,
    {
        self.entries.push((name.into(), value.into()));
    }

    /// Builder-style variant of [`Headers::insert`]
    #[must_use]
    pub fn with<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(name, value);
        self
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Return all values whose header name matches case-insensitively
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldValue> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl TryFrom<&HeaderMap> for Headers {
    type Error = ToStrError;

    fn try_from(map: &HeaderMap) -> Result<Self, Self::Error> {
        let mut headers = Self::new();
        for name in map.keys() {
            let mut values = map
                .get_all(name)
                .iter()
                .map(|value| value.to_str().map(str::to_owned))
                .collect::<Result<Vec<_>, _>>()?;

            let value = if values.len() == 1 {
                FieldValue::Single(values.remove(0))
            } else {
                FieldValue::Multiple(values)
            };

            headers.insert(name.as_str(), value);
        }

        Ok(headers)
    }
}

/// Borrowed view of a message that is about to be signed or verified
#[derive(Clone, Copy, Debug)]
pub struct Message<'a> {
    /// Presented headers
    pub headers: &'a Headers,

    /// HTTP method
    pub method: &'a Method,

    /// Request target (path and query)
    pub url: &'a str,

    /// Serialised body, if the message has one
    pub body: Option<&'a [u8]>,
}

impl<'a> Message<'a> {
    /// Construct a message view without a body
    #[must_use]
    pub fn new(headers: &'a Headers, method: &'a Method, url: &'a str) -> Self {
        Self {
            headers,
            method,
            url,
            body: None,
        }
    }

    /// Attach a body
    #[must_use]
    pub fn with_body(mut self, body: &'a [u8]) -> Self {
        self.body = Some(body);
        self
    }

    /// Construct a message view from the parts of an `http` request
    ///
    /// The headers have to be converted beforehand via [`Headers::try_from`]
    #[must_use]
    pub fn from_parts(parts: &'a Parts, headers: &'a Headers, body: Option<&'a [u8]>) -> Self {
        let url = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path(), |path_and_query| path_and_query.as_str());

        Self {
            headers,
            method: &parts.method,
            url,
            body,
        }
    }
}
