//!
//! Structured field dictionaries (RFC 8941)
//!
//! Only dictionaries are supported since that's the only top-level type the `Signature-Input` and `Signature`
//! headers use. Duplicate dictionary keys are preserved in order instead of being collapsed,
//! that way consumers can reject them.
//!

mod lexer;
mod parse;

pub use self::parse::{parse_dictionary, Error};

/// Bare item
#[derive(Clone, Debug, PartialEq)]
pub enum BareItem {
    /// Integer
    Integer(i64),

    /// Decimal
    Decimal(f64),

    /// String (escapes already resolved)
    String(String),

    /// Token
    Token(String),

    /// Byte sequence, kept in its base64 form
    ByteSequence(String),

    /// Boolean
    Boolean(bool),
}

impl BareItem {
    /// Return the contents of a string or token
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) | Self::Token(value) => Some(value),
            _ => None,
        }
    }

    /// Return the contents of a string
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Return the value of an integer
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Return the base64 text of a byte sequence
    #[must_use]
    pub fn as_byte_sequence(&self) -> Option<&str> {
        match self {
            Self::ByteSequence(value) => Some(value),
            _ => None,
        }
    }
}

/// Ordered parameters attached to an item or inner list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameters(Vec<(String, BareItem)>);

impl Parameters {
    /// Look up a parameter
    ///
    /// If a key was specified multiple times, the last occurrence wins
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&BareItem> {
        self.0
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Iterate over the parameters in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BareItem)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Whether there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, BareItem)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (String, BareItem)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Item with its parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// Value
    pub bare_item: BareItem,

    /// Parameters
    pub params: Parameters,
}

/// Inner list with its parameters
#[derive(Clone, Debug, PartialEq)]
pub struct InnerList {
    /// Items of the list
    pub items: Vec<Item>,

    /// Parameters of the list itself
    pub params: Parameters,
}

/// Value of a dictionary member
#[derive(Clone, Debug, PartialEq)]
pub enum MemberValue {
    /// Single item
    Item(Item),

    /// Inner list
    InnerList(InnerList),
}

/// Dictionary members in their original order
pub type Dictionary = Vec<(String, MemberValue)>;
