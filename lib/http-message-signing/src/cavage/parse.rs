use super::SignatureHeader;
use atoi::FromRadix10Checked;
use logos::{Lexer, Logos, Span};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Signature header parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum ParseError {
    /// Parameter was specified multiple times
    #[error("Duplicate parameter `{name}`")]
    DuplicateParameter {
        /// Name of the parameter
        name: String,

        /// Location of the repeated parameter
        #[label("repeated here")]
        span: SourceSpan,
    },

    /// Timestamp isn't a valid unsigned integer
    #[error("Invalid timestamp")]
    InvalidTimestamp {
        /// Location of the timestamp
        #[label("not a valid timestamp")]
        span: SourceSpan,
    },

    /// Required field is absent or empty
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),

    /// Input ended in the middle of a key/value pair
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    /// Token didn't fit the grammar at this position
    #[error("Unexpected token")]
    #[diagnostic(help(r#"the header consists of `key="value"` or `key=integer` pairs separated by commas"#))]
    UnexpectedToken {
        /// Location of the token
        #[label("unexpected")]
        span: SourceSpan,
    },
}

#[derive(Clone, Copy, Debug, Logos, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
enum TokenTy {
    #[regex(r"[A-Za-z][A-Za-z0-9_-]*")]
    Key,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    Value,

    #[regex(r"[0-9]+")]
    Integer,

    #[token(",")]
    Comma,
}

#[derive(Debug)]
struct Token {
    pub ty: TokenTy,
    pub span: Span,
}

impl Token {
    pub fn parse(input: &str) -> impl Iterator<Item = Result<Token, Span>> + '_ {
        Lexer::<'_, TokenTy>::new(input)
            .spanned()
            .map(|(ty, span)| match ty {
                Ok(ty) => Ok(Token { ty, span }),
                Err(()) => Err(span),
            })
    }
}

#[derive(Clone, Copy)]
enum RawValue<'a> {
    Quoted(&'a str),
    Integer(&'a str),
}

impl<'a> RawValue<'a> {
    fn as_str(self) -> &'a str {
        match self {
            Self::Quoted(value) | Self::Integer(value) => value,
        }
    }
}

struct Pair<'a> {
    key: &'a str,
    value: RawValue<'a>,
    span: Span,
}

macro_rules! ensure {
    ($self:expr, $value:expr, $pattern:pat) => {{
        let token = match $value {
            Some(Ok(token)) => token,
            Some(Err(span)) => {
                $self.is_broken = true;
                return Some(Err(ParseError::UnexpectedToken { span: span.into() }));
            }
            None => {
                $self.is_broken = true;
                return Some(Err(ParseError::UnexpectedEnd));
            }
        };

        if !matches!(token.ty, $pattern) {
            $self.is_broken = true;
            return Some(Err(ParseError::UnexpectedToken {
                span: token.span.into(),
            }));
        }

        token
    }};
}

struct ParseIter<'a, I> {
    /// Stream of tokens wrapped into a result
    inner: I,

    /// Reference to the original input that was fed to the lexer
    input: &'a str,

    /// Marker whether we encountered any error or illegal token
    ///
    /// If we did, the iterator will stop yielding any results
    is_broken: bool,

    /// Whether the previous pair was followed by a comma, so another pair has to follow
    after_comma: bool,
}

impl<'a, I> Iterator for ParseIter<'a, I>
where
    I: Iterator<Item = Result<Token, Span>>,
{
    type Item = Result<Pair<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_broken {
            return None;
        }

        let key = match self.inner.next() {
            Some(token) => ensure!(self, Some(token), TokenTy::Key),
            None if self.after_comma => {
                self.is_broken = true;
                return Some(Err(ParseError::UnexpectedEnd));
            }
            None => return None,
        };
        ensure!(self, self.inner.next(), TokenTy::Equals);
        let value = ensure!(self, self.inner.next(), TokenTy::Value | TokenTy::Integer);

        self.after_comma = false;
        if let Some(next) = self.inner.next() {
            ensure!(self, Some(next), TokenTy::Comma);
            self.after_comma = true;
        }

        let raw_value = &self.input[value.span.clone()];
        let value_ty = value.ty;
        let value = if value_ty == TokenTy::Value {
            RawValue::Quoted(raw_value.trim_matches('"'))
        } else {
            RawValue::Integer(raw_value)
        };

        Some(Ok(Pair {
            key: &self.input[key.span.clone()],
            value,
            span: key.span,
        }))
    }
}

fn timestamp(value: RawValue<'_>, span: &Span) -> Result<u64, ParseError> {
    let digits = value.as_str().trim().as_bytes();
    match u64::from_radix_10_checked(digits) {
        (Some(timestamp), used) if used == digits.len() && used > 0 => Ok(timestamp),
        _ => Err(ParseError::InvalidTimestamp {
            span: span.clone().into(),
        }),
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, pair: &Pair<'_>) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(ParseError::DuplicateParameter {
            name: pair.key.to_owned(),
            span: pair.span.clone().into(),
        });
    }

    *slot = Some(value);
    Ok(())
}

/// Parse a cavage `Signature` header into its typed representation
///
/// Unknown parameters are ignored, repeated ones are rejected
#[inline]
pub fn parse(input: &str) -> Result<SignatureHeader<'_>, ParseError> {
    let kv_iter = ParseIter {
        inner: Token::parse(input),
        input,
        is_broken: false,
        after_comma: false,
    };

    let mut key_id = None;
    let mut algorithm = None;
    let mut signature = None;
    let mut headers = None;
    let mut created = None;
    let mut expires = None;

    for pair in kv_iter {
        let pair = pair?;

        match pair.key {
            "keyId" => set_once(&mut key_id, pair.value.as_str(), &pair)?,
            "algorithm" => set_once(&mut algorithm, pair.value.as_str(), &pair)?,
            "signature" => set_once(&mut signature, pair.value.as_str(), &pair)?,
            "headers" => {
                let fields: Vec<&str> = crate::order::split_covered_fields(pair.value.as_str()).collect();
                set_once(&mut headers, fields, &pair)?;
            }
            "created" => set_once(&mut created, timestamp(pair.value, &pair.span)?, &pair)?,
            "expires" => set_once(&mut expires, timestamp(pair.value, &pair.span)?, &pair)?,
            _ => {}
        }
    }

    let key_id = key_id
        .filter(|key_id: &&str| !key_id.is_empty())
        .ok_or(ParseError::MissingField("keyId"))?;
    let signature = signature
        .filter(|signature: &&str| !signature.is_empty())
        .ok_or(ParseError::MissingField("signature"))?;
    let headers = headers
        .filter(|headers: &Vec<&str>| !headers.is_empty())
        .ok_or(ParseError::MissingField("headers"))?;
    let created = created.ok_or(ParseError::MissingField("created"))?;

    Ok(SignatureHeader {
        key_id,
        algorithm,
        headers,
        signature,
        created,
        expires,
    })
}
