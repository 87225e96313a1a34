use super::{
    lexer::{tokenise, Token, TokenTy},
    BareItem, Dictionary, InnerList, Item, MemberValue, Parameters,
};
use logos::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

const MAX_INTEGER_DIGITS: usize = 15;
const MAX_DECIMAL_INTEGER_DIGITS: usize = 12;
const MAX_DECIMAL_FRACTION_DIGITS: usize = 3;

/// Structured field parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Key doesn't match the key grammar
    #[error("Invalid key")]
    #[diagnostic(help("keys start with a lower-case letter or `*`"))]
    InvalidKey {
        /// Location of the key
        #[label("invalid key")]
        span: SourceSpan,
    },

    /// Number has too many digits
    #[error("Number out of range")]
    NumberOutOfRange {
        /// Location of the number
        #[label("out of range")]
        span: SourceSpan,
    },

    /// Input ended where more was expected
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    /// Token or character didn't fit the grammar at this position
    #[error("Unexpected token")]
    UnexpectedToken {
        /// Location of the token
        #[label("unexpected")]
        span: SourceSpan,
    },
}

fn is_key(raw: &str) -> bool {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_lowercase() || first == '*')
        && chars.all(|ch| {
            ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '-' | '.' | '*')
        })
}

fn unescape(raw: &str) -> String {
    let mut unescaped = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            // The lexer guarantees that a backslash is always followed by an escapable character
            if let Some(escaped) = chars.next() {
                unescaped.push(escaped);
            }
        } else {
            unescaped.push(ch);
        }
    }
    unescaped
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<TokenTy> {
        self.tokens.get(self.pos).map(|token| token.ty)
    }

    fn bump(&mut self) -> Result<Token, Error> {
        let token = self.tokens.get(self.pos).cloned().ok_or(Error::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, ty: TokenTy) -> Result<Token, Error> {
        let token = self.bump()?;
        if token.ty == ty {
            Ok(token)
        } else {
            Err(unexpected(&token))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek() == Some(TokenTy::Whitespace) {
            self.pos += 1;
        }
    }

    fn text(&self, span: &Span) -> &'a str {
        &self.input[span.clone()]
    }

    fn key(&mut self) -> Result<String, Error> {
        let token = self.expect(TokenTy::Token)?;
        let raw = self.text(&token.span);
        if !is_key(raw) {
            return Err(Error::InvalidKey {
                span: token.span.into(),
            });
        }

        Ok(raw.to_owned())
    }

    fn bare_item(&mut self) -> Result<BareItem, Error> {
        let token = self.bump()?;
        let raw = self.text(&token.span);

        let out_of_range = || Error::NumberOutOfRange {
            span: token.span.clone().into(),
        };

        let item = match token.ty {
            TokenTy::Integer => {
                if raw.trim_start_matches('-').len() > MAX_INTEGER_DIGITS {
                    return Err(out_of_range());
                }
                BareItem::Integer(raw.parse().map_err(|_| out_of_range())?)
            }
            TokenTy::Decimal => {
                let (integer, fraction) = raw.trim_start_matches('-').split_once('.').unwrap_or_default();
                if integer.len() > MAX_DECIMAL_INTEGER_DIGITS
                    || fraction.len() > MAX_DECIMAL_FRACTION_DIGITS
                {
                    return Err(out_of_range());
                }
                BareItem::Decimal(raw.parse().map_err(|_| out_of_range())?)
            }
            TokenTy::String => BareItem::String(unescape(&raw[1..raw.len() - 1])),
            TokenTy::Token => BareItem::Token(raw.to_owned()),
            TokenTy::ByteSequence => BareItem::ByteSequence(raw[1..raw.len() - 1].to_owned()),
            TokenTy::Boolean => BareItem::Boolean(raw == "?1"),
            _ => return Err(unexpected(&token)),
        };

        Ok(item)
    }

    fn parameters(&mut self) -> Result<Parameters, Error> {
        let mut params = Vec::new();
        while self.peek() == Some(TokenTy::Semicolon) {
            self.pos += 1;
            self.skip_whitespace();

            let key = self.key()?;
            let value = if self.peek() == Some(TokenTy::Equals) {
                self.pos += 1;
                self.bare_item()?
            } else {
                BareItem::Boolean(true)
            };

            params.push((key, value));
        }

        Ok(params.into_iter().collect())
    }

    fn item(&mut self) -> Result<Item, Error> {
        let bare_item = self.bare_item()?;
        let params = self.parameters()?;

        Ok(Item { bare_item, params })
    }

    fn inner_list(&mut self) -> Result<InnerList, Error> {
        self.expect(TokenTy::OpenParen)?;

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(TokenTy::CloseParen) {
                self.pos += 1;
                break;
            }

            items.push(self.item()?);

            // Items have to be separated by whitespace
            match self.peek() {
                Some(TokenTy::Whitespace | TokenTy::CloseParen) => {}
                Some(..) => return Err(unexpected(&self.tokens[self.pos])),
                None => return Err(Error::UnexpectedEnd),
            }
        }

        let params = self.parameters()?;
        Ok(InnerList { items, params })
    }

    fn member_value(&mut self) -> Result<MemberValue, Error> {
        if self.peek() == Some(TokenTy::OpenParen) {
            self.inner_list().map(MemberValue::InnerList)
        } else {
            self.item().map(MemberValue::Item)
        }
    }

    fn dictionary(&mut self) -> Result<Dictionary, Error> {
        let mut members = Vec::new();

        self.skip_whitespace();
        if self.peek().is_none() {
            return Ok(members);
        }

        loop {
            let key = self.key()?;
            let value = if self.peek() == Some(TokenTy::Equals) {
                self.pos += 1;
                self.member_value()?
            } else {
                MemberValue::Item(Item {
                    bare_item: BareItem::Boolean(true),
                    params: self.parameters()?,
                })
            };
            members.push((key, value));

            self.skip_whitespace();
            if self.peek().is_none() {
                break;
            }

            self.expect(TokenTy::Comma)?;
            self.skip_whitespace();

            // Trailing commas are not allowed
            if self.peek().is_none() {
                return Err(Error::UnexpectedEnd);
            }
        }

        Ok(members)
    }
}

fn unexpected(token: &Token) -> Error {
    Error::UnexpectedToken {
        span: token.span.clone().into(),
    }
}

/// Parse a structured field dictionary
#[inline]
pub fn parse_dictionary(input: &str) -> Result<Dictionary, Error> {
    let tokens = tokenise(input).map_err(|span| Error::UnexpectedToken { span: span.into() })?;
    let mut parser = Parser {
        input,
        tokens,
        pos: 0,
    };

    parser.dictionary()
}
