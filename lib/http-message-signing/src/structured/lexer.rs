use logos::{Lexer, Logos, Span};

#[derive(Clone, Copy, Debug, Logos, PartialEq, Eq)]
pub enum TokenTy {
    #[regex(r"[A-Za-z*][A-Za-z0-9:/!#$%&'*+\-.^_`|~]*")]
    Token,

    #[regex(r"-?[0-9]+")]
    Integer,

    #[regex(r"-?[0-9]+\.[0-9]+")]
    Decimal,

    #[regex(r#""([^"\\]|\\["\\])*""#)]
    String,

    #[regex(r":[A-Za-z0-9+/=]*:")]
    ByteSequence,

    #[regex(r"\?[01]")]
    Boolean,

    #[token("=")]
    Equals,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[ \t]+")]
    Whitespace,
}

#[derive(Clone, Debug)]
pub struct Token {
    pub ty: TokenTy,
    pub span: Span,
}

/// Lex the entire input upfront
///
/// Returns the span of the first character the lexer couldn't make sense of
pub fn tokenise(input: &str) -> Result<Vec<Token>, Span> {
    Lexer::<'_, TokenTy>::new(input)
        .spanned()
        .map(|(ty, span)| match ty {
            Ok(ty) => Ok(Token { ty, span }),
            Err(()) => Err(span),
        })
        .collect()
}
