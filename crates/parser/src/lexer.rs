//! Logos-based lexer for the schema file format.
//!
//! Schemas are separated by lines of dashes (`---`), a schema starts with an
//! `R(...)` header, dependencies use `->` and several may share a line
//! separated by commas.
//!
//! # Example input
//!
//! ```text
//! // employee
//! R(ABCD)
//! A -> B, BC -> D
//! ---
//! R(ABC)
//! AB -> C
//! ```

use core::ops::Range;

/// All token kinds produced by the schema lexer.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(::logos::Logos, Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A line comment starting with `//` and running to end of line.
    #[regex(r"//[^\n]*", allow_greedy = true)]
    Comment,

    /// The dependency arrow `->`.
    #[token("->")]
    Arrow,

    /// One or more `-` characters (schema separator).
    #[regex(r"-+")]
    Dash,

    /// `,` between dependencies on one line.
    #[token(",")]
    Comma,

    /// Opening parenthesis of a header.
    #[token("(")]
    OpenParen,

    /// Closing parenthesis of a header.
    #[token(")")]
    CloseParen,

    /// A run of attribute characters (alphanumeric or `_`). Each character
    /// is one attribute.
    #[regex(r"[\p{Alphabetic}\p{N}_]+")]
    Attributes,

    /// A newline (`\n` or `\r\n`).
    #[regex(r"\r?\n")]
    Newline,

    /// Spaces or tabs.
    #[regex(r"[ \t]+")]
    Whitespace,
}

/// A single token with its kind and the byte-offset span in the source.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range `start..end` into the original input string.
    pub span: Range<usize>,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Return the source text for this token given the original input.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }
}

/// Tokenize `input` and return all valid tokens.
///
/// Input the lexer cannot recognise is skipped.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    use logos::Logos as _;
    TokenKind::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|kind| Token { kind, span }))
        .collect()
}

/// Tokenize `input` and return tokens paired with their source text slices.
#[must_use]
pub fn tokenize_with_text(input: &str) -> Vec<(Token, &str)> {
    tokenize(input)
        .into_iter()
        .map(|token| {
            let text = token.text(input);
            (token, text)
        })
        .collect()
}
