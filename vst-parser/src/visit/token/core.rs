//! Token definitions for the visit-file format
//!
//! This module defines the raw tokens produced when lexing a single line of a
//! visit file. The tokens are defined using the logos derive macro.
//!
//! The statement syntax is flat: fields are separated by commas, `KEY=VALUE`
//! pairs use a bare equals sign, and every statement ends with a semicolon.
//! `Word` is the catch-all for field content, so every input character is
//! matched by some rule and tokenization never fails.

use logos::Logos;

/// All possible tokens in one line of a visit file
#[derive(Logos, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Token {
    /// Statement terminator
    #[token(";")]
    Semicolon,

    /// Field separator
    #[token(",")]
    Comma,

    /// Key/value separator inside a field
    #[token("=")]
    Equals,

    /// Comment marker
    #[token("#")]
    Hash,

    /// Runs of spaces and tabs (newlines never reach the line lexer)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Any run of characters that is not a separator or whitespace
    #[regex(r"[^ \t,=;#]+", |lex| lex.slice().to_owned())]
    Word(String),
}

impl Token {
    /// The source text this token stands for.
    ///
    /// Whitespace runs collapse to a single space; the original spacing is
    /// not needed once a line has been classified.
    pub fn as_text(&self) -> &str {
        match self {
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Equals => "=",
            Token::Hash => "#",
            Token::Whitespace => " ",
            Token::Word(s) => s,
        }
    }

    /// Check if this token is whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace)
    }
}
