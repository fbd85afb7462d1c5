//! Lexer
//!
//!     This module turns raw source lines into a classified line stream. The
//!     pipeline has two steps, both pure:
//!
//!         1. Per-line tokenization using the logos lexer. See
//!            [tokenize](tokenize). The token set is small: separators,
//!            whitespace, and Word as the content catch-all, so tokenization
//!            never fails.
//!
//!         2. Line classification. See [classify_line_tokens]. Each line is
//!            classified into exactly one [LineClass] from its token pattern
//!            alone: no lookahead, no state. Ambiguous lines are tagged
//!            Unrecognized rather than guessed into a category.
//!
//!     The classified stream is deterministic and restartable: running the
//!     classifier twice over the same lines yields identical output. All
//!     semantic validation (vocabulary, nesting, indices) happens later in
//!     the parser; the lexer itself has no error path.

use logos::Logos;

use crate::visit::token::{ClassifiedLine, LineClass, Token};

/// Tokenize a single line of a visit file.
///
/// Newlines never reach this function; the caller supplies decoded,
/// newline-stripped lines.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push(token);
        }
    }

    tokens
}

/// Determine the class of a line based on its tokens.
pub fn classify_line_tokens(tokens: &[Token]) -> LineClass {
    let mut content = tokens.iter().skip_while(|t| t.is_whitespace());

    match content.next() {
        None => LineClass::Blank,
        Some(Token::Hash) => LineClass::Comment,
        Some(Token::Word(keyword)) => match keyword.as_str() {
            "VISIT" => LineClass::Header,
            "GROUP" => LineClass::GroupMarker,
            "SEQ" => LineClass::SequenceMarker,
            _ => LineClass::ActivityLine,
        },
        // A line leading with a separator (`,`, `=`, `;`) fits no category.
        Some(_) => LineClass::Unrecognized,
    }
}

/// Classify an ordered sequence of raw lines.
///
/// Trailing whitespace is trimmed before tokenization, line numbers are
/// 1-based, and every line gets a class; nothing is dropped here. Comment and
/// blank lines are classified but excluded from structural parsing by the
/// parser.
pub fn classify_lines<'a, I>(lines: I) -> Vec<ClassifiedLine>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let raw = line.trim_end();
            let tokens = tokenize(raw);
            let class = classify_line_tokens(&tokens);
            ClassifiedLine {
                number: i + 1,
                raw: raw.to_string(),
                tokens,
                class,
                depth: class.depth_hint(),
            }
        })
        .collect()
}
