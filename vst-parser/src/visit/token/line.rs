//! Line-based token types for the lexer pipeline
//!
//!     Visit files are parsed line by line: every statement occupies one
//!     line, so all the parser needs is a classified line stream. Each raw
//!     line is tokenized and then classified into exactly one category by
//!     [classify_line_tokens](crate::visit::lexing::classify_line_tokens).
//!
//! Line Classes
//!
//!     These are the line classes:
//!
//!         - Header: a VISIT statement carrying the visit identifier
//!         - GroupMarker: a GROUP statement opening a group
//!         - SequenceMarker: a SEQ statement opening a sequence
//!         - ActivityLine: any other statement line (ACT, SLEW, DITHER, ...)
//!         - Comment: line whose first non-blank character is `#`
//!         - Blank: empty or whitespace only
//!         - Unrecognized: anything else; the catch-all, never a guess
//!
//!     Classification is purely line-local. A line with an unknown activity
//!     keyword is still an ActivityLine: vocabulary checks belong to the
//!     parser, which also decides how Unrecognized lines are handled per its
//!     error policy.

use std::fmt;

use super::core::Token;

/// One classified line of a visit file.
///
/// Produced by the classification pass, which pairs each raw line with its
/// tokens, its class, its 1-based line number, and a nesting-depth hint
/// derived from the marker syntax. The raw text is kept with trailing
/// whitespace trimmed so diagnostics can echo the offending line.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassifiedLine {
    /// 1-based line number in the source file
    pub number: usize,

    /// The raw line text, trailing whitespace trimmed
    pub raw: String,

    /// The raw tokens that comprise this line
    pub tokens: Vec<Token>,

    /// The classification of this line
    pub class: LineClass,

    /// Nesting-depth hint derived from the marker syntax
    pub depth: usize,
}

/// The classification of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineClass {
    /// VISIT statement: the mandatory header carrying the visit identifier
    Header,

    /// GROUP statement: opens a group
    GroupMarker,

    /// SEQ statement: opens a sequence under the current group
    SequenceMarker,

    /// Any other statement line (ACT, SLEW, DITHER, AUX, ...)
    ActivityLine,

    /// Line whose first non-blank character is `#`
    Comment,

    /// Empty or whitespace-only line
    Blank,

    /// Anything that does not fit the categories above
    Unrecognized,
}

impl LineClass {
    /// Nesting-depth hint for this class, derived from the marker syntax.
    pub fn depth_hint(&self) -> usize {
        match self {
            LineClass::Header
            | LineClass::Comment
            | LineClass::Blank
            | LineClass::Unrecognized => 0,
            LineClass::GroupMarker => 1,
            LineClass::SequenceMarker => 2,
            LineClass::ActivityLine => 3,
        }
    }

    /// Whether lines of this class take part in structural parsing.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            LineClass::Header
                | LineClass::GroupMarker
                | LineClass::SequenceMarker
                | LineClass::ActivityLine
        )
    }
}

impl fmt::Display for LineClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineClass::Header => "HEADER",
            LineClass::GroupMarker => "GROUP_MARKER",
            LineClass::SequenceMarker => "SEQUENCE_MARKER",
            LineClass::ActivityLine => "ACTIVITY_LINE",
            LineClass::Comment => "COMMENT",
            LineClass::Blank => "BLANK",
            LineClass::Unrecognized => "UNRECOGNIZED",
        };
        write!(f, "{}", name)
    }
}
