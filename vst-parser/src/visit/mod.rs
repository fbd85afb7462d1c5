//! Main module for visit-file library functionality

pub mod ast;
pub mod lexing;
pub mod parsing;
pub mod report;
pub mod summary;
pub mod testing;
pub mod token;
pub mod vocabulary;

pub use ast::{Activity, ActivityClass, Group, Parameter, Sequence, Violation, Visit};
pub use lexing::{classify_line_tokens, classify_lines, tokenize};
pub use parsing::{
    parse_classified, parse_lines, parse_source, ParseConfig, ParseError, ParseErrorKind,
    ParseOutcome, ParsePolicy, ParseWarning, WarningKind,
};
pub use summary::{render_one_line, summarize, summarize_with, DitherRule, Summary, SummaryRules};
pub use token::{ClassifiedLine, LineClass, Token};
pub use vocabulary::Vocabulary;
