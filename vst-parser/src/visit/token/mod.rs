//! Core token types shared across the lexer, parser, and tooling.

pub mod core;
pub mod line;

pub use core::Token;
pub use line::{ClassifiedLine, LineClass};
