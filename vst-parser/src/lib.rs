//! # vst-parser
//!
//! A parser for observatory visit files.
//!
//! Visit files (`.vst`) are line-oriented text files describing one scheduled
//! visit of an observatory: a header statement followed by groups, sequences,
//! and leaf activity statements. This crate turns that text into a typed
//! `Visit` tree and derives summary statistics and text reports from it.
//!
//! The pipeline is:
//!
//!     raw lines -> lexing (tokenize + classify) -> parsing (state machine)
//!               -> Visit tree -> summary -> report
//!
//! Each stage is a pure function of its input; nothing is retained between
//! parse calls, so separate files may be parsed concurrently by the caller.

pub mod visit;
