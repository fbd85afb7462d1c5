//! Parsing module for visit files
//!
//!     The parser consumes the classified line stream produced by
//!     [lexing](crate::visit::lexing) and materializes a [Visit] tree, or
//!     fails with a precise diagnostic. It is a single-pass state machine
//!     with no backtracking:
//!
//!         AwaitingHeader -> InVisit -> InGroup -> InSequence
//!
//!     Activities are leaf records consumed while `InSequence`. Backward
//!     transitions are explicit: a GROUP marker while a sequence is open
//!     closes the sequence and its group and opens a sibling group; a SEQ
//!     marker while a sequence is open closes it and opens a sibling. There
//!     are no closing markers in the format; end-of-input closes whatever is
//!     open.
//!
//! Error Policy
//!
//!     Every (state, line class) pair either has an entry in the transition
//!     match or is a structural error. Fatal errors abort the parse with the
//!     1-based line number and no partial tree. Non-fatal findings (unknown
//!     activity keywords, unrecognized lines under the lenient policy) are
//!     accumulated as warnings and returned with the successful result, in
//!     file order.
//!
//!     Parsing policy is explicit configuration, never ambient state: the
//!     caller passes a [ParseConfig] carrying the strict/lenient policy and
//!     the activity [Vocabulary], so concurrent parses with different
//!     policies cannot interfere.

use std::collections::HashSet;
use std::fmt;

use crate::visit::ast::{is_visit_id, Activity, ActivityClass, Group, Parameter, Sequence, Visit};
use crate::visit::lexing::classify_lines;
use crate::visit::token::{ClassifiedLine, LineClass, Token};
use crate::visit::vocabulary::Vocabulary;

/// How the parser treats findings that are not outright structural errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ParsePolicy {
    /// Record unknown activity keywords as `Other` with a warning; skip
    /// unrecognized lines with a warning.
    #[default]
    Lenient,

    /// Unknown activity keywords and unrecognized lines are fatal.
    Strict,
}

/// Explicit configuration for one parse call.
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    pub policy: ParsePolicy,
    pub vocabulary: Vocabulary,
}

/// The kind of a fatal parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParseErrorKind {
    /// The mandatory VISIT header is absent, out of place, or malformed
    MalformedHeader,

    /// A line class appeared in a state where it is not a valid transition
    Structural,

    /// An activity keyword outside the vocabulary, under the strict policy
    UnknownActivityType,

    /// Two groups (or two sequences within a group) share an index
    DuplicateIndex,

    /// End of input reached inside a malformed trailing fragment
    IncompleteDocument,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::MalformedHeader => "malformed header",
            ParseErrorKind::Structural => "structural error",
            ParseErrorKind::UnknownActivityType => "unknown activity type",
            ParseErrorKind::DuplicateIndex => "duplicate index",
            ParseErrorKind::IncompleteDocument => "incomplete document",
        };
        write!(f, "{}", name)
    }
}

/// A fatal parse error. No partial tree is exposed alongside it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based line number where the error occurred
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}: {}", self.kind, self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// The kind of a non-fatal warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WarningKind {
    /// An activity keyword outside the vocabulary, recorded as `Other`
    UnknownActivityType,

    /// A line that fit no classification and was skipped
    UnrecognizedLine,
}

/// A non-fatal finding accumulated during a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseWarning {
    pub kind: WarningKind,
    /// 1-based line number the warning refers to
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// A successful parse: the completed tree plus warnings in file order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseOutcome {
    pub visit: Visit,
    pub warnings: Vec<ParseWarning>,
}

/// Parse a whole source string. Convenience wrapper over [parse_lines].
pub fn parse_source(source: &str, config: &ParseConfig) -> Result<ParseOutcome, ParseError> {
    parse_lines(source.lines(), config)
}

/// Classify raw lines and parse them.
pub fn parse_lines<'a, I>(lines: I, config: &ParseConfig) -> Result<ParseOutcome, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    parse_classified(&classify_lines(lines), config)
}

/// Parse an already classified line stream.
pub fn parse_classified(
    lines: &[ClassifiedLine],
    config: &ParseConfig,
) -> Result<ParseOutcome, ParseError> {
    Parser::new(lines, config).run()
}

// ---------------------------------------------------------------------------
// Statement decomposition

/// A structural line decomposed into its keyword and comma-separated fields.
struct RawStatement {
    keyword: String,
    /// Fields after the keyword, in file order, whitespace-trimmed
    fields: Vec<String>,
    /// Whether the statement ends with `;`
    terminated: bool,
    /// Whether content follows the terminator on the same line
    trailing: bool,
}

fn split_statement(tokens: &[Token]) -> RawStatement {
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut terminated = false;
    let mut trailing = false;

    for token in tokens {
        if terminated {
            if !token.is_whitespace() {
                trailing = true;
            }
            continue;
        }
        match token {
            Token::Comma => {
                push_field(&mut fields, &mut current);
            }
            Token::Semicolon => {
                push_field(&mut fields, &mut current);
                terminated = true;
            }
            other => current.push_str(other.as_text()),
        }
    }
    push_field(&mut fields, &mut current);

    let keyword = if fields.is_empty() {
        String::new()
    } else {
        fields.remove(0)
    };
    RawStatement {
        keyword,
        fields,
        terminated,
        trailing,
    }
}

fn push_field(fields: &mut Vec<String>, current: &mut String) {
    let text = current.trim();
    if !text.is_empty() {
        fields.push(text.to_string());
    }
    current.clear();
}

impl RawStatement {
    /// Split the fields into `KEY=VALUE` parameters and positional arguments,
    /// both in file order.
    fn params_and_args(&self) -> (Vec<Parameter>, Vec<String>) {
        let mut params = Vec::new();
        let mut args = Vec::new();
        for field in &self.fields {
            match field.split_once('=') {
                Some((key, value)) => params.push(Parameter {
                    key: key.trim().to_string(),
                    value: value.trim().to_string(),
                }),
                None => args.push(field.clone()),
            }
        }
        (params, args)
    }

    /// The first field, expected to be an index or identifier.
    fn leading_field(&self) -> Option<&str> {
        // An index field may carry extra words ("1 EXECUTE"); only the first
        // counts, matching operational files.
        self.fields.first()?.split_whitespace().next()
    }
}

// ---------------------------------------------------------------------------
// State machine

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingHeader,
    InVisit,
    InGroup,
    InSequence,
}

struct Parser<'a> {
    lines: &'a [ClassifiedLine],
    config: &'a ParseConfig,
    state: State,

    id: Option<String>,
    templates: Vec<String>,
    metadata: Vec<Parameter>,
    groups: Vec<Group>,
    open_group: Option<Group>,
    open_sequence: Option<Sequence>,
    seen_group_indices: HashSet<u32>,
    seen_sequence_indices: HashSet<u32>,
    last_group_index: Option<u32>,
    last_sequence_index: Option<u32>,

    warnings: Vec<ParseWarning>,
    /// Line number of the last structural line, for truncation detection
    last_structural: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(lines: &'a [ClassifiedLine], config: &'a ParseConfig) -> Self {
        let last_structural = lines
            .iter()
            .filter(|line| line.class.is_structural())
            .map(|line| line.number)
            .last();
        Parser {
            lines,
            config,
            state: State::AwaitingHeader,
            id: None,
            templates: Vec::new(),
            metadata: Vec::new(),
            groups: Vec::new(),
            open_group: None,
            open_sequence: None,
            seen_group_indices: HashSet::new(),
            seen_sequence_indices: HashSet::new(),
            last_group_index: None,
            last_sequence_index: None,
            warnings: Vec::new(),
            last_structural,
        }
    }

    fn run(mut self) -> Result<ParseOutcome, ParseError> {
        for line in self.lines {
            self.step(line)?;
        }
        self.finish()
    }

    /// The transition table: every (state, class) pair is handled here, and
    /// anything without a structural action is an error.
    fn step(&mut self, line: &ClassifiedLine) -> Result<(), ParseError> {
        match (self.state, line.class) {
            (_, LineClass::Blank) => Ok(()),
            (_, LineClass::Comment) => {
                self.take_comment(line);
                Ok(())
            }
            (_, LineClass::Unrecognized) => self.take_unrecognized(line),

            (State::AwaitingHeader, LineClass::Header) => self.begin_visit(line),
            (State::AwaitingHeader, _) => Err(ParseError::new(
                ParseErrorKind::MalformedHeader,
                line.number,
                format!("expected VISIT header, found {}", line.class),
            )),

            (_, LineClass::Header) => Err(ParseError::new(
                ParseErrorKind::Structural,
                line.number,
                "unexpected second VISIT header",
            )),

            (_, LineClass::GroupMarker) => self.begin_group(line),

            (State::InVisit, LineClass::SequenceMarker) => Err(ParseError::new(
                ParseErrorKind::Structural,
                line.number,
                "SEQ marker before any GROUP has opened",
            )),
            (State::InGroup | State::InSequence, LineClass::SequenceMarker) => {
                self.begin_sequence(line)
            }

            (State::InVisit | State::InGroup, LineClass::ActivityLine) => Err(ParseError::new(
                ParseErrorKind::Structural,
                line.number,
                "activity statement outside any sequence",
            )),
            (State::InSequence, LineClass::ActivityLine) => self.take_activity(line),
        }
    }

    fn take_comment(&mut self, line: &ClassifiedLine) {
        // The leading comment conventionally carries the APT template list.
        if self.state != State::AwaitingHeader || !self.templates.is_empty() {
            return;
        }
        let text = line.raw.trim_start();
        if let Some(body) = text.strip_prefix('#') {
            self.templates = body
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    fn take_unrecognized(&mut self, line: &ClassifiedLine) -> Result<(), ParseError> {
        match self.config.policy {
            ParsePolicy::Lenient => {
                self.warnings.push(ParseWarning {
                    kind: WarningKind::UnrecognizedLine,
                    line: line.number,
                    message: format!("unrecognized line skipped: {:?}", line.raw),
                });
                Ok(())
            }
            ParsePolicy::Strict => Err(ParseError::new(
                ParseErrorKind::Structural,
                line.number,
                format!("unrecognized line: {:?}", line.raw),
            )),
        }
    }

    fn statement(&self, line: &ClassifiedLine) -> Result<RawStatement, ParseError> {
        let statement = split_statement(&line.tokens);
        if !statement.terminated {
            // A missing terminator on the last structural line means the file
            // was cut off mid-statement.
            let kind = if Some(line.number) == self.last_structural {
                ParseErrorKind::IncompleteDocument
            } else if line.class == LineClass::Header {
                ParseErrorKind::MalformedHeader
            } else {
                ParseErrorKind::Structural
            };
            return Err(ParseError::new(
                kind,
                line.number,
                "statement is not terminated with ';'",
            ));
        }
        if statement.trailing {
            return Err(ParseError::new(
                ParseErrorKind::Structural,
                line.number,
                "content after statement terminator",
            ));
        }
        Ok(statement)
    }

    fn begin_visit(&mut self, line: &ClassifiedLine) -> Result<(), ParseError> {
        let statement = self.statement(line)?;
        let id = match statement.leading_field() {
            Some(id) => id.to_string(),
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MalformedHeader,
                    line.number,
                    "VISIT header has no identifier field",
                ))
            }
        };
        if !is_visit_id(&id) {
            return Err(ParseError::new(
                ParseErrorKind::MalformedHeader,
                line.number,
                format!("{:?} does not match the visit-id pattern", id),
            ));
        }
        let (params, _args) = statement.params_and_args();
        self.id = Some(id);
        self.metadata = params;
        self.state = State::InVisit;
        Ok(())
    }

    fn begin_group(&mut self, line: &ClassifiedLine) -> Result<(), ParseError> {
        let statement = self.statement(line)?;
        let index = self.parse_index(&statement, line, "GROUP")?;
        if !self.seen_group_indices.insert(index) {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateIndex,
                line.number,
                format!("duplicate GROUP index {}", index),
            ));
        }
        if self.last_group_index.is_some_and(|last| index < last) {
            return Err(ParseError::new(
                ParseErrorKind::Structural,
                line.number,
                format!("GROUP index {} is not increasing", index),
            ));
        }
        self.last_group_index = Some(index);
        self.last_sequence_index = None;
        self.close_group();
        self.open_group = Some(Group {
            index,
            sequences: Vec::new(),
        });
        self.seen_sequence_indices.clear();
        self.state = State::InGroup;
        Ok(())
    }

    fn begin_sequence(&mut self, line: &ClassifiedLine) -> Result<(), ParseError> {
        let statement = self.statement(line)?;
        let index = self.parse_index(&statement, line, "SEQ")?;
        if !self.seen_sequence_indices.insert(index) {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateIndex,
                line.number,
                format!("duplicate SEQ index {} within the group", index),
            ));
        }
        if self.last_sequence_index.is_some_and(|last| index < last) {
            return Err(ParseError::new(
                ParseErrorKind::Structural,
                line.number,
                format!("SEQ index {} is not increasing", index),
            ));
        }
        self.last_sequence_index = Some(index);
        self.close_sequence();
        self.open_sequence = Some(Sequence {
            index,
            activities: Vec::new(),
        });
        self.state = State::InSequence;
        Ok(())
    }

    fn take_activity(&mut self, line: &ClassifiedLine) -> Result<(), ParseError> {
        let statement = self.statement(line)?;
        let class = match self.config.vocabulary.classify(&statement.keyword) {
            Some(class) => class,
            None => match self.config.policy {
                ParsePolicy::Strict => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnknownActivityType,
                        line.number,
                        format!("unknown activity keyword {:?}", statement.keyword),
                    ))
                }
                ParsePolicy::Lenient => {
                    self.warnings.push(ParseWarning {
                        kind: WarningKind::UnknownActivityType,
                        line: line.number,
                        message: format!(
                            "unknown activity keyword {:?}, recorded as OTHER",
                            statement.keyword
                        ),
                    });
                    ActivityClass::Other
                }
            },
        };
        let (params, args) = statement.params_and_args();
        let sequence = self
            .open_sequence
            .as_mut()
            .expect("InSequence state implies an open sequence");
        sequence.activities.push(Activity {
            keyword: statement.keyword,
            args,
            params,
            class,
            line: line.number,
        });
        Ok(())
    }

    fn parse_index(
        &self,
        statement: &RawStatement,
        line: &ClassifiedLine,
        marker: &str,
    ) -> Result<u32, ParseError> {
        statement
            .leading_field()
            .and_then(|field| field.parse::<u32>().ok())
            .ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::Structural,
                    line.number,
                    format!("{} marker has no decimal index", marker),
                )
            })
    }

    fn close_sequence(&mut self) {
        if let Some(sequence) = self.open_sequence.take() {
            if let Some(group) = self.open_group.as_mut() {
                group.sequences.push(sequence);
            }
        }
    }

    fn close_group(&mut self) {
        self.close_sequence();
        if let Some(group) = self.open_group.take() {
            self.groups.push(group);
        }
    }

    fn finish(mut self) -> Result<ParseOutcome, ParseError> {
        let id = match self.id.take() {
            Some(id) => id,
            // No structural line ever opened the visit.
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MalformedHeader,
                    1,
                    "no VISIT header found",
                ))
            }
        };
        self.close_group();
        Ok(ParseOutcome {
            visit: Visit {
                id,
                templates: self.templates,
                metadata: self.metadata,
                groups: self.groups,
            },
            warnings: self.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_statement_fields() {
        let tokens = crate::visit::lexing::tokenize("ACT ,02 ,NISMAIN ,NINTS=2 ,CONFIG=NIRISS Internal Flat;");
        let statement = split_statement(&tokens);
        assert_eq!(statement.keyword, "ACT");
        assert!(statement.terminated);
        assert!(!statement.trailing);
        let (params, args) = statement.params_and_args();
        assert_eq!(args, vec!["02", "NISMAIN"]);
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].key, "CONFIG");
        assert_eq!(params[1].value, "NIRISS Internal Flat");
    }

    #[test]
    fn test_split_statement_unterminated() {
        let tokens = crate::visit::lexing::tokenize("GROUP ,1");
        assert!(!split_statement(&tokens).terminated);
    }

    #[test]
    fn test_group_marker_closes_open_sequence() {
        let source = "VISIT ,V00783001001;\nGROUP ,1;\nSEQ ,1;\nACT ,01 ,NISMAIN;\nGROUP ,2;\nSEQ ,1;\nACT ,01 ,NISMAIN;";
        let outcome = parse_source(source, &ParseConfig::default()).unwrap();
        assert_eq!(outcome.visit.groups.len(), 2);
        assert_eq!(outcome.visit.groups[0].sequences.len(), 1);
        assert_eq!(outcome.visit.groups[1].sequences[0].activities.len(), 1);
    }

    #[test]
    fn test_sequence_indices_reset_between_groups() {
        // SEQ 1 appears in both groups; only a repeat within one group is fatal
        let source = "VISIT ,V00783001001;\nGROUP ,1;\nSEQ ,1;\nGROUP ,2;\nSEQ ,1;";
        assert!(parse_source(source, &ParseConfig::default()).is_ok());
    }
}
