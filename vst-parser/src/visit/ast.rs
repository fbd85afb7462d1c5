//! Document model for parsed visit files
//!
//!     This module defines the typed tree a successful parse produces:
//!
//!         Visit -> ordered Groups -> ordered Sequences -> ordered Activities
//!
//!     Ownership is a single tree: each child is exclusively owned by its
//!     parent and there are no back references. The tree is immutable after
//!     construction; the summarizer and report renderer only read it.
//!
//! Invariants
//!
//!     - The visit identifier matches the visit-id pattern (`V` + 11 digits).
//!     - Group indices are unique and strictly increasing in file order.
//!     - Sequence indices are unique and strictly increasing within a group.
//!
//!     The parser enforces these while building; [Visit::validate] re-checks
//!     them independently (e.g. for a tree built by hand in a test) and
//!     reports all violations together instead of stopping at the first.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern for visit identifiers, e.g. `V00783001001`.
static VISIT_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^V[0-9]{11}$").expect("visit id pattern is valid")
});

/// Check whether a string is a well-formed visit identifier.
pub fn is_visit_id(candidate: &str) -> bool {
    VISIT_ID.is_match(candidate)
}

/// A `KEY=VALUE` field of a statement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

/// Classification of an activity, derived from its keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActivityClass {
    /// A small positional offset between exposures
    Dither,

    /// A discrete observational action (exposures, slews)
    ObservationStatement,

    /// A statement selecting an instrument configuration
    ConfigurationChange,

    /// Anything else in the vocabulary, and unknown keywords under the
    /// lenient policy
    Other,
}

impl fmt::Display for ActivityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityClass::Dither => "DITHER",
            ActivityClass::ObservationStatement => "OBSERVATION",
            ActivityClass::ConfigurationChange => "CONFIGURATION",
            ActivityClass::Other => "OTHER",
        };
        write!(f, "{}", name)
    }
}

/// A leaf statement within a sequence.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Activity {
    /// The statement keyword (`ACT`, `SLEW`, `DITHER`, ...)
    pub keyword: String,

    /// Positional fields in file order
    pub args: Vec<String>,

    /// `KEY=VALUE` fields in file order
    pub params: Vec<Parameter>,

    /// Classification derived from the keyword via the vocabulary
    pub class: ActivityClass,

    /// 1-based source line this activity came from
    pub line: usize,
}

impl Activity {
    /// The activity number: the first positional field, a base-16 value
    /// (e.g. `0A` is activity 10).
    pub fn number(&self) -> Option<u32> {
        u32::from_str_radix(self.args.first()?, 16).ok()
    }

    /// The OSS script name: the second positional field.
    pub fn script(&self) -> Option<&str> {
        self.args.get(1).map(String::as_str)
    }

    /// Look up a parameter value by key.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

/// An ordered subdivision of a group.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sequence {
    pub index: u32,
    pub activities: Vec<Activity>,
}

/// An ordered subdivision of a visit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Group {
    pub index: u32,
    pub sequences: Vec<Sequence>,
}

impl Group {
    /// Look up a sequence by its index.
    pub fn sequence(&self, index: u32) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.index == index)
    }
}

/// The top-level unit parsed from one visit file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Visit {
    /// The visit identifier from the header, e.g. `V00783001001`
    pub id: String,

    /// APT template names from the leading comment line, if present
    pub templates: Vec<String>,

    /// `KEY=VALUE` fields of the header statement
    pub metadata: Vec<Parameter>,

    /// Groups in file order
    pub groups: Vec<Group>,
}

/// An activity together with the indices of its enclosing group and sequence.
///
/// Yielded by [Visit::activities]; carries the context needed for the
/// `GGSAA` activity label without back references in the tree.
#[derive(Debug, Clone, Copy)]
pub struct ActivityRef<'a> {
    pub group: u32,
    pub sequence: u32,
    pub activity: &'a Activity,
}

impl ActivityRef<'_> {
    /// The `GGSAA` label: two-digit group, one-digit sequence, two-digit
    /// activity number. Activities with an unparseable number render as 99,
    /// matching the flight software convention for unknown activities.
    pub fn gsa(&self) -> String {
        format!(
            "{:02}{:1}{:02}",
            self.group,
            self.sequence,
            self.activity.number().unwrap_or(99)
        )
    }
}

impl Visit {
    /// Look up a group by its index.
    pub fn group(&self, index: u32) -> Option<&Group> {
        self.groups.iter().find(|g| g.index == index)
    }

    /// Iterate over all activities depth-first, in file order, with their
    /// group and sequence context.
    pub fn activities(&self) -> impl Iterator<Item = ActivityRef<'_>> {
        self.groups.iter().flat_map(|group| {
            group.sequences.iter().flat_map(move |sequence| {
                sequence.activities.iter().map(move |activity| ActivityRef {
                    group: group.index,
                    sequence: sequence.index,
                    activity,
                })
            })
        })
    }

    /// Count of slew or guide statements: `SLEW` activities plus activities
    /// running one of the guider scripts.
    pub fn slew_count(&self) -> usize {
        self.activities()
            .filter(|a| {
                a.activity.keyword == "SLEW"
                    || matches!(a.activity.script(), Some("FGSMAIN") | Some("FGSVERMAIN"))
            })
            .count()
    }

    /// Re-check the structural invariants and return every violation found.
    ///
    /// Unlike the parser, which fails fast with a line number, this pass is
    /// meant for trees built outside the parser and reports all problems
    /// together.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if !is_visit_id(&self.id) {
            violations.push(Violation {
                path: "visit".to_string(),
                message: format!("identifier {:?} does not match the visit-id pattern", self.id),
            });
        }

        let mut previous_group: Option<u32> = None;
        for group in &self.groups {
            let path = format!("group {}", group.index);
            if let Some(previous) = previous_group {
                if group.index == previous {
                    violations.push(Violation {
                        path: path.clone(),
                        message: "duplicate group index".to_string(),
                    });
                } else if group.index < previous {
                    violations.push(Violation {
                        path: path.clone(),
                        message: format!("group index decreases after {}", previous),
                    });
                }
            }
            previous_group = Some(group.index);

            let mut previous_sequence: Option<u32> = None;
            for sequence in &group.sequences {
                let seq_path = format!("{} / sequence {}", path, sequence.index);
                if let Some(previous) = previous_sequence {
                    if sequence.index == previous {
                        violations.push(Violation {
                            path: seq_path,
                            message: "duplicate sequence index".to_string(),
                        });
                    } else if sequence.index < previous {
                        violations.push(Violation {
                            path: seq_path,
                            message: format!("sequence index decreases after {}", previous),
                        });
                    }
                }
                previous_sequence = Some(sequence.index);
            }
        }

        violations
    }
}

/// One invariant violation found by [Visit::validate].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Violation {
    /// Where in the tree the violation was found
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(keyword: &str, args: &[&str], class: ActivityClass) -> Activity {
        Activity {
            keyword: keyword.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            params: Vec::new(),
            class,
            line: 1,
        }
    }

    #[test]
    fn test_activity_number_is_base_16() {
        let act = activity("ACT", &["0A", "NISMAIN"], ActivityClass::ObservationStatement);
        assert_eq!(act.number(), Some(10));
        assert_eq!(act.script(), Some("NISMAIN"));
    }

    #[test]
    fn test_gsa_label() {
        let act = activity("ACT", &["03", "NISMAIN"], ActivityClass::ObservationStatement);
        let visit = Visit {
            id: "V00783001001".to_string(),
            templates: Vec::new(),
            metadata: Vec::new(),
            groups: vec![Group {
                index: 2,
                sequences: vec![Sequence {
                    index: 1,
                    activities: vec![act],
                }],
            }],
        };
        let labels: Vec<String> = visit.activities().map(|a| a.gsa()).collect();
        assert_eq!(labels, vec!["02103"]);
    }

    #[test]
    fn test_validate_reports_all_violations_together() {
        let visit = Visit {
            id: "NOT_AN_ID".to_string(),
            templates: Vec::new(),
            metadata: Vec::new(),
            groups: vec![
                Group { index: 2, sequences: Vec::new() },
                Group { index: 2, sequences: Vec::new() },
                Group { index: 1, sequences: Vec::new() },
            ],
        };
        let violations = visit.validate();
        assert_eq!(violations.len(), 3);
        assert!(violations[0].message.contains("visit-id pattern"));
        assert!(violations[1].message.contains("duplicate group index"));
        assert!(violations[2].message.contains("decreases"));
    }

    #[test]
    fn test_visit_id_pattern() {
        assert!(is_visit_id("V00783001001"));
        assert!(!is_visit_id("V0078300100"));
        assert!(!is_visit_id("X00783001001"));
        assert!(!is_visit_id(""));
    }
}
