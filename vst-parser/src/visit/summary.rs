//! Summarizer
//!
//!     Computes aggregate statistics over a parsed [Visit]: group count,
//!     observation-statement count, dither count, and the distinct instrument
//!     configurations referenced by configuration-change activities. Pure
//!     read-only functions; summarizing the same tree twice yields identical
//!     values.
//!
//! Dither Counting
//!
//!     Whether "dithers" are first-class statements or a derived count over
//!     exposures sharing a dither pattern differs between file vintages, so
//!     the rule is configuration, not code: [DitherRule::FirstClass] counts
//!     activities classified as dithers (the default), while
//!     [DitherRule::DerivedFromExposures] counts exposures that reference a
//!     dither pattern via their `DITHERID` parameter.

use crate::visit::ast::{ActivityClass, Visit};

/// Which activities count as dithers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum DitherRule {
    /// Count activities classified [ActivityClass::Dither]
    #[default]
    FirstClass,

    /// Count observation statements carrying a `DITHERID` parameter
    DerivedFromExposures,
}

/// Configurable rules for summary derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRules {
    pub dither_rule: DitherRule,
}

/// Aggregate statistics for one visit.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Summary {
    pub visit_id: String,
    pub dither_count: usize,
    pub group_count: usize,
    pub observation_statement_count: usize,
    /// Distinct instrument configurations in first-seen order
    pub modes_used: Vec<String>,
}

/// Summarize a visit under the default rules.
pub fn summarize(visit: &Visit) -> Summary {
    summarize_with(visit, &SummaryRules::default())
}

/// Summarize a visit under explicit rules.
pub fn summarize_with(visit: &Visit, rules: &SummaryRules) -> Summary {
    let mut dither_count = 0;
    let mut observation_statement_count = 0;
    let mut modes_used: Vec<String> = Vec::new();

    for entry in visit.activities() {
        let activity = entry.activity;
        match activity.class {
            ActivityClass::ObservationStatement => observation_statement_count += 1,
            ActivityClass::ConfigurationChange => {
                if let Some(mode) = mode_of(activity) {
                    if !modes_used.iter().any(|m| m == mode) {
                        modes_used.push(mode.to_string());
                    }
                }
            }
            ActivityClass::Dither | ActivityClass::Other => {}
        }
        let is_dither = match rules.dither_rule {
            DitherRule::FirstClass => activity.class == ActivityClass::Dither,
            DitherRule::DerivedFromExposures => {
                activity.class == ActivityClass::ObservationStatement
                    && activity.param("DITHERID").is_some()
            }
        };
        if is_dither {
            dither_count += 1;
        }
    }

    Summary {
        visit_id: visit.id.clone(),
        dither_count,
        group_count: visit.groups.len(),
        observation_statement_count,
        modes_used,
    }
}

/// The instrument-configuration value a configuration-change activity refers
/// to: its `CONFIG` parameter, or its first bare argument as a fallback.
fn mode_of(activity: &crate::visit::ast::Activity) -> Option<&str> {
    activity
        .param("CONFIG")
        .or_else(|| activity.args.first().map(String::as_str))
}

/// Render the one-line summary:
///
///     Visit <id>: <d> dithers, <g> groups, <o> observation statements. Uses ['m1', 'm2']
pub fn render_one_line(summary: &Summary) -> String {
    let modes = summary
        .modes_used
        .iter()
        .map(|mode| format!("'{}'", mode))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Visit {}: {} dithers, {} groups, {} observation statements. Uses [{}]",
        summary.visit_id,
        summary.dither_count,
        summary.group_count,
        summary.observation_statement_count,
        modes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_one_line_empty_modes() {
        let summary = Summary {
            visit_id: "V00744008001".to_string(),
            dither_count: 2,
            group_count: 3,
            observation_statement_count: 7,
            modes_used: Vec::new(),
        };
        assert_eq!(
            render_one_line(&summary),
            "Visit V00744008001: 2 dithers, 3 groups, 7 observation statements. Uses []"
        );
    }

    #[test]
    fn test_render_one_line_quotes_and_joins_modes() {
        let summary = Summary {
            visit_id: "V00744008001".to_string(),
            dither_count: 0,
            group_count: 1,
            observation_statement_count: 1,
            modes_used: vec!["NRC A".to_string(), "NRC B".to_string()],
        };
        assert!(render_one_line(&summary).ends_with("Uses ['NRC A', 'NRC B']"));
    }
}
