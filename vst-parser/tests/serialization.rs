//! JSON round-trip tests for the document model and summary.

use vst_parser::visit::parsing::{parse_source, ParseConfig, ParseOutcome};
use vst_parser::visit::summary::summarize;
use vst_parser::visit::testing::samples;

#[test]
fn test_outcome_round_trips_through_json() {
    let outcome = parse_source(samples::WFSC_COMMISSIONING, &ParseConfig::default()).unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    let back: ParseOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(outcome, back);
}

#[test]
fn test_summary_json_shape() {
    let outcome = parse_source(samples::NIRISS_FLAT, &ParseConfig::default()).unwrap();
    let summary = summarize(&outcome.visit);
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["visit_id"], "V00783001001");
    assert_eq!(value["group_count"], 1);
    assert_eq!(value["modes_used"][0], "NIRISS Internal Flat");
}
