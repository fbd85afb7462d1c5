//! End-to-end tests for the vst binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

const NIRISS_FLAT: &str = "\
# NIRISS External Calibration
VISIT ,V00783001001 ,APERTURE=NIS_CEN;
GROUP ,1;
SEQ ,1;
AUX ,CONFIG=NIRISS Internal Flat;
ACT ,01 ,NISMAIN ,NINTS=2 ,NGROUPS=5 ,FILTER=F200W;
ACT ,02 ,NISMAIN ,NINTS=2 ,NGROUPS=5 ,FILTER=F277W;
";

fn write_visit_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".vst")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_summary_format() {
    let file = write_visit_file(NIRISS_FLAT);
    Command::cargo_bin("vst")
        .unwrap()
        .arg(file.path())
        .args(["--format", "summary"])
        .assert()
        .success()
        .stdout(
            "Visit V00783001001: 0 dithers, 1 groups, 2 observation statements. \
             Uses ['NIRISS Internal Flat']\n",
        );
}

#[test]
fn test_report_format_contains_table() {
    let file = write_visit_file(NIRISS_FLAT);
    Command::cargo_bin("vst")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("GROUP  SEQ  ACT  GSA"))
        .stdout(predicate::str::contains("NISMAIN"))
        .stdout(predicate::str::contains("Templates: NIRISS External Calibration"));
}

#[test]
fn test_json_format_is_valid_json() {
    let file = write_visit_file(NIRISS_FLAT);
    let output = Command::cargo_bin("vst")
        .unwrap()
        .arg(file.path())
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["summary"]["visit_id"], "V00783001001");
    assert_eq!(value["visit"]["groups"][0]["index"], 1);
}

#[test]
fn test_parse_error_reports_file_and_line() {
    let file = write_visit_file("VISIT ,V00783001001;\nSEQ ,1;\n");
    Command::cargo_bin("vst")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("structural error at line 2"));
}

#[test]
fn test_strict_flag_turns_warning_into_error() {
    let source = "VISIT ,V00783001001;\nGROUP ,1;\nSEQ ,1;\nWFSCPROBE ,01;\n";
    let file = write_visit_file(source);

    Command::cargo_bin("vst")
        .unwrap()
        .arg(file.path())
        .args(["--format", "summary"])
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown activity keyword"));

    Command::cargo_bin("vst")
        .unwrap()
        .arg(file.path())
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown activity type at line 4"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    Command::cargo_bin("vst")
        .unwrap()
        .arg("/no/such/file.vst")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/file.vst"));
}
