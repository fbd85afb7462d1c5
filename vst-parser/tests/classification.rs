//! Parameterized tests for the line classifier.

use rstest::rstest;
use vst_parser::visit::lexing::{classify_line_tokens, classify_lines, tokenize};
use vst_parser::visit::LineClass;

#[rstest]
#[case("VISIT ,V00783001001 ,APERTURE=NIS_CEN;", LineClass::Header, 0)]
#[case("GROUP ,1;", LineClass::GroupMarker, 1)]
#[case("  GROUP ,12;", LineClass::GroupMarker, 1)]
#[case("SEQ ,3;", LineClass::SequenceMarker, 2)]
#[case("ACT ,01 ,NISMAIN ,NINTS=2;", LineClass::ActivityLine, 3)]
#[case("SLEW ,01 ,SCSLEWMAIN;", LineClass::ActivityLine, 3)]
#[case("DITHER ,ID=1 ,DX=0.2 ,DY=0.3;", LineClass::ActivityLine, 3)]
#[case("WFSCPROBE ,01;", LineClass::ActivityLine, 3)]
#[case("# NIRISS External Calibration", LineClass::Comment, 0)]
#[case("   # indented comment", LineClass::Comment, 0)]
#[case("", LineClass::Blank, 0)]
#[case("   \t", LineClass::Blank, 0)]
#[case(",leading separator;", LineClass::Unrecognized, 0)]
#[case("=KEY;", LineClass::Unrecognized, 0)]
#[case(";", LineClass::Unrecognized, 0)]
fn test_classify(#[case] line: &str, #[case] expected: LineClass, #[case] depth: usize) {
    let tokens = tokenize(line);
    let class = classify_line_tokens(&tokens);
    assert_eq!(class, expected, "line {:?}", line);
    assert_eq!(class.depth_hint(), depth, "line {:?}", line);
}

#[test]
fn test_every_line_gets_a_class() {
    // The classifier never fails: every line lands in exactly one class
    let source = "VISIT ,V00783001001;\n???garbage???\n,,,\nGROUP ,1;";
    let lines = classify_lines(source.split('\n'));
    assert_eq!(lines.len(), 4);
    // "???garbage???" starts with a Word, so it is an activity line for the
    // parser to judge; ",,," leads with a separator and is unrecognized
    assert_eq!(lines[1].class, LineClass::ActivityLine);
    assert_eq!(lines[2].class, LineClass::Unrecognized);
}
