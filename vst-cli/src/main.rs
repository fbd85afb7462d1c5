//! Command-line interface for vst
//! This binary parses an observatory visit file and prints a report, a
//! one-line summary, an activity table, or JSON.
//!
//! Usage:
//!   vst `<path>` [--format `<format>`] [--strict]

use clap::{Arg, ArgAction, Command};

use vst_parser::visit::parsing::{parse_source, ParseConfig, ParsePolicy};
use vst_parser::visit::report::{activity_table, render_report};
use vst_parser::visit::summary::{render_one_line, summarize};

fn main() {
    let matches = Command::new("vst")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting observatory visit files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the visit file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: report, summary, table, json")
                .default_value("report"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on unknown activity keywords and unrecognized lines")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default value");

    // Reading and decoding the file happens out here; the parser only ever
    // sees decoded lines.
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("{}: {}", path, e);
        std::process::exit(1);
    });

    let config = ParseConfig {
        policy: if matches.get_flag("strict") {
            ParsePolicy::Strict
        } else {
            ParsePolicy::Lenient
        },
        ..ParseConfig::default()
    };

    let outcome = parse_source(&source, &config).unwrap_or_else(|e| {
        eprintln!("{}: {}", path, e);
        std::process::exit(1);
    });

    let summary = summarize(&outcome.visit);

    let formatted = match format.as_str() {
        "report" => render_report(&outcome.visit, &summary, &outcome.warnings),
        "summary" => {
            let mut line = render_one_line(&summary);
            line.push('\n');
            line
        }
        "table" => activity_table(&outcome.visit),
        "json" => {
            let value = serde_json::json!({
                "visit": outcome.visit,
                "summary": summary,
                "warnings": outcome.warnings,
            });
            let mut text = serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
                eprintln!("Error formatting JSON: {}", e);
                std::process::exit(1);
            });
            text.push('\n');
            text
        }
        other => {
            eprintln!("Unknown format '{}'", other);
            eprintln!("Available formats: report, summary, table, json");
            std::process::exit(1);
        }
    };

    // Warnings go to stderr so the formatted output stays clean for piping;
    // the report format already lists them inline.
    if format != "report" {
        for warning in &outcome.warnings {
            eprintln!("warning: {}: {}", path, warning);
        }
    }

    print!("{}", formatted);
}
