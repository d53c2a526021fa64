//! `r2rml-conformance`: checks a generated mapping document against RDF 1.1
//! and against the catalog it was built from.
//!
//! **Usage:**
//! ```text
//! r2rml-conformance --mapping <mapping.ttl> --catalog <model.json> [--config <r2rml.toml>] [-v...]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use r2rml_clients::init_tracing;
use r2rml_conformance::{run_all, ConformanceReport, MappingInputs, Severity};

/// Run the mapping conformance suite.
#[derive(Parser)]
#[command(
    name = "r2rml-conformance",
    about = "Validate a generated R2RML mapping against its catalog"
)]
struct Args {
    /// Mapping document to check (Turtle).
    #[arg(long, default_value = "mapping.ttl")]
    mapping: PathBuf,

    /// JSON schema catalog the mapping was generated from.
    #[arg(long)]
    catalog: PathBuf,

    /// Generator configuration used for the mapping (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn print_report(report: &ConformanceReport) {
    println!("R2RML Mapping Conformance Report");
    println!("================================");
    println!();

    for result in &report.results {
        println!("[{}] {} - {}", result.severity.tag(), result.validator, result.message);
        for detail in &result.details {
            println!("       {detail}");
        }
    }

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.count(Severity::Pass),
        report.count(Severity::Warning),
        report.failure_count()
    );
}

fn run(args: Args) -> Result<bool> {
    let inputs = MappingInputs {
        mapping: args.mapping,
        catalog: args.catalog,
        config: args.config,
    };
    let report = run_all(&inputs)?;
    print_report(&report);

    if report.all_passed() {
        println!("Conformance PASSED.");
    } else {
        eprintln!(
            "Conformance FAILED: {} check(s) did not pass.",
            report.failure_count()
        );
    }
    Ok(report.all_passed())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
