//! RDF 1.1 / Turtle 1.1 validator.
//!
//! Validates that the mapping document is well-formed:
//! - the file parses as Turtle
//! - it holds at least one statement
//! - every standard prefix is declared with its expected namespace

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use sophia_api::prelude::*;
use sophia_inmem::graph::LightGraph;
use sophia_turtle::parser::turtle;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "mapping/rdf";

/// Parses `content` as Turtle and returns the number of distinct triples.
///
/// # Errors
///
/// Returns an error carrying the parser message if `content` is not Turtle.
pub fn triple_count(content: &str) -> Result<usize> {
    let graph: LightGraph = turtle::parse_str(content)
        .collect_triples()
        .map_err(|e| anyhow!("invalid Turtle: {e}"))?;
    Ok(graph.triples().count())
}

/// Validates the mapping document at `mapping`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn validate(mapping: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    if !mapping.exists() {
        report.push(TestResult::fail(
            VALIDATOR,
            format!("{} not found", mapping.display()),
        ));
        return Ok(report);
    }

    let content = std::fs::read_to_string(mapping)
        .with_context(|| format!("Failed to read {}", mapping.display()))?;

    match triple_count(&content) {
        Ok(0) => report.push(TestResult::fail(VALIDATOR, "mapping document holds no statements")),
        Ok(count) => report.push(TestResult::pass(
            VALIDATOR,
            format!("mapping document is valid Turtle ({count} triples)"),
        )),
        Err(e) => report.push(
            TestResult::fail(VALIDATOR, "mapping document does not parse")
                .with_details(vec![e.to_string()]),
        ),
    }

    validate_prefixes(&content, &mut report);
    Ok(report)
}

fn validate_prefixes(content: &str, report: &mut ConformanceReport) {
    let declared: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("@prefix"))
        .collect();

    let missing: Vec<String> = r2rml_mapping::PREFIXES
        .iter()
        .filter(|(prefix, iri)| {
            let expected = format!("@prefix {prefix}: <{iri}> .");
            !declared.contains(&expected.as_str())
        })
        .map(|(prefix, iri)| format!("{prefix}: <{iri}>"))
        .collect();

    if missing.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("all {} standard prefixes declared", r2rml_mapping::PREFIXES.len()),
        ));
    } else {
        report.push(
            TestResult::fail(VALIDATOR, "standard prefixes missing or rebound").with_details(missing),
        );
    }
}
