//! Conformance suite for generated R2RML mappings.
//!
//! Checks a mapping document on disk against RDF 1.1 / Turtle 1.1 and
//! against the catalog it was generated from.
//!
//! # Conformance Scope
//!
//! | Validator | Standard |
//! |-----------|----------|
//! | `mapping/rdf` | Turtle 1.1 syntax, standard prefix bindings |
//! | `mapping/coverage` | One TriplesMap per identifiable class, resolvable joins, up to date |
//!
//! # Entry Point
//!
//! ```no_run
//! use r2rml_conformance::{run_all, MappingInputs};
//! use std::path::PathBuf;
//!
//! let inputs = MappingInputs {
//!     mapping: PathBuf::from("mapping.ttl"),
//!     catalog: PathBuf::from("genomic_model.json"),
//!     config: None,
//! };
//! let report = run_all(&inputs)?;
//! assert!(report.all_passed());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

use std::path::PathBuf;

use anyhow::{Context, Result};
use intermine_catalog::Catalog;
use r2rml_mapping::GeneratorConfig;
use tracing::info;

pub use report::{ConformanceReport, Severity, TestResult};

/// Files the conformance runner checks.
#[derive(Debug, Clone)]
pub struct MappingInputs {
    /// The generated mapping document (Turtle).
    pub mapping: PathBuf,
    /// The JSON catalog the mapping was generated from.
    pub catalog: PathBuf,
    /// Generator configuration used for the mapping, if not the default.
    pub config: Option<PathBuf>,
}

/// Runs all validators and returns the aggregated report.
///
/// Validators run in this order:
/// 1. RDF well-formedness of the mapping file
/// 2. Catalog coverage
///
/// # Errors
///
/// Returns an error if the catalog or configuration cannot be loaded, or a
/// file cannot be read.
pub fn run_all(inputs: &MappingInputs) -> Result<ConformanceReport> {
    let catalog = Catalog::load(&inputs.catalog)
        .with_context(|| format!("Failed to load catalog {}", inputs.catalog.display()))?;
    let config = match &inputs.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let mut report = ConformanceReport::new();
    report.extend(validators::rdf::validate(&inputs.mapping)?);
    report.extend(validators::coverage::validate(&catalog, &config, &inputs.mapping)?);

    info!(
        passed = report.count(Severity::Pass),
        warnings = report.count(Severity::Warning),
        failed = report.failure_count(),
        "conformance run complete"
    );
    Ok(report)
}
