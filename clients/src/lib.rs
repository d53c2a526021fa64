//! Shared plumbing for the `r2rml-*` command-line clients.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use clap::ValueEnum;
use r2rml_mapping::serializer::{ntriples, turtle};
use r2rml_mapping::MappingDocument;
use tracing_subscriber::EnvFilter;

/// Mapping document serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    Ntriples,
}

impl OutputFormat {
    /// Serializes `doc` in this format.
    #[must_use]
    pub fn render(self, doc: &MappingDocument) -> String {
        match self {
            OutputFormat::Turtle => turtle::to_turtle(doc),
            OutputFormat::Ntriples => ntriples::to_ntriples(doc),
        }
    }
}

/// Log filter for `-v` repeated `verbose` times.
#[must_use]
pub fn log_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
