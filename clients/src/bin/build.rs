//! `r2rml-build`: generates the R2RML mapping document for an InterMine
//! object store from its JSON schema catalog.
//!
//! **Outputs:**
//! - `<out>`: the mapping document (Turtle by default, or N-Triples)
//!
//! **Usage:**
//! ```text
//! r2rml-build --catalog <model.json> [--config <r2rml.toml>] [--out <mapping.ttl>]
//!             [--format turtle|ntriples] [--stdout] [-v...]
//! ```
//!
//! Exits with status 3 when the catalog uses an attribute type the generator
//! does not recognise, 1 on any other error.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use intermine_catalog::{Catalog, DatabaseNaming};
use r2rml_clients::{init_tracing, OutputFormat};
use r2rml_mapping::{generate, GeneratorConfig, MappingError};
use tracing::{error, info};

/// Exit status for a catalog the generator cannot type.
const EXIT_SCHEMA_MISMATCH: u8 = 3;

/// Build an R2RML mapping document from an InterMine catalog.
#[derive(Parser)]
#[command(name = "r2rml-build", about = "Build an R2RML mapping from an InterMine schema catalog")]
struct Args {
    /// JSON schema catalog.
    #[arg(long)]
    catalog: PathBuf,

    /// Generator configuration (TOML). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file for the mapping document.
    #[arg(long, default_value = "mapping.ttl")]
    out: PathBuf,

    /// Serialization format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Turtle)]
    format: OutputFormat,

    /// Also print the document to stdout.
    #[arg(long)]
    stdout: bool,

    /// More log output (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<()> {
    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let doc = generate(&catalog, &DatabaseNaming, &config)
        .with_context(|| format!("Failed to map catalog '{}'", catalog.name()))?;
    let rendered = args.format.render(&doc);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(&args.out, &rendered)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;

    if args.stdout {
        print!("{rendered}");
    }

    info!(
        catalog = catalog.name(),
        classes = catalog.len(),
        format = ?args.format,
        out = %args.out.display(),
        "mapping written"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            let fatal = e
                .downcast_ref::<MappingError>()
                .is_some_and(MappingError::is_fatal_schema_mismatch);
            if fatal {
                ExitCode::from(EXIT_SCHEMA_MISMATCH)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
