//! R2RML mapping generation for InterMine object stores.
//!
//! The `r2rml-mapping` crate walks an [`intermine_catalog::Catalog`] and
//! produces an R2RML mapping document describing how the relational object
//! store can be exposed as RDF: one TriplesMap per exportable class, join
//! object maps for references and one-to-many collections, and generated SQL
//! views for many-to-many collections. Writers produce Turtle and N-Triples.
//!
//! # Entry Point
//!
//! ```
//! use intermine_catalog::{Catalog, ClassDescriptor, DatabaseNaming, FieldDescriptor};
//! use r2rml_mapping::{generate, GeneratorConfig};
//!
//! let catalog = Catalog::new(
//!     "genomic",
//!     vec![ClassDescriptor::new("Gene")
//!         .with_field(FieldDescriptor::attribute("primaryIdentifier", "java.lang.String"))],
//! )?;
//! let doc = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default())?;
//! assert_eq!(doc.triples_maps().len(), 1);
//!
//! let turtle = r2rml_mapping::serializer::turtle::to_turtle(&doc);
//! assert!(turtle.contains("<urn:intermine-table:Gene>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod builder;
pub mod config;
pub mod datatype;
pub mod document;
pub mod error;
pub mod exportable;
pub mod identifier;
pub mod model;
pub mod serializer;
pub mod vocab;

pub use builder::MappingBuilder;
pub use config::GeneratorConfig;
pub use datatype::PrimitiveKind;
pub use document::{MappingDocument, Prefix, Statement, Term};
pub use error::{ConfigError, MappingError};
pub use exportable::ExportFilter;
pub use identifier::{IdentifierResolver, IdentifyingAttribute};
pub use model::{LogicalTable, ObjectMap, PredicateObjectMap, SubjectMap, TriplesMap};

use intermine_catalog::{Catalog, NamingScheme};
use tracing::info;

/// Prefixes bound on every generated document.
pub const PREFIXES: [(&str, &str); 4] = [
    ("rr", vocab::RR),
    ("rdfs", vocab::RDFS),
    ("xsd", vocab::XSD),
    ("up", vocab::UP),
];

/// Generates the mapping document for every exportable class of `catalog`,
/// in catalog order.
///
/// # Errors
///
/// Returns [`MappingError::UnknownPrimitiveType`] as soon as an attribute of
/// an unrecognised type is met; no partial document is returned.
pub fn generate(
    catalog: &Catalog,
    naming: &dyn NamingScheme,
    config: &GeneratorConfig,
) -> Result<MappingDocument, MappingError> {
    let mut doc = MappingDocument::new();
    for (prefix, iri) in PREFIXES {
        doc.set_prefix(prefix, iri);
    }

    let mut builder = MappingBuilder::new(catalog, naming, config);
    let mut skipped = 0usize;
    for class in catalog.classes() {
        if !builder.filter().is_exportable(class) {
            continue;
        }
        let maps = builder.map_class(class)?;
        if maps.is_empty() {
            skipped += 1;
        }
        for map in maps {
            doc.add_triples_map(map);
        }
    }

    let views = doc.triples_maps().iter().filter(|m| m.is_view()).count();
    info!(
        catalog = catalog.name(),
        tables = doc.triples_maps().len() - views,
        views,
        skipped,
        statements = doc.len(),
        "mapping generated"
    );
    Ok(doc)
}
