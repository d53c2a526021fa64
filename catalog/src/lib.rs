//! InterMine schema catalog encoded as typed Rust data.
//!
//! The catalog is the read-only class graph a mapping generator walks: class
//! descriptors with their attributes, references and collections, the
//! inheritance hierarchy, and the per-field FAIR term annotations. It also
//! carries the database naming scheme that turns descriptors into physical
//! table, column and indirection-table names.
//!
//! # Entry Point
//!
//! ```
//! let catalog = intermine_catalog::Catalog::from_json_str(
//!     r#"{ "name": "genomic", "classes": [ { "name": "Organism" } ] }"#,
//! )?;
//! assert_eq!(catalog.len(), 1);
//! # Ok::<(), intermine_catalog::CatalogError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod model;
pub mod naming;

pub use error::{CatalogError, NamingError};
pub use model::{
    Catalog, ClassDescriptor, FieldDescriptor, FieldKey, FieldKind, FieldRef, RelationKind,
};
pub use naming::{DatabaseNaming, NamingScheme};
