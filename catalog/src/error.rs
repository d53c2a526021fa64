//! Catalog and naming error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or assembling a [`Catalog`](crate::Catalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid JSON for the catalog schema.
    #[error("catalog parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two class descriptors share a name.
    #[error("duplicate class '{0}'")]
    DuplicateClass(String),

    /// A class extends a class the catalog does not define.
    #[error("class '{class}' extends unknown class '{parent}'")]
    UnknownParent {
        /// The subclass.
        class: String,
        /// The missing parent.
        parent: String,
    },

    /// A reference or collection points at a class the catalog does not define.
    #[error("field '{class}.{field}' refers to unknown class '{referenced}'")]
    UnknownReferencedClass {
        /// Declaring class.
        class: String,
        /// Field name.
        field: String,
        /// The missing target class.
        referenced: String,
    },

    /// A many-to-many collection has no reverse collection.
    #[error("many-to-many collection '{class}.{field}' has no reverse field")]
    MissingReverse {
        /// Declaring class.
        class: String,
        /// Collection name.
        field: String,
    },

    /// A field names a reverse field the referenced class does not have.
    #[error("field '{class}.{field}' names reverse '{reverse}', which '{referenced}' does not define")]
    UnknownReverse {
        /// Declaring class.
        class: String,
        /// Field name.
        field: String,
        /// Class expected to hold the reverse field.
        referenced: String,
        /// The missing reverse field.
        reverse: String,
    },
}

/// Errors raised by a [`NamingScheme`](crate::NamingScheme).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    /// Indirection names only exist for many-to-many collections.
    #[error("'{class}.{field}' is not a many-to-many collection")]
    NotManyToMany {
        /// Declaring class.
        class: String,
        /// Field name.
        field: String,
    },

    /// The naming-scheme version is not one the scheme knows.
    #[error("unsupported naming-scheme version {0}")]
    UnsupportedVersion(u32),
}
