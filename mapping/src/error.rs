//! Mapping and configuration error types.

use std::path::PathBuf;

use intermine_catalog::NamingError;
use thiserror::Error;

/// Errors that stop mapping generation.
///
/// Missing identifying attributes are not errors: the affected fragment is
/// left out and generation continues.
#[derive(Debug, Error)]
pub enum MappingError {
    /// An attribute's value type is outside the recognised set; the type table
    /// is stale relative to the schema.
    #[error("unrecognised primitive type '{value_type}' for attribute '{class}.{field}'")]
    UnknownPrimitiveType {
        /// Class being mapped.
        class: String,
        /// Attribute name.
        field: String,
        /// The raw type name.
        value_type: String,
    },

    /// The naming scheme could not name an indirection table or column.
    #[error(transparent)]
    Naming(#[from] NamingError),
}

impl MappingError {
    /// Returns true for the schema/generator mismatch that must end the run.
    #[must_use]
    pub fn is_fatal_schema_mismatch(&self) -> bool {
        matches!(self, MappingError::UnknownPrimitiveType { .. })
    }
}

/// Errors raised while loading a [`GeneratorConfig`](crate::GeneratorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
