//! TOML-based generator configuration.
//!
//! Every key is optional; anything left out keeps the built-in default, so an
//! empty file and no file at all configure the same generator.

use std::collections::BTreeMap;
use std::path::Path;

use intermine_catalog::DatabaseNaming;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::vocab;

/// Settings consumed by the identifier resolver, the exportability filter
/// and the naming scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Naming-scheme version used for indirection column names.
    pub format_version: u32,
    /// Generic subject namespace, without trailing slash.
    pub base_namespace: String,
    /// Namespace for predicates derived from column and table names.
    pub vocabulary_namespace: String,
    /// Identifier attribute for classes without their own designation.
    pub default_identifier: String,
    /// Class name → identifying attribute name.
    pub identifiers: BTreeMap<String, String>,
    /// Class name → dedicated subject namespace.
    pub namespaces: BTreeMap<String, String>,
    /// Structural base classes that never get a TriplesMap.
    pub excluded_classes: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let identifiers = [
            ("Organism", "taxonId"),
            ("Protein", "primaryAccession"),
            ("Publication", "pubMedId"),
            ("DataSet", "name"),
            ("DataSource", "name"),
        ]
        .into_iter()
        .map(|(class, id)| (class.to_owned(), id.to_owned()))
        .collect();

        Self {
            format_version: DatabaseNaming::LATEST_VERSION,
            base_namespace: vocab::INTERMINE.to_owned(),
            vocabulary_namespace: vocab::INTERMINE_VOCAB.to_owned(),
            default_identifier: "primaryIdentifier".to_owned(),
            identifiers,
            namespaces: BTreeMap::from([("Protein".to_owned(), vocab::UNIPROT_KB.to_owned())]),
            excluded_classes: vec!["InterMineObject".to_owned(), "BioEntity".to_owned()],
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "loading generator configuration");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
