//! Exportability filter.

use std::collections::HashSet;

use intermine_catalog::ClassDescriptor;

use crate::config::GeneratorConfig;

/// Decides whether a class gets its own TriplesMap. Structural base classes
/// named in the configuration never do.
#[derive(Debug, Clone)]
pub struct ExportFilter {
    excluded: HashSet<String>,
}

impl ExportFilter {
    /// Builds the filter from the configured exclusion list.
    #[must_use]
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            excluded: config.excluded_classes.iter().cloned().collect(),
        }
    }

    /// Returns false for excluded base classes, true otherwise.
    #[must_use]
    pub fn is_exportable(&self, class: &ClassDescriptor) -> bool {
        !self.excluded.contains(&class.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_classes_are_excluded() {
        let filter = ExportFilter::new(&GeneratorConfig::default());
        assert!(!filter.is_exportable(&ClassDescriptor::new("InterMineObject")));
        assert!(!filter.is_exportable(&ClassDescriptor::new("BioEntity")));
        assert!(filter.is_exportable(&ClassDescriptor::new("Gene")));
        assert!(filter.is_exportable(&ClassDescriptor::new("bioentity")));
    }
}
