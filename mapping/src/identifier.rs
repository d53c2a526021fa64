//! Identifier resolution and subject URI templates.
//!
//! Internal object-store ids are never exposed. A class's subjects are named
//! by its externally designated identifier attribute instead, looked up per
//! class name with a fallback to the configured default identifier.

use intermine_catalog::{Catalog, ClassDescriptor, FieldKind, FieldRef, NamingScheme};

use crate::config::GeneratorConfig;

/// The attribute that names a class's subjects.
#[derive(Debug, Clone, Copy)]
pub struct IdentifyingAttribute<'a> {
    /// The attribute field.
    pub field: FieldRef<'a>,
}

/// Finds identifying attributes and builds subject templates.
pub struct IdentifierResolver<'a> {
    catalog: &'a Catalog,
    naming: &'a dyn NamingScheme,
    config: &'a GeneratorConfig,
}

impl<'a> IdentifierResolver<'a> {
    /// Creates a resolver over `catalog`.
    pub fn new(
        catalog: &'a Catalog,
        naming: &'a dyn NamingScheme,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            catalog,
            naming,
            config,
        }
    }

    /// The designated identifier name for `class`.
    #[must_use]
    pub fn identifier_name(&self, class: &ClassDescriptor) -> &'a str {
        self.config
            .identifiers
            .get(&class.name)
            .unwrap_or(&self.config.default_identifier)
    }

    /// First attribute whose column name matches the designated identifier,
    /// ignoring case.
    #[must_use]
    pub fn identifying_attribute(
        &self,
        class: &'a ClassDescriptor,
    ) -> Option<IdentifyingAttribute<'a>> {
        let wanted = self.identifier_name(class);
        self.catalog
            .all_fields(class)
            .into_iter()
            .filter(|f| matches!(f.field.kind, FieldKind::Attribute { .. }))
            .find(|f| {
                self.naming
                    .column_name(f.field)
                    .is_some_and(|column| column.eq_ignore_ascii_case(wanted))
            })
            .map(|field| IdentifyingAttribute { field })
    }

    /// Column holding the identifying attribute.
    #[must_use]
    pub fn column(&self, id: &IdentifyingAttribute<'_>) -> String {
        self.naming
            .column_name(id.field.field)
            .unwrap_or_else(|| id.field.field.name.clone())
    }

    /// URI template for the subjects of `class`.
    ///
    /// The placeholder is the designated identifier name, or `alias` when the
    /// identifier column is exposed under another name (as in generated views).
    #[must_use]
    pub fn subject_template(&self, class: &ClassDescriptor, alias: Option<&str>) -> String {
        let placeholder = alias.unwrap_or_else(|| self.identifier_name(class));
        match self.config.namespaces.get(&class.name) {
            Some(namespace) => format!("{namespace}{{{placeholder}}}"),
            None => format!(
                "{}/{}/{{{placeholder}}}",
                self.config.base_namespace, class.name
            ),
        }
    }
}
