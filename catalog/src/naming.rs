//! Catalog → database naming.
//!
//! Deterministic mappings from descriptors to the physical names the
//! object store uses: table names, column names, and the names of the
//! indirection tables that back many-to-many collections.

use crate::error::NamingError;
use crate::model::{ClassDescriptor, FieldDescriptor, FieldKind, FieldRef, RelationKind};

/// Words that cannot be used as bare SQL identifiers.
const RESERVED_WORDS: &[&str] = &[
    "all", "and", "any", "as", "asc", "between", "by", "case", "cast", "check", "class", "column",
    "create", "default", "delete", "desc", "distinct", "end", "from", "group", "having", "in",
    "index", "insert", "into", "is", "join", "like", "limit", "not", "null", "offset", "on", "or",
    "order", "select", "table", "to", "union", "update", "user", "value", "when", "where",
];

/// Prefix given to names that collide with a reserved word.
const RESERVED_PREFIX: &str = "intermine_";

/// Derives physical table and column names from catalog descriptors.
///
/// Implementations must be pure: the same descriptor and version always
/// produce the same name.
pub trait NamingScheme {
    /// Table holding the rows of `class`.
    fn table_name(&self, class: &ClassDescriptor) -> String;

    /// Column holding `field`, or `None` for collections (which have no column).
    fn column_name(&self, field: &FieldDescriptor) -> Option<String>;

    /// Indirection table backing a many-to-many collection.
    ///
    /// # Errors
    ///
    /// Returns [`NamingError::NotManyToMany`] for any other field.
    fn indirection_table_name(&self, collection: FieldRef<'_>) -> Result<String, NamingError>;

    /// Indirection column pointing back at the collection's owner.
    ///
    /// # Errors
    ///
    /// Returns an error for non many-to-many fields or unknown versions.
    fn inward_indirection_column(
        &self,
        collection: FieldRef<'_>,
        version: u32,
    ) -> Result<String, NamingError>;

    /// Indirection column pointing at the collection's referenced class.
    ///
    /// # Errors
    ///
    /// Returns an error for non many-to-many fields or unknown versions.
    fn outward_indirection_column(
        &self,
        collection: FieldRef<'_>,
        version: u32,
    ) -> Result<String, NamingError>;
}

/// The object store's own naming scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatabaseNaming;

impl DatabaseNaming {
    /// Latest naming-scheme version understood by this scheme.
    pub const LATEST_VERSION: u32 = 1;
}

impl NamingScheme for DatabaseNaming {
    fn table_name(&self, class: &ClassDescriptor) -> String {
        sql_compatible(&class.name)
    }

    fn column_name(&self, field: &FieldDescriptor) -> Option<String> {
        match field.kind {
            FieldKind::Attribute { .. } => Some(sql_compatible(&field.name)),
            FieldKind::Reference { .. } => Some(format!("{}id", field.name)),
            FieldKind::Collection { .. } => None,
        }
    }

    fn indirection_table_name(&self, collection: FieldRef<'_>) -> Result<String, NamingError> {
        let inward = self.inward_indirection_column(collection, 0)?;
        let outward = self.outward_indirection_column(collection, 0)?;
        Ok(if inward < outward {
            format!("{inward}{outward}")
        } else {
            format!("{outward}{inward}")
        })
    }

    fn inward_indirection_column(
        &self,
        collection: FieldRef<'_>,
        version: u32,
    ) -> Result<String, NamingError> {
        ensure_many_to_many(collection)?;
        let base = collection
            .field
            .reverse()
            .unwrap_or(&collection.declaring_class.name);
        versioned(base, version)
    }

    fn outward_indirection_column(
        &self,
        collection: FieldRef<'_>,
        version: u32,
    ) -> Result<String, NamingError> {
        ensure_many_to_many(collection)?;
        versioned(&collection.field.name, version)
    }
}

fn ensure_many_to_many(collection: FieldRef<'_>) -> Result<(), NamingError> {
    if collection.field.relation() == Some(RelationKind::MN) {
        Ok(())
    } else {
        Err(NamingError::NotManyToMany {
            class: collection.declaring_class.name.clone(),
            field: collection.field.name.clone(),
        })
    }
}

fn versioned(base: &str, version: u32) -> Result<String, NamingError> {
    match version {
        0 => Ok(capitalise(&sql_compatible(base))),
        1 => Ok(sql_compatible(base)),
        other => Err(NamingError::UnsupportedVersion(other)),
    }
}

fn sql_compatible(name: &str) -> String {
    if RESERVED_WORDS.contains(&name.to_ascii_lowercase().as_str()) {
        format!("{RESERVED_PREFIX}{name}")
    } else {
        name.to_owned()
    }
}

fn capitalise(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Catalog;

    fn catalog() -> Catalog {
        Catalog::new(
            "genomic",
            vec![
                ClassDescriptor::new("Organism").with_field(
                    FieldDescriptor::collection("proteins", "Protein", RelationKind::MN, Some("organism")),
                ),
                ClassDescriptor::new("Protein")
                    .with_field(FieldDescriptor::collection(
                        "organism",
                        "Organism",
                        RelationKind::MN,
                        Some("proteins"),
                    ))
                    .with_field(FieldDescriptor::attribute("order", "java.lang.Integer"))
                    .with_field(FieldDescriptor::reference("gene", "Organism")),
            ],
        )
        .expect("valid catalog")
    }

    #[test]
    fn indirection_names_are_symmetric() {
        let catalog = catalog();
        let organism = catalog.class("Organism").expect("Organism");
        let protein = catalog.class("Protein").expect("Protein");
        let forward = catalog.all_fields(organism)[0];
        let backward = catalog.all_fields(protein)[0];

        let naming = DatabaseNaming;
        assert_eq!(
            naming.indirection_table_name(forward).expect("m:n"),
            "OrganismProteins"
        );
        assert_eq!(
            naming.indirection_table_name(backward).expect("m:n"),
            "OrganismProteins"
        );
        assert_eq!(naming.inward_indirection_column(forward, 1).expect("v1"), "organism");
        assert_eq!(naming.outward_indirection_column(forward, 1).expect("v1"), "proteins");
        assert_eq!(naming.outward_indirection_column(forward, 0).expect("v0"), "Proteins");
    }

    #[test]
    fn columns_follow_field_kind() {
        let catalog = catalog();
        let protein = catalog.class("Protein").expect("Protein");
        let naming = DatabaseNaming;
        let columns: Vec<_> = protein.fields.iter().map(|f| naming.column_name(f)).collect();
        assert_eq!(
            columns,
            [None, Some("intermine_order".to_owned()), Some("geneid".to_owned())]
        );
    }

    #[test]
    fn unknown_version_is_rejected() {
        let catalog = catalog();
        let organism = catalog.class("Organism").expect("Organism");
        let forward = catalog.all_fields(organism)[0];
        assert_eq!(
            DatabaseNaming.inward_indirection_column(forward, 7),
            Err(NamingError::UnsupportedVersion(7))
        );
    }

    #[test]
    fn non_collection_has_no_indirection() {
        let catalog = catalog();
        let protein = catalog.class("Protein").expect("Protein");
        let attribute = catalog.all_fields(protein)[1];
        assert!(matches!(
            DatabaseNaming.indirection_table_name(attribute),
            Err(NamingError::NotManyToMany { .. })
        ));
    }
}
