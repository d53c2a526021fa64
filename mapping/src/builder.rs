//! Per-class mapping generation.
//!
//! For each exportable class the builder produces the class's primary
//! TriplesMap (subject map, literal attributes, many-to-one and one-to-many
//! joins) plus one view-backed TriplesMap per many-to-many target.
//!
//! Object-store primary keys are internal only, so a many-to-many relation
//! cannot follow the plain R2RML join-table pattern. Instead a view joins the
//! owner, the indirection table and the target on their internal ids and
//! exposes only the two external identifiers.

use std::collections::HashSet;

use intermine_catalog::{
    Catalog, ClassDescriptor, FieldKey, FieldKind, FieldRef, NamingScheme, RelationKind,
};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::datatype::PrimitiveKind;
use crate::error::MappingError;
use crate::exportable::ExportFilter;
use crate::identifier::{IdentifierResolver, IdentifyingAttribute};
use crate::model::{LogicalTable, ObjectMap, PredicateObjectMap, SubjectMap, TriplesMap};
use crate::vocab;

/// Internal primary-key column present on every table.
const ID_COLUMN: &str = "id";

/// Resource name of the TriplesMap over `table`.
#[must_use]
pub fn table_map_name(table: &str) -> String {
    format!("{}{table}", vocab::TABLE_MAP)
}

/// Resource name of the view TriplesMap joining `from` to `to` through `join`.
#[must_use]
pub fn join_map_name(from: &str, join: &str, to: &str) -> String {
    format!("{}{from}/{join}/{to}", vocab::JOIN_MAP)
}

/// Builds TriplesMaps class by class.
///
/// The builder remembers which many-to-many collections it has already
/// turned into views, so a relation is only emitted from one side.
pub struct MappingBuilder<'a> {
    catalog: &'a Catalog,
    naming: &'a dyn NamingScheme,
    config: &'a GeneratorConfig,
    resolver: IdentifierResolver<'a>,
    filter: ExportFilter,
    indirections: HashSet<FieldKey>,
}

impl<'a> MappingBuilder<'a> {
    /// Creates a builder over `catalog`.
    pub fn new(
        catalog: &'a Catalog,
        naming: &'a dyn NamingScheme,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            catalog,
            naming,
            config,
            resolver: IdentifierResolver::new(catalog, naming, config),
            filter: ExportFilter::new(config),
            indirections: HashSet::new(),
        }
    }

    /// The exportability filter in use.
    #[must_use]
    pub fn filter(&self) -> &ExportFilter {
        &self.filter
    }

    /// The identifier resolver in use.
    #[must_use]
    pub fn resolver(&self) -> &IdentifierResolver<'a> {
        &self.resolver
    }

    /// Maps one class. Returns its primary TriplesMap followed by any view
    /// TriplesMaps, or nothing if the class has no identifying attribute.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnknownPrimitiveType`] if an attribute has an
    /// unrecognised value type, or a naming error for indirection tables.
    pub fn map_class(&mut self, class: &'a ClassDescriptor) -> Result<Vec<TriplesMap>, MappingError> {
        let catalog = self.catalog;
        let fields = catalog.all_fields(class);
        // Every attribute is typed, including the identifier and those of
        // classes that end up unmapped.
        for field in &fields {
            if let FieldKind::Attribute { value_type } = &field.field.kind {
                PrimitiveKind::resolve(&class.name, &field.field.name, value_type)?;
            }
        }

        let Some(id) = self.resolver.identifying_attribute(class) else {
            debug!(class = %class.name, "no identifying attribute, skipping");
            return Ok(Vec::new());
        };

        let table = self.naming.table_name(class);
        debug!(class = %class.name, %table, "mapping table");

        let mut primary = TriplesMap {
            name: table_map_name(&table),
            logical_table: LogicalTable::Table(table),
            subject_map: self.subject_map(class),
            predicate_object_maps: Vec::new(),
        };
        let mut views = Vec::new();
        let id_key = id.field.key();

        for field in fields {
            match &field.field.kind {
                FieldKind::Attribute { value_type } => {
                    if field.key() == id_key {
                        continue;
                    }
                    let pom = self.map_attribute(class, field, value_type)?;
                    primary.predicate_object_maps.push(pom);
                }
                FieldKind::Reference { referenced, .. } => {
                    let poms = self.map_many_to_one(field, referenced);
                    primary.predicate_object_maps.extend(poms);
                }
                FieldKind::Collection {
                    referenced,
                    relation: RelationKind::OneN,
                    ..
                } => {
                    let poms = self.map_one_to_many(field, referenced);
                    primary.predicate_object_maps.extend(poms);
                }
                FieldKind::Collection {
                    referenced,
                    relation: RelationKind::MN,
                    ..
                } => {
                    views.extend(self.map_many_to_many(class, &id, field, referenced)?);
                }
            }
        }

        let mut maps = Vec::with_capacity(1 + views.len());
        maps.push(primary);
        maps.extend(views);
        Ok(maps)
    }

    fn subject_map(&self, class: &ClassDescriptor) -> SubjectMap {
        SubjectMap {
            template: self.resolver.subject_template(class, None),
            class: class.fair_term.clone(),
        }
    }

    fn map_attribute(
        &self,
        class: &ClassDescriptor,
        field: FieldRef<'_>,
        value_type: &str,
    ) -> Result<PredicateObjectMap, MappingError> {
        let kind = PrimitiveKind::resolve(&class.name, &field.field.name, value_type)?;
        let column = self
            .naming
            .column_name(field.field)
            .unwrap_or_else(|| field.field.name.clone());
        let predicate = field
            .field
            .fair_term
            .clone()
            .unwrap_or_else(|| format!("{}{column}", self.config.vocabulary_namespace));
        Ok(PredicateObjectMap {
            predicate,
            object_map: ObjectMap::Column {
                column,
                datatype: kind.datatype(),
            },
        })
    }

    /// Concrete, exportable, identifiable targets of a link to `referenced`.
    fn join_targets(&self, referenced: &str) -> Vec<(&'a ClassDescriptor, IdentifyingAttribute<'a>)> {
        let Some(target) = self.catalog.class(referenced) else {
            return Vec::new();
        };
        self.catalog
            .concrete_exportable_descendants(target, |c| self.filter.is_exportable(c))
            .into_iter()
            .filter_map(|t| match self.resolver.identifying_attribute(t) {
                Some(id) => Some((t, id)),
                None => {
                    debug!(target = %t.name, "join target has no identifying attribute, skipping");
                    None
                }
            })
            .collect()
    }

    fn link_predicate(field: FieldRef<'_>) -> String {
        field
            .field
            .fair_term
            .clone()
            .unwrap_or_else(|| vocab::RDFS_SEE_ALSO.to_owned())
    }

    fn map_many_to_one(&self, field: FieldRef<'_>, referenced: &str) -> Vec<PredicateObjectMap> {
        let child = self
            .naming
            .column_name(field.field)
            .unwrap_or_else(|| format!("{}{ID_COLUMN}", field.field.name));
        self.join_targets(referenced)
            .into_iter()
            .map(|(target, _)| {
                let parent_table = self.naming.table_name(target);
                debug!(column = %child, references = %parent_table, "foreign key");
                PredicateObjectMap {
                    predicate: Self::link_predicate(field),
                    object_map: ObjectMap::Join {
                        parent_triples_map: table_map_name(&parent_table),
                        child: child.clone(),
                        parent: ID_COLUMN.to_owned(),
                    },
                }
            })
            .collect()
    }

    fn map_one_to_many(&self, field: FieldRef<'a>, referenced: &str) -> Vec<PredicateObjectMap> {
        let Some(reverse) = self.catalog.reverse_of(field) else {
            debug!(field = %field.field.name, "one-to-many collection without reverse, skipping");
            return Vec::new();
        };
        let parent = self
            .naming
            .column_name(reverse.field)
            .unwrap_or_else(|| format!("{}{ID_COLUMN}", reverse.field.name));
        self.join_targets(referenced)
            .into_iter()
            .map(|(target, _)| PredicateObjectMap {
                predicate: Self::link_predicate(field),
                object_map: ObjectMap::Join {
                    parent_triples_map: table_map_name(&self.naming.table_name(target)),
                    child: ID_COLUMN.to_owned(),
                    parent: parent.clone(),
                },
            })
            .collect()
    }

    fn map_many_to_many(
        &mut self,
        class: &'a ClassDescriptor,
        id: &IdentifyingAttribute<'a>,
        field: FieldRef<'a>,
        referenced: &str,
    ) -> Result<Vec<TriplesMap>, MappingError> {
        if let Some(reverse) = self.catalog.reverse_of(field) {
            if self.indirections.contains(&reverse.key()) {
                debug!(field = %field.field.name, "indirection already mapped from the other side");
                return Ok(Vec::new());
            }
        }
        self.indirections.insert(field.key());

        let version = self.config.format_version;
        let join_table = self.naming.indirection_table_name(field)?;
        let inward = self.naming.inward_indirection_column(field, version)?;
        let outward = self.naming.outward_indirection_column(field, version)?;
        let from_table = self.naming.table_name(class);
        debug!(%join_table, %inward, %outward, "joining table");

        let from_column = self.resolver.column(id);
        let from_alias = self.resolver.identifier_name(class);

        let mut views = Vec::new();
        for (target, target_id) in self.join_targets(referenced) {
            let to_table = self.naming.table_name(target);
            let to_column = self.resolver.column(&target_id);
            let to_alias = format!("{to_table}_{}", self.resolver.identifier_name(target));

            let mut tables: Vec<&str> = Vec::with_capacity(3);
            for t in [from_table.as_str(), join_table.as_str(), to_table.as_str()] {
                if !tables.contains(&t) {
                    tables.push(t);
                }
            }
            let sql = format!(
                "SELECT {from_table}.{from_column} AS {from_alias}, \
                 {to_table}.{to_column} AS {to_alias} \
                 FROM {} \
                 WHERE {from_table}.{ID_COLUMN} = {join_table}.{inward} \
                 AND {to_table}.{ID_COLUMN} = {join_table}.{outward}",
                tables.join(", ")
            );

            let predicate = field.field.fair_term.clone().unwrap_or_else(|| {
                format!("{}has{to_table}", self.config.vocabulary_namespace)
            });
            views.push(TriplesMap {
                name: join_map_name(&from_table, &join_table, &to_table),
                logical_table: LogicalTable::View(sql),
                subject_map: self.subject_map(class),
                predicate_object_maps: vec![PredicateObjectMap {
                    predicate,
                    object_map: ObjectMap::Template {
                        template: self.resolver.subject_template(target, Some(&to_alias)),
                    },
                }],
            });
        }
        Ok(views)
    }
}
