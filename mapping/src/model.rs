//! Typed R2RML mapping structures.
//!
//! These are what the builder produces. [`MappingDocument`](crate::MappingDocument)
//! lowers them into flat statements for the writers.

/// Row source of a TriplesMap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalTable {
    /// A base table, by name.
    Table(String),
    /// A generated view (`rr:R2RMLView`), by SQL text.
    View(String),
}

impl LogicalTable {
    /// Table name or SQL text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            LogicalTable::Table(s) | LogicalTable::View(s) => s,
        }
    }
}

/// How a TriplesMap names its subjects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectMap {
    /// URI template with `{column}` placeholders.
    pub template: String,
    /// Declared RDF class of every subject, if any.
    pub class: Option<String>,
}

/// How a PredicateObjectMap produces its objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectMap {
    /// A typed literal read from a column.
    Column {
        /// Column name.
        column: String,
        /// Literal datatype IRI.
        datatype: &'static str,
    },
    /// An IRI built from a template.
    Template {
        /// URI template with `{column}` placeholders.
        template: String,
    },
    /// The subject of another TriplesMap, joined on a column pair.
    Join {
        /// Name of the parent TriplesMap.
        parent_triples_map: String,
        /// Column of this logical table.
        child: String,
        /// Column of the parent's logical table.
        parent: String,
    },
}

/// A predicate paired with an object map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateObjectMap {
    /// Predicate IRI.
    pub predicate: String,
    /// Object rule.
    pub object_map: ObjectMap,
}

/// One logical table or view bound to a set of subjects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplesMap {
    /// Resource name of the map (e.g. `urn:intermine-table:Gene`).
    pub name: String,
    /// Row source.
    pub logical_table: LogicalTable,
    /// Subject rule.
    pub subject_map: SubjectMap,
    /// Property rules, in generation order.
    pub predicate_object_maps: Vec<PredicateObjectMap>,
}

impl TriplesMap {
    /// Returns true if this map reads from a generated view.
    #[must_use]
    pub fn is_view(&self) -> bool {
        matches!(self.logical_table, LogicalTable::View(_))
    }

    /// Object maps that join to another TriplesMap.
    pub fn joins(&self) -> impl Iterator<Item = &ObjectMap> {
        self.predicate_object_maps
            .iter()
            .map(|pom| &pom.object_map)
            .filter(|om| matches!(om, ObjectMap::Join { .. }))
    }
}
