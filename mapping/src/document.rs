//! In-memory mapping document.
//!
//! A [`MappingDocument`] is a set of RDF statements plus the namespace
//! prefixes the writers compact IRIs with. TriplesMaps are added in typed
//! form and lowered immediately; every anonymous sub-resource (logical
//! table, subject map, predicate-object map, object map, join condition)
//! gets a fresh blank node, so structurally identical fragments from
//! different classes stay independent resources.

use std::collections::HashSet;

use crate::model::{LogicalTable, ObjectMap, TriplesMap};
use crate::vocab::{self, rr};

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// An absolute IRI.
    Iri(String),
    /// A document-scoped blank node.
    Blank(u32),
    /// A plain string literal.
    Literal(String),
}

impl Term {
    /// Creates an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Creates a plain literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(value.into())
    }

    /// Returns the IRI if this term is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns the lexical value if this term is a literal.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Literal(value) => Some(value),
            _ => None,
        }
    }
}

/// One (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    /// IRI or blank node.
    pub subject: Term,
    /// Predicate IRI.
    pub predicate: String,
    /// Any term.
    pub object: Term,
}

/// A namespace prefix binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    /// Prefix label (e.g. `"rr"`).
    pub prefix: String,
    /// Namespace IRI.
    pub iri: String,
}

/// The assembled mapping document.
#[derive(Debug, Default)]
pub struct MappingDocument {
    prefixes: Vec<Prefix>,
    statements: Vec<Statement>,
    seen: HashSet<Statement>,
    triples_maps: Vec<TriplesMap>,
    next_blank: u32,
}

impl MappingDocument {
    /// Creates an empty document with no prefixes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `prefix` to `iri`, replacing an earlier binding of the same prefix.
    pub fn set_prefix(&mut self, prefix: &str, iri: &str) {
        match self.prefixes.iter_mut().find(|p| p.prefix == prefix) {
            Some(existing) => existing.iri = iri.to_owned(),
            None => self.prefixes.push(Prefix {
                prefix: prefix.to_owned(),
                iri: iri.to_owned(),
            }),
        }
    }

    /// Prefix bindings in registration order.
    #[must_use]
    pub fn prefixes(&self) -> &[Prefix] {
        &self.prefixes
    }

    /// All statements in insertion order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if the document holds no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// TriplesMaps in the order they were added.
    #[must_use]
    pub fn triples_maps(&self) -> &[TriplesMap] {
        &self.triples_maps
    }

    /// Allocates a fresh blank node.
    pub fn blank(&mut self) -> Term {
        let id = self.next_blank;
        self.next_blank += 1;
        Term::Blank(id)
    }

    /// Adds a statement. Returns false if the identical statement was
    /// already present.
    pub fn add(&mut self, subject: Term, predicate: &str, object: Term) -> bool {
        let statement = Statement {
            subject,
            predicate: predicate.to_owned(),
            object,
        };
        if self.seen.contains(&statement) {
            return false;
        }
        self.seen.insert(statement.clone());
        self.statements.push(statement);
        true
    }

    /// Objects of the statements with this subject and predicate.
    pub fn objects_of<'s>(
        &'s self,
        subject: &'s Term,
        predicate: &'s str,
    ) -> impl Iterator<Item = &'s Term> + 's {
        self.statements
            .iter()
            .filter(move |s| &s.subject == subject && s.predicate == predicate)
            .map(|s| &s.object)
    }

    /// Lowers `map` into statements and keeps the typed form.
    pub fn add_triples_map(&mut self, map: TriplesMap) {
        let node = Term::iri(map.name.as_str());
        self.add(node.clone(), vocab::RDF_TYPE, Term::iri(rr::TRIPLES_MAP));

        let table = self.blank();
        self.add(node.clone(), rr::LOGICAL_TABLE, table.clone());
        match &map.logical_table {
            LogicalTable::Table(name) => {
                self.add(table, rr::TABLE_NAME, Term::literal(name.as_str()));
            }
            LogicalTable::View(sql) => {
                self.add(table.clone(), vocab::RDF_TYPE, Term::iri(rr::R2RML_VIEW));
                self.add(table, rr::SQL_QUERY, Term::literal(sql.as_str()));
            }
        }

        let subject = self.blank();
        self.add(node.clone(), rr::SUBJECT_MAP, subject.clone());
        self.add(
            subject.clone(),
            rr::TEMPLATE,
            Term::literal(map.subject_map.template.as_str()),
        );
        if let Some(class) = &map.subject_map.class {
            self.add(subject, rr::CLASS, Term::iri(class.as_str()));
        }

        for pom in &map.predicate_object_maps {
            let pom_node = self.blank();
            self.add(node.clone(), rr::PREDICATE_OBJECT_MAP, pom_node.clone());
            self.add(pom_node.clone(), rr::PREDICATE, Term::iri(pom.predicate.as_str()));
            let object = self.blank();
            self.add(pom_node, rr::OBJECT_MAP, object.clone());
            self.lower_object_map(object, &pom.object_map);
        }

        self.triples_maps.push(map);
    }

    fn lower_object_map(&mut self, node: Term, object_map: &ObjectMap) {
        match object_map {
            ObjectMap::Column { column, datatype } => {
                self.add(node.clone(), vocab::RDF_TYPE, Term::iri(rr::OBJECT_MAP_CLASS));
                self.add(node.clone(), rr::TERM_TYPE, Term::iri(rr::LITERAL));
                self.add(node.clone(), rr::DATATYPE, Term::iri(*datatype));
                self.add(node, rr::COLUMN, Term::literal(column.as_str()));
            }
            ObjectMap::Template { template } => {
                self.add(node.clone(), vocab::RDF_TYPE, Term::iri(rr::OBJECT_MAP_CLASS));
                self.add(node.clone(), rr::TERM_TYPE, Term::iri(rr::IRI));
                self.add(node, rr::TEMPLATE, Term::literal(template.as_str()));
            }
            ObjectMap::Join {
                parent_triples_map,
                child,
                parent,
            } => {
                self.add(
                    node.clone(),
                    rr::PARENT_TRIPLES_MAP,
                    Term::iri(parent_triples_map.as_str()),
                );
                let join = self.blank();
                self.add(node, rr::JOIN_CONDITION, join.clone());
                self.add(join.clone(), rr::CHILD, Term::literal(child.as_str()));
                self.add(join, rr::PARENT, Term::literal(parent.as_str()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PredicateObjectMap, SubjectMap};

    fn organism_map() -> TriplesMap {
        TriplesMap {
            name: "urn:intermine-table:Organism".to_owned(),
            logical_table: LogicalTable::Table("Organism".to_owned()),
            subject_map: SubjectMap {
                template: "http://intermine.org/biotestmine/Organism/{taxonId}".to_owned(),
                class: Some("http://purl.uniprot.org/core/Taxon".to_owned()),
            },
            predicate_object_maps: vec![PredicateObjectMap {
                predicate: "http://intermine.org/vocabulary/name".to_owned(),
                object_map: ObjectMap::Column {
                    column: "name".to_owned(),
                    datatype: crate::vocab::xsd::STRING,
                },
            }],
        }
    }

    #[test]
    fn lowering_links_every_fragment() {
        let mut doc = MappingDocument::new();
        doc.add_triples_map(organism_map());

        let node = Term::iri("urn:intermine-table:Organism");
        let types: Vec<_> = doc.objects_of(&node, vocab::RDF_TYPE).collect();
        assert_eq!(types, [&Term::iri(rr::TRIPLES_MAP)]);

        let table = doc.objects_of(&node, rr::LOGICAL_TABLE).next().expect("table");
        let name: Vec<_> = doc.objects_of(table, rr::TABLE_NAME).collect();
        assert_eq!(name, [&Term::literal("Organism")]);

        let pom = doc.objects_of(&node, rr::PREDICATE_OBJECT_MAP).next().expect("pom");
        let om = doc.objects_of(pom, rr::OBJECT_MAP).next().expect("object map");
        let datatype: Vec<_> = doc.objects_of(om, rr::DATATYPE).collect();
        assert_eq!(datatype, [&Term::iri(crate::vocab::xsd::STRING)]);
        assert_eq!(doc.triples_maps().len(), 1);
    }

    #[test]
    fn identical_fragments_get_distinct_blank_nodes() {
        let mut doc = MappingDocument::new();
        doc.add_triples_map(organism_map());
        let first = doc.len();
        doc.add_triples_map(organism_map());
        // Only the named `a rr:TriplesMap` statement coincides.
        assert_eq!(doc.len(), first * 2 - 1);
    }

    #[test]
    fn prefixes_rebind_in_place() {
        let mut doc = MappingDocument::new();
        doc.set_prefix("rr", "http://example.org/old#");
        doc.set_prefix("up", crate::vocab::UP);
        doc.set_prefix("rr", crate::vocab::RR);
        assert_eq!(doc.prefixes().len(), 2);
        assert_eq!(doc.prefixes()[0].iri, crate::vocab::RR);
    }
}
