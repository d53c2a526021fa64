//! IRI constants used by the mapping generator.
//!
//! R2RML terms follow the W3C R2RML Recommendation:
//! <https://www.w3.org/TR/r2rml/>.

/// R2RML namespace.
pub const RR: &str = "http://www.w3.org/ns/r2rml#";
/// RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDFS namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// XSD namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// UniProt core vocabulary, the primary target-domain vocabulary.
pub const UP: &str = "http://purl.uniprot.org/core/";
/// UniProtKB entry namespace, home of protein subjects.
pub const UNIPROT_KB: &str = "http://purl.uniprot.org/uniprot/";

/// Generic application namespace for subjects without a dedicated one.
pub const INTERMINE: &str = "http://intermine.org/biotestmine";
/// Internal vocabulary for predicates derived from column names.
pub const INTERMINE_VOCAB: &str = "http://intermine.org/vocabulary/";

/// Resource-name prefix of TriplesMaps over plain tables.
pub const TABLE_MAP: &str = "urn:intermine-table:";
/// Resource-name prefix of TriplesMaps over generated join views.
pub const JOIN_MAP: &str = "urn:intermine-join-tables:";

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `rdfs:seeAlso`, the fallback predicate for links without a FAIR term.
pub const RDFS_SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";

/// R2RML terms.
pub mod rr {
    /// `rr:TriplesMap`.
    pub const TRIPLES_MAP: &str = "http://www.w3.org/ns/r2rml#TriplesMap";
    /// `rr:logicalTable`.
    pub const LOGICAL_TABLE: &str = "http://www.w3.org/ns/r2rml#logicalTable";
    /// `rr:tableName`.
    pub const TABLE_NAME: &str = "http://www.w3.org/ns/r2rml#tableName";
    /// `rr:R2RMLView`.
    pub const R2RML_VIEW: &str = "http://www.w3.org/ns/r2rml#R2RMLView";
    /// `rr:sqlQuery`.
    pub const SQL_QUERY: &str = "http://www.w3.org/ns/r2rml#sqlQuery";
    /// `rr:subjectMap`.
    pub const SUBJECT_MAP: &str = "http://www.w3.org/ns/r2rml#subjectMap";
    /// `rr:template`.
    pub const TEMPLATE: &str = "http://www.w3.org/ns/r2rml#template";
    /// `rr:class`.
    pub const CLASS: &str = "http://www.w3.org/ns/r2rml#class";
    /// `rr:predicateObjectMap`.
    pub const PREDICATE_OBJECT_MAP: &str = "http://www.w3.org/ns/r2rml#predicateObjectMap";
    /// `rr:predicate`.
    pub const PREDICATE: &str = "http://www.w3.org/ns/r2rml#predicate";
    /// `rr:objectMap`.
    pub const OBJECT_MAP: &str = "http://www.w3.org/ns/r2rml#objectMap";
    /// `rr:ObjectMap`.
    pub const OBJECT_MAP_CLASS: &str = "http://www.w3.org/ns/r2rml#ObjectMap";
    /// `rr:termType`.
    pub const TERM_TYPE: &str = "http://www.w3.org/ns/r2rml#termType";
    /// `rr:datatype`.
    pub const DATATYPE: &str = "http://www.w3.org/ns/r2rml#datatype";
    /// `rr:column`.
    pub const COLUMN: &str = "http://www.w3.org/ns/r2rml#column";
    /// `rr:parentTriplesMap`.
    pub const PARENT_TRIPLES_MAP: &str = "http://www.w3.org/ns/r2rml#parentTriplesMap";
    /// `rr:joinCondition`.
    pub const JOIN_CONDITION: &str = "http://www.w3.org/ns/r2rml#joinCondition";
    /// `rr:child`.
    pub const CHILD: &str = "http://www.w3.org/ns/r2rml#child";
    /// `rr:parent`.
    pub const PARENT: &str = "http://www.w3.org/ns/r2rml#parent";
    /// `rr:IRI` term type.
    pub const IRI: &str = "http://www.w3.org/ns/r2rml#IRI";
    /// `rr:Literal` term type.
    pub const LITERAL: &str = "http://www.w3.org/ns/r2rml#Literal";
}

/// Literal datatypes for the recognised scalar kinds.
pub mod xsd {
    /// `xsd:string`.
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:boolean`.
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    /// `xsd:integer`.
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `xsd:decimal`.
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
}
