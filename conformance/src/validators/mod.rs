//! Mapping document validators (RDF well-formedness, catalog coverage).

pub mod coverage;
pub mod rdf;
