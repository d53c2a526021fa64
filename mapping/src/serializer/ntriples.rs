//! N-Triples serializer for the mapping document.
//!
//! One statement per line, absolute IRIs, blank nodes labelled `_:bN`.

use super::{blank_label, escape_literal};
use crate::document::{MappingDocument, Term};

/// Serializes `doc` to an N-Triples string, statements in insertion order.
#[must_use]
pub fn to_ntriples(doc: &MappingDocument) -> String {
    let mut out = String::with_capacity(doc.len() * 96);
    for statement in doc.statements() {
        push_term(&mut out, &statement.subject);
        out.push_str(" <");
        out.push_str(&statement.predicate);
        out.push_str("> ");
        push_term(&mut out, &statement.object);
        out.push_str(" .\n");
    }
    out
}

fn push_term(out: &mut String, term: &Term) {
    match term {
        Term::Iri(iri) => {
            out.push('<');
            out.push_str(iri);
            out.push('>');
        }
        Term::Blank(id) => out.push_str(&blank_label(*id)),
        Term::Literal(value) => {
            out.push('"');
            out.push_str(&escape_literal(value));
            out.push('"');
        }
    }
}
