//! Turtle 1.1 serializer for the mapping document.
//!
//! Subjects are written in order of first appearance, one block each.
//! IRIs under a bound prefix are compacted, `rdf:type` is written as `a`,
//! and blank nodes used as the object of exactly one statement are nested
//! inline as `[ ... ]`. Any other blank node keeps a `_:bN` label.

use std::collections::{HashMap, HashSet};

use super::{blank_label, escape_literal};
use crate::document::{MappingDocument, Prefix, Statement, Term};
use crate::vocab;

const INDENT: &str = "    ";

/// Serializes `doc` to a Turtle string.
#[must_use]
pub fn to_turtle(doc: &MappingDocument) -> String {
    let mut out = String::with_capacity(doc.len() * 64);

    // Prefix declarations
    for prefix in doc.prefixes() {
        out.push_str(&format!("@prefix {}: <{}> .\n", prefix.prefix, prefix.iri));
    }
    if !doc.prefixes().is_empty() {
        out.push('\n');
    }

    let layout = Layout::new(doc);
    let mut written = HashSet::new();
    for statement in doc.statements() {
        let subject = &statement.subject;
        if layout.is_inline(subject) || !written.insert(subject) {
            continue;
        }
        out.push_str(&layout.term(subject));
        out.push('\n');
        let mut visiting = Vec::new();
        layout.write_properties(&mut out, subject, 1, &mut visiting);
        out.push_str(" .\n\n");
    }

    out
}

struct Layout<'d> {
    prefixes: &'d [Prefix],
    by_subject: HashMap<&'d Term, Vec<&'d Statement>>,
    inline: HashSet<u32>,
}

impl<'d> Layout<'d> {
    fn new(doc: &'d MappingDocument) -> Self {
        let mut by_subject: HashMap<&Term, Vec<&Statement>> = HashMap::new();
        let mut references: HashMap<u32, usize> = HashMap::new();
        for statement in doc.statements() {
            by_subject.entry(&statement.subject).or_default().push(statement);
            if let Term::Blank(id) = statement.object {
                *references.entry(id).or_default() += 1;
            }
        }
        let inline = references
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .map(|(id, _)| id)
            .collect();
        Self {
            prefixes: doc.prefixes(),
            by_subject,
            inline,
        }
    }

    fn is_inline(&self, term: &Term) -> bool {
        matches!(term, Term::Blank(id) if self.inline.contains(id))
    }

    /// Writes the predicate-object list of `subject`, without the final
    /// terminator.
    fn write_properties(
        &self,
        out: &mut String,
        subject: &Term,
        depth: usize,
        visiting: &mut Vec<u32>,
    ) {
        let statements = self.by_subject.get(subject).map_or(&[][..], Vec::as_slice);

        // Objects grouped by predicate, predicates in first-seen order.
        let mut groups: Vec<(&str, Vec<&Term>)> = Vec::new();
        for statement in statements {
            match groups.iter_mut().find(|(p, _)| *p == statement.predicate) {
                Some((_, objects)) => objects.push(&statement.object),
                None => groups.push((statement.predicate.as_str(), vec![&statement.object])),
            }
        }

        for (i, (predicate, objects)) in groups.iter().enumerate() {
            if i > 0 {
                out.push_str(" ;\n");
            }
            out.push_str(&INDENT.repeat(depth));
            out.push_str(&self.predicate(predicate));
            out.push(' ');
            for (j, object) in objects.iter().enumerate() {
                if j > 0 {
                    out.push_str(" , ");
                }
                self.write_object(out, object, depth, visiting);
            }
        }
    }

    fn write_object(&self, out: &mut String, object: &Term, depth: usize, visiting: &mut Vec<u32>) {
        let Term::Blank(id) = object else {
            out.push_str(&self.term(object));
            return;
        };
        if !self.inline.contains(id) || visiting.contains(id) {
            out.push_str(&blank_label(*id));
            return;
        }
        if !self.by_subject.contains_key(object) {
            out.push_str("[]");
            return;
        }
        visiting.push(*id);
        out.push_str("[\n");
        self.write_properties(out, object, depth + 1, visiting);
        out.push('\n');
        out.push_str(&INDENT.repeat(depth));
        out.push(']');
        visiting.pop();
    }

    fn predicate(&self, iri: &str) -> String {
        if iri == vocab::RDF_TYPE {
            "a".to_owned()
        } else {
            self.iri(iri)
        }
    }

    fn term(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.iri(iri),
            Term::Blank(id) => blank_label(*id),
            Term::Literal(value) => format!("\"{}\"", escape_literal(value)),
        }
    }

    /// Prefixed name if a bound namespace covers `iri` with a plain local
    /// name, `<iri>` otherwise.
    fn iri(&self, iri: &str) -> String {
        self.prefixes
            .iter()
            .find_map(|p| {
                iri.strip_prefix(p.iri.as_str())
                    .filter(|local| is_simple_local_name(local))
                    .map(|local| format!("{}:{local}", p.prefix))
            })
            .unwrap_or_else(|| format!("<{iri}>"))
    }
}

fn is_simple_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
