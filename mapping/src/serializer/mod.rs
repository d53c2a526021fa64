//! Writers for the mapping document.
//!
//! Two serialization formats are supported:
//! - **Turtle** ([`turtle`]) for people and RDF tooling, with prefixed names
//!   and single-use blank nodes written inline
//! - **N-Triples** ([`ntriples`]) for bulk loading and line diffs

pub mod ntriples;
pub mod turtle;

/// Escapes a lexical value for a double-quoted RDF string.
pub(crate) fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Blank node label for document-scoped node `id`.
pub(crate) fn blank_label(id: u32) -> String {
    format!("_:b{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_control_characters() {
        assert_eq!(escape_literal(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(escape_literal("x\ny\tz"), "x\\ny\\tz");
        assert_eq!(escape_literal("SELECT Gene.id"), "SELECT Gene.id");
    }
}
