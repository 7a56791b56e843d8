// SPDX-License-Identifier: MIT
//!
//! N-Triples serializer
//!

use crate::{Graph, Term};

/// Serialize graph as N-Triples, one statement per line
pub fn to_string(graph: &Graph) -> String {
    let mut buf = String::new();
    for t in graph.iter() {
        buf += &format!(
            "{} {} {} .\n",
            term(&t.subject),
            term(&t.predicate),
            term(&t.object)
        );
    }
    buf
}

fn term(t: &Term) -> String {
    match t {
        Term::Iri(iri) => format!("<{}>", iri),
        Term::Literal(lit) => {
            let quoted = format!("\"{}\"", escape(&lit.value));
            if let Some(lang) = &lit.lang {
                format!("{}@{}", quoted, lang)
            } else if let Some(dt) = &lit.datatype {
                format!("{}^^<{}>", quoted, dt)
            } else {
                quoted
            }
        }
    }
}

/// ECHAR escapes
fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped += "\\\\",
            '"' => escaped += "\\\"",
            '\n' => escaped += "\\n",
            '\r' => escaped += "\\r",
            '\t' => escaped += "\\t",
            _ => escaped.push(c),
        }
    }
    escaped
}
