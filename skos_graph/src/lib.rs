// SPDX-License-Identifier: MIT
//!
//! In-memory RDF statement graph with the SKOS / DCTERMS vocabulary
//!

pub mod ntriples;
pub mod rdfxml;
pub mod vocab;

use std::collections::{BTreeMap, BTreeSet};

/// Graph errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("XML error: {0}")]
    Xml(#[from] minidom::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported RDF/XML: {0}")]
    Syntax(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Literal value with optional language tag or datatype
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    pub value: String,
    pub lang: Option<String>,
    pub datatype: Option<String>,
}

impl Literal {
    /// Language tagged literal, "value"@lang
    pub fn lang<V: Into<String>, L: Into<String>>(value: V, lang: L) -> Self {
        Self {
            value: value.into(),
            lang: Some(lang.into()),
            datatype: None,
        }
    }

    /// Typed literal, "value"^^<datatype>
    pub fn typed<V: Into<String>, D: Into<String>>(value: V, datatype: D) -> Self {
        Self {
            value: value.into(),
            lang: None,
            datatype: Some(datatype.into()),
        }
    }

    pub fn plain<V: Into<String>>(value: V) -> Self {
        Self {
            value: value.into(),
            lang: None,
            datatype: None,
        }
    }
}

/// RDF term, either an IRI or a literal
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Iri(String),
    Literal(Literal),
}

impl Term {
    pub fn iri<S: Into<String>>(iri: S) -> Self {
        Self::Iri(iri.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Iri(_) => None,
            Self::Literal(lit) => Some(lit),
        }
    }

    /// Fragment (or last path segment) of an IRI
    pub fn local_name(&self) -> Option<&str> {
        self.as_iri().map(|iri| split_iri(iri).1)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

impl From<&str> for Term {
    fn from(iri: &str) -> Self {
        Self::Iri(iri.to_string())
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{}>", iri),
            Self::Literal(lit) => {
                write!(f, "{:?}", lit.value)?;
                if let Some(lang) = &lit.lang {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Single (subject, predicate, object) statement
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new<S: Into<Term>, P: Into<Term>, O: Into<Term>>(s: S, p: P, o: O) -> Self {
        Self {
            subject: s.into(),
            predicate: p.into(),
            object: o.into(),
        }
    }
}

/// Set of triples plus namespace prefix bindings
///
/// Triples are kept sorted, so iteration and serialization are deterministic.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    triples: BTreeSet<Triple>,
    prefixes: BTreeMap<String, String>,
}

impl Graph {
    pub fn new() -> Self {
        let mut graph = Self::default();
        graph.bind("rdf", vocab::rdf::NS);
        graph
    }

    /// Bind namespace prefix used by serializers
    pub fn bind<P: Into<String>, N: Into<String>>(&mut self, prefix: P, namespace: N) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// (prefix, namespace) pairs
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, ns)| (prefix.as_str(), ns.as_str()))
    }

    /// Insert triple, returns false if it was already present
    pub fn add<S: Into<Term>, P: Into<Term>, O: Into<Term>>(&mut self, s: S, p: P, o: O) -> bool {
        self.triples.insert(Triple::new(s, p, o))
    }

    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.remove(triple)
    }

    pub fn contains(&self, s: &Term, p: &Term, o: &Term) -> bool {
        self.triples
            .contains(&Triple::new(s.clone(), p.clone(), o.clone()))
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples matching pattern, None is a wildcard
    ///
    /// The pattern terms are copied, so results only borrow the graph.
    pub fn triples<'a>(
        &'a self,
        s: Option<&Term>,
        p: Option<&Term>,
        o: Option<&Term>,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        let (s, p, o) = (s.cloned(), p.cloned(), o.cloned());
        self.triples.iter().filter(move |t| {
            s.as_ref().map_or(true, |s| &t.subject == s)
                && p.as_ref().map_or(true, |p| &t.predicate == p)
                && o.as_ref().map_or(true, |o| &t.object == o)
        })
    }

    pub fn objects<'a>(&'a self, s: &Term, p: &Term) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples(Some(s), Some(p), None).map(|t| &t.object)
    }

    pub fn subjects<'a>(&'a self, p: &Term, o: &Term) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples(None, Some(p), Some(o)).map(|t| &t.subject)
    }

    /// First object for (s, p), if any
    pub fn value(&self, s: &Term, p: &Term) -> Option<&Term> {
        self.objects(s, p).next()
    }

    /// Distinct subjects in the graph
    pub fn subjects_all(&self) -> BTreeSet<&Term> {
        self.triples.iter().map(|t| &t.subject).collect()
    }
}

/// Split IRI into (namespace, local name) at the last '#' or '/'
pub fn split_iri(iri: &str) -> (&str, &str) {
    match iri.rfind(|c: char| c == '#' || c == '/') {
        Some(pos) => iri.split_at(pos + 1),
        None => ("", iri),
    }
}
