// SPDX-License-Identifier: MIT
mod error;
mod glossary;
mod language;
mod rdfa;
mod rdfize;
mod relations;
mod scheme;

// re-export
pub use error::{Error, Result};
pub use glossary::{read_csv, read_path, read_xlsx, Record};
pub use language::Language;
pub use rdfa::XHTML_NS;
pub use rdfize::{convert, make_id, sanity_check, Rdfizer, Relation, RelationParser, CONCEPT_NS};
pub use relations::RelationStats;
pub use scheme::{SchemeConfig, SCHEME_URI};
pub use skos_graph::{vocab, Graph, Literal, Term, Triple};

/// Serializers
pub mod output {
    pub use crate::rdfa::to_string as xhtml;
    pub use skos_graph::ntriples::to_string as ntriples;
    pub use skos_graph::rdfxml::to_string as rdfxml;
}

/// Load graph from glossary spreadsheet, or from RDF/XML written earlier
///
/// Files ending in .rdf or .xml are read as RDF/XML, anything else is
/// converted as .csv/.xlsx glossary with today as scheme modified date.
pub fn load_graph<P: AsRef<std::path::Path>>(path: P, scheme: &SchemeConfig) -> Result<Graph> {
    let path = path.as_ref();
    let is_rdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            ext.eq_ignore_ascii_case("rdf") || ext.eq_ignore_ascii_case("xml")
        });

    if is_rdf {
        log::debug!("Read RDF/XML {:?}", path);
        let xml = std::fs::read_to_string(path)?;
        let mut graph = skos_graph::rdfxml::from_str(&xml)?;
        graph.bind("skos", vocab::skos::NS);
        graph.bind("dct", vocab::dct::NS);
        Ok(graph)
    } else {
        let today = chrono::Local::now().date_naive();
        convert(read_path(path)?, scheme, today)
    }
}
