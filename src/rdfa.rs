// SPDX-License-Identifier: MIT
//!
//! Render SKOS graph as XHTML+RDFa, one table per language
//!

use crate::error::{Error, Result};
use crate::language::Language;
use crate::rdfize::Relation;
use crate::scheme::SCHEME_URI;
use minidom::Element;
use skos_graph::vocab::{dct, rdf, skos};
use skos_graph::{Graph, Term};

/// XHTML namespace
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Render standalone XHTML document, with XML declaration
pub fn to_string(graph: &Graph) -> Result<String> {
    let html = to_element(graph)?;

    let mut buf = Vec::<u8>::new();
    buf.extend_from_slice(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    html.write_to(&mut buf)?;
    buf.push(b'\n');

    String::from_utf8(buf)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Build <html> DOM
pub fn to_element(graph: &Graph) -> Result<Element> {
    let mut html = Element::builder("html", XHTML_NS)
        .prefix(Some("skos".to_string()), skos::NS)?
        .prefix(Some("dcterms".to_string()), dct::NS)?
        .build();

    let scheme = graph
        .subjects(&Term::iri(rdf::TYPE), &Term::iri(skos::CONCEPT_SCHEME))
        .next()
        .cloned()
        .unwrap_or_else(|| Term::iri(SCHEME_URI));
    let title = literal(graph, &scheme, dct::TITLE).unwrap_or_default();

    let head = Element::builder("head", XHTML_NS)
        .append(Element::builder("title", XHTML_NS).append(title).build())
        .append(
            Element::builder("link", XHTML_NS)
                .attr("rel", "stylesheet")
                .attr("type", "text/css")
                .attr("href", "style.css")
                .build(),
        )
        .build();
    html.append_child(head);

    let mut body = Element::bare("body", XHTML_NS);
    body.append_child(description(graph, &scheme)?);
    for lang in Language::ALL {
        let (heading, table) = language_table(graph, lang);
        body.append_child(heading);
        body.append_child(table);
    }
    html.append_child(body);

    Ok(html)
}

/// Concept scheme title, description and last modified date
fn description(graph: &Graph, scheme: &Term) -> Result<Element> {
    let about = scheme.as_iri().unwrap_or(SCHEME_URI);
    let mut desc = Element::builder("div", XHTML_NS)
        .attr("id", "concept_scheme")
        .attr("about", about)
        .build();

    let title = literal(graph, scheme, dct::TITLE).unwrap_or_default();
    desc.append_child(
        Element::builder("h1", XHTML_NS)
            .attr("property", "dcterms:title")
            .append(title)
            .build(),
    );

    if let Some(markup) = literal(graph, scheme, dct::DESCRIPTION) {
        // description literal holds XHTML markup, inline it
        let mut d: Element = markup.parse()?;
        d.set_attr("property", "dcterms:description");
        desc.append_child(d);
    }

    let modified = graph
        .value(scheme, &Term::iri(dct::MODIFIED))
        .and_then(|term| term.as_literal());
    if let Some(modified) = modified {
        let mut span = Element::builder("span", XHTML_NS).attr("property", "dcterms:modified");
        if let Some(dt) = &modified.datatype {
            span = span.attr("datatype", dt.as_str());
        }
        desc.append_child(
            Element::builder("div", XHTML_NS)
                .attr("id", "last_modified")
                .append("Last modified: ")
                .append(span.append(modified.value.as_str()).build())
                .build(),
        );
    }

    Ok(desc)
}

/// <h2> heading and concept table for one language
fn language_table(graph: &Graph, lang: Language) -> (Element, Element) {
    let code = lang.as_langcode();
    let heading = Element::builder("h2", XHTML_NS)
        .append(lang.name())
        .build();

    let mut table = Element::builder("table", XHTML_NS)
        .attr("lang", code)
        .append(
            Element::builder("tr", XHTML_NS)
                .append(th("concept", "Concept"))
                .append(th("definition", "Definition"))
                .append(th("relations", "Relations"))
                .build(),
        )
        .build();

    let rdf_type = Term::iri(rdf::TYPE);
    let concept_class = Term::iri(skos::CONCEPT);
    let mut rows = 0;
    for concept in graph.subjects(&rdf_type, &concept_class) {
        // ignore languages that lack a concept label
        let pref_label = match lang_literals(graph, concept, skos::PREF_LABEL, code).next() {
            Some(label) => label,
            None => continue,
        };
        let uri = concept.as_iri().unwrap_or_default();

        let mut tr = Element::builder("tr", XHTML_NS)
            .attr("id", uri_to_id(concept, code))
            .attr("about", uri)
            .build();
        tr.append_child(
            Element::builder("td", XHTML_NS)
                .attr("property", "skos:prefLabel")
                .append(pref_label)
                .build(),
        );

        let mut definition = Element::builder("td", XHTML_NS).attr("property", "skos:definition");
        if let Some(text) = lang_literals(graph, concept, skos::DEFINITION, code).next() {
            definition = definition.append(text);
        }
        tr.append_child(definition.build());

        tr.append_child(relations_cell(graph, concept, code));
        table.append_child(tr);
        rows += 1;
    }
    log::debug!("{} table: {} concepts", lang, rows);

    (heading, table)
}

fn th(class: &str, text: &str) -> Element {
    Element::builder("th", XHTML_NS)
        .attr("class", class)
        .append(text)
        .build()
}

/// Alternate labels and BT/NT/RT links
fn relations_cell(graph: &Graph, concept: &Term, code: &str) -> Element {
    let mut td = Element::bare("td", XHTML_NS);

    for alt_label in lang_literals(graph, concept, skos::ALT_LABEL, code) {
        td.append_text_node("[UF] ");
        td.append_child(
            Element::builder("span", XHTML_NS)
                .attr("property", "skos:altLabel")
                .append(alt_label)
                .build(),
        );
        td.append_child(Element::bare("br", XHTML_NS));
    }

    for relation in [Relation::Broader, Relation::Narrower, Relation::Related] {
        let predicate = Term::iri(relation.predicate());
        let curie = format!("skos:{}", predicate.local_name().unwrap_or_default());
        for target in graph.objects(concept, &predicate) {
            let label = target_label(graph, target, code);
            td.append_child(
                Element::builder("a", XHTML_NS)
                    .attr("rel", curie.as_str())
                    .attr("href", format!("#{}", uri_to_id(target, code)))
                    .attr("resource", target.as_iri().unwrap_or_default())
                    .append(format!("[{}] {}", relation.as_code(), label))
                    .build(),
            );
            td.append_child(Element::bare("br", XHTML_NS));
        }
    }

    td
}

/// Label of link target, falls back to English then to the IRI local name
fn target_label(graph: &Graph, target: &Term, code: &str) -> String {
    lang_literals(graph, target, skos::PREF_LABEL, code)
        .next()
        .or_else(|| {
            lang_literals(
                graph,
                target,
                skos::PREF_LABEL,
                Language::PRIMARY.as_langcode(),
            )
            .next()
        })
        .or_else(|| target.local_name())
        .unwrap_or_default()
        .to_string()
}

/// Literal values of (s, p) tagged with language
fn lang_literals<'a>(
    graph: &'a Graph,
    subject: &'a Term,
    predicate: &'static str,
    code: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    graph
        .triples(Some(subject), None, None)
        .filter(move |t| t.predicate.as_iri() == Some(predicate))
        .filter_map(move |t| {
            t.object
                .as_literal()
                .filter(|lit| lit.lang.as_deref() == Some(code))
                .map(|lit| lit.value.as_str())
        })
}

fn literal<'a>(graph: &'a Graph, subject: &Term, predicate: &str) -> Option<&'a str> {
    graph
        .value(subject, &Term::iri(predicate))
        .and_then(|term| term.as_literal())
        .map(|lit| lit.value.as_str())
}

/// HTML anchor, "<local name>_<lang>"
fn uri_to_id(uri: &Term, code: &str) -> String {
    format!("{}_{}", uri.local_name().unwrap_or_default(), code)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scheme::SchemeConfig;

    fn graph() -> Graph {
        let csv = "English,Work,A distinct creation,Opus,Expression [NT],FRBR,20030505\n\
                   French,Œuvre,Création distincte,,,,\n\
                   English,Expression,The realization of a work,,,,\n";
        crate::rdfize::convert(
            crate::glossary::read_csv(csv.as_bytes()),
            &SchemeConfig::default(),
            chrono::NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        )
        .unwrap()
    }

    fn find<'a>(parent: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        parent.children().filter(move |e| e.is(name, XHTML_NS))
    }

    fn table<'a>(body: &'a Element, lang: Language) -> &'a Element {
        find(body, "table")
            .find(|t| t.attr("lang") == Some(lang.as_langcode()))
            .unwrap()
    }

    #[test]
    fn scheme_description_block() {
        let html = to_element(&graph()).unwrap();
        let head = find(&html, "head").next().unwrap();
        assert_eq!(
            find(head, "title").next().unwrap().text(),
            "Multilingual Dictionary of Cataloging Terms and Concepts"
        );

        let body = find(&html, "body").next().unwrap();
        let desc = find(body, "div").next().unwrap();
        assert_eq!(desc.attr("about"), Some(SCHEME_URI));
        assert!(desc
            .children()
            .any(|e| e.attr("property") == Some("dcterms:description")));
        let modified = desc
            .children()
            .find(|e| e.attr("id") == Some("last_modified"))
            .unwrap();
        assert_eq!(find(modified, "span").next().unwrap().text(), "2010-01-01");
    }

    #[test]
    fn one_table_per_language() {
        let html = to_element(&graph()).unwrap();
        let body = find(&html, "body").next().unwrap();
        assert_eq!(find(body, "table").count(), Language::ALL.len());
        assert_eq!(find(body, "h2").count(), Language::ALL.len());

        // header row + concepts with a label in that language
        assert_eq!(find(table(body, Language::En), "tr").count(), 3);
        assert_eq!(find(table(body, Language::Fr), "tr").count(), 2);
        assert_eq!(find(table(body, Language::De), "tr").count(), 1);
    }

    #[test]
    fn concept_row_links() {
        let html = to_element(&graph()).unwrap();
        let body = find(&html, "body").next().unwrap();
        let fr = table(body, Language::Fr);
        let row = find(fr, "tr")
            .find(|tr| tr.attr("id") == Some("Work_fr"))
            .unwrap();
        assert_eq!(row.attr("about"), Some("http://iflastandards.info/ns/muldicat#Work"));

        let cells: Vec<&Element> = find(row, "td").collect();
        assert_eq!(cells[0].text(), "Œuvre");
        assert_eq!(cells[1].text(), "Création distincte");

        let link = find(cells[2], "a").next().unwrap();
        assert_eq!(link.attr("rel"), Some("skos:narrower"));
        assert_eq!(link.attr("href"), Some("#Expression_fr"));
        // no French label for Expression, English is used
        assert_eq!(link.text(), "[NT] Expression");
    }

    #[test]
    fn alt_labels_in_own_language_only() {
        let html = to_element(&graph()).unwrap();
        let body = find(&html, "body").next().unwrap();
        let en_row = find(table(body, Language::En), "tr")
            .find(|tr| tr.attr("id") == Some("Work_en"))
            .unwrap();
        let cells: Vec<&Element> = find(en_row, "td").collect();
        let alt = find(cells[2], "span").next().unwrap();
        assert_eq!(alt.attr("property"), Some("skos:altLabel"));
        assert_eq!(alt.text(), "Opus");

        let fr_row = find(table(body, Language::Fr), "tr")
            .find(|tr| tr.attr("id") == Some("Work_fr"))
            .unwrap();
        let cells: Vec<&Element> = find(fr_row, "td").collect();
        assert_eq!(find(cells[2], "span").count(), 0);
    }

    #[test]
    fn document_has_xml_declaration() {
        let xhtml = to_string(&graph()).unwrap();
        assert!(xhtml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<html"));
    }
}
