// SPDX-License-Identifier: MIT
//!
//! Graph <=> RDF/XML
//!

use crate::vocab::{rdf, xml};
use crate::{split_iri, Error, Graph, Literal, Result, Term};
use minidom::Element;
use std::collections::BTreeMap;

/// Serialize graph to RDF/XML string, one rdf:Description per subject
///
/// Written as text rather than through minidom, since minidom 0.15 picks
/// its own prefixes for namespaced attributes (`tns0:about`).
pub fn to_string(graph: &Graph) -> Result<String> {
    // namespace => prefix, rdf is always bound to its own namespace
    let mut prefixes: BTreeMap<&str, &str> = graph
        .prefixes()
        .filter(|(prefix, ns)| *prefix != "rdf" && *ns != rdf::NS)
        .map(|(prefix, ns)| (ns, prefix))
        .collect();
    prefixes.insert(rdf::NS, "rdf");

    let mut buf = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rdf:RDF");
    let mut declared: Vec<(&str, &str)> = prefixes.iter().map(|(ns, p)| (*p, *ns)).collect();
    declared.sort();
    for (prefix, ns) in declared {
        buf += &format!(" xmlns:{}=\"{}\"", prefix, escape(ns));
    }
    buf += ">\n";

    // triples are sorted by subject first, so statements about one subject are adjacent
    let mut current: Option<&Term> = None;
    for t in graph.iter() {
        let about = t
            .subject
            .as_iri()
            .ok_or_else(|| Error::Syntax(format!("literal subject {}", t.subject)))?;
        let predicate = t
            .predicate
            .as_iri()
            .ok_or_else(|| Error::Syntax(format!("literal predicate {}", t.predicate)))?;

        if current != Some(&t.subject) {
            if current.is_some() {
                buf += "  </rdf:Description>\n";
            }
            buf += &format!("  <rdf:Description rdf:about=\"{}\">\n", escape(about));
            current = Some(&t.subject);
        }
        buf += &property_element(&prefixes, predicate, &t.object)?;
    }
    if current.is_some() {
        buf += "  </rdf:Description>\n";
    }
    buf += "</rdf:RDF>\n";

    Ok(buf)
}

/// One property element line
fn property_element(
    prefixes: &BTreeMap<&str, &str>,
    predicate: &str,
    object: &Term,
) -> Result<String> {
    let (ns, name) = split_iri(predicate);
    if name.is_empty() || ns.is_empty() {
        return Err(Error::Syntax(format!("can not abbreviate predicate <{}>", predicate)));
    }
    // unbound namespaces are declared on the element itself
    let (qname, decl) = match prefixes.get(ns) {
        Some(prefix) => (format!("{}:{}", prefix, name), String::new()),
        None => (format!("ns0:{}", name), format!(" xmlns:ns0=\"{}\"", escape(ns))),
    };

    Ok(match object {
        Term::Iri(iri) => format!(
            "    <{}{} rdf:resource=\"{}\"/>\n",
            qname,
            decl,
            escape(iri)
        ),
        Term::Literal(lit) => {
            let annotation = if let Some(lang) = &lit.lang {
                format!(" xml:lang=\"{}\"", escape(lang))
            } else if let Some(dt) = &lit.datatype {
                format!(" rdf:datatype=\"{}\"", escape(dt))
            } else {
                String::new()
            };
            format!(
                "    <{}{}{}>{}</{}>\n",
                qname,
                decl,
                annotation,
                escape(&lit.value),
                qname
            )
        }
    })
}

/// Escape text and attribute values
fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped += "&amp;",
            '<' => escaped += "&lt;",
            '>' => escaped += "&gt;",
            '"' => escaped += "&quot;",
            '\'' => escaped += "&apos;",
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Attribute of a node or property element, matched by local name
///
/// Writers choose their own prefix for the RDF namespace (minidom writes
/// `tns0:about`), so any prefix matches except for the reserved `xml`
/// namespace. Names in Clark notation (`{namespace}about`) must carry the
/// expected namespace.
fn attr<'a>(elem: &'a Element, namespace: &str, local: &str) -> Option<&'a str> {
    elem.attrs().find_map(|(name, value)| {
        let matched = if let Some(clark) = name.strip_prefix('{') {
            clark.split_once('}') == Some((namespace, local))
        } else {
            match name.split_once(':') {
                Some(("xml", name_local)) => namespace == xml::NS && name_local == local,
                Some((prefix, name_local)) => {
                    !prefix.is_empty() && namespace != xml::NS && name_local == local
                }
                None => false,
            }
        };
        matched.then_some(value)
    })
}

/// Parse RDF/XML string
///
/// Supports node elements with rdf:about (rdf:Description or typed nodes)
/// whose property elements carry either rdf:resource or a text literal.
pub fn from_str(xml: &str) -> Result<Graph> {
    let root: Element = xml.parse()?;
    from_element(&root)
}

/// Read graph from <rdf:RDF> DOM
pub fn from_element(root: &Element) -> Result<Graph> {
    if !root.is("RDF", rdf::NS) {
        return Err(Error::Syntax(format!(
            "root element is {{{}}}{}, not rdf:RDF",
            root.ns(),
            root.name()
        )));
    }

    let mut graph = Graph::new();
    for node in root.children() {
        let about = attr(node, rdf::NS, "about").ok_or_else(|| {
            Error::Syntax(format!("<{}> without rdf:about", node.name()))
        })?;
        let subject = Term::iri(about);

        if !node.is("Description", rdf::NS) {
            // typed node element
            graph.add(
                subject.clone(),
                rdf::TYPE,
                Term::iri(format!("{}{}", node.ns(), node.name())),
            );
        }

        for prop in node.children() {
            let predicate = Term::iri(format!("{}{}", prop.ns(), prop.name()));
            let object = if let Some(resource) = attr(prop, rdf::NS, "resource") {
                Term::iri(resource)
            } else if prop.children().next().is_some() {
                return Err(Error::Syntax(format!(
                    "nested elements in <{}> of {}",
                    prop.name(),
                    about
                )));
            } else {
                Term::Literal(Literal {
                    value: prop.text(),
                    lang: attr(prop, xml::NS, "lang").map(String::from),
                    datatype: attr(prop, rdf::NS, "datatype").map(String::from),
                })
            };
            graph.add(subject.clone(), predicate, object);
        }
    }
    log::debug!("Read {} triples from RDF/XML", graph.len());

    Ok(graph)
}
