// SPDX-License-Identifier: MIT
//!
//! Convert glossary records into SKOS statements
//!

use crate::error::{Error, Result};
use crate::glossary::Record;
use crate::language::Language;
use crate::scheme::SchemeConfig;
use skos_graph::vocab::{dct, rdf, skos, xsd};
use skos_graph::{Graph, Literal, Term, Triple};

/// Concept namespace
pub const CONCEPT_NS: &str = "http://iflastandards.info/ns/muldicat#";

/// Concept IRI derived from English label
///
/// Parenthesized qualifiers are removed, then every space separated word is
/// capitalized and the words are joined. "Cataloguing (noun)" => `Cataloguing`.
pub fn make_id(label: &str) -> Term {
    let mut label = label.to_string();
    if let (Some(start), Some(end)) = (label.find('('), label.rfind(')')) {
        if start < end {
            label.replace_range(start..=end, "");
        }
    }

    let camel_case = label.trim().split(' ').map(capitalize).collect::<String>();
    Term::iri(format!("{}{}", CONCEPT_NS, camel_case))
}

/// First character upper case, the rest lower case
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Semantic relation between concepts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Broader,
    Narrower,
    Related,
}

impl Relation {
    /// BT, NT, RT
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "BT" => Some(Self::Broader),
            "NT" => Some(Self::Narrower),
            "RT" => Some(Self::Related),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Broader => "BT",
            Self::Narrower => "NT",
            Self::Related => "RT",
        }
    }

    pub fn predicate(&self) -> &'static str {
        match self {
            Self::Broader => skos::BROADER,
            Self::Narrower => skos::NARROWER,
            Self::Related => skos::RELATED,
        }
    }

    /// Relation of the reverse edge
    pub fn inverse(&self) -> Self {
        match self {
            Self::Broader => Self::Narrower,
            Self::Narrower => Self::Broader,
            Self::Related => Self::Related,
        }
    }
}

/// Related terms cell parser, "Label [BT], Other label [RT]"
pub struct RelationParser {
    token_re: regex::Regex,
}

impl RelationParser {
    pub fn new() -> Self {
        Self {
            // same as the authoring convention, label then bracketed code
            token_re: regex::Regex::new(r"^(.*) \[(.*?)\]").expect("valid regex"),
        }
    }

    /// Parse related terms cell into (target label, relation) pairs
    ///
    /// Tokens without a bracketed code are skipped. An unknown code is an error.
    pub fn parse(&self, text: &str, line: u64) -> Result<Vec<(String, Relation)>> {
        let mut relations = Vec::new();
        for token in text.split(',') {
            let token = token.trim();
            let caps = match self.token_re.captures(token) {
                Some(caps) => caps,
                None => {
                    log::debug!("line {}: skip related term {:?}", line, token);
                    continue;
                }
            };

            // some codes are typed with extra brackets, "[[BT]"
            let code = caps[2].trim_matches(|c: char| c == '[' || c == ']');
            let relation = Relation::from_code(code).ok_or_else(|| Error::UnknownRelation {
                line,
                code: code.to_string(),
                token: token.to_string(),
            })?;
            relations.push((caps[1].to_string(), relation));
        }
        Ok(relations)
    }
}

impl Default for RelationParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold state: current subject and graph under construction
pub struct Rdfizer {
    graph: Graph,
    scheme: Term,
    subject: Option<Term>,
    relations: RelationParser,
}

impl Rdfizer {
    /// Start new graph with concept scheme statements
    pub fn new(scheme: &SchemeConfig, modified: chrono::NaiveDate) -> Result<Self> {
        let mut graph = Graph::new();
        graph.bind("skos", skos::NS);
        graph.bind("dct", dct::NS);
        let scheme = scheme.add_to(&mut graph, modified)?;

        Ok(Self {
            graph,
            scheme,
            subject: None,
            relations: RelationParser::new(),
        })
    }

    /// Current subject, set by the latest English row
    pub fn subject(&self) -> Option<&Term> {
        self.subject.as_ref()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Add statements for one record
    pub fn push(&mut self, record: &Record) -> Result<()> {
        let lang = match Language::from_name(&record.language) {
            Some(lang) => lang,
            None => {
                log::debug!(
                    "line {}: skip language {:?}",
                    record.line,
                    record.language
                );
                return Ok(());
            }
        };
        if record.label.is_empty() {
            log::debug!("line {}: skip row without label", record.line);
            return Ok(());
        }

        // English row starts a new concept, other languages attach to it
        if lang == Language::PRIMARY {
            self.subject = Some(make_id(&record.label));
        }
        let subject = match &self.subject {
            Some(subject) => subject.clone(),
            None => {
                log::debug!(
                    "line {}: {} row before any English row",
                    record.line,
                    lang
                );
                return Ok(());
            }
        };

        self.add_record(&subject, lang, record)?;
        if lang == Language::PRIMARY && !record.related.is_empty() {
            self.add_relations(&subject, record)?;
        }
        Ok(())
    }

    fn add_record(&mut self, subject: &Term, lang: Language, record: &Record) -> Result<()> {
        let tag = lang.as_langcode();
        let g = &mut self.graph;

        g.add(subject.clone(), rdf::TYPE, skos::CONCEPT);
        g.add(
            subject.clone(),
            skos::PREF_LABEL,
            Literal::lang(record.label.as_str(), tag),
        );
        g.add(subject.clone(), skos::IN_SCHEME, self.scheme.clone());

        if !record.definition.is_empty() {
            g.add(
                subject.clone(),
                skos::DEFINITION,
                Literal::lang(record.definition.as_str(), tag),
            );
        }
        if !record.source.is_empty() {
            g.add(
                subject.clone(),
                dct::SOURCE,
                Literal::lang(record.source.as_str(), tag),
            );
        }

        for alt_label in record.alt_labels.split(',').map(str::trim) {
            if !alt_label.is_empty() {
                g.add(subject.clone(), skos::ALT_LABEL, Literal::lang(alt_label, tag));
            }
        }

        if !record.modified.is_empty() {
            let date = parse_date(&record.modified, record.line)?;
            self.set_modified(subject, date);
        }
        Ok(())
    }

    /// Keep only the latest dcterms:modified of the concept
    fn set_modified(&mut self, subject: &Term, date: chrono::NaiveDate) {
        let modified = Term::iri(dct::MODIFIED);
        if let Some(existing) = self.graph.value(subject, &modified).cloned() {
            let existing_date = existing
                .as_literal()
                .and_then(|lit| chrono::NaiveDate::parse_from_str(&lit.value, "%Y-%m-%d").ok());
            if existing_date.map_or(false, |existing_date| existing_date >= date) {
                return;
            }
            self.graph
                .remove(&Triple::new(subject.clone(), modified.clone(), existing));
        }

        self.graph.add(
            subject.clone(),
            modified,
            Literal::typed(date.format("%Y-%m-%d").to_string(), xsd::DATE),
        );
    }

    /// Add relation together with its inverse
    fn add_relations(&mut self, subject: &Term, record: &Record) -> Result<()> {
        for (label, relation) in self.relations.parse(&record.related, record.line)? {
            let object = make_id(&label);
            self.graph
                .add(subject.clone(), relation.predicate(), object.clone());
            self.graph
                .add(object, relation.inverse().predicate(), subject.clone());
        }
        Ok(())
    }
}

/// Parse YYYYMMDD
fn parse_date(text: &str, line: u64) -> Result<chrono::NaiveDate> {
    let invalid = || Error::InvalidDate {
        line,
        value: text.to_string(),
    };
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    chrono::NaiveDate::parse_from_str(text, "%Y%m%d").map_err(|_| invalid())
}

/// Fold records into graph, then check it
pub fn convert<I>(records: I, scheme: &SchemeConfig, modified: chrono::NaiveDate) -> Result<Graph>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let rdfizer = records
        .into_iter()
        .try_fold(Rdfizer::new(scheme, modified)?, |mut rdfizer, record| {
            rdfizer.push(&record?)?;
            Ok::<_, Error>(rdfizer)
        })?;

    let graph = rdfizer.into_graph();
    sanity_check(&graph)?;
    log::info!("Converted glossary into {} statements", graph.len());
    Ok(graph)
}

/// Every concept must have an English skos:prefLabel
///
/// Relation targets which never got a row of their own are only warned about.
pub fn sanity_check(graph: &Graph) -> Result<()> {
    let rdf_type = Term::iri(rdf::TYPE);
    let concept = Term::iri(skos::CONCEPT);
    let pref_label = Term::iri(skos::PREF_LABEL);
    let primary = Language::PRIMARY.as_langcode();

    for subject in graph.subjects(&rdf_type, &concept) {
        let has_label = graph.objects(subject, &pref_label).any(|label| {
            label
                .as_literal()
                .map_or(false, |lit| lit.lang.as_deref() == Some(primary) && !lit.value.is_empty())
        });
        if !has_label {
            let name = subject.as_iri().unwrap_or_default().to_string();
            return Err(Error::MissingPrefLabel(name));
        }
    }

    for subject in graph.subjects_all() {
        if subject.as_iri().map_or(false, |iri| iri.starts_with(CONCEPT_NS))
            && !graph.contains(subject, &rdf_type, &concept)
        {
            log::warn!("{} is related to, but has no row of its own", subject);
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn date() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()
    }

    fn row(language: &str, label: &str) -> Record {
        Record {
            line: 1,
            language: language.to_string(),
            label: label.to_string(),
            ..Default::default()
        }
    }

    fn rdfizer() -> Rdfizer {
        Rdfizer::new(&SchemeConfig::default(), date()).unwrap()
    }

    fn iri(local: &str) -> Term {
        Term::iri(format!("{}{}", CONCEPT_NS, local))
    }

    fn lit(value: &str, lang: &str) -> Term {
        Term::Literal(Literal::lang(value, lang))
    }

    #[test]
    fn identifier_derivation() {
        assert_eq!(make_id("Cataloguing (noun)"), make_id("Cataloguing"));
        assert_eq!(make_id(" Cataloguing "), make_id("Cataloguing"));
        assert_eq!(make_id("Cataloguing"), iri("Cataloguing"));
        assert_eq!(make_id("corporate body"), iri("CorporateBody"));
        assert_eq!(make_id("Name of a person (FRAD)"), iri("NameOfAPerson"));
        // the rest of every word is lower cased
        assert_eq!(make_id("ISBD area"), iri("IsbdArea"));
    }

    #[test]
    fn relation_codes() {
        assert_eq!(Relation::from_code("BT"), Some(Relation::Broader));
        assert_eq!(Relation::from_code("XX"), None);
        assert_eq!(Relation::Broader.inverse(), Relation::Narrower);
        assert_eq!(Relation::Related.inverse(), Relation::Related);
    }

    #[test]
    fn parse_related_terms() {
        let parser = RelationParser::new();
        let rels = parser
            .parse("Work [BT], Manifestation [[NT]], stray text, Item [RT]]", 3)
            .unwrap();
        assert_eq!(
            rels,
            vec![
                ("Work".to_string(), Relation::Broader),
                ("Manifestation".to_string(), Relation::Narrower),
                ("Item".to_string(), Relation::Related),
            ]
        );
    }

    #[test]
    fn unknown_relation_code_is_fatal() {
        let parser = RelationParser::new();
        match parser.parse("Foo [XX]", 12) {
            Err(Error::UnknownRelation { line, code, .. }) => {
                assert_eq!(line, 12);
                assert_eq!(code, "XX");
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut r = rdfizer();
        let mut rec = row("English", "Work");
        rec.related = "Foo [XX]".to_string();
        assert!(matches!(r.push(&rec), Err(Error::UnknownRelation { .. })));
    }

    #[test]
    fn broader_and_related_are_paired() {
        let mut r = rdfizer();
        let mut rec = row("English", "Expression");
        rec.related = "Work [BT], Manifestation [RT]".to_string();
        r.push(&rec).unwrap();

        let g = r.graph();
        let broader = Term::iri(skos::BROADER);
        let narrower = Term::iri(skos::NARROWER);
        let related = Term::iri(skos::RELATED);
        assert!(g.contains(&iri("Expression"), &broader, &iri("Work")));
        assert!(g.contains(&iri("Work"), &narrower, &iri("Expression")));
        assert!(g.contains(&iri("Expression"), &related, &iri("Manifestation")));
        assert!(g.contains(&iri("Manifestation"), &related, &iri("Expression")));
    }

    #[test]
    fn narrower_is_paired_with_broader() {
        let mut r = rdfizer();
        let mut rec = row("English", "Work");
        rec.related = "Expression [NT]".to_string();
        r.push(&rec).unwrap();

        let g = r.graph();
        assert!(g.contains(&iri("Work"), &Term::iri(skos::NARROWER), &iri("Expression")));
        assert!(g.contains(&iri("Expression"), &Term::iri(skos::BROADER), &iri("Work")));
    }

    #[test]
    fn relations_only_from_english_rows() {
        let mut r = rdfizer();
        r.push(&row("English", "Work")).unwrap();
        let mut fr = row("French", "Œuvre");
        fr.related = "Expression [XX]".to_string();
        // not parsed, so the bad code is not an error either
        r.push(&fr).unwrap();
        assert_eq!(
            r.graph()
                .triples(None, Some(&Term::iri(skos::RELATED)), None)
                .count(),
            0
        );
    }

    #[test]
    fn rows_attach_to_preceding_english_row() {
        let mut r = rdfizer();
        for rec in [
            row("English", "Foo"),
            row("French", "Foo-fr"),
            row("English", "Bar"),
            row("German", "Bar-de"),
        ] {
            r.push(&rec).unwrap();
        }

        let g = r.graph();
        let pref = Term::iri(skos::PREF_LABEL);
        assert!(g.contains(&iri("Foo"), &pref, &lit("Foo-fr", "fr")));
        assert!(g.contains(&iri("Bar"), &pref, &lit("Bar-de", "de")));
        assert!(!g.contains(&iri("Bar"), &pref, &lit("Foo-fr", "fr")));
        assert!(!g.contains(&iri("Foo"), &pref, &lit("Bar-de", "de")));
    }

    #[test]
    fn skipped_rows() {
        let mut r = rdfizer();
        let before = r.graph().len();

        // before any English row
        r.push(&row("French", "Œuvre")).unwrap();
        // unsupported language, empty label
        r.push(&row("Klingon", "Foo")).unwrap();
        r.push(&row("English", "")).unwrap();

        assert_eq!(r.graph().len(), before);
        assert!(r.subject().is_none());
    }

    #[test]
    fn header_and_blank_rows_keep_state() {
        let csv = "English,Foo,,,,,\n\
                   Language,Label,Definition,See,See also,Source,Modified\n\
                   ,,,,,,\n\
                   French,Foo-fr,,,,,\n";
        let graph = convert(
            crate::glossary::read_csv(csv.as_bytes()),
            &SchemeConfig::default(),
            date(),
        )
        .unwrap();
        assert!(graph.contains(
            &iri("Foo"),
            &Term::iri(skos::PREF_LABEL),
            &lit("Foo-fr", "fr")
        ));
    }

    #[test]
    fn record_statements() {
        let mut r = rdfizer();
        let mut rec = row("English", "Work");
        rec.definition = "A distinct creation".to_string();
        rec.source = "FRBR".to_string();
        rec.alt_labels = "see1, see2 ,see3".to_string();
        r.push(&rec).unwrap();

        let g = r.graph();
        let work = iri("Work");
        assert!(g.contains(&work, &Term::iri(rdf::TYPE), &Term::iri(skos::CONCEPT)));
        assert!(g.contains(&work, &Term::iri(skos::IN_SCHEME), &Term::iri(crate::scheme::SCHEME_URI)));
        assert!(g.contains(&work, &Term::iri(skos::DEFINITION), &lit("A distinct creation", "en")));
        assert!(g.contains(&work, &Term::iri(dct::SOURCE), &lit("FRBR", "en")));

        let alt = Term::iri(skos::ALT_LABEL);
        let alt_labels: Vec<_> = g.objects(&work, &alt).collect();
        assert_eq!(
            alt_labels,
            vec![&lit("see1", "en"), &lit("see2", "en"), &lit("see3", "en")]
        );
    }

    #[test]
    fn empty_definition_and_source_are_omitted() {
        let mut r = rdfizer();
        r.push(&row("English", "Work")).unwrap();
        let g = r.graph();
        assert!(g.value(&iri("Work"), &Term::iri(skos::DEFINITION)).is_none());
        assert!(g.value(&iri("Work"), &Term::iri(dct::SOURCE)).is_none());
        assert!(g.value(&iri("Work"), &Term::iri(dct::MODIFIED)).is_none());
    }

    #[test]
    fn latest_modified_date_wins() {
        for dates in [["20010101", "20030505"], ["20030505", "20010101"]] {
            let mut r = rdfizer();
            let mut en = row("English", "Work");
            en.modified = dates[0].to_string();
            let mut fr = row("French", "Œuvre");
            fr.modified = dates[1].to_string();
            r.push(&en).unwrap();
            r.push(&fr).unwrap();

            let g = r.graph();
            let modified: Vec<_> = g.objects(&iri("Work"), &Term::iri(dct::MODIFIED)).collect();
            assert_eq!(
                modified,
                vec![&Term::Literal(Literal::typed("2003-05-05", xsd::DATE))]
            );
        }
    }

    #[test]
    fn invalid_date_is_fatal() {
        for bad in ["2003-05-05", "20031345", "2003055", "yesterday"] {
            let mut r = rdfizer();
            let mut rec = row("English", "Work");
            rec.modified = bad.to_string();
            assert!(
                matches!(r.push(&rec), Err(Error::InvalidDate { .. })),
                "{} accepted",
                bad
            );
        }
    }

    #[test]
    fn legacy_column_rows_convert_identically() {
        let native = "English,Work,def,,Expression [NT],FRBR,20030505\n";
        let legacy = "42,English,Work,def,,Expression [NT],FRBR,20030505\n";
        let a = convert(crate::glossary::read_csv(native.as_bytes()), &SchemeConfig::default(), date()).unwrap();
        let b = convert(crate::glossary::read_csv(legacy.as_bytes()), &SchemeConfig::default(), date()).unwrap();
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
    }

    #[test]
    fn sanity_check_requires_english_label() {
        let mut g = Graph::new();
        g.add(iri("Orphan"), rdf::TYPE, skos::CONCEPT);
        g.add(iri("Orphan"), skos::PREF_LABEL, Literal::lang("Orphelin", "fr"));
        assert!(matches!(sanity_check(&g), Err(Error::MissingPrefLabel(_))));

        g.add(iri("Orphan"), skos::PREF_LABEL, Literal::lang("Orphan", "en"));
        assert!(sanity_check(&g).is_ok());
    }

    #[test]
    fn dangling_relation_target_passes_check() {
        let csv = "English,Expression,,,Work [BT],,\n";
        let graph = convert(
            crate::glossary::read_csv(csv.as_bytes()),
            &SchemeConfig::default(),
            date(),
        )
        .unwrap();
        assert!(graph.contains(&iri("Work"), &Term::iri(skos::NARROWER), &iri("Expression")));
    }
}
