// SPDX-License-Identifier: MIT
//!
//! Concept scheme metadata, from muldicat.toml or built-in defaults
//!

use crate::error::{Error, Result};
use crate::rdfa::XHTML_NS;
use skos_graph::vocab::{dct, rdf, skos, xsd};
use skos_graph::{Graph, Literal, Term};

pub const SCHEME_URI: &str = "http://iflastandards.info/ns/muldicat";

const TITLE: &str = "Multilingual Dictionary of Cataloging Terms and Concepts";

const DESCRIPTION: &str = "\
The Multilingual dictionary of cataloguing terms and concepts contains definitions for many terms and concepts used by the library cataloguing community. Terms and definitions are available in English and a variety of other languages.

The MulDiCat project was begun by Monika Muennich in 1998 for IFLA's Cataloguing Section. It was stored in a proprietary database developed by Bernard Eversberg in 2003. It has now re-emerged in part as a Word table, soon to be a SKOS file on the IFLA Namespace.

It is intended to be used for authoritative translations of IFLA cataloguing standards and related documents. The terms reflect international agreements on terms to use for these cataloguing and classification concepts -- in particular, the agreements reached during the IME ICC (IFLA Meetings of Experts on an International Cataloguing Code) that reviewed FRBR, FRAD, and ISBD terminology while developing the International Cataloguing Principles (ICP). As additional official translations of ICP are added to IFLANET, MulDiCat has been updated to include terms in these additional languages.

Other terms will be added as IFLA reaches international agreement for them through the work of the Cataloguing Section and the Classification & Indexing Sections, as well as other units throughout IFLA interested and involved in bibliographic standards. Questions about this dictionary of terms can be sent to Barbara Tillett, btil@loc.gov.
";

#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct SchemeConfig {
    /// Concept scheme IRI
    pub uri: String,
    pub title: String,
    /// CommonMark text
    pub description: String,
    /// Language tag of title and description
    pub language: String,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            uri: SCHEME_URI.to_string(),
            title: TITLE.to_string(),
            description: DESCRIPTION.to_string(),
            language: "en".to_string(),
        }
    }
}

impl SchemeConfig {
    /// Search default config file (muldicat.toml or ~/.muldicat.toml)
    ///
    /// Falls back to built-in MulDiCat metadata when neither exists.
    pub fn new() -> Result<Self> {
        use std::path::PathBuf;
        let config_files = [
            PathBuf::new().join("muldicat.toml"),
            dirs::home_dir()
                .unwrap_or(PathBuf::new())
                .join(".muldicat.toml"),
        ];

        for config_file in config_files {
            match Self::with_config(&config_file) {
                Ok(conf) => {
                    log::debug!("Read config file {:?}", config_file);
                    return Ok(conf);
                }
                Err(Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                    log::debug!("Config file {:?} NOT found.", &config_file);
                }
                Err(err) => {
                    // Other err, stop searching
                    log::error!("Can not parse config file {:?} : {:?}", &config_file, err);
                    return Err(err);
                }
            }
        }

        log::debug!("Use built-in scheme metadata");
        Ok(Self::default())
    }

    /// Config from specific file
    pub fn with_config<P: AsRef<std::path::Path>>(config_path: P) -> Result<Self> {
        let config = std::fs::read_to_string(&config_path)?;
        Self::from_toml(&config)
    }

    pub fn from_toml(config: &str) -> Result<Self> {
        Ok(toml::from_str(config)?)
    }

    /// Description rendered as XHTML <div>
    ///
    /// The markup is parsed once here, so a broken description fails before
    /// any output is written.
    pub fn description_xhtml(&self) -> Result<String> {
        let html = comrak::markdown_to_html(&self.description, &comrak::ComrakOptions::default());
        let xhtml = format!("<div xmlns=\"{}\">{}</div>", XHTML_NS, html.trim_end());
        let _: minidom::Element = xhtml.parse()?;
        Ok(xhtml)
    }

    pub fn term(&self) -> Term {
        Term::iri(self.uri.as_str())
    }

    /// Add skos:ConceptScheme statements, returns the scheme term
    pub fn add_to(&self, graph: &mut Graph, modified: chrono::NaiveDate) -> Result<Term> {
        let scheme = self.term();
        graph.add(scheme.clone(), rdf::TYPE, skos::CONCEPT_SCHEME);
        graph.add(
            scheme.clone(),
            dct::TITLE,
            Literal::lang(self.title.as_str(), self.language.as_str()),
        );
        graph.add(
            scheme.clone(),
            dct::DESCRIPTION,
            Literal::lang(self.description_xhtml()?, self.language.as_str()),
        );
        graph.add(
            scheme.clone(),
            dct::MODIFIED,
            Literal::typed(modified.format("%Y-%m-%d").to_string(), xsd::DATE),
        );
        Ok(scheme)
    }
}
