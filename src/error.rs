// SPDX-License-Identifier: MIT
//!
//! Error types
//!

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Can not read workbook: {0}")]
    Xlsx(String),

    #[error("Can not parse config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("XML error: {0}")]
    Xml(#[from] minidom::Error),

    #[error(transparent)]
    Graph(#[from] skos_graph::Error),

    /// Row is neither 7 columns nor 7 plus the legacy ID column
    #[error("line {line}: expected 7 or 8 columns, found {found}")]
    MalformedRow { line: u64, found: usize },

    /// Related terms annotation with a code other than BT, NT, RT
    #[error("line {line}: unknown relation type {code:?} in {token:?}")]
    UnknownRelation {
        line: u64,
        code: String,
        token: String,
    },

    /// Modified date not in YYYYMMDD form
    #[error("line {line}: invalid modified date {value:?}, expected YYYYMMDD")]
    InvalidDate { line: u64, value: String },

    #[error("{0} missing skos:prefLabel in English")]
    MissingPrefLabel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
