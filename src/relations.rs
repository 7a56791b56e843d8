// SPDX-License-Identifier: MIT
//!
//! Relation statistics by language
//!

use crate::error::Result;
use crate::glossary::Record;
use std::collections::BTreeMap;

/// Relation code counts, language name => code => count
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RelationStats {
    counts: BTreeMap<String, BTreeMap<String, usize>>,
}

impl RelationStats {
    /// Count bracketed codes in the related terms column
    ///
    /// Codes are counted as written, so mistyped ones like "[BT" show up.
    pub fn tally<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let code_re = regex::Regex::new(r"\[(.*?)\]").expect("valid regex");
        let mut stats = Self::default();

        for record in records {
            let record = record?;
            if record.language.is_empty() || record.related.is_empty() {
                continue;
            }
            for caps in code_re.captures_iter(&record.related) {
                *stats
                    .counts
                    .entry(record.language.clone())
                    .or_default()
                    .entry(caps[1].to_string())
                    .or_default() += 1;
            }
        }
        Ok(stats)
    }

    pub fn count(&self, language: &str, code: &str) -> usize {
        self.counts
            .get(language)
            .and_then(|codes| codes.get(code))
            .copied()
            .unwrap_or(0)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(|lang| lang.as_str())
    }
}

impl std::fmt::Display for RelationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (lang, codes) in &self.counts {
            let pairs = codes
                .iter()
                .map(|(code, n)| format!("{} ({})", code, n))
                .collect::<Vec<String>>()
                .join(" ");
            writeln!(f, "{:<15} {}", lang, pairs)?;
        }
        Ok(())
    }
}
