// SPDX-License-Identifier: MIT
//!
//! Glossary languages
//!

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    En,
    Sq,
    Ar,
    Zh,
    Hr,
    Cs,
    Fr,
    De,
    It,
    Ja,
    Ko,
    Lv,
    Pt,
    Ru,
    Sk,
    Sl,
    Es,
    Sv,
    Th,
    Vi,
}

impl Language {
    /// Language whose rows introduce concepts and carry relations
    pub const PRIMARY: Language = Language::En;

    /// All languages, in table order
    pub const ALL: [Language; 20] = [
        Self::En,
        Self::Sq,
        Self::Ar,
        Self::Zh,
        Self::Hr,
        Self::Cs,
        Self::Fr,
        Self::De,
        Self::It,
        Self::Ja,
        Self::Ko,
        Self::Lv,
        Self::Pt,
        Self::Ru,
        Self::Sk,
        Self::Sl,
        Self::Es,
        Self::Sv,
        Self::Th,
        Self::Vi,
    ];

    /// ISO639-1 tag, used as RDF language tag
    pub fn as_langcode(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Sq => "sq",
            Self::Ar => "ar",
            Self::Zh => "zh",
            Self::Hr => "hr",
            Self::Cs => "cs",
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Lv => "lv",
            Self::Pt => "pt",
            Self::Ru => "ru",
            Self::Sk => "sk",
            Self::Sl => "sl",
            Self::Es => "es",
            Self::Sv => "sv",
            Self::Th => "th",
            Self::Vi => "vi",
        }
    }

    /// Language name as written in the spreadsheet's Language column
    pub fn name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Sq => "Albanian",
            Self::Ar => "Arabic",
            Self::Zh => "Chinese",
            Self::Hr => "Croatian",
            Self::Cs => "Czech",
            Self::Fr => "French",
            Self::De => "German",
            Self::It => "Italian",
            Self::Ja => "Japanese",
            Self::Ko => "Korean",
            Self::Lv => "Latvian",
            Self::Pt => "Portuguese",
            Self::Ru => "Russian",
            Self::Sk => "Slovak",
            Self::Sl => "Slovene",
            Self::Es => "Spanish",
            Self::Sv => "Swedish",
            Self::Th => "Thai",
            Self::Vi => "Vietnamese",
        }
    }

    /// Lookup by spreadsheet name, None for languages not (yet) supported
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|lang| lang.name() == name)
    }

    /// Lookup by ISO639-1 tag
    pub fn from_langcode(code: &str) -> Option<Self> {
        let lowcase = code.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_langcode() == lowcase)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
