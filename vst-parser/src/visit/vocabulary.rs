//! Activity keyword vocabulary
//!
//!     Maps statement keywords to an [ActivityClass]. The default table
//!     covers the statements seen in operational visit files; callers can
//!     extend or override it at runtime, so new keywords never require code
//!     changes. The vocabulary is part of [ParseConfig] and is passed into
//!     every parse call explicitly: there is no ambient table, which keeps
//!     parallel parses with different vocabularies safe.

use std::collections::BTreeMap;

use crate::visit::ast::ActivityClass;

/// The recognized activity keywords and their classifications.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Vocabulary {
    keywords: BTreeMap<String, ActivityClass>,
}

impl Default for Vocabulary {
    /// The operational statement taxonomy: exposures and slews count as
    /// observation statements, `DITHER` statements are dithers, and
    /// `AUX`/`CONFIG` statements select instrument configurations.
    fn default() -> Self {
        let mut vocabulary = Vocabulary {
            keywords: BTreeMap::new(),
        };
        vocabulary.insert("ACT", ActivityClass::ObservationStatement);
        vocabulary.insert("SLEW", ActivityClass::ObservationStatement);
        vocabulary.insert("DITHER", ActivityClass::Dither);
        vocabulary.insert("AUX", ActivityClass::ConfigurationChange);
        vocabulary.insert("CONFIG", ActivityClass::ConfigurationChange);
        vocabulary.insert("MOMENTUM", ActivityClass::Other);
        vocabulary
    }
}

impl Vocabulary {
    /// An empty vocabulary; every keyword will be unknown.
    pub fn empty() -> Self {
        Vocabulary {
            keywords: BTreeMap::new(),
        }
    }

    /// Add or override a keyword.
    pub fn insert(&mut self, keyword: &str, class: ActivityClass) {
        self.keywords.insert(keyword.to_string(), class);
    }

    /// Remove a keyword; returns its previous classification.
    pub fn remove(&mut self, keyword: &str) -> Option<ActivityClass> {
        self.keywords.remove(keyword)
    }

    /// Classify a keyword, or `None` if it is not in the vocabulary.
    pub fn classify(&self, keyword: &str) -> Option<ActivityClass> {
        self.keywords.get(keyword).copied()
    }

    /// Whether the keyword is recognized.
    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains_key(keyword)
    }
}
