//! The built-in content catalog backing fallback generation.
//!
//! The catalog is a build-time JSON asset embedded into the binary and
//! parsed once on first access. It is read-only for the life of the
//! process. Entries are kept in file order; that order is the tie-break
//! when more than one key could match a topic.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Deserialize;
use std::sync::LazyLock;

use crate::models::{LearningPathStep, QuizQuestion};
use crate::topic::TopicKey;

/// Pre-authored content for one known topic.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// Lowercase slug, e.g. `machine-learning`.
    pub key: String,
    pub questions: Vec<QuizQuestion>,
    pub steps: Vec<LearningPathStep>,
}

/// The full catalog: ordered entries plus the `default` entry used when
/// nothing matches.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    default: CatalogEntry,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../assets/catalog.json"))
        .expect("embedded catalog asset is valid JSON")
});

/// How topic keys are matched against catalog keys after an exact match
/// has failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Bidirectional substring containment, first catalog entry wins.
    #[default]
    Substring,
    /// Highest fuzzy match score wins; order-independent.
    Fuzzy,
}

impl Catalog {
    /// The process-wide catalog parsed from the embedded asset.
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn default_entry(&self) -> &CatalogEntry {
        &self.default
    }

    /// Resolves a topic key to a catalog entry. Total: falls through to
    /// the default entry when nothing matches.
    pub fn resolve(&self, key: &TopicKey, mode: MatchMode) -> &CatalogEntry {
        let needle = key.as_str();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.key == needle || folded(&e.key) == needle)
        {
            return entry;
        }
        // An empty key would trivially be contained in every catalog key;
        // send it straight to the default entry instead.
        if needle.is_empty() {
            return &self.default;
        }
        match mode {
            MatchMode::Substring => self.resolve_substring(needle),
            MatchMode::Fuzzy => self.resolve_fuzzy(needle),
        }
    }

    fn resolve_substring(&self, needle: &str) -> &CatalogEntry {
        self.entries
            .iter()
            .find(|e| {
                let hay = folded(&e.key);
                needle.contains(&hay) || hay.contains(needle)
            })
            .unwrap_or(&self.default)
    }

    fn resolve_fuzzy(&self, needle: &str) -> &CatalogEntry {
        let matcher = SkimMatcherV2::default();
        self.entries
            .iter()
            .filter_map(|e| {
                matcher
                    .fuzzy_match(&folded(&e.key), needle)
                    .map(|score| (score, e))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, e)| e)
            .unwrap_or(&self.default)
    }
}

/// Catalog keys are slugs; fold `-` to a space so they can match
/// normalized free-text topics.
fn folded(key: &str) -> String {
    key.replace('-', " ")
}
