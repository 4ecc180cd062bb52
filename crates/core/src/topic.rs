use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized lookup key derived from free-text topic input.
///
/// Normalization lowercases and trims the raw text. It is total: every
/// input produces a key, including the empty string (a valid, if useless,
/// key). The original casing of the topic is not kept here; callers that
/// need it for display hold on to the raw string themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicKey(String);

impl TopicKey {
    /// Canonicalizes free-text topic input into a lookup key.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(
            TopicKey::normalize("  Machine Learning  ").as_str(),
            "machine learning"
        );
        assert_eq!(TopicKey::normalize("SORTING").as_str(), "sorting");
    }

    #[test]
    fn test_normalize_accepts_empty_input() {
        let key = TopicKey::normalize("   ");
        assert!(key.is_empty());
        assert_eq!(key.as_str(), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = TopicKey::normalize("Quantum Computing");
        let twice = TopicKey::normalize(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_serde_transparent() {
        let key = TopicKey::normalize("Rust");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"rust\"");
    }
}
