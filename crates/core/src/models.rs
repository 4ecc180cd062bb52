//! Domain models for acquired content.
//!
//! These are the shapes callers receive from the acquisition operations.
//! They are constructed fresh per request and carry their own provenance
//! (`Origin`), so the presentation layer can tell remote content from
//! catalog content without consulting anything else.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ShapeError;

/// Provenance of an acquisition result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Content came from the remote generation service.
    Remote,
    /// Content came from the built-in catalog.
    Fallback,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Remote => write!(f, "remote"),
            Origin::Fallback => write!(f, "fallback"),
        }
    }
}

/// A single multiple-choice question.
///
/// Invariant: `options.len() >= 2` and `correct_index < options.len()`.
/// Checked by [`QuizQuestion::validate`] before any remote payload is
/// accepted; catalog entries satisfy it by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Positive identifier, unique within its question set.
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl QuizQuestion {
    /// Checks the question invariant.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.options.len() < 2 {
            return Err(ShapeError::TooFewOptions {
                id: self.id,
                got: self.options.len(),
            });
        }
        if self.correct_index >= self.options.len() {
            return Err(ShapeError::CorrectIndexOutOfRange {
                id: self.id,
                index: self.correct_index,
                options: self.options.len(),
            });
        }
        Ok(())
    }
}

/// A fully assembled quiz, always non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub questions: Vec<QuizQuestion>,
    pub origin: Origin,
    /// Diagnostic explaining a fallback, absent on clean remote results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One step of a generated learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPathStep {
    /// Sequential identifier starting at 1.
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Supporting URLs, may be empty.
    pub resources: Vec<String>,
    pub estimated_minutes: u32,
}

/// Opaque handle to binary image content returned by the remote service.
///
/// The payload is never decoded by this layer; it is carried through for
/// the presentation layer. Serialization encodes the bytes as base64 under
/// a `data` field alongside the declared media kind.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRef {
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Serialize, Deserialize)]
struct MediaRefWire {
    content_type: String,
    data: String,
}

impl Serialize for MediaRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MediaRefWire {
            content_type: self.content_type.clone(),
            data: BASE64.encode(&self.bytes),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MediaRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = MediaRefWire::deserialize(deserializer)?;
        let bytes = BASE64.decode(&wire.data).map_err(serde::de::Error::custom)?;
        Ok(Self {
            content_type: wire.content_type,
            bytes: Bytes::from(bytes),
        })
    }
}

/// Outcome of a learning path acquisition.
///
/// Consumers must match exhaustively; there is no error case outside
/// `Failure`, and `Failure` is reserved for the rare situation where not
/// even the catalog can supply a step list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LearningPathResult {
    /// An ordered, non-empty list of steps.
    Steps {
        steps: Vec<LearningPathStep>,
        /// Topic as the caller supplied it, casing preserved for display.
        topic: String,
        origin: Origin,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// The remote rendered the path as an image; passed through as-is.
    Image { media: MediaRef, topic: String },
    /// No sensible step list could be assembled.
    Failure { topic: String, message: String },
}
