//! Response classification.
//!
//! The remote service advertises a media kind but is not trusted to honor
//! it. Classification maps every response to one of three variants; there
//! is no error path. A response the layer cannot interpret degrades to
//! `Unstructured` instead of failing.

use serde_json::Value;
use tracing::debug;

use crate::models::MediaRef;
use crate::transport::RawResponse;

/// What a raw response turned out to contain.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedContent {
    /// The body parsed as a data-interchange payload.
    StructuredData(Value),
    /// Binary image content, passed through undecoded.
    Image(MediaRef),
    /// Everything else: a non-data media kind, or a body that does not
    /// parse despite its declaration.
    Unstructured(String),
}

fn media_kind(raw: &RawResponse) -> Option<&str> {
    raw.content_type
        .as_deref()
        .map(|kind| kind.split(';').next().unwrap_or(kind).trim())
        .filter(|kind| !kind.is_empty())
}

fn is_image_kind(kind: &str) -> bool {
    kind.to_ascii_lowercase().starts_with("image/")
}

/// Media kinds treated as structured data.
fn is_data_kind(kind: &str) -> bool {
    kind.eq_ignore_ascii_case("application/json")
        || kind.eq_ignore_ascii_case("text/json")
        || kind.to_ascii_lowercase().ends_with("+json")
}

/// Classifies a raw response by its declared media kind and body.
///
/// An image media kind always wins, regardless of what the body holds;
/// binary bodies are never fed to the parser. Declared data kinds and
/// absent metadata get one parse attempt before degrading. Any other
/// declared kind is taken at its word and returned as `Unstructured`.
pub fn classify(raw: RawResponse) -> ClassifiedContent {
    let kind = media_kind(&raw).map(|k| k.to_string());
    match kind {
        Some(kind) if is_image_kind(&kind) => {
            debug!(content_type = %kind, len = raw.body.len(), "classified response as image");
            ClassifiedContent::Image(MediaRef {
                content_type: kind,
                bytes: raw.body,
            })
        }
        Some(kind) if !is_data_kind(&kind) => {
            debug!(content_type = %kind, "response declares a non-data media kind");
            ClassifiedContent::Unstructured(String::from_utf8_lossy(&raw.body).into_owned())
        }
        // Declared as data, or no declaration at all: attempt a parse.
        _ => match serde_json::from_slice::<Value>(&raw.body) {
            Ok(value) => ClassifiedContent::StructuredData(value),
            Err(err) => {
                debug!(
                    content_type = ?raw.content_type,
                    error = %err,
                    "response body is not structured data"
                );
                ClassifiedContent::Unstructured(String::from_utf8_lossy(&raw.body).into_owned())
            }
        },
    }
}
