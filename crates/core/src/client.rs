//! Caller-facing acquisition client and result assembly.
//!
//! `ContentClient` is the single choke point between callers and the
//! unreliable generation service. Whatever the remote does — refuse the
//! connection, reject every request shape, return an image, return prose,
//! return JSON in the wrong shape — the caller receives a well-typed
//! result. The worst case is catalog content annotated with a diagnostic
//! note.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::catalog::MatchMode;
use crate::classify::{ClassifiedContent, classify};
use crate::config::RemoteConfig;
use crate::error::ShapeError;
use crate::fallback::FallbackGenerator;
use crate::models::{LearningPathResult, LearningPathStep, Origin, QuizQuestion, QuizResult};
use crate::strategy::{EndpointKind, RequestParams, StrategyLadder};
use crate::topic::TopicKey;
use crate::transport::{HttpTransport, Transport};

// --- Wire payloads ---
//
// The generation service does not keep a stable schema across deployments;
// aliases absorb the observed field-name drift. Unknown fields are ignored.

#[derive(Debug, Deserialize)]
struct WireQuiz {
    #[serde(alias = "items", alias = "quiz")]
    questions: Vec<WireQuestion>,
}

#[derive(Debug, Deserialize)]
struct WireQuestion {
    #[serde(default)]
    id: Option<u32>,
    #[serde(alias = "question", alias = "text")]
    prompt: String,
    #[serde(alias = "choices", alias = "answers")]
    options: Vec<String>,
    #[serde(
        alias = "correctIndex",
        alias = "answerIndex",
        alias = "answer_index"
    )]
    correct_index: usize,
}

#[derive(Debug, Deserialize)]
struct WirePath {
    #[serde(alias = "items", alias = "path")]
    steps: Vec<WireStep>,
}

#[derive(Debug, Deserialize)]
struct WireStep {
    #[serde(alias = "name", alias = "heading")]
    title: String,
    #[serde(default, alias = "summary", alias = "details")]
    description: String,
    #[serde(default, alias = "links", alias = "urls")]
    resources: Vec<String>,
    #[serde(
        default,
        alias = "estimatedMinutes",
        alias = "minutes",
        alias = "estimated_time_minutes"
    )]
    estimated_minutes: u32,
}

/// Converts a structured payload into validated quiz questions.
///
/// Missing or non-positive ids are filled in positionally; a duplicate id
/// anywhere renumbers the whole set so uniqueness always holds.
fn quiz_from_value(value: serde_json::Value) -> Result<Vec<QuizQuestion>, ShapeError> {
    let wire: WireQuiz =
        serde_json::from_value(value).map_err(|e| ShapeError::Malformed(e.to_string()))?;
    if wire.questions.is_empty() {
        return Err(ShapeError::EmptyQuestions);
    }

    let mut questions: Vec<QuizQuestion> = wire
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| QuizQuestion {
            id: q.id.filter(|id| *id > 0).unwrap_or((i + 1) as u32),
            prompt: q.prompt,
            options: q.options,
            correct_index: q.correct_index,
        })
        .collect();

    let mut seen = std::collections::HashSet::new();
    if questions.iter().any(|q| !seen.insert(q.id)) {
        for (i, q) in questions.iter_mut().enumerate() {
            q.id = (i + 1) as u32;
        }
    }

    for question in &questions {
        question.validate()?;
    }
    Ok(questions)
}

/// Converts a structured payload into learning path steps, renumbered
/// sequentially from 1.
fn steps_from_value(value: serde_json::Value) -> Result<Vec<LearningPathStep>, ShapeError> {
    let wire: WirePath =
        serde_json::from_value(value).map_err(|e| ShapeError::Malformed(e.to_string()))?;
    if wire.steps.is_empty() {
        return Err(ShapeError::EmptySteps);
    }

    Ok(wire
        .steps
        .into_iter()
        .enumerate()
        .map(|(i, s)| LearningPathStep {
            id: (i + 1) as u32,
            title: s.title,
            description: s.description,
            resources: s.resources,
            estimated_minutes: s.estimated_minutes,
        })
        .collect())
}

fn excerpt(text: &str) -> String {
    const MAX_CHARS: usize = 120;
    let mut out: String = text.chars().take(MAX_CHARS).collect();
    if text.chars().count() > MAX_CHARS {
        out.push_str("...");
    }
    out
}

/// Acquires generated content, falling back to the built-in catalog when
/// the remote service is unreachable or unusable.
pub struct ContentClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    ladder: StrategyLadder,
    fallback: FallbackGenerator,
}

impl ContentClient {
    /// Builds a client with the real HTTP transport.
    pub fn new(config: &RemoteConfig) -> anyhow::Result<Self> {
        Ok(Self::with_transport(
            Arc::new(HttpTransport::new(config)?),
            config,
        ))
    }

    /// Builds a client over any transport; used by hosts that bring their
    /// own HTTP stack and by tests.
    pub fn with_transport(transport: Arc<dyn Transport>, config: &RemoteConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.clone(),
            ladder: StrategyLadder::default(),
            fallback: FallbackGenerator::default(),
        }
    }

    /// Replaces the default strategy ladder.
    pub fn with_ladder(mut self, ladder: StrategyLadder) -> Self {
        self.ladder = ladder;
        self
    }

    /// Selects how topics are matched against the catalog on fallback.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.fallback = FallbackGenerator::new(mode);
        self
    }

    /// Acquires a quiz for `topic`.
    ///
    /// Never fails: when the remote cannot supply a usable quiz, the
    /// result comes from the catalog with a note saying why. `difficulty`
    /// outside `[0.0, 1.0]` is clamped, not rejected.
    pub async fn acquire_quiz(&self, topic: &str, difficulty: f64) -> QuizResult {
        let key = TopicKey::normalize(topic);
        let difficulty = if difficulty.is_nan() {
            0.0
        } else {
            difficulty.clamp(0.0, 1.0)
        };
        let params = RequestParams {
            topic: topic.to_string(),
            difficulty: Some(difficulty),
        };

        let raw = match self
            .ladder
            .invoke(
                self.transport.as_ref(),
                &self.base_url,
                EndpointKind::Quiz,
                &params,
            )
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                warn!(topic = %key, %err, "quiz acquisition falling back");
                return self.fallback.quiz(&key, format!("remote unavailable: {err}"));
            }
        };

        match classify(raw) {
            ClassifiedContent::StructuredData(value) => match quiz_from_value(value) {
                Ok(questions) => {
                    info!(topic = %key, count = questions.len(), "quiz acquired from remote");
                    QuizResult {
                        questions,
                        origin: Origin::Remote,
                        note: None,
                    }
                }
                Err(err) => {
                    warn!(topic = %key, %err, "remote quiz failed shape validation");
                    self.fallback
                        .quiz(&key, format!("remote quiz failed validation: {err}"))
                }
            },
            ClassifiedContent::Image(media) => {
                warn!(topic = %key, content_type = %media.content_type, "remote sent an image for a quiz request");
                self.fallback
                    .quiz(&key, "remote returned image content for a quiz request")
            }
            ClassifiedContent::Unstructured(text) => {
                warn!(topic = %key, "remote quiz response was not structured data");
                self.fallback.quiz(
                    &key,
                    format!("remote response was not structured data: {}", excerpt(&text)),
                )
            }
        }
    }

    /// Acquires a learning path for `topic`.
    ///
    /// Image responses are accepted as-is, with the topic's original
    /// casing preserved for display. Anything unusable degrades to
    /// catalog steps; the fallback never fabricates an image. `Failure`
    /// appears only when even the catalog cannot produce a step list.
    pub async fn acquire_learning_path(&self, topic: &str) -> LearningPathResult {
        let key = TopicKey::normalize(topic);
        let display_topic = topic.to_string();
        let params = RequestParams {
            topic: display_topic.clone(),
            difficulty: None,
        };

        let raw = match self
            .ladder
            .invoke(
                self.transport.as_ref(),
                &self.base_url,
                EndpointKind::LearningPath,
                &params,
            )
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                warn!(topic = %key, %err, "learning path acquisition falling back");
                return self.fallback_path(display_topic, &key, format!("remote unavailable: {err}"));
            }
        };

        match classify(raw) {
            ClassifiedContent::Image(media) => {
                info!(topic = %key, content_type = %media.content_type, "learning path acquired as image");
                LearningPathResult::Image {
                    media,
                    topic: display_topic,
                }
            }
            ClassifiedContent::StructuredData(value) => match steps_from_value(value) {
                Ok(steps) => {
                    info!(topic = %key, count = steps.len(), "learning path acquired from remote");
                    LearningPathResult::Steps {
                        steps,
                        topic: display_topic,
                        origin: Origin::Remote,
                        note: None,
                    }
                }
                Err(err) => {
                    warn!(topic = %key, %err, "remote learning path failed shape validation");
                    self.fallback_path(
                        display_topic,
                        &key,
                        format!("remote path failed validation: {err}"),
                    )
                }
            },
            ClassifiedContent::Unstructured(text) => {
                warn!(topic = %key, "remote learning path response was not structured data");
                self.fallback_path(
                    display_topic,
                    &key,
                    format!("remote response was not structured data: {}", excerpt(&text)),
                )
            }
        }
    }

    fn fallback_path(&self, topic: String, key: &TopicKey, note: String) -> LearningPathResult {
        let steps = self.fallback.steps(key);
        if steps.is_empty() {
            // Reachable only with a corrupted catalog asset.
            return LearningPathResult::Failure {
                topic,
                message: format!("no learning path available: {note}"),
            };
        }
        LearningPathResult::Steps {
            steps,
            topic,
            origin: Origin::Fallback,
            note: Some(note),
        }
    }
}
