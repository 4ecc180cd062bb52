//! Strategy ladder for remote invocation.
//!
//! The generation service's accepted request shape varies by deployment,
//! so each endpoint probes an ordered list of shapes until one yields a
//! success status. The ladder is data: adding a shape or an endpoint is a
//! list edit, not a new call site. Ordering affects latency, not
//! correctness; the historically reliable shape goes first.

use reqwest::Method;
use tracing::{debug, warn};

use crate::error::{AttemptError, InvocationError};
use crate::transport::{RawResponse, RequestPlan, Transport};

/// Logical endpoints of the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Quiz,
    LearningPath,
}

impl EndpointKind {
    /// URL path segment under the configured base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::LearningPath => "learning-path",
        }
    }
}

/// How a strategy carries its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Parameters as a JSON object in the request body.
    JsonBody,
    /// Parameters as a query string.
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
        }
    }
}

/// One request shape to try against an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub encoding: Encoding,
    pub verb: Verb,
}

/// Parameters forwarded to the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParams {
    pub topic: String,
    /// Clamped difficulty score; quiz requests only.
    pub difficulty: Option<f64>,
}

impl RequestParams {
    fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("topic".to_string(), self.topic.clone())];
        if let Some(score) = self.difficulty {
            pairs.push(("difficulty".to_string(), score.to_string()));
        }
        pairs
    }

    fn json(&self) -> serde_json::Value {
        let mut body = serde_json::json!({ "topic": self.topic });
        if let Some(score) = self.difficulty {
            body["difficulty"] = serde_json::json!(score);
        }
        body
    }
}

impl Strategy {
    /// Applies this shape to an endpoint, producing a concrete request.
    pub fn plan(
        &self,
        base_url: &str,
        endpoint: EndpointKind,
        params: &RequestParams,
    ) -> RequestPlan {
        let url = format!("{}/{}", base_url.trim_end_matches('/'), endpoint.path());
        match self.encoding {
            Encoding::JsonBody => RequestPlan {
                url,
                method: self.verb.method(),
                query: Vec::new(),
                body: Some(params.json()),
            },
            Encoding::Query => RequestPlan {
                url,
                method: self.verb.method(),
                query: params.pairs(),
                body: None,
            },
        }
    }
}

const DEFAULT_LADDER: &[Strategy] = &[
    Strategy {
        encoding: Encoding::JsonBody,
        verb: Verb::Post,
    },
    Strategy {
        encoding: Encoding::Query,
        verb: Verb::Get,
    },
];

/// Ordered request shapes for one endpoint.
#[derive(Debug, Clone)]
pub struct StrategyLadder {
    strategies: Vec<Strategy>,
}

impl Default for StrategyLadder {
    fn default() -> Self {
        Self {
            strategies: DEFAULT_LADDER.to_vec(),
        }
    }
}

impl StrategyLadder {
    /// A ladder with caller-supplied ordering. An empty list falls back to
    /// the default ladder so invocation always has at least one shape.
    pub fn new(strategies: Vec<Strategy>) -> Self {
        if strategies.is_empty() {
            Self::default()
        } else {
            Self { strategies }
        }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Tries each strategy in order until one returns a success status.
    ///
    /// The first 2xx response is returned without inspecting its body;
    /// interpreting the body is the classifier's job. A transport failure
    /// or non-success status advances the ladder; when every shape has
    /// failed, the last failure comes back as `InvocationError`. Attempts
    /// run sequentially in the caller's task, so dropping the returned
    /// future aborts the in-flight attempt and issues no further ones.
    pub async fn invoke(
        &self,
        transport: &dyn Transport,
        base_url: &str,
        endpoint: EndpointKind,
        params: &RequestParams,
    ) -> Result<RawResponse, InvocationError> {
        let mut last: Option<AttemptError> = None;

        for (i, strategy) in self.strategies.iter().enumerate() {
            let plan = strategy.plan(base_url, endpoint, params);
            debug!(
                endpoint = ?endpoint,
                attempt = i + 1,
                shape = ?strategy,
                url = %plan.url,
                "attempting remote strategy"
            );
            match transport.execute(&plan).await {
                Ok(raw) if raw.is_success() => {
                    debug!(
                        endpoint = ?endpoint,
                        attempt = i + 1,
                        status = raw.status,
                        "remote strategy succeeded"
                    );
                    return Ok(raw);
                }
                Ok(raw) => {
                    let err = AttemptError::RemoteStatus {
                        status: raw.status,
                        detail: raw.body_excerpt(),
                    };
                    warn!(endpoint = ?endpoint, attempt = i + 1, %err, "remote strategy rejected");
                    last = Some(err);
                }
                Err(err) => {
                    let err = AttemptError::Transport(format!("{err:#}"));
                    warn!(endpoint = ?endpoint, attempt = i + 1, %err, "remote strategy failed");
                    last = Some(err);
                }
            }
        }

        // `new` guarantees a non-empty ladder, so a failure was recorded.
        let last = last.unwrap_or_else(|| AttemptError::Transport("no strategies configured".to_string()));
        Err(InvocationError {
            attempts: self.strategies.len(),
            last,
        })
    }
}
