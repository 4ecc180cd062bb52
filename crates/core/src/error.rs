//! Error taxonomy for the acquisition pipeline.
//!
//! None of these errors reach callers of the public acquisition operations.
//! Each one is recovered at a specific point in the pipeline: attempt
//! failures by ladder advancement, invocation failures and shape violations
//! by fallback assembly. Only `ConfigError` (in `config.rs`) can surface,
//! and only at host startup.

use thiserror::Error;

/// Failure of a single strategy attempt against the remote service.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// The transport call itself failed (connection refused, DNS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The remote responded, but with a non-success status code.
    #[error("remote returned status {status}: {detail}")]
    RemoteStatus { status: u16, detail: String },
}

/// Every configured strategy for an endpoint failed.
///
/// Carries the last attempt's failure as the diagnostic; earlier failures
/// have already been logged by the ladder.
#[derive(Debug, Error)]
#[error("all {attempts} request strategies failed, last: {last}")]
pub struct InvocationError {
    pub attempts: usize,
    pub last: AttemptError,
}

/// A structured payload parsed, but violates a domain invariant.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("unexpected payload shape: {0}")]
    Malformed(String),
    #[error("payload contained no questions")]
    EmptyQuestions,
    #[error("question {id} needs at least two options, got {got}")]
    TooFewOptions { id: u32, got: usize },
    #[error("question {id} has correct index {index} out of range for {options} options")]
    CorrectIndexOutOfRange {
        id: u32,
        index: usize,
        options: usize,
    },
    #[error("payload contained no steps")]
    EmptySteps,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_error_display() {
        let transport = AttemptError::Transport("connection refused".to_string());
        assert_eq!(
            format!("{}", transport),
            "transport failure: connection refused"
        );

        let status = AttemptError::RemoteStatus {
            status: 503,
            detail: "service unavailable".to_string(),
        };
        assert_eq!(
            format!("{}", status),
            "remote returned status 503: service unavailable"
        );
    }

    #[test]
    fn test_invocation_error_display_carries_last_failure() {
        let err = InvocationError {
            attempts: 2,
            last: AttemptError::RemoteStatus {
                status: 500,
                detail: "boom".to_string(),
            },
        };
        assert_eq!(
            format!("{}", err),
            "all 2 request strategies failed, last: remote returned status 500: boom"
        );
    }

    #[test]
    fn test_shape_error_display() {
        let err = ShapeError::CorrectIndexOutOfRange {
            id: 3,
            index: 4,
            options: 4,
        };
        assert_eq!(
            format!("{}", err),
            "question 3 has correct index 4 out of range for 4 options"
        );

        assert_eq!(
            format!("{}", ShapeError::EmptyQuestions),
            "payload contained no questions"
        );
    }
}
