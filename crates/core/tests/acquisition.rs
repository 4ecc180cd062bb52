//! End-to-end acquisition scenarios against a scripted transport.
//!
//! These tests exercise the full pipeline — ladder, classifier, assembler,
//! fallback — through the public API only.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use studypath_core::client::ContentClient;
use studypath_core::config::RemoteConfig;
use studypath_core::models::{LearningPathResult, Origin};
use studypath_core::transport::{RawResponse, RequestPlan, Transport};

/// A transport that pops one canned outcome per call and reports
/// "connection refused" once the script runs out.
struct ScriptedTransport {
    script: Mutex<Vec<anyhow::Result<RawResponse>>>,
}

impl ScriptedTransport {
    fn new(mut script: Vec<anyhow::Result<RawResponse>>) -> Self {
        script.reverse();
        Self {
            script: Mutex::new(script),
        }
    }

    fn unreachable() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, _plan: &RequestPlan) -> anyhow::Result<RawResponse> {
        self.script
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(anyhow::anyhow!("connection refused")))
    }
}

fn client(transport: ScriptedTransport) -> ContentClient {
    let config = RemoteConfig::new("http://localhost:8000");
    ContentClient::with_transport(Arc::new(transport), &config)
}

fn json(body: &str) -> anyhow::Result<RawResponse> {
    Ok(RawResponse {
        status: 200,
        content_type: Some("application/json".to_string()),
        body: Bytes::from(body.to_string()),
    })
}

fn status(code: u16, body: &str) -> anyhow::Result<RawResponse> {
    Ok(RawResponse {
        status: code,
        content_type: None,
        body: Bytes::from(body.to_string()),
    })
}

#[tokio::test]
async fn quiz_with_unreachable_remote_serves_the_sorting_catalog_entry() {
    let result = client(ScriptedTransport::unreachable())
        .acquire_quiz("sorting", 0.5)
        .await;

    assert_eq!(result.origin, Origin::Fallback);
    assert_eq!(result.questions.len(), 3);
    assert!(result.note.is_some());
    for question in &result.questions {
        assert!(question.validate().is_ok());
        assert!(question.options.len() >= 2);
        assert!(question.correct_index < question.options.len());
    }
}

#[tokio::test]
async fn quiz_recovers_on_the_second_strategy() {
    // First shape rejected with a 405, second succeeds.
    let transport = ScriptedTransport::new(vec![
        status(405, "method not allowed"),
        json(r#"{"questions":[{"id":1,"prompt":"Q?","options":["a","b"],"correct_index":0}]}"#),
    ]);

    let result = client(transport).acquire_quiz("sorting", 0.5).await;
    assert_eq!(result.origin, Origin::Remote);
    assert_eq!(result.note, None);
}

#[tokio::test]
async fn learning_path_image_response_is_passed_through() {
    let transport = ScriptedTransport::new(vec![Ok(RawResponse {
        status: 200,
        content_type: Some("image/png".to_string()),
        body: Bytes::from_static(&[0x89, 0x50, 0x4e, 0x47]),
    })]);

    let result = client(transport)
        .acquire_learning_path("Quantum Computing")
        .await;

    match result {
        LearningPathResult::Image { media, topic } => {
            assert_eq!(topic, "Quantum Computing");
            assert_eq!(media.content_type, "image/png");
            assert_eq!(&media.bytes[..], &[0x89, 0x50, 0x4e, 0x47]);
        }
        other => panic!("expected Image, got {:?}", other),
    }
}

#[tokio::test]
async fn learning_path_prose_response_degrades_to_annotated_steps() {
    let transport = ScriptedTransport::new(vec![json(r#""not an object at all""#)]);

    let result = client(transport).acquire_learning_path("sorting").await;
    match result {
        LearningPathResult::Steps {
            steps,
            topic,
            origin,
            note,
        } => {
            assert!(!steps.is_empty());
            assert_eq!(topic, "sorting");
            assert_eq!(origin, Origin::Fallback);
            assert!(note.is_some());
            for (i, step) in steps.iter().enumerate() {
                assert_eq!(step.id, (i + 1) as u32);
            }
        }
        other => panic!("expected Steps, got {:?}", other),
    }
}

#[tokio::test]
async fn acquisition_is_total_over_awkward_topics() {
    for topic in ["", "   ", "ÜNÏCÖDE Tøpic", "a-very-long-topic-nobody-knows"] {
        let quiz = client(ScriptedTransport::unreachable())
            .acquire_quiz(topic, 0.5)
            .await;
        assert!(!quiz.questions.is_empty(), "topic {:?}", topic);

        let path = client(ScriptedTransport::unreachable())
            .acquire_learning_path(topic)
            .await;
        match path {
            LearningPathResult::Steps { steps, .. } => assert!(!steps.is_empty()),
            other => panic!("topic {:?}: expected Steps, got {:?}", topic, other),
        }
    }
}

#[tokio::test]
async fn fallback_results_are_reproducible() {
    let first = client(ScriptedTransport::unreachable())
        .acquire_quiz("no catalog entry for this", 0.2)
        .await;
    let second = client(ScriptedTransport::unreachable())
        .acquire_quiz("no catalog entry for this", 0.2)
        .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn out_of_range_difficulty_is_clamped_not_rejected() {
    for difficulty in [-3.0, 2.0, f64::NAN] {
        let result = client(ScriptedTransport::unreachable())
            .acquire_quiz("sorting", difficulty)
            .await;
        assert!(!result.questions.is_empty());
    }
}
