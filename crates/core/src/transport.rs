//! HTTP transport seam for the acquisition pipeline.
//!
//! `Transport` is the only component in the crate that performs I/O.
//! Keeping it behind a trait lets the strategy ladder and the client be
//! exercised against mocks, and lets hosts bring their own HTTP stack.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;

use crate::config::RemoteConfig;

/// A fully planned request: one strategy applied to one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    pub url: String,
    pub method: Method,
    /// Query string parameters, for query-encoded strategies.
    pub query: Vec<(String, String)>,
    /// JSON body, for body-encoded strategies.
    pub body: Option<serde_json::Value>,
}

/// Raw response metadata and body, prior to classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Declared media kind, from the `Content-Type` header.
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// A short, lossy excerpt of the body for diagnostics.
    pub fn body_excerpt(&self) -> String {
        const MAX_CHARS: usize = 200;
        let text = String::from_utf8_lossy(&self.body);
        let mut excerpt: String = text.chars().take(MAX_CHARS).collect();
        if text.chars().count() > MAX_CHARS {
            excerpt.push_str("...");
        }
        excerpt
    }
}

/// Executes planned requests against the remote generation service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one planned request. `Err` means the call itself failed
    /// (connection, timeout). Any HTTP response, success or not, is `Ok`;
    /// judging the status is the ladder's job.
    async fn execute(&self, plan: &RequestPlan) -> Result<RawResponse>;
}

/// `Transport` implementation backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Builds a transport from remote configuration. The configured
    /// timeout applies to each attempt individually.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, plan: &RequestPlan) -> Result<RawResponse> {
        let mut req = self.client.request(plan.method.clone(), &plan.url);
        if !plan.query.is_empty() {
            req = req.query(&plan.query);
        }
        if let Some(body) = &plan.body {
            req = req.json(body);
        }
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let resp = req
            .send()
            .await
            .context("request to generation service failed")?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = resp
            .bytes()
            .await
            .context("failed to read response body")?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
