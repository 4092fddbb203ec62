//! HTTP backend for the knowledge-base query endpoint.
//!
//! One JSON POST per question, one JSON body back. No auth header, no
//! streaming, no retry and no timeout: a hung endpoint keeps the caller
//! waiting.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::query::{QueryAnswer, QueryBackend, QueryEnvelope, QueryError, QueryRequest};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_QUERY_PATH: &str = "/api/query";

/// Joins a base URL and a path without doubling or dropping the slash.
fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

/// Pulls the `error` field out of a failure body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<QueryEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_else(|| body.trim().to_string())
}

pub struct HttpQueryBackend {
    url: String,
    client: reqwest::Client,
}

impl HttpQueryBackend {
    pub fn new(base_url: Option<String>, path: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let path = path.unwrap_or_else(|| DEFAULT_QUERY_PATH.to_string());

        Self {
            url: join_url(&base_url, &path),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl QueryBackend for HttpQueryBackend {
    fn name(&self) -> &str {
        "http"
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn ask(&self, question: &str) -> Result<QueryAnswer, QueryError> {
        info!("Query request: url={}, question_len={}", self.url, question.len());

        let response = self
            .client
            .post(&self.url)
            .json(&QueryRequest::new(question))
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Query response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_detail(&body);
            warn!("Query endpoint error: {} - {}", status.as_u16(), message);
            return Err(QueryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Query response body: {} bytes", body.len());
        let envelope: QueryEnvelope =
            serde_json::from_str(&body).map_err(|e| QueryError::Parse(e.to_string()))?;

        envelope.into_answer()
    }
}
