//! Wire types for the knowledge-base `/api/query` endpoint.
//!
//! ```text
//! → {"query": "Who directed Inception?"}
//! ← {"status": "success", "response": {"query": "...", "result": "Christopher Nolan"}}
//! ← {"status": "error", "error": "db down"}
//! ```

use serde::{Deserialize, Serialize};

use super::backend::QueryError;

/// Request body: the user's question, verbatim.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn new(question: &str) -> Self {
        Self {
            query: question.to_string(),
        }
    }
}

/// Status field of the response envelope. Anything other than `"success"`
/// counts as a failure.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Success,
    #[serde(other)]
    Failure,
}

/// Nested answer object returned on success.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QueryPayload {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

/// Top-level response body.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QueryEnvelope {
    #[serde(default)]
    pub status: Option<QueryStatus>,
    #[serde(default)]
    pub response: Option<QueryPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

impl QueryEnvelope {
    /// Collapses the envelope into an answer or a typed error.
    pub fn into_answer(self) -> Result<QueryAnswer, QueryError> {
        match self.status {
            Some(QueryStatus::Success) => {
                let payload = self
                    .response
                    .ok_or_else(|| QueryError::Parse("success without response object".into()))?;
                Ok(QueryAnswer {
                    result: payload.result,
                })
            }
            Some(QueryStatus::Failure) => Err(QueryError::Server(
                self.error.unwrap_or_else(|| "unspecified error".to_string()),
            )),
            None => Err(QueryError::Parse(match self.error {
                Some(detail) => format!("missing status field (error: {detail})"),
                None => "missing status field".to_string(),
            })),
        }
    }
}

/// A successfully parsed answer. `result` may still be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryAnswer {
    pub result: Option<String>,
}

impl QueryAnswer {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: Some(result.into()),
        }
    }

    /// The answer text, or `None` if the result is missing or empty.
    ///
    /// Whitespace-only text is still an answer and is shown verbatim.
    pub fn text(&self) -> Option<&str> {
        self.result.as_deref().filter(|text| !text.is_empty())
    }
}
