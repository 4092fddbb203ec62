use std::fmt;

use async_trait::async_trait;

use super::types::QueryAnswer;

/// Errors that can occur while asking the knowledge base a question.
///
/// Every variant ends up as the same fallback bubble in the transcript; the
/// variants exist so the status bar and the log can say what actually broke.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Request never completed (connection refused, DNS, body read failure).
    Network(String),
    /// Endpoint answered with a non-2xx HTTP status.
    Api { status: u16, message: String },
    /// Body was not JSON or did not have the expected shape.
    Parse(String),
    /// Endpoint parsed the question but reported a failure status.
    Server(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Network(msg) => write!(f, "network error: {msg}"),
            QueryError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            QueryError::Parse(msg) => write!(f, "parse error: {msg}"),
            QueryError::Server(msg) => write!(f, "server error: {msg}"),
        }
    }
}

impl std::error::Error for QueryError {}

#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Human-readable location of the endpoint, shown in the title bar.
    fn endpoint(&self) -> &str;

    /// Sends one question and waits for the single answer. No retries.
    async fn ask(&self, question: &str) -> Result<QueryAnswer, QueryError>;
}
