//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::state::App;
use crate::query::{QueryAnswer, QueryBackend, QueryError};

/// A backend that replies with a fixed outcome and records every question.
pub struct ScriptedBackend {
    reply: Result<QueryAnswer, QueryError>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn replying(reply: Result<QueryAnswer, QueryError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            asked: Mutex::new(Vec::new()),
        })
    }

    pub fn questions(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn endpoint(&self) -> &str {
        "scripted://test"
    }

    async fn ask(&self, question: &str) -> Result<QueryAnswer, QueryError> {
        self.asked.lock().unwrap().push(question.to_string());
        self.reply.clone()
    }
}

/// Creates an App around the given backend.
pub fn app_with(backend: Arc<ScriptedBackend>) -> App {
    App::new(backend)
}

/// Creates a test App whose backend answers "ok".
pub fn test_app() -> App {
    app_with(ScriptedBackend::replying(Ok(QueryAnswer::new("ok"))))
}
