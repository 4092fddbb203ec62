//! # Application State
//!
//! Core business state for reel. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn QueryBackend>    // where questions go
//! ├── transcript: Transcript            // greeting + every exchange
//! ├── draft: String                     // pending input, not yet sent
//! ├── awaiting_response: bool           // one query in flight
//! ├── last_resolution: Option<...>      // how the last query ended
//! ├── last_error: Option<String>        // detail of the last failure
//! └── status_message: String            // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::transcript::{DEFAULT_GREETING, Transcript};
use crate::query::QueryBackend;

/// How a settled query was folded into the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Server answered with a non-empty result.
    Success,
    /// Server answered, but with nothing to show.
    Empty,
    /// Transport, parse, HTTP or server-reported failure.
    Error,
}

/// Request lifecycle, derived from `awaiting_response`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending,
}

pub struct App {
    pub backend: Arc<dyn QueryBackend>,
    pub transcript: Transcript,
    pub draft: String,
    /// True from dispatch until the bot reply has been appended.
    pub awaiting_response: bool,
    pub last_resolution: Option<Resolution>,
    /// Underlying cause of the most recent failure. Never shown in the transcript.
    pub last_error: Option<String>,
    pub status_message: String,
}

impl App {
    pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
        Self::with_greeting(backend, DEFAULT_GREETING)
    }

    pub fn with_greeting(backend: Arc<dyn QueryBackend>, greeting: &str) -> Self {
        Self {
            backend,
            transcript: Transcript::new(greeting),
            draft: String::new(),
            awaiting_response: false,
            last_resolution: None,
            last_error: None,
            status_message: String::from("Ask about movies, actors, or relationships"),
        }
    }

    pub fn from_config(backend: Arc<dyn QueryBackend>, config: &ResolvedConfig) -> Self {
        Self::with_greeting(backend, &config.greeting)
    }

    pub fn request_state(&self) -> RequestState {
        if self.awaiting_response {
            RequestState::Pending
        } else {
            RequestState::Idle
        }
    }

    /// True once the most recent query has settled as a failure.
    pub fn last_query_failed(&self) -> bool {
        !self.awaiting_response && self.last_resolution == Some(Resolution::Error)
    }
}
