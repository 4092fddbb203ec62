//! # Core Application Logic
//!
//! This module contains reel's business logic: the conversation controller.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Driver   │      │   Tests    │
//!     │  Adapter   │      │  (--ask)   │      │            │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`transcript`]: Messages and the append-only transcript
//! - [`driver`]: Runs a submission to completion without a terminal
//! - [`config`]: `~/.reel/config.toml` loading and resolution

pub mod action;
pub mod config;
pub mod driver;
pub mod state;
pub mod transcript;
