//! # Driver
//!
//! Runs the request/response cycle without a terminal: applies an action,
//! carries out the `Effect::Dispatch` it asks for, and feeds the outcome
//! back through `update`. Used by `--ask` and by tests.

use log::debug;

use crate::core::action::{Action, DraftEdit, Effect, update};
use crate::core::state::App;
use crate::core::transcript::{Message, Sender};

/// Submits the current draft and waits for the reply.
///
/// Returns the bot message appended for this question, or `None` if the
/// submission was rejected (blank draft, or a query already pending).
pub async fn submit_and_wait(app: &mut App) -> Option<Message> {
    let Effect::Dispatch(question) = update(app, Action::Submit) else {
        return None;
    };

    let backend = app.backend.clone();
    debug!("Driver dispatching to backend '{}'", backend.name());
    let result = backend.ask(&question).await;
    update(app, Action::QuerySettled(result));

    app.transcript
        .last()
        .filter(|m| m.sender() == Sender::Bot)
        .cloned()
}

/// Replaces the draft with `question`, then submits it.
pub async fn ask(app: &mut App, question: &str) -> Option<Message> {
    update(app, Action::Edit(DraftEdit::Clear));
    update(app, Action::Edit(DraftEdit::Paste(question.to_string())));
    submit_and_wait(app).await
}
