//! # Actions
//!
//! Everything that can happen in reel becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The endpoint answers? That's `Action::QuerySettled(result)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing the I/O the
//! caller has to perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Per submitted question the request state moves
//! `Idle → Pending → Resolved(Success | Empty | Error) → Idle`,
//! and the transcript grows by exactly one user and one bot message.

use log::{debug, info, warn};

use crate::core::state::{App, Resolution};
use crate::core::transcript::Sender;
use crate::query::{QueryAnswer, QueryError};

/// Shown in place of any failed query. The cause goes to `App::last_error`.
pub const FALLBACK_TEXT: &str = "Oops! Something went wrong. Please try again.";
/// Shown when the endpoint succeeds but has nothing to say.
pub const NO_RESULTS_TEXT: &str = "No results found.";

/// Edits to the pending input buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    Insert(char),
    Paste(String),
    Backspace,
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Edit(DraftEdit),
    Submit,
    QuerySettled(Result<QueryAnswer, QueryError>),
    Quit,
}

/// Side effects requested by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send exactly one query carrying this question.
    Dispatch(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Edit(edit) => {
            if app.awaiting_response {
                debug!("Ignoring draft edit while awaiting response");
                return Effect::None;
            }
            apply_edit(&mut app.draft, edit);
            Effect::None
        }
        Action::Submit => submit(app),
        Action::QuerySettled(result) => {
            settle(app, result);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn apply_edit(draft: &mut String, edit: DraftEdit) {
    match edit {
        DraftEdit::Insert(c) => draft.push(c),
        DraftEdit::Paste(text) => draft.push_str(&text),
        DraftEdit::Backspace => {
            draft.pop();
        }
        DraftEdit::Clear => draft.clear(),
    }
}

fn submit(app: &mut App) -> Effect {
    if app.awaiting_response {
        warn!("Submit while awaiting response; ignoring");
        return Effect::None;
    }
    if app.draft.trim().is_empty() {
        return Effect::None;
    }

    let question = std::mem::take(&mut app.draft);
    app.transcript.push(Sender::User, question.clone());
    app.awaiting_response = true;
    app.status_message = String::from("Thinking...");
    info!("Question accepted ({} bytes), dispatching query", question.len());

    Effect::Dispatch(question)
}

fn settle(app: &mut App, result: Result<QueryAnswer, QueryError>) {
    if !app.awaiting_response {
        warn!("Query settled with no request pending; dropping {:?}", result);
        return;
    }

    let (resolution, text) = match result {
        Ok(answer) => {
            app.last_error = None;
            match answer.text() {
                Some(text) => (Resolution::Success, text.to_string()),
                None => (Resolution::Empty, NO_RESULTS_TEXT.to_string()),
            }
        }
        Err(e) => {
            warn!("Query failed: {}", e);
            app.last_error = Some(e.to_string());
            (Resolution::Error, FALLBACK_TEXT.to_string())
        }
    };

    app.transcript.push(Sender::Bot, text);
    app.last_resolution = Some(resolution);
    app.status_message = match resolution {
        Resolution::Success => String::from("Ready"),
        Resolution::Empty => String::from("Ready (no results)"),
        Resolution::Error => format!(
            "Last query failed: {}",
            app.last_error.as_deref().unwrap_or("unknown error")
        ),
    };
    debug!("Query resolved as {:?}", resolution);

    app.awaiting_response = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::RequestState;
    use crate::core::transcript::Message;
    use crate::test_support::test_app;

    fn texts(app: &App) -> Vec<(Sender, String)> {
        app.transcript
            .messages()
            .iter()
            .map(|m: &Message| (m.sender(), m.text().to_string()))
            .collect()
    }

    fn type_draft(app: &mut App, text: &str) {
        update(app, Action::Edit(DraftEdit::Paste(text.to_string())));
    }

    #[test]
    fn test_empty_and_whitespace_drafts_are_noops() {
        for draft in ["", " ", "\t", "\n  \n", "   \t "] {
            let mut app = test_app();
            app.draft = draft.to_string();
            let effect = update(&mut app, Action::Submit);
            assert_eq!(effect, Effect::None);
            assert_eq!(app.transcript.len(), 1);
            assert_eq!(app.draft, draft, "draft must be left untouched");
            assert!(!app.awaiting_response);
        }
    }

    #[test]
    fn test_submit_appends_user_message_and_dispatches() {
        let mut app = test_app();
        type_draft(&mut app, "Who directed Inception?");

        let effect = update(&mut app, Action::Submit);

        assert_eq!(effect, Effect::Dispatch("Who directed Inception?".to_string()));
        assert_eq!(app.transcript.len(), 2);
        let last = app.transcript.last().unwrap();
        assert_eq!(last.sender(), Sender::User);
        assert_eq!(last.text(), "Who directed Inception?");
        assert!(app.draft.is_empty());
        assert!(app.awaiting_response);
        assert_eq!(app.request_state(), RequestState::Pending);
    }

    #[test]
    fn test_submit_preserves_untrimmed_text() {
        let mut app = test_app();
        type_draft(&mut app, "  who is  ");
        let effect = update(&mut app, Action::Submit);
        assert_eq!(effect, Effect::Dispatch("  who is  ".to_string()));
        assert_eq!(app.transcript.last().unwrap().text(), "  who is  ");
    }

    #[test]
    fn test_submit_unreachable_while_pending() {
        let mut app = test_app();
        type_draft(&mut app, "first");
        update(&mut app, Action::Submit);

        // Edits are rejected while pending, so force a draft in directly.
        app.draft = "second".to_string();
        let effect = update(&mut app, Action::Submit);

        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.draft, "second");
        assert!(app.awaiting_response);
    }

    #[test]
    fn test_edits_ignored_while_pending() {
        let mut app = test_app();
        type_draft(&mut app, "q");
        update(&mut app, Action::Submit);
        update(&mut app, Action::Edit(DraftEdit::Insert('x')));
        assert!(app.draft.is_empty());
    }

    #[test]
    fn test_success_appends_answer() {
        let mut app = test_app();
        type_draft(&mut app, "Who directed Inception?");
        update(&mut app, Action::Submit);

        let effect = update(
            &mut app,
            Action::QuerySettled(Ok(QueryAnswer::new("Christopher Nolan"))),
        );

        assert_eq!(effect, Effect::None);
        let transcript = texts(&app);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].0, Sender::Bot);
        assert_eq!(transcript[1], (Sender::User, "Who directed Inception?".to_string()));
        assert_eq!(transcript[2], (Sender::Bot, "Christopher Nolan".to_string()));
        assert!(!app.awaiting_response);
        assert_eq!(app.last_resolution, Some(Resolution::Success));
    }

    #[test]
    fn test_empty_result_uses_placeholder() {
        let mut app = test_app();
        type_draft(&mut app, "Who directed Inception?");
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::QuerySettled(Ok(QueryAnswer {
                result: Some(String::new()),
            })),
        );

        assert_eq!(app.transcript.last().unwrap().text(), NO_RESULTS_TEXT);
        assert_eq!(app.last_resolution, Some(Resolution::Empty));
        assert!(!app.awaiting_response);
    }

    #[test]
    fn test_whitespace_result_is_appended_verbatim() {
        let mut app = test_app();
        type_draft(&mut app, "q");
        update(&mut app, Action::Submit);
        update(&mut app, Action::QuerySettled(Ok(QueryAnswer::new("   "))));

        assert_eq!(app.transcript.last().unwrap().text(), "   ");
        assert_eq!(app.last_resolution, Some(Resolution::Success));
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut app = test_app();
        type_draft(&mut app, "one");
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::QuerySettled(Err(QueryError::Server("db down".to_string()))),
        );
        assert!(app.last_error.is_some());

        type_draft(&mut app, "two");
        update(&mut app, Action::Submit);
        update(&mut app, Action::QuerySettled(Ok(QueryAnswer::default())));

        assert!(app.last_error.is_none());
        assert_eq!(app.status_message, "Ready (no results)");
    }

    #[test]
    fn test_missing_result_uses_placeholder() {
        let mut app = test_app();
        type_draft(&mut app, "q");
        update(&mut app, Action::Submit);
        update(&mut app, Action::QuerySettled(Ok(QueryAnswer::default())));
        assert_eq!(app.transcript.last().unwrap().text(), NO_RESULTS_TEXT);
    }

    #[test]
    fn test_server_error_uses_fallback_and_keeps_detail() {
        let mut app = test_app();
        type_draft(&mut app, "Who directed Inception?");
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::QuerySettled(Err(QueryError::Server("db down".to_string()))),
        );

        let last = app.transcript.last().unwrap();
        assert_eq!(last.sender(), Sender::Bot);
        assert_eq!(last.text(), FALLBACK_TEXT);
        assert!(!last.text().contains("db down"));
        assert_eq!(app.last_error.as_deref(), Some("server error: db down"));
        assert!(app.status_message.contains("db down"));
        assert_eq!(app.last_resolution, Some(Resolution::Error));
        assert!(!app.awaiting_response);
    }

    #[test]
    fn test_network_error_uses_fallback() {
        let mut app = test_app();
        type_draft(&mut app, "Who directed Inception?");
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::QuerySettled(Err(QueryError::Network("connection refused".to_string()))),
        );
        assert_eq!(app.transcript.last().unwrap().text(), FALLBACK_TEXT);
        assert_eq!(app.transcript.len(), 3);
    }

    #[test]
    fn test_stray_settle_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::QuerySettled(Ok(QueryAnswer::new("late"))));
        assert_eq!(app.transcript.len(), 1);
        assert_eq!(app.last_resolution, None);
    }

    #[test]
    fn test_transcript_grows_by_two_per_exchange() {
        let mut app = test_app();
        let outcomes = vec![
            Ok(QueryAnswer::new("a")),
            Ok(QueryAnswer::default()),
            Err(QueryError::Parse("bad".to_string())),
            Ok(QueryAnswer::new("b")),
        ];

        for (i, outcome) in outcomes.into_iter().enumerate() {
            let before = app.transcript.len();
            type_draft(&mut app, &format!("question {i}"));
            assert!(matches!(update(&mut app, Action::Submit), Effect::Dispatch(_)));
            assert!(app.awaiting_response);
            assert_eq!(app.transcript.len(), before + 1);

            update(&mut app, Action::QuerySettled(outcome));
            assert!(!app.awaiting_response);
            assert_eq!(app.transcript.len(), before + 2);
        }

        // Bubbles alternate user/bot after the greeting.
        for (i, message) in app.transcript.messages().iter().enumerate().skip(1) {
            let expected = if i % 2 == 1 { Sender::User } else { Sender::Bot };
            assert_eq!(message.sender(), expected);
        }
    }

    #[test]
    fn test_failure_is_not_fatal() {
        let mut app = test_app();
        type_draft(&mut app, "one");
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::QuerySettled(Err(QueryError::Network("down".to_string()))),
        );

        type_draft(&mut app, "two");
        assert_eq!(update(&mut app, Action::Submit), Effect::Dispatch("two".to_string()));
    }

    #[test]
    fn test_draft_edits() {
        let mut app = test_app();
        update(&mut app, Action::Edit(DraftEdit::Insert('h')));
        update(&mut app, Action::Edit(DraftEdit::Paste("ello".to_string())));
        assert_eq!(app.draft, "hello");
        update(&mut app, Action::Edit(DraftEdit::Backspace));
        assert_eq!(app.draft, "hell");
        update(&mut app, Action::Edit(DraftEdit::Clear));
        assert!(app.draft.is_empty());
        // Backspace on empty is harmless.
        update(&mut app, Action::Edit(DraftEdit::Backspace));
        assert!(app.draft.is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
