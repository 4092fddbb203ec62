//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each iteration draws (if needed), polls the terminal, applies the
//! resulting actions through `update`, then drains actions coming back
//! from the background query task. The query task is the only suspension
//! point; it sends exactly one `Action::QuerySettled` when it finishes.
//!
//! - **Pending** (query in flight): draws every ~80ms to animate the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

mod component;
pub mod components;
mod event;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::query::QueryBackend;
use crate::tui::component::EventHandler;
use crate::tui::components::{MessageListState, input_action};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    // Animation state
    pub pulse_value: f32,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            pulse_value: 0.0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Routes one terminal event. Returns true if the app should quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let action = match event {
        TuiEvent::Resize => return false,
        TuiEvent::Quit | TuiEvent::ForceQuit => Action::Quit,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            return false;
        }
        other => match input_action(&other) {
            Some(action) => action,
            None => return false,
        },
    };

    // Sending a question re-pins the view so the reply is visible
    if action == Action::Submit {
        tui.message_list.stick_to_bottom = true;
    }

    apply(app, action, tx)
}

/// Applies an action and carries out its effect. Returns true on quit.
fn apply(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Dispatch(question) => {
            spawn_query(app.backend.clone(), question, tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

pub fn run(backend: Arc<dyn QueryBackend>, config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from the background query task
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.awaiting_response;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle actions from the background query task
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, action, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

fn spawn_query(backend: Arc<dyn QueryBackend>, question: String, tx: mpsc::Sender<Action>) {
    info!("Spawning query via backend '{}'", backend.name());

    tokio::spawn(async move {
        let request_start = std::time::Instant::now();
        let result = backend.ask(&question).await;
        debug!(
            "Query settled in {}ms (ok={})",
            request_start.elapsed().as_millis(),
            result.is_ok()
        );

        if tx.send(Action::QuerySettled(result)).is_err() {
            warn!("Failed to send query result: receiver dropped");
        }
    });
}
