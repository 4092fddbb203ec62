//! # TitleBar Component
//!
//! Single-line status bar at the top of the screen.
//!
//! The title text changes based on state:
//!
//! 1. **Unseen content**: `"reel (http://localhost:5000/api/query) | Ready | ↓ New"`
//! 2. **Status message**: `"reel (http://localhost:5000/api/query) | Ready"`
//! 3. **Default**: `"reel (http://localhost:5000/api/query)"`
//!
//! Failure details from the last query show up here as the status message,
//! since the transcript only ever carries the generic fallback text.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub endpoint: &'a str,
    pub status_message: &'a str,
    pub has_unseen_content: bool,
    /// Renders the status in red (last query failed)
    pub is_error: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(endpoint: &'a str, status_message: &'a str, has_unseen_content: bool) -> Self {
        Self {
            endpoint,
            status_message,
            has_unseen_content,
            is_error: false,
        }
    }

    pub fn text(&self) -> String {
        let base = format!("reel ({})", self.endpoint);
        match (self.status_message.is_empty(), self.has_unseen_content) {
            (true, false) => base,
            (true, true) => format!("{base} | ↓ New"),
            (false, false) => format!("{base} | {}", self.status_message),
            (false, true) => format!("{base} | {} | ↓ New", self.status_message),
        }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}
