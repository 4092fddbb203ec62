//! # InputBox Component
//!
//! Renders the pending draft and translates editing keys into core actions.
//!
//! The draft itself lives in `App` (the controller owns the pending input),
//! so this component is transient: it borrows the draft each frame. While a
//! query is pending the box is dimmed, its title turns into a spinner, and
//! `input_action` still forwards keys; the reducer is what rejects them.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::action::{Action, DraftEdit};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// Maximum number of draft lines shown before the box starts scrolling.
pub const MAX_VISIBLE_LINES: u16 = 5;
/// Top + bottom border.
const VERTICAL_OVERHEAD: u16 = 2;
/// Left + right border.
const HORIZONTAL_OVERHEAD: u16 = 2;

const PLACEHOLDER: &str = "Ask about movies, actors, or relationships...";
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Maps a terminal event to the core action it stands for, if any.
pub fn input_action(event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::InputChar(c) => Some(Action::Edit(DraftEdit::Insert(*c))),
        TuiEvent::Paste(text) => Some(Action::Edit(DraftEdit::Paste(text.clone()))),
        TuiEvent::Backspace => Some(Action::Edit(DraftEdit::Backspace)),
        TuiEvent::ClearInput => Some(Action::Edit(DraftEdit::Clear)),
        TuiEvent::Submit => Some(Action::Submit),
        _ => None,
    }
}

/// textwrap options for the box's inner width, matching the message bubbles.
fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(usize::from(width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Display lines of the draft at `width`, including the empty line a
/// trailing newline opens.
pub fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    if lines.is_empty()
        || (text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()))
    {
        lines.push(String::new());
    }
    lines
}

/// Number of wrapped lines for the draft at `width`.
pub fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    wrapped_lines(text, width).len() as u16
}

/// Cursor (row, column) at the end of the draft, relative to the inner area.
///
/// textwrap drops whitespace at the end of a line, so the trailing spaces
/// of the last logical line are added back. Columns are measured in
/// terminal cells.
fn cursor_offset(text: &str, width: u16) -> (u16, u16) {
    let lines = wrapped_lines(text, width);
    let row = lines.len().saturating_sub(1) as u16;

    let logical = text.rsplit('\n').next().unwrap_or("");
    let trailing = &logical[logical.trim_end_matches(' ').len()..];
    let last = lines.last().map(String::as_str).unwrap_or("");
    let col = (last.width() + trailing.width()) as u16;

    (row, col.min(width.saturating_sub(1)))
}

pub struct InputBox<'a> {
    pub draft: &'a str,
    pub disabled: bool,
    pub spinner_frame: usize,
}

impl<'a> InputBox<'a> {
    pub fn new(draft: &'a str, disabled: bool, spinner_frame: usize) -> Self {
        Self {
            draft,
            disabled,
            spinner_frame,
        }
    }

    /// Height for the given draft at `area_width`, clamped to the visible line limit.
    pub fn calculate_height(draft: &str, area_width: u16) -> u16 {
        let content_width = area_width.saturating_sub(HORIZONTAL_OVERHEAD);
        wrap_line_count(draft, content_width).clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> String {
        if self.disabled {
            format!(
                "Waiting for answer {}",
                SPINNER[self.spinner_frame % SPINNER.len()]
            )
        } else {
            String::from("Ask (Enter to send, Esc to quit)")
        }
    }
}

impl<'a> Component for InputBox<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let visible_height = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);

        let base_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(base_style)
            .title(self.title());

        if self.draft.is_empty() {
            let placeholder = Paragraph::new(PLACEHOLDER)
                .block(block)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(placeholder, area);
            if !self.disabled {
                frame.set_cursor_position((area.x + 1, area.y + 1));
            }
            return;
        }

        // Keep the tail of the draft in view
        let lines = wrapped_lines(self.draft, content_width);
        let skip = lines.len().saturating_sub(usize::from(visible_height));
        let visible: Vec<Line> = lines[skip..]
            .iter()
            .map(|l| Line::raw(l.clone()))
            .collect();

        frame.render_widget(Paragraph::new(visible).block(block).style(base_style), area);

        if !self.disabled {
            let (row, col) = cursor_offset(self.draft, content_width);
            let row = row.saturating_sub(skip as u16);
            frame.set_cursor_position((area.x + 1 + col, area.y + 1 + row));
        }
    }
}
