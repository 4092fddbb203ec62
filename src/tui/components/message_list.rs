//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Display the transcript in order, one bubble per message
//! - Append a "Thinking..." bubble while a query is pending
//! - Keep the view pinned to the bottom unless the user scrolls up
//! - Cache message heights (messages are immutable, so a height never changes
//!   for a given width)
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the transcript (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::{Message, Transcript};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::event::TuiEvent;

/// Braille spinner frames for the pending bubble.
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Total canvas height of the last frame
    pub content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// True if there is content below the current viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub awaiting_response: bool,
    pub pulse_value: f32,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        awaiting_response: bool,
        pulse_value: f32,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            awaiting_response,
            pulse_value,
            spinner_frame,
        }
    }
}

/// Text of the pending bubble for a given animation frame.
pub fn pending_text(spinner_frame: usize) -> String {
    format!("{} Thinking...", SPINNER[spinner_frame % SPINNER.len()])
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let messages = self.transcript.messages();

        // 1. Update layout cache
        self.state.layout.sync(messages, content_width);
        let transcript_height = self.state.layout.total_height();

        let pending = pending_text(self.spinner_frame);
        let pending_height = if self.awaiting_response {
            MessageBubble::calculate_height(&pending, content_width)
        } else {
            0
        };
        let canvas_height = transcript_height.saturating_add(pending_height);

        // 2. Clamp scroll offset to prevent overscrolling past content
        self.state.viewport_height = area.height;
        self.state.content_height = canvas_height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = if self.state.stick_to_bottom {
            self.state.max_offset()
        } else {
            self.state.scroll_state.offset().y
        };
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let message = &messages[i];
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageBubble::new(message.sender(), message.text()), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.awaiting_response {
            let rect = Rect::new(0, transcript_height, content_width, pending_height);
            scroll_view.render_widget(MessageBubble::pending(&pending, self.pulse_value), rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because scrolling needs state
/// that outlives the per-frame `MessageList`.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements.
///
/// The transcript is append-only and messages never change, so cached
/// heights stay valid until the width changes; new messages only extend it.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// Number of cached heights still valid for `message_count` messages at `content_width`.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    /// Brings the cache up to date with `messages`, measuring only what's new.
    pub fn sync(&mut self, messages: &[Message], content_width: u16) {
        let reusable = self.reusable_count(messages.len(), content_width);
        if reusable == self.heights.len() && reusable == messages.len() {
            return;
        }

        self.heights.truncate(reusable);
        for message in &messages[reusable..] {
            self.heights
                .push(MessageBubble::calculate_height(message.text(), content_width));
        }
        self.content_width = content_width;
        self.rebuild_prefix_heights();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Range of message indices overlapping the viewport, plus half a screen of buffer.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Sender;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn transcript_with(n: usize) -> Transcript {
        let mut transcript = Transcript::default();
        for i in 0..n {
            transcript.push(Sender::User, format!("question {i}"));
            transcript.push(Sender::Bot, format!("answer {i}"));
        }
        transcript
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_cache_measures_only_new_messages() {
        let mut transcript = transcript_with(1);
        let mut cache = LayoutCache::new();
        cache.sync(transcript.messages(), 80);
        assert_eq!(cache.heights.len(), 3);
        let first = cache.heights.clone();

        transcript.push(Sender::User, "another".to_string());
        assert_eq!(cache.reusable_count(transcript.len(), 80), 3);
        cache.sync(transcript.messages(), 80);
        assert_eq!(cache.heights.len(), 4);
        assert_eq!(&cache.heights[..3], &first[..]);
        assert_eq!(cache.total_height(), cache.heights.iter().sum::<u16>());
    }

    #[test]
    fn test_layout_cache_invalidated_on_resize() {
        let transcript = transcript_with(2);
        let mut cache = LayoutCache::new();
        cache.sync(transcript.messages(), 80);
        assert_eq!(cache.reusable_count(transcript.len(), 40), 0);

        cache.sync(transcript.messages(), 40);
        assert_eq!(cache.heights.len(), transcript.len());
    }

    #[test]
    fn test_visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 20];
        cache.rebuild_prefix_heights();

        let range = cache.visible_range(0, 10);
        assert_eq!(range.start, 0);
        assert!(range.end >= 4);

        let range = cache.visible_range(30, 10);
        assert!(range.start <= 10 && range.end > 13);
        assert!(range.end <= 20);
    }

    #[test]
    fn test_pending_text_cycles() {
        assert_eq!(pending_text(0), "⠋ Thinking...");
        assert_eq!(pending_text(SPINNER.len()), pending_text(0));
    }

    #[test]
    fn test_scroll_up_unpins_and_end_repins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_render_shows_transcript_and_pending_bubble() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut transcript = Transcript::default();
        transcript.push(Sender::User, "Who directed Inception?".to_string());
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(&mut state, &transcript, true, 1.0, 0).render(f, area);
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Who directed Inception?"));
        assert!(text.contains("Thinking..."));
    }

    #[test]
    fn test_render_without_pending_hides_spinner() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let transcript = transcript_with(1);
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(&mut state, &transcript, false, 0.0, 0).render(f, area);
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("answer 0"));
        assert!(!text.contains("Thinking..."));
    }
}
