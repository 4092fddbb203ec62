use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::Sender;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles take at most this share of the row, in percent.
const BUBBLE_WIDTH_PERCENT: u32 = 70;
/// Bubbles never shrink below this many columns (unless the row is narrower).
const MIN_BUBBLE_WIDTH: u16 = 20;

/// Pulse intensity threshold above which the border transitions from DIM to normal.
const PULSE_NORMAL_THRESHOLD: f32 = 0.3;

/// A stateless component that renders one transcript bubble.
///
/// User bubbles hug the right edge, bot bubbles the left, each taking at
/// most 70% of the row. The pending "Thinking..." bubble is a bot bubble
/// with `is_pending` set, which dims the text and pulses the border.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub sender: Sender,
    pub text: &'a str,
    pub is_pending: bool,
    /// Current pulse intensity (0.0 to 1.0) for the pending animation
    pub pulse_intensity: f32,
}

impl<'a> MessageBubble<'a> {
    pub fn new(sender: Sender, text: &'a str) -> Self {
        Self {
            sender,
            text,
            is_pending: false,
            pulse_intensity: 0.0,
        }
    }

    pub fn pending(text: &'a str, pulse_intensity: f32) -> Self {
        Self {
            sender: Sender::Bot,
            text,
            is_pending: true,
            pulse_intensity,
        }
    }

    /// Width of a bubble in a row `row_width` columns wide.
    pub fn bubble_width(row_width: u16) -> u16 {
        let share = (u32::from(row_width) * BUBBLE_WIDTH_PERCENT / 100) as u16;
        share.max(MIN_BUBBLE_WIDTH).min(row_width)
    }

    /// Predicts the rendered height of `text` in a row `row_width` wide.
    ///
    /// Uses `textwrap` with options matching Ratatui's `Paragraph` wrapping
    /// so the message list can lay out the scroll view before rendering.
    pub fn calculate_height(text: &str, row_width: u16) -> u16 {
        let content_width = Self::bubble_width(row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        // Blank answers still get one content row so the bubble stays open
        let content = text.trim();
        if content.is_empty() {
            return 1 + VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    /// The sub-rect of `area` this bubble occupies.
    pub fn bubble_rect(&self, area: Rect) -> Rect {
        let width = Self::bubble_width(area.width);
        let x = match self.sender {
            Sender::User => area.x + area.width.saturating_sub(width),
            Sender::Bot => area.x,
        };
        Rect::new(x, area.y, width, area.height)
    }
}

pub fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan),
        Sender::Bot => Style::default().fg(Color::White),
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let rect = self.bubble_rect(area);

        let (style, mut border_style) = if self.is_pending {
            let pending = Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC);
            (pending, pending.add_modifier(Modifier::DIM))
        } else {
            let style = sender_style(self.sender);
            (style, style.add_modifier(Modifier::DIM))
        };

        if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
            border_style = border_style.remove_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .title(self.sender.label())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(rect);
        block.render(rect, buf);

        Paragraph::new(self.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for MessageBubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    // ==========================================================================
    // calculate_height tests
    // ==========================================================================

    #[test]
    fn calculate_height_blank_content_keeps_one_row() {
        assert_eq!(MessageBubble::calculate_height("", 80), 1 + VERTICAL_OVERHEAD);
        assert_eq!(MessageBubble::calculate_height("   ", 80), 1 + VERTICAL_OVERHEAD);
        assert_eq!(MessageBubble::calculate_height("  \n\t ", 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        assert_eq!(MessageBubble::calculate_height("Hello world", 0), 1);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        // Bubble is 56 wide at row width 80, "Hello" fits on one line
        assert_eq!(MessageBubble::calculate_height("Hello", 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_wraps_at_bubble_width() {
        // Row 30 → bubble 21 → content 17 columns
        let text = "Christopher Nolan directed Inception";
        assert_eq!(MessageBubble::calculate_height(text, 30), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn bubble_width_respects_share_and_bounds() {
        assert_eq!(MessageBubble::bubble_width(100), 70);
        assert_eq!(MessageBubble::bubble_width(24), MIN_BUBBLE_WIDTH);
        assert_eq!(MessageBubble::bubble_width(10), 10);
    }

    #[test]
    fn user_bubble_hugs_right_edge() {
        let area = Rect::new(0, 0, 100, 3);
        let user = MessageBubble::new(Sender::User, "q").bubble_rect(area);
        let bot = MessageBubble::new(Sender::Bot, "a").bubble_rect(area);
        assert_eq!(user.x + user.width, 100);
        assert_eq!(bot.x, 0);
    }

    #[test]
    fn style_user_and_bot_differ() {
        assert_eq!(sender_style(Sender::User).fg, Some(Color::Cyan));
        assert_eq!(sender_style(Sender::Bot).fg, Some(Color::White));
    }

    #[test]
    fn render_shows_label_and_text() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                let mut bubble = MessageBubble::new(Sender::Bot, "Nolan");
                Component::render(&mut bubble, f, area);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("reel"));
        assert!(text.contains("Nolan"));
    }
}
