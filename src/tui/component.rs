use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props arrive as struct fields (usually borrowed from `App` for one
/// frame). `&mut self` lets the message list refresh its layout cache and
/// scroll offset while rendering.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Persistent UI state that reacts to terminal events on its own,
/// such as the transcript scroll position.
pub trait EventHandler {
    /// What the handler reports back to the event loop, if anything.
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
