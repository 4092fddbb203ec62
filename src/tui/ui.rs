use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::{App, Resolution};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{InputBox, MessageList, TitleBar};

/// Splits the frame into title, transcript and input areas.
pub fn layout_areas(frame_area: Rect, input_height: u16) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame_area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let input_height = InputBox::calculate_height(&app.draft, frame.area().width);
    let [title_area, main_area, input_area] = layout_areas(frame.area(), input_height);

    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        app.awaiting_response,
        tui.pulse_value,
        spinner_frame,
    )
    .render(frame, main_area);

    let mut title = TitleBar::new(
        app.backend.endpoint(),
        &app.status_message,
        tui.message_list.has_unseen_content(),
    );
    title.is_error = !app.awaiting_response && app.last_resolution == Some(Resolution::Error);
    title.render(frame, title_area);

    InputBox::new(&app.draft, app.awaiting_response, spinner_frame).render(frame, input_area);
}
