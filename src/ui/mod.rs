//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area);
    forms::draw_intake_form(frame, main_area, app);
    layout::draw_status_bar(frame, app);

    // Error dialog is modal and drawn last
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
