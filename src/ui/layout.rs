//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout: header, form content, status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the one-line header
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Contact details ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  three short steps", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Submission indicator
    let indicator = if app.state.form.state.is_submitting() {
        Span::styled(" ● ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Green))
    };
    spans.push(indicator);

    spans.push(Span::styled(
        status_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.state.endpoint.as_str(),
        Style::default().fg(Color::Blue),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current focus
fn status_hints(app: &App) -> String {
    if app.state.has_errors() {
        return "Enter/Esc:dismiss".to_string();
    }
    let action = if app.state.form.state.current_step().is_terminal() {
        "submit"
    } else {
        "next"
    };
    let on_select = app
        .state
        .form
        .focused_field()
        .is_some_and(|f| matches!(f.kind(), crate::state::FieldKind::Select(_)));
    if on_select {
        format!("Tab:next field  ◀▶:choose  {SAVE_SHORTCUT}:{action}")
    } else {
        format!("Tab:next field  S-Tab:prev  {SAVE_SHORTCUT}:{action}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout_reserves_header_and_status() {
        let (header, content) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header, Rect::new(0, 0, 80, 1));
        assert_eq!(content, Rect::new(0, 1, 80, 22));
    }
}
