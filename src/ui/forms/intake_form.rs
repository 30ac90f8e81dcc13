//! Intake form rendering: one section per step, only the current one expanded

use super::field_renderer::{draw_row, FieldRow};
use crate::app::App;
use crate::state::Step;
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Height of a collapsed section (bordered header only)
const COLLAPSED_HEIGHT: u16 = 3;

/// Height a section needs when expanded
pub fn section_height(step: Step) -> u16 {
    let rows: u16 = FieldRow::for_step(step).iter().map(FieldRow::height).sum();
    rows + BUTTON_HEIGHT + 2 // borders
}

/// Draw all three step sections stacked vertically
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.state.form.state.current_step();

    let mut constraints: Vec<Constraint> = Step::ALL
        .iter()
        .map(|step| {
            if *step == current {
                Constraint::Length(section_height(*step))
            } else {
                Constraint::Length(COLLAPSED_HEIGHT)
            }
        })
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (step, chunk) in Step::ALL.iter().zip(chunks.iter()) {
        draw_section(frame, *chunk, *step, app, *step == current);
    }
}

fn draw_section(frame: &mut Frame, area: Rect, step: Step, app: &App, active: bool) {
    let form = &app.state.form;
    let completed = step.number() < form.state.current_step().number();

    let (title_style, border_color) = if active {
        (
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Color::Cyan,
        )
    } else if completed {
        (Style::default().fg(Color::Green), Color::DarkGray)
    } else {
        (Style::default().fg(Color::DarkGray), Color::DarkGray)
    };

    let marker = if completed { " ✓" } else { "" };
    let block = Block::default()
        .title(format!(" Step {}: {}{} ", step.number(), step.title(), marker))
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !active {
        return;
    }

    let rows = FieldRow::for_step(step);
    let mut constraints: Vec<Constraint> =
        rows.iter().map(|r| Constraint::Length(r.height())).collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let focused = form.focused_field();
    for (row, chunk) in rows.iter().zip(chunks.iter()) {
        draw_row(frame, *chunk, row, &form.state, focused);
    }

    let button_area = Rect {
        width: inner.width.min(16),
        ..chunks[rows.len()]
    };
    let label = if step.is_terminal() {
        if form.state.is_submitting() {
            "Sending..."
        } else {
            "Submit"
        }
    } else {
        "Next >"
    };
    render_action_button(
        frame,
        button_area,
        label,
        form.is_buttons_row_active(),
        !form.state.is_submitting(),
        Some(Color::Green),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_heights() {
        // three 4-line rows + button + borders
        assert_eq!(section_height(Step::One), 17);
        assert_eq!(section_height(Step::Two), 17);
        // comments box + error line + button + borders
        assert_eq!(section_height(Step::Three), 12);
    }
}
