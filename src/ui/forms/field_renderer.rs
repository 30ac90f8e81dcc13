//! Field rendering utilities for forms

use crate::state::{FieldId, FieldKind, FormState, Step};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Height of a bordered single-line input
const INPUT_HEIGHT: u16 = 3;
/// Height of the bordered comments box
const TEXT_AREA_HEIGHT: u16 = 6;
/// Line reserved under every row for its error message
const ERROR_HEIGHT: u16 = 1;

/// One visual row of a step: a single input, or the split date inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRow {
    Single(FieldId),
    DateGroup(Vec<FieldId>),
}

impl FieldRow {
    /// Rows for the editable fields of `step`, date parts grouped together
    pub fn for_step(step: Step) -> Vec<FieldRow> {
        let mut rows: Vec<FieldRow> = Vec::new();
        for field in step.editable_fields() {
            if field.kind() == FieldKind::Date {
                if let Some(FieldRow::DateGroup(parts)) = rows.last_mut() {
                    parts.push(field);
                    continue;
                }
                rows.push(FieldRow::DateGroup(vec![field]));
            } else {
                rows.push(FieldRow::Single(field));
            }
        }
        rows
    }

    pub fn height(&self) -> u16 {
        let input = match self {
            FieldRow::Single(field) if field.kind() == FieldKind::TextArea => TEXT_AREA_HEIGHT,
            _ => INPUT_HEIGHT,
        };
        input + ERROR_HEIGHT
    }

    /// First error to show for the row, if any of its fields is touched
    pub fn visible_error(&self, form: &FormState) -> Option<&'static str> {
        match self {
            FieldRow::Single(field) => form.visible_error(*field),
            FieldRow::DateGroup(parts) => parts.iter().find_map(|f| form.visible_error(*f)),
        }
    }
}

/// Draw one row and its error line
pub fn draw_row(
    frame: &mut Frame,
    area: Rect,
    row: &FieldRow,
    form: &FormState,
    focused: Option<FieldId>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(ERROR_HEIGHT)])
        .split(area);

    match row {
        FieldRow::Single(field) => {
            draw_field(frame, chunks[0], *field, form, focused == Some(*field));
        }
        FieldRow::DateGroup(parts) => draw_date_group(frame, chunks[0], parts, form, focused),
    }

    if let Some(message) = row.visible_error(form) {
        let error = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, chunks[1]);
    }
}

/// Draw a form field, dispatching on its kind
pub fn draw_field(frame: &mut Frame, area: Rect, field: FieldId, form: &FormState, is_active: bool) {
    let value = form.value(field);
    let invalid = form.visible_error(field).is_some();
    let title = format!(" {} ", field.label());

    match field.kind() {
        FieldKind::Text => draw_input(frame, area, &title, value, is_active, invalid, false),
        FieldKind::TextArea => draw_input(frame, area, &title, value, is_active, invalid, true),
        FieldKind::Date => draw_input(frame, area, &title, value, is_active, invalid, false),
        FieldKind::Select(options) => {
            draw_select(frame, area, &title, options, value, is_active, invalid)
        }
        FieldKind::Hidden => {}
    }
}

/// Draw the day/month/year inputs side by side after one label
fn draw_date_group(
    frame: &mut Frame,
    area: Rect,
    parts: &[FieldId],
    form: &FormState,
    focused: Option<FieldId>,
) {
    let group_active = focused.is_some_and(|f| parts.contains(&f));
    let label = FieldId::Dob.label();

    let mut constraints = vec![Constraint::Length(label.len() as u16 + 2)];
    constraints.extend(
        parts
            .iter()
            .map(|f| Constraint::Length(f.max_len().unwrap_or(4) as u16 + 6)),
    );
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let label_style = if group_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let label_area = Rect {
        y: chunks[0].y + 1,
        height: 1,
        ..chunks[0]
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {label}"), label_style)),
        label_area,
    );

    for (part, chunk) in parts.iter().zip(chunks.iter().skip(1)) {
        draw_field(frame, *chunk, *part, form, focused == Some(*part));
    }
}

fn border_style(is_active: bool, invalid: bool) -> Style {
    if invalid {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_active: bool,
    invalid: bool,
    is_multiline: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style(is_active, invalid));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn draw_select(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    options: &[&str],
    value: &str,
    is_active: bool,
    invalid: bool,
) {
    let position = options.iter().position(|o| *o == value).unwrap_or(0);
    let value_style = if position == 0 {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(value.to_string(), value_style),
        Span::styled(" ▶", arrow_style),
        Span::styled(
            format!("  ({}/{})", position + 1, options.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style(is_active, invalid));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
