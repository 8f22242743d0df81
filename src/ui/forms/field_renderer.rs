//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus the error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field using FormField from the domain layer.
///
/// `error` is shown on the row under the input; `disabled` greys the field
/// out while a submission is in flight.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    disabled: bool,
    error: Option<&str>,
) {
    let input_area = Rect {
        height: area.height.min(3),
        ..area
    };

    let (style, border_style) = if disabled {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    } else if is_active {
        (Style::default(), Style::default().fg(Color::Cyan))
    } else if error.is_some() {
        (Style::default(), Style::default().fg(Color::Red))
    } else {
        (Style::default(), Style::default().fg(Color::Gray))
    };

    let display_value = field.display_value();
    let cursor = if is_active && !disabled { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.block(block), input_area);

    if let Some(message) = error {
        if area.height > input_area.height {
            let error_area = Rect {
                y: input_area.y + input_area.height,
                height: 1,
                x: area.x + 1,
                width: area.width.saturating_sub(1),
            };
            let error_line =
                Paragraph::new(message.to_string()).style(Style::default().fg(Color::Red));
            frame.render_widget(error_line, error_area);
        }
    }
}

/// Draw help text with key hints
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
