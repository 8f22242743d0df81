//! Login and address form rendering

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::state::FormKind;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the form of the current view
pub fn draw(frame: &mut Frame, area: Rect, app: &App, kind: FormKind) {
    let form = &app.form;
    let busy = app.is_busy();

    let mut constraints = vec![Constraint::Length(2)]; // Subtitle
    constraints.extend(form.fields().iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Submit
    constraints.push(Constraint::Length(1)); // Loading / link
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1)); // Help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(format!(" {} ", kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let subtitle = match kind {
        FormKind::Login => "Help Life",
        FormKind::Address => "Falta pouco!",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            subtitle,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    for (index, field) in form.fields().iter().enumerate() {
        draw_field(
            frame,
            chunks[index + 1],
            field,
            form.active_field() == index,
            busy,
            form.visible_error(&field.name),
        );
    }

    let after_fields = form.fields().len() + 1;
    let button_area = Rect {
        width: chunks[after_fields].width.min(24),
        ..chunks[after_fields]
    };
    render_button(frame, button_area, kind.submit_label(), !busy, !busy);

    let below = if busy {
        Line::from(Span::styled(
            "Enviando...",
            Style::default().fg(Color::Yellow),
        ))
    } else if kind == FormKind::Login {
        Line::from(vec![
            Span::styled("Ctrl+N", Style::default().fg(Color::Cyan)),
            Span::raw(": CRIAR CONTA"),
        ])
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(below), chunks[after_fields + 1]);

    let back_hint = match kind {
        FormKind::Login => "quit",
        FormKind::Address => "back",
    };
    draw_help_text(
        frame,
        chunks[chunks.len() - 1],
        &[("Tab", "next"), ("Enter", "submit"), ("Esc", back_hint)],
    );
}
