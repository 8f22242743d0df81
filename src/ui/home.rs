//! Home view, shown once a session is established

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the home view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let user = app.session.user().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            "Bem-vindo ao Help Life",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Conectado como {user}")),
        Line::from(""),
        Line::from(vec![
            Span::styled("l", Style::default().fg(Color::Cyan)),
            Span::raw(": sair"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Home ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}
