use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Generating Quiz...",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            "Crafting ".fg(Color::DarkGray),
            Span::styled(app.difficulty().as_str(), Style::default().fg(Color::Yellow)),
            " questions about ".fg(Color::DarkGray),
            Span::styled(
                format!("\"{}\"", app.subject()),
                Style::default().fg(Color::White).bold(),
            ),
        ]),
        Line::from(""),
        Line::from("esc quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );

    frame.render_widget(widget, chunks[1]);
}
