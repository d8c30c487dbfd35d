use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::Difficulty;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(15),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZGEN",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Challenge yourself. Master any topic.".fg(Color::DarkGray)),
        Line::from(""),
        subject_line(&app.form.input),
        Line::from(""),
        difficulty_line(app.form.difficulty),
        Line::from(""),
    ];

    match app.error() {
        Some(error) => content.push(Line::from(Span::styled(
            error,
            Style::default().fg(Color::Red),
        ))),
        None => content.push(Line::from("")),
    }

    content.push(Line::from(""));
    content.push(submit_line(app.form.subject().is_some()));
    content.push(Line::from(""));
    content.push(Line::from(
        "tab difficulty  ·  ↑/↓ suggestions  ·  esc quit".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, chunks[1]);
}

fn subject_line(input: &str) -> Line<'_> {
    let mut spans = vec![Span::styled("Subject: ", Style::default().fg(Color::White))];
    if input.is_empty() {
        spans.push(Span::styled(
            "Ex: Quantum Physics, 90s Pop Music...",
            Style::default().fg(Color::DarkGray).italic(),
        ));
    } else {
        spans.push(Span::styled(input, Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    Line::from(spans)
}

fn difficulty_line(selected: Difficulty) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "Difficulty: ",
        Style::default().fg(Color::White),
    )];

    for level in Difficulty::ALL {
        let style = if level == selected {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", level), style));
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}

fn submit_line(enabled: bool) -> Line<'static> {
    let style = if enabled {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled("ENTER", style),
        Span::styled(" generate quiz", Style::default().fg(Color::DarkGray)),
    ])
}
