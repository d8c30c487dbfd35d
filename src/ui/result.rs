use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::{App, Rating};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let score = app.score();
    let total = app.question_count();
    let rating = Rating::for_score(score, total);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], app.subject(), score, total, rating);
    render_question_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn grade_color(percentage: u32) -> Color {
    match percentage {
        100.. => Color::Yellow,
        80..=99 => Color::Green,
        60..=79 => Color::Blue,
        _ => Color::Magenta,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    subject: &str,
    score: usize,
    total: usize,
    rating: Rating,
) {
    let color = grade_color(rating.percentage);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(rating.title, Style::default().fg(color).bold())),
        Line::from(rating.message.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({}%)", score, total, rating.percentage),
            Style::default().fg(color).bold(),
        )),
        Line::from(format!("Subject: {}", subject).fg(Color::Gray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };

    let lines: Vec<Line> = session
        .answers()
        .iter()
        .zip(session.questions().iter())
        .enumerate()
        .map(|(index, (answer, question))| {
            let is_correct = matches!(answer, Some(a) if question.is_correct(*a));
            let (symbol, color) = if is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&question.question),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.result_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r new quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(QUESTION_PREVIEW_LENGTH + 10);
        let truncated = truncate_question(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
    }
}
