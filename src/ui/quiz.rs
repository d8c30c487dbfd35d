use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuizQuestion;
use crate::session::{Phase, QuizSession};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let question = session.current_question();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(10),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], session);
    render_question_text(frame, chunks[1], &question.question);
    render_options(frame, chunks[2], question, session.phase(), app.cursor());

    if session.is_revealed() {
        render_explanation(frame, chunks[3], question);
    }

    render_controls(frame, chunks[4], session);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let columns = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let progress = Paragraph::new(format!("Question {}", session.progress_label()))
        .fg(Color::DarkGray);
    let score = Paragraph::new(format!("Score: {}", session.score()))
        .alignment(Alignment::Right)
        .fg(Color::Cyan);

    frame.render_widget(progress, columns[0]);
    frame.render_widget(score, columns[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn option_style(
    index: usize,
    question: &QuizQuestion,
    phase: Phase,
    cursor: usize,
) -> (Style, &'static str) {
    match phase {
        Phase::Revealed { selected } => {
            if question.is_correct(index) {
                (Style::default().fg(Color::Green).bold(), "✓")
            } else if index == selected {
                (Style::default().fg(Color::Red).bold(), "✗")
            } else {
                (Style::default().fg(Color::DarkGray), " ")
            }
        }
        _ if index == cursor => (Style::default().fg(Color::Cyan).bold(), ">"),
        _ => (Style::default().fg(Color::Gray), " "),
    }
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &QuizQuestion,
    phase: Phase,
    cursor: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let (style, marker) = option_style(index, question, phase, cursor);

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_explanation(frame: &mut Frame, area: Rect, question: &QuizQuestion) {
    let widget = Paragraph::new(question.explanation.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::Gray)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Explanation ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let text = if !session.is_revealed() {
        "j/k navigate  ·  1-4 pick  ·  enter select  ·  q quit"
    } else if session.is_last_question() {
        "enter see results  ·  q quit"
    } else {
        "enter next question  ·  q quit"
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
