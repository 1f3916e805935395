use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::data::CatalogStore;
use crate::models::{Answer, Question};
use crate::scoring::Grade;
use crate::session::AttemptSession;

use super::{controls, grade_color, option_label};

pub fn render<S: CatalogStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(session) = app.session() else {
        return;
    };
    let Some(grade) = session.grade() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], grade);
    render_review(frame, chunks[1], session, grade, app.scroll());
    controls(frame, chunks[2], "j/k scroll  ·  b back to quizzes  ·  q quit");
}

fn render_score_summary(frame: &mut Frame, area: Rect, grade: &Grade) {
    let color = grade_color(grade.score);
    let content = vec![
        Line::from(Span::styled(
            "QUIZ COMPLETED",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", grade.score),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(
            format!("{} out of {} correct", grade.correct_count, grade.total_questions),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled(format!("{} correct", grade.correct_count), Style::default().fg(Color::Green)),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{} incorrect", grade.incorrect_count()), Style::default().fg(Color::Red)),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{} points", grade.earned_points, grade.total_points),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_review(
    frame: &mut Frame,
    area: Rect,
    session: &AttemptSession,
    grade: &Grade,
    scroll: usize,
) {
    let mut lines: Vec<Line> = Vec::new();
    // Line index where each question's block starts, for scrolling by question.
    let mut starts: Vec<usize> = Vec::with_capacity(session.quiz().questions.len());

    for (index, question) in session.quiz().questions.iter().enumerate() {
        starts.push(lines.len());
        let correct = grade.outcome(&question.id).is_some_and(|o| o.correct);
        let (symbol, color) = if correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(format!("{:2}. ", index + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(question.prompt.clone(), Style::default().fg(Color::White)),
        ]));

        let given = session
            .answer_for(&question.id)
            .map(|answer| describe(question, answer))
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| "No answer provided".to_string());
        lines.push(Line::from(vec![
            Span::styled("     Your answer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(given, Style::default().fg(color)),
        ]));

        if !correct {
            if let Some(expected) = question.correct_answer.as_ref() {
                lines.push(Line::from(vec![
                    Span::styled("     Correct answer: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(describe(question, expected), Style::default().fg(Color::Green)),
                ]));
            }
        }

        if let Some(explanation) = &question.explanation {
            lines.push(Line::from(vec![
                Span::styled("     Explanation: ", Style::default().fg(Color::DarkGray)),
                Span::styled(explanation.clone(), Style::default().fg(Color::Gray)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let offset = starts.get(scroll).copied().unwrap_or(0);
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((offset as u16, 0));
    frame.render_widget(widget, area);
}

/// Human-readable form of an answer value for `question`.
fn describe(question: &Question, answer: &Answer) -> String {
    match answer {
        Answer::Choice(index) => match question.option(*index) {
            Some(option) => format!("{}. {}", option_label(*index), option),
            None => format!("option {}", index + 1),
        },
        Answer::Text(text) => text.replace('\n', " ⏎ "),
    }
}
