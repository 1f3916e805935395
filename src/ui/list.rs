use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::data::CatalogStore;
use crate::models::{Difficulty, Quiz};
use crate::summary::{attempts_for, first_result_for};

use super::{controls, grade_color};

pub fn render<S: CatalogStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_stats(frame, chunks[0], app);

    if app.quizzes().is_empty() {
        render_empty(frame, chunks[1]);
    } else {
        render_quizzes(frame, chunks[1], app);
    }

    controls(frame, chunks[2], "j/k move  ·  enter start  ·  h history  ·  q quit");
}

fn render_stats<S: CatalogStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let stats = app.stats();
    let content = vec![
        Line::from(Span::styled(
            "AVAILABLE QUIZZES",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} completed", stats.completed), Style::default().fg(Color::Green)),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}% average", stats.average_score),
                Style::default().fg(grade_color(stats.average_score)),
            ),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{} remaining", stats.remaining), Style::default().fg(Color::Gray)),
        ]),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from("No quizzes available".bold()),
        Line::from(""),
        Line::from("Import one with `quizdesk import FILE` or `quizdesk seed`.".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

fn render_quizzes<S: CatalogStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let mut lines: Vec<Line> = Vec::with_capacity(app.quizzes().len() * 3);

    for (index, quiz) in app.quizzes().iter().enumerate() {
        let is_selected = index == app.selected_quiz();
        let title_style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if is_selected { ">" } else { " " };

        let mut title = vec![
            Span::styled(format!(" {} ", marker), title_style),
            Span::styled(quiz.title.clone(), title_style),
        ];
        if quiz.adaptive_mode {
            title.push(Span::styled("  adaptive", Style::default().fg(Color::Magenta)));
        }
        if let Some(result) = first_result_for(app.results(), &quiz.id) {
            title.push(Span::styled(
                format!("  {}% ({}/{})", result.score, result.correct_count, result.total_questions),
                Style::default().fg(grade_color(result.score)).bold(),
            ));
        }
        lines.push(Line::from(title));
        lines.push(details_line(quiz, attempts_for(app.results(), &quiz.id)));
        lines.push(Line::from(""));
    }

    // Keep the highlighted quiz on screen.
    let visible = usize::from(area.height.max(3)) / 3;
    let offset = app.selected_quiz().saturating_sub(visible.saturating_sub(1)) * 3;

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((offset as u16, 0));
    frame.render_widget(widget, area);
}

fn details_line(quiz: &Quiz, attempts: usize) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(format!("     {} min", quiz.time_limit), dim),
        Span::styled(format!("  ·  {} questions", quiz.questions.len()), dim),
        Span::styled(format!("  ·  {} points", quiz.total_points()), dim),
    ];
    if let Some(difficulty) = quiz.average_difficulty() {
        spans.push(Span::styled("  ·  ", dim));
        spans.push(Span::styled(
            difficulty.as_str(),
            Style::default().fg(difficulty_color(difficulty)),
        ));
    }
    if attempts > 1 {
        spans.push(Span::styled(format!("  ·  {} attempts", attempts), dim));
    }
    Line::from(spans)
}
