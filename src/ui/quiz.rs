use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::data::CatalogStore;
use crate::models::{Answer, Question};
use crate::session::AttemptSession;
use crate::summary::{format_clock, is_running_low, progress_percent};

use super::{controls, option_label};

pub fn render<S: CatalogStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(session) = app.session() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], session);
    render_progress(frame, chunks[1], session);

    match session.current_question() {
        Some(question) => {
            render_question_heading(frame, chunks[2], session, question);
            render_prompt(frame, chunks[3], &question.prompt);
            if question.kind.is_choice() {
                render_options(frame, chunks[4], question, app.selected_option(), session);
            } else {
                render_text_answer(frame, chunks[4], session.answer_for(&question.id));
            }
        }
        None => {
            let widget = Paragraph::new("This quiz has no questions.").fg(Color::DarkGray);
            frame.render_widget(widget, chunks[3]);
        }
    }

    let hint = if app.current_is_choice() {
        "j/k option  ·  enter choose  ·  ←/→ question  ·  ctrl-s submit  ·  esc leave"
    } else {
        "type to answer  ·  ←/→ question  ·  ctrl-s submit  ·  esc leave"
    };
    controls(frame, chunks[5], hint);
}

fn render_header(frame: &mut Frame, area: Rect, session: &AttemptSession) {
    let quiz = session.quiz();
    let [title_area, clock_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(12)]).areas(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(quiz.title.clone(), Style::default().fg(Color::Cyan).bold())),
        Line::from(Span::styled(quiz.description.clone(), Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(title, title_area);

    let remaining = session.remaining();
    let clock_style = if is_running_low(remaining) {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let clock = Paragraph::new(format_clock(remaining))
        .alignment(Alignment::Right)
        .style(clock_style);
    frame.render_widget(clock, clock_area);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &AttemptSession) {
    let total = session.quiz().questions.len();
    let percent = progress_percent(session.current_index(), total);
    let label = format!("{}/{}  ·  {}%", (session.current_index() + 1).min(total), total, percent);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(u16::from(percent))
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_question_heading(
    frame: &mut Frame,
    area: Rect,
    session: &AttemptSession,
    question: &Question,
) {
    let plural = if question.points == 1 { "" } else { "s" };
    let line = Line::from(vec![
        Span::styled(
            format!("Question {}", session.current_index() + 1),
            Style::default().fg(Color::White).bold(),
        ),
        Span::styled(
            format!("  ·  {}  ·  {} point{}", question.kind.label(), question.points, plural),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_prompt(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text.to_string())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    selected: usize,
    session: &AttemptSession,
) {
    let chosen = session.answer_for(&question.id).and_then(Answer::as_choice);
    let options = question.options.as_deref().unwrap_or_default();
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = index == selected;
        let is_chosen = chosen == Some(index);
        let style = match (is_selected, is_chosen) {
            (_, true) => Style::default().fg(Color::Green).bold(),
            (true, false) => Style::default().fg(Color::Cyan).bold(),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if is_selected { ">" } else { " " };
        let check = if is_chosen { "*" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {}{} ", marker, check), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.clone(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_text_answer(frame: &mut Frame, area: Rect, answer: Option<&Answer>) {
    let text = answer.and_then(Answer::as_text).unwrap_or_default();
    let content: Vec<Line> = if text.is_empty() {
        vec![Line::from("Enter your answer here...".fg(Color::DarkGray))]
    } else {
        text.lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Yellow))))
            .collect()
    };

    let widget = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
