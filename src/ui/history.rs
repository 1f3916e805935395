use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::data::CatalogStore;

use super::{controls, grade_color};

const TITLE_WIDTH: usize = 36;

pub fn render<S: CatalogStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let stats = app.stats();
    let header = Paragraph::new(vec![
        Line::from(Span::styled("ATTEMPT HISTORY", Style::default().fg(Color::Cyan).bold())),
        Line::from(Span::styled(
            format!("{} attempts  ·  {}% average", app.results().len(), stats.average_score),
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM).border_style(Color::DarkGray));
    frame.render_widget(header, chunks[0]);

    let lines: Vec<Line> = if app.results().is_empty() {
        vec![Line::from("No attempts yet.".fg(Color::DarkGray))]
    } else {
        app.results()
            .iter()
            .enumerate()
            .map(|(index, result)| {
                Line::from(vec![
                    Span::styled(format!("{:3}. ", index + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{:<width$}", truncate(&result.quiz_title), width = TITLE_WIDTH),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("{:>4}%", result.score),
                        Style::default().fg(grade_color(result.score)).bold(),
                    ),
                    Span::styled(
                        format!(
                            "  {}/{}  ·  {}",
                            result.correct_count,
                            result.total_questions,
                            result.completed_at.format("%Y-%m-%d %H:%M")
                        ),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.scroll() as u16, 0));
    frame.render_widget(widget, chunks[1]);

    controls(frame, chunks[2], "j/k scroll  ·  b back  ·  q quit");
}

fn truncate(text: &str) -> String {
    if text.chars().count() > TITLE_WIDTH {
        let cut: String = text.chars().take(TITLE_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_titles() {
        assert_eq!(truncate("Short"), "Short");
        let long = "x".repeat(50);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), TITLE_WIDTH);
        assert!(cut.ends_with("..."));
    }
}
