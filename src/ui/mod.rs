mod history;
mod list;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, AppState};
use crate::data::CatalogStore;

/// Letter shown next to option `index`.
fn option_label(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

fn grade_color(score: u8) -> Color {
    match score {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = ratatui::widgets::Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

pub fn render<S: CatalogStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::QuizList => list::render(frame, area, app),
        AppState::Taking => quiz::render(frame, area, app),
        AppState::Results => result::render(frame, area, app),
        AppState::History => history::render(frame, area, app),
    }
}
