mod loading;
mod quiz;
mod result;
mod setup;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Setup => setup::render(frame, area, app),
        AppState::Loading => loading::render(frame, area, app),
        AppState::Quiz => quiz::render(frame, area, app),
        AppState::Results => result::render(frame, area, app),
    }
}
