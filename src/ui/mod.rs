mod quiz;
mod result;
mod selection;

use std::time::Instant;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::game::State;

pub fn render<R>(frame: &mut Frame, app: &App<R>, now: Instant) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.game().state() {
        State::Selecting => selection::render(frame, area, app),
        State::Playing(_) => quiz::render(frame, area, app, now),
        State::GameOver => result::render(frame, area, app),
    }
}
