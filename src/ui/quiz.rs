use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::app::App;
use crate::game::{Playing, State};
use crate::models::Question;

pub fn render<R>(frame: &mut Frame, area: Rect, app: &App<R>, now: Instant) {
    let game = app.game();
    let Some(question) = game.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    let showing_result = game.state() == State::Playing(Playing::Result);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], question);
    render_countdown(frame, chunks[2], game.remaining_fraction(now));
    if showing_result {
        render_verdict(frame, chunks[3], game.session().last_result());
    }
    render_options(
        frame,
        chunks[4],
        question,
        app.selected_option(),
        showing_result.then(|| game.session().last_answer()),
    );
    render_controls(frame, chunks[5], showing_result);
}

fn render_progress<R>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let (number, total) = app.game().progress();
    let progress = format!(
        "{} · {}/{} · score {}",
        app.game().session().difficulty(),
        number,
        total,
        app.game().score()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let widget = Paragraph::new(format!("{question} = ?"))
        .alignment(Alignment::Center)
        .fg(Color::White)
        .bold()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, area);
}

fn render_countdown(frame: &mut Frame, area: Rect, remaining: Option<f64>) {
    let ratio = remaining.unwrap_or(0.0);
    let color = match ratio {
        r if r > 0.5 => Color::Green,
        r if r > 0.2 => Color::Yellow,
        _ => Color::Red,
    };
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .ratio(ratio)
        .label("");
    frame.render_widget(widget, area);
}

fn render_verdict(frame: &mut Frame, area: Rect, last_result: Option<bool>) {
    let (text, color) = match last_result {
        Some(true) => ("Correct!", Color::Green),
        _ => ("Wrong", Color::Red),
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}

/// `answered` is `Some` while the result is shown and holds the given answer.
fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    selected: usize,
    answered: Option<Option<u32>>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options().len() * 2);

    for (index, &option) in question.options().iter().enumerate() {
        let style = match answered {
            Some(_) if question.is_correct(option) => Style::default().fg(Color::Green).bold(),
            Some(Some(given)) if given == option => Style::default().fg(Color::Red).bold(),
            Some(_) => Style::default().fg(Color::DarkGray),
            None if index == selected => Style::default().fg(Color::Cyan).bold(),
            None => Style::default().fg(Color::Gray),
        };
        let marker = if answered.is_none() && index == selected {
            ">"
        } else {
            " "
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(format!("{}. ", index + 1), style),
            Span::styled(option.to_string(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(2)));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, showing_result: bool) {
    let text = if showing_result {
        "any key next  ·  r restart  ·  q quit"
    } else {
        "j/k navigate  ·  enter or 1-9 answer  ·  r restart  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
