use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Difficulty, SELECTABLE_OPERANDS};

const CONTROLS: &str = "tab difficulty  ·  2-9 or h/l + space pick  ·  enter start  ·  q quit";

pub fn render<R>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let settings = app.game().config().tier(app.difficulty());

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TIMES TABLES",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Difficulty".fg(Color::DarkGray)),
        difficulty_line(app.difficulty()),
        Line::from(""),
        Line::from(
            format!("Pick at least {} numbers to multiply", settings.min_operands)
                .fg(Color::DarkGray),
        ),
        operand_line(app),
        Line::from(""),
        Line::from(
            format!(
                "{} questions · {} choices · {}s each",
                settings.question_count,
                settings.option_count,
                settings.deadline_ms as f64 / 1000.0
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
    ];

    content.push(match app.notice() {
        Some(notice) => Line::from(Span::styled(
            notice,
            Style::default().fg(Color::Red).bold(),
        )),
        None => Line::from(Span::styled(
            "ENTER to start",
            Style::default().fg(Color::Green).bold(),
        )),
    });

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, chunks[1]);

    let controls = Paragraph::new(CONTROLS)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);
}

fn difficulty_line(current: Difficulty) -> Line<'static> {
    let spans: Vec<Span> = Difficulty::ALL
        .into_iter()
        .map(|difficulty| {
            let label = format!(" {} ", difficulty.tier());
            if difficulty == current {
                Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan).bold())
            } else {
                Span::styled(label, Style::default().fg(Color::Gray))
            }
        })
        .flat_map(|span| [span, Span::raw(" ")])
        .collect();
    Line::from(spans)
}

fn operand_line<R>(app: &App<R>) -> Line<'static> {
    let spans: Vec<Span> = SELECTABLE_OPERANDS
        .enumerate()
        .map(|(index, operand)| {
            let picked = app.picked().contains(&operand);
            let mut style = if picked {
                Style::default().fg(Color::Black).bg(Color::Green).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            if index == app.cursor() {
                style = style.underlined();
            }
            Span::styled(format!(" {operand} "), style)
        })
        .flat_map(|span| [span, Span::raw(" ")])
        .collect();
    Line::from(spans)
}
