use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::app::App;
use crate::game::Record;

pub fn render<R>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let game = app.game();
    let score = game.score();
    let total = game.session().questions().len();
    let percentage = calculate_percentage(score, total);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(
        frame,
        chunks[1],
        score,
        total,
        percentage,
        game.elapsed().as_secs_f64(),
    );
    render_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    score: usize,
    total: usize,
    percentage: f64,
    seconds: f64,
) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{score} / {total}  ({percentage:.0}%)"),
            Style::default().fg(get_grade_color(percentage)).bold(),
        )),
        Line::from(format!("Total time: {seconds:.2} s").fg(Color::Gray)),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_breakdown<R>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let header = Row::new(["", "Question", "Your answer", "Correct", "Result"])
        .style(Style::default().fg(Color::DarkGray));

    let rows: Vec<Row> = app
        .game()
        .session()
        .records()
        .enumerate()
        .skip(app.results_scroll())
        .map(|(index, record)| record_row(index, &record))
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Fill(1),
    ];

    let widget = Table::new(rows, widths)
        .header(header)
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn record_row(index: usize, record: &Record<'_>) -> Row<'static> {
    let (verdict, color) = if record.correct {
        ("Correct", Color::Green)
    } else {
        ("Wrong", Color::Red)
    };
    let answer = record
        .answer
        .map_or_else(|| "timeout".to_string(), |answer| answer.to_string());

    Row::new(vec![
        Cell::from(format!("{:2}.", index + 1)).fg(Color::DarkGray),
        Cell::from(record.question.to_string()).fg(Color::Gray),
        Cell::from(answer).fg(color),
        Cell::from(record.question.correct_answer().to_string()).fg(Color::Gray),
        Cell::from(verdict).fg(color),
    ])
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r play again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
