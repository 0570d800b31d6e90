use std::fmt;

use chrono::TimeZone;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::app::App;

pub fn ui<Tz: TimeZone>(f: &mut Frame, app: &mut App<Tz>)
where
    Tz::Offset: fmt::Display,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3)  // Help
        ].as_ref())
        .split(f.area());

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|r| {
            let style = if r.is_alert() {
                Style::default().fg(Color::Red)
            } else if r.is_due_soon() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            };

            Row::new(vec![
                Cell::from(r.id.clone()),
                Cell::from(r.title.clone()),
                Cell::from(r.status),
                Cell::from(if r.deadline.is_empty() { "-".to_string() } else { r.deadline.clone() }),
                Cell::from(r.remaining_label()),
            ]).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(18),
        Constraint::Length(20),
    ];

    let now_local = app.now.with_timezone(app.formatter.timezone()).format("%Y-%m-%d %H:%M");
    let title = format!("todolimit - {} (as of {})", app.filter.label(), now_local);

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["ID", "Title", "Status", "Deadline", "Remaining"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let (help_text, help_style) = match &app.error {
        Some(err) => (format!("reload failed: {err}"), Style::default().fg(Color::Red)),
        None => (
            "q: Quit | j/k: Move | d: Toggle Done | r: Reload".to_string(),
            Style::default().fg(Color::Gray),
        ),
    };

    let help = Paragraph::new(help_text)
        .style(help_style)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);
}
