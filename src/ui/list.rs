use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::{
    app::state::AppState,
    domain::calendar::{TemperatureRow, build_rows},
    ui::{empty_state, pill_span},
};

/// Below this width the three-column table stops fitting comfortably and
/// the list renders as stacked cards instead.
const CARD_BREAKPOINT: u16 = 64;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = build_rows(&state.days);
    if rows.is_empty() {
        empty_state(frame, area, state.mode);
        return;
    }

    if use_cards(area.width) {
        render_cards(frame, area, &rows);
    } else {
        render_table(frame, area, &rows);
    }
}

fn use_cards(width: u16) -> bool {
    width < CARD_BREAKPOINT
}

fn render_table(frame: &mut Frame, area: Rect, rows: &[TemperatureRow]) {
    let header = Row::new(vec!["Date", "Max", "Min"]).style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows.iter().map(day_row), [
        Constraint::Min(24),
        Constraint::Length(12),
        Constraint::Length(12),
    ])
    .header(header)
    .column_spacing(1)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Daily temperatures"),
    );

    frame.render_widget(table, area);
}

fn render_cards(frame: &mut Frame, area: Rect, rows: &[TemperatureRow]) {
    let paragraph = Paragraph::new(card_lines(rows)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Daily temperatures"),
    );
    frame.render_widget(paragraph, area);
}

/// One card per day: the dated header line, then both pills underneath.
fn card_lines(rows: &[TemperatureRow]) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(rows.len() * 3);
    for row in rows {
        lines.push(date_line(&row.date));
        lines.push(Line::from(vec![
            Span::raw(" "),
            pill_span("Max", row.max),
            Span::raw(" "),
            pill_span("Min", row.min),
        ]));
        lines.push(Line::default());
    }
    lines
}

fn day_row(row: &TemperatureRow) -> Row<'static> {
    Row::new(vec![
        Cell::from(date_line(&row.date)),
        Cell::from(Line::from(pill_span("Max", row.max))),
        Cell::from(Line::from(pill_span("Min", row.min))),
    ])
}

fn date_line(iso_date: &str) -> Line<'static> {
    let weekday = NaiveDate::parse_from_str(iso_date, "%Y-%m-%d")
        .map(|date| date.format("%A").to_string())
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(
            format!("{weekday:<9} "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(iso_date.to_string(), Style::default().fg(Color::DarkGray)),
    ])
}
