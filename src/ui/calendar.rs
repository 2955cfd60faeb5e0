use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    app::state::AppState,
    domain::{
        bands::DEFAULT_BANDS,
        calendar::{Day, build_month_grid, group_by_month},
        temperature::format_temp,
    },
    ui::{empty_state, pill_span, to_color},
};

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Wide cells carry the rounded max and min readings next to the day
/// number; compact cells fall back to the two-tone band swatch.
const FULL_CELL_WIDTH: usize = 11;
const COMPACT_CELL_WIDTH: usize = 6;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.days.is_empty() {
        empty_state(frame, area, state.mode);
        return;
    }

    let cell_width = cell_width_for(area.width);
    let selected = state
        .selected_day
        .and_then(|idx| state.days.get(idx))
        .map(|day| day.iso_date.as_str());

    let mut lines: Vec<Line> = Vec::new();
    for group in group_by_month(&state.days) {
        let Some((year, month)) = parse_month_key(&group.month_key) else {
            continue;
        };

        lines.push(Line::from(Span::styled(
            month_heading(year, month, &group.month_key),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(weekday_header(cell_width));

        let grid = build_month_grid(year, month, &group.days);
        for week in grid.chunks(7) {
            lines.push(week_line(week, selected, cell_width));
        }
        lines.push(Line::default());
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Calendar"));
    frame.render_widget(paragraph, area);
}

/// Pop-over for the selected day: the swatch plus full-size pills that the
/// compact cells have no room for.
pub fn render_day_detail(frame: &mut Frame, area: Rect, day: &Day) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(day.date.format("%A %-d %B %Y").to_string());

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(detail_lines(day)).block(block), area);
}

fn detail_lines(day: &Day) -> Vec<Line<'static>> {
    let hi = DEFAULT_BANDS.colors_for(day.max_c.map_or(f64::NAN, f64::from));
    let lo = DEFAULT_BANDS.colors_for(day.min_c.map_or(f64::NAN, f64::from));

    vec![
        Line::default(),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                "\u{2580}".repeat(8),
                Style::default().fg(to_color(hi.bg)).bg(to_color(lo.bg)),
            ),
        ]),
        Line::default(),
        Line::from(vec![
            Span::raw("  "),
            pill_span("H", day.max_c),
            Span::raw(" "),
            pill_span("L", day.min_c),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "  Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn cell_width_for(width: u16) -> usize {
    // Seven full cells plus the surrounding border.
    if usize::from(width) >= FULL_CELL_WIDTH * 7 + 2 {
        FULL_CELL_WIDTH
    } else {
        COMPACT_CELL_WIDTH
    }
}

fn parse_month_key(month_key: &str) -> Option<(i32, u32)> {
    let (year, month) = month_key.split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}

fn month_heading(year: i32, month: u32, month_key: &str) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map_or_else(|| month_key.to_string(), |d| d.format("%B %Y").to_string())
}

fn weekday_header(cell_width: usize) -> Line<'static> {
    let labels = WEEKDAY_LABELS
        .iter()
        .map(|label| format!("{label:<cell_width$}"))
        .collect::<String>();
    Line::from(Span::styled(labels, Style::default().fg(Color::Gray)))
}

fn week_line(week: &[Option<Day>], selected: Option<&str>, cell_width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for cell in week {
        match cell {
            Some(day) => {
                let number_style = if selected == Some(day.iso_date.as_str()) {
                    Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(
                    format!("{:>2}", day.day_of_month),
                    number_style,
                ));
                spans.push(Span::raw(" "));

                let hi = DEFAULT_BANDS.colors_for(day.max_c.map_or(f64::NAN, f64::from));
                let lo = DEFAULT_BANDS.colors_for(day.min_c.map_or(f64::NAN, f64::from));
                if cell_width == FULL_CELL_WIDTH {
                    spans.push(Span::styled(
                        format!("{:>3}\u{b0}", format_temp(day.max_c)),
                        Style::default().fg(to_color(hi.fg)).bg(to_color(hi.bg)),
                    ));
                    spans.push(Span::styled(
                        format!("{:>3}\u{b0}", format_temp(day.min_c)),
                        Style::default().fg(to_color(lo.fg)).bg(to_color(lo.bg)),
                    ));
                } else {
                    // One half-block glyph shows both readings: foreground
                    // is the max band, background the min band.
                    spans.push(Span::styled(
                        "\u{2580}\u{2580}",
                        Style::default().fg(to_color(hi.bg)).bg(to_color(lo.bg)),
                    ));
                    spans.push(Span::raw(" "));
                }
            }
            None => spans.push(Span::raw(" ".repeat(cell_width))),
        }
    }
    Line::from(spans)
}
