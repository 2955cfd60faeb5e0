pub mod calendar;
pub mod list;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::{AppMode, AppState, LOADING_MESSAGE},
    cli::{RangeOption, ViewMode},
    domain::{
        bands::{DEFAULT_BANDS, Rgb},
        temperature::format_temp,
    },
};

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < 40 || area.height < 12 {
        let warning = Paragraph::new("Terminal too small. Resize to at least 40x12.")
            .block(Block::default().borders(Borders::ALL).title("tempcal"));
        frame.render_widget(warning, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    render_header(frame, chunks[0], state);
    render_selector(frame, chunks[1], state);
    render_status(frame, chunks[2], state);

    match state.view {
        ViewMode::List => list::render(frame, chunks[3], state),
        ViewMode::Calendar => calendar::render(frame, chunks[3], state),
    }

    if state.show_day_detail
        && let Some(day) = state.selected_day.and_then(|idx| state.days.get(idx))
    {
        calendar::render_day_detail(frame, centered_rect(area, 40, 9), day);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let last_updated = state.last_updated.map_or_else(String::new, |ts| {
        format!(
            "Last updated: {}",
            ts.with_timezone(&state.location.timezone)
                .format("%Y-%m-%d %H:%M")
        )
    });

    let lines = vec![
        Line::from(Span::styled(
            state.location.label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.location.coordinates_line(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            last_updated,
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::BOTTOM);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_selector(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::raw(" ")];
    for range in [RangeOption::Week, RangeOption::Month, RangeOption::TwoMonths] {
        spans.push(selector_span(range.label(), range == state.range));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw("  "));
    for (label, view) in [("List", ViewMode::List), ("Calendar", ViewMode::Calendar)] {
        spans.push(selector_span(label, view == state.view));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        "  7/3/6 range · l/c view · r refresh · q quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn selector_span(label: &str, active: bool) -> Span<'static> {
    let style = if active {
        Style::default()
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(format!("[{label}]"), style)
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Paragraph::new(status_line(state)), area);
}

/// The loading text tracks the in-flight flag rather than sticking around
/// in `status`, so a background refresh announces itself even while cached
/// rows stay on screen.
fn status_line(state: &AppState) -> Line<'static> {
    if state.fetch_in_flight {
        return Line::from(Span::styled(
            format!(" {LOADING_MESSAGE}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let style = if state.last_error_detail.is_some() {
        Style::default().fg(Color::LightRed)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(Span::styled(format!(" {}", state.status), style))
}

/// A `width` x `height` rect centred inside `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub(crate) fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// A band-coloured temperature pill, e.g. " Max 13°C ".
pub(crate) fn pill_span(label: &str, value: Option<i32>) -> Span<'static> {
    let celsius = value.map_or(f64::NAN, f64::from);
    let colors = DEFAULT_BANDS.colors_for(celsius);
    Span::styled(
        format!(" {label} {}\u{b0}C ", format_temp(value)),
        Style::default()
            .fg(to_color(colors.fg))
            .bg(to_color(colors.bg)),
    )
}

pub(crate) fn empty_state(frame: &mut Frame, area: Rect, mode: AppMode) {
    let message = match mode {
        AppMode::Error => "Nothing to show.",
        _ => "No data to display yet.",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::DarkGray),
        )),
        area,
    );
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::app::state::LOAD_FAILED_MESSAGE;
    use crate::cli::Cli;

    fn bare_state() -> AppState {
        AppState::new(&Cli::parse_from(["tempcal", "--no-persist"]))
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn status_line_announces_an_in_flight_fetch() {
        let mut state = bare_state();
        state.fetch_in_flight = true;
        state.status = "old text".to_string();

        assert!(line_text(&status_line(&state)).contains(LOADING_MESSAGE));
    }

    #[test]
    fn status_line_shows_the_failure_message_once_the_fetch_lands() {
        let mut state = bare_state();
        state.status = LOAD_FAILED_MESSAGE.to_string();
        state.last_error_detail = Some("boom".to_string());

        let line = status_line(&state);
        assert!(line_text(&line).contains(LOAD_FAILED_MESSAGE));
        assert_eq!(line.spans[0].style.fg, Some(Color::LightRed));
    }

    #[test]
    fn centered_rect_clamps_to_the_available_area() {
        let area = Rect::new(0, 0, 30, 6);
        assert_eq!(centered_rect(area, 40, 9), area);

        let inner = centered_rect(area, 10, 2);
        assert_eq!((inner.x, inner.y, inner.width, inner.height), (10, 2, 10, 2));
    }
}
