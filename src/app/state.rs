use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use lru::LruCache;
use tokio::sync::mpsc;

use crate::{
    app::{events::AppEvent, settings},
    cli::{Cli, RangeOption, ViewMode},
    data::history::HistoryClient,
    domain::{
        Location,
        calendar::{Day, build_days},
        dates::last_n_days,
    },
    error::HistoryError,
};

/// The one message end users see for any fetch failure; the underlying
/// detail stays on [`AppState::last_error_detail`].
pub const LOAD_FAILED_MESSAGE: &str =
    "Unable to load weather data right now. Please try again later.";

/// Shown in the status line while [`AppState::fetch_in_flight`] is set.
pub const LOADING_MESSAGE: &str = "Loading data...";

// One cache slot per enumerated range.
const RANGE_CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::new(3).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

pub struct AppState {
    pub mode: AppMode,
    pub location: Location,
    pub range: RangeOption,
    pub view: ViewMode,
    /// The day records currently on screen.
    pub days: Vec<Day>,
    /// Last-known rows per range, read before fetch and written after.
    pub cache: LruCache<RangeOption, Vec<Day>>,
    /// Bumped on every fetch start; completion events carrying an older
    /// generation are discarded, so out-of-order responses cannot overwrite
    /// the display for the wrong range.
    pub fetch_generation: u64,
    pub fetch_in_flight: bool,
    /// Index into `days` of the calendar cell the cursor sits on.
    pub selected_day: Option<usize>,
    /// Whether the detail panel for the selected day is open.
    pub show_day_detail: bool,
    pub status: String,
    pub last_error_detail: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    settings_path: Option<PathBuf>,
    history_url: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(cli: &Cli) -> Self {
        let (saved_view, settings_path) = settings::load_view(!cli.no_persist);

        Self {
            mode: AppMode::Loading,
            location: cli.resolve_location(),
            range: cli.range,
            view: cli.view.unwrap_or(saved_view),
            days: Vec::new(),
            cache: LruCache::new(RANGE_CACHE_CAPACITY),
            fetch_generation: 0,
            fetch_in_flight: false,
            selected_day: None,
            show_day_detail: false,
            status: String::new(),
            last_error_detail: None,
            last_updated: None,
            settings_path,
            history_url: cli.history_url.clone(),
        }
    }

    pub async fn handle_event(&mut self, event: AppEvent, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                self.start_fetch(tx);
            }
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::FetchStarted { generation } => {
                if generation == self.fetch_generation {
                    self.fetch_in_flight = true;
                    self.status.clear();
                    if self.days.is_empty() {
                        self.mode = AppMode::Loading;
                    }
                }
            }
            AppEvent::FetchSucceeded {
                generation,
                range,
                days,
            } => {
                if generation != self.fetch_generation {
                    // A newer request superseded this one.
                    return Ok(());
                }
                self.fetch_in_flight = false;
                self.cache.put(range, days.clone());
                if range == self.range {
                    self.days = days;
                    self.clamp_selection();
                    self.mode = AppMode::Ready;
                    self.status.clear();
                    self.last_error_detail = None;
                    self.last_updated = Some(Utc::now());
                }
            }
            AppEvent::FetchFailed { generation, error } => {
                if generation != self.fetch_generation {
                    return Ok(());
                }
                self.fetch_in_flight = false;
                self.last_error_detail = Some(error);
                self.status = LOAD_FAILED_MESSAGE.to_string();
                // Prior content stays on screen; only an empty dashboard
                // drops into the full-screen error mode.
                self.mode = if self.days.is_empty() {
                    AppMode::Error
                } else {
                    AppMode::Ready
                };
            }
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Esc => {
                    // Esc closes an open detail panel before it quits.
                    if self.show_day_detail {
                        self.show_day_detail = false;
                    } else {
                        tx.send(AppEvent::Quit).await?;
                    }
                }
                KeyCode::Char('q') => {
                    tx.send(AppEvent::Quit).await?;
                }
                KeyCode::Left => self.move_selection(-1),
                KeyCode::Right => self.move_selection(1),
                KeyCode::Up => self.move_selection(-7),
                KeyCode::Down => self.move_selection(7),
                KeyCode::Enter => {
                    if self.view == ViewMode::Calendar && self.selected_day.is_some() {
                        self.show_day_detail = true;
                    }
                }
                KeyCode::Char('r') => self.start_fetch(tx),
                KeyCode::Char('7') => self.select_range(RangeOption::Week, tx),
                KeyCode::Char('3') => self.select_range(RangeOption::Month, tx),
                KeyCode::Char('6') => self.select_range(RangeOption::TwoMonths, tx),
                KeyCode::Char('l') => self.select_view(ViewMode::List),
                KeyCode::Char('c') => self.select_view(ViewMode::Calendar),
                KeyCode::Tab => self.select_view(match self.view {
                    ViewMode::List => ViewMode::Calendar,
                    ViewMode::Calendar => ViewMode::List,
                }),
                _ => {}
            }
        }

        Ok(())
    }

    /// Switch the lookback range. A cached sequence renders immediately
    /// while the refetch runs; re-selecting the active range also refetches,
    /// doubling as a manual refresh.
    pub fn select_range(&mut self, range: RangeOption, tx: &mpsc::Sender<AppEvent>) {
        self.range = range;
        if let Some(cached) = self.cache.get(&range).cloned() {
            self.days = cached;
            self.clamp_selection();
            self.mode = AppMode::Ready;
        }
        self.start_fetch(tx);
    }

    /// Switch the view and persist the choice. Leaving the calendar closes
    /// the detail panel, since the panel belongs to a calendar cell.
    pub fn select_view(&mut self, view: ViewMode) {
        self.view = view;
        if view != ViewMode::Calendar {
            self.show_day_detail = false;
        }
        if let Some(path) = &self.settings_path {
            settings::save_view(path, view);
        }
    }

    /// Move the calendar cursor by `delta` days. The first press lands on
    /// the most recent day; later presses clamp to the loaded window.
    fn move_selection(&mut self, delta: i64) {
        if self.view != ViewMode::Calendar || self.days.is_empty() {
            return;
        }
        let last = self.days.len() as i64 - 1;
        let next = match self.selected_day {
            None => last,
            Some(current) => (current as i64 + delta).clamp(0, last),
        };
        self.selected_day = Some(next as usize);
    }

    /// Drop a selection that no longer points at a loaded day.
    fn clamp_selection(&mut self) {
        match self.selected_day {
            Some(idx) if idx < self.days.len() => {}
            _ => {
                self.selected_day = None;
                self.show_day_detail = false;
            }
        }
    }

    /// Kick off a fetch for the active range on a background task. The
    /// bumped generation makes any still-in-flight older request stale.
    pub fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        let range = self.range;
        let location = self.location.clone();
        let client = match &self.history_url {
            Some(url) => HistoryClient::with_base_url(url.clone()),
            None => HistoryClient::new(),
        };

        let tx2 = tx.clone();
        tokio::spawn(async move {
            let _ = tx2.send(AppEvent::FetchStarted { generation }).await;
            match fetch_days(&client, &location, range).await {
                Ok(days) => {
                    let _ = tx2
                        .send(AppEvent::FetchSucceeded {
                            generation,
                            range,
                            days,
                        })
                        .await;
                }
                Err(err) => {
                    let _ = tx2
                        .send(AppEvent::FetchFailed {
                            generation,
                            error: err.to_string(),
                        })
                        .await;
                }
            }
        });
    }
}

async fn fetch_days(
    client: &HistoryClient,
    location: &Location,
    range: RangeOption,
) -> Result<Vec<Day>, HistoryError> {
    let window = last_n_days(range.days(), location.timezone)?;
    let daily = client.fetch_daily(location, &window).await?;
    build_days(&daily)
}
