//! Day records derived from the raw parallel-array response, plus the
//! grouping and Monday-first grid layout behind the calendar view.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::{domain::temperature::round_temp, error::HistoryError};

/// Parallel arrays exactly as the upstream API delivers them; index `i`
/// describes one calendar day. Temperatures may be null on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyResponse {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
}

/// One calendar day's normalized summary. Immutable once built; the whole
/// sequence is replaced on the next fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub iso_date: String,
    pub date: NaiveDate,
    pub month_key: String,
    pub day_of_month: u32,
    pub max_c: Option<i32>,
    pub min_c: Option<i32>,
}

/// Flattened projection of [`Day`] for the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureRow {
    pub date: String,
    pub max: Option<i32>,
    pub min: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub month_key: String,
    pub days: Vec<Day>,
}

/// Convert the raw response into chronologically sorted `Day` records.
///
/// Arrays that disagree in length would index out of bounds, so they fail as
/// a malformed response instead. Unparseable date strings are skipped.
pub fn build_days(daily: &DailyResponse) -> Result<Vec<Day>, HistoryError> {
    let len = daily.time.len();
    if daily.temperature_2m_max.len() != len || daily.temperature_2m_min.len() != len {
        return Err(HistoryError::MalformedResponse(format!(
            "daily arrays disagree in length: {len} dates, {} maxima, {} minima",
            daily.temperature_2m_max.len(),
            daily.temperature_2m_min.len()
        )));
    }

    let mut days = Vec::with_capacity(len);
    for idx in 0..len {
        let Ok(date) = NaiveDate::parse_from_str(&daily.time[idx], "%Y-%m-%d") else {
            continue;
        };

        days.push(Day {
            iso_date: daily.time[idx].clone(),
            date,
            month_key: date.format("%Y-%m").to_string(),
            day_of_month: date.day(),
            max_c: daily.temperature_2m_max[idx].and_then(round_temp),
            min_c: daily.temperature_2m_min[idx].and_then(round_temp),
        });
    }

    days.sort_by(|a, b| a.iso_date.cmp(&b.iso_date));
    Ok(days)
}

/// Rows for the list view, newest first.
#[must_use]
pub fn build_rows(days: &[Day]) -> Vec<TemperatureRow> {
    let mut rows: Vec<TemperatureRow> = days
        .iter()
        .map(|day| TemperatureRow {
            date: day.iso_date.clone(),
            max: day.max_c,
            min: day.min_c,
        })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// Weekday index with Monday = 0 … Sunday = 6.
#[must_use]
pub fn monday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Calendar-layout cells for one month: leading blanks align the 1st under
/// its weekday, one cell per day of the month filled from `days` where a
/// record exists, trailing blanks complete the final week. The result's
/// length is always a multiple of 7.
#[must_use]
pub fn build_month_grid(year: i32, month: u32, days: &[Day]) -> Vec<Option<Day>> {
    let Some(first_of_month) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut cells: Vec<Option<Day>> = vec![None; monday_index(first_of_month)];

    let mut by_day_of_month: HashMap<u32, &Day> = HashMap::new();
    for day in days {
        if day.date.year() == year && day.date.month() == month {
            by_day_of_month.insert(day.day_of_month, day);
        }
    }

    for number in 1..=days_in_month(first_of_month) {
        cells.push(by_day_of_month.get(&number).map(|day| (*day).clone()));
    }

    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells
}

/// Per-month partition of `days`, groups ascending by month key, each
/// group's days in chronological order.
#[must_use]
pub fn group_by_month(days: &[Day]) -> Vec<MonthGroup> {
    let mut sorted = days.to_vec();
    sorted.sort_by(|a, b| a.iso_date.cmp(&b.iso_date));

    let mut buckets: BTreeMap<String, Vec<Day>> = BTreeMap::new();
    for day in sorted {
        buckets.entry(day.month_key.clone()).or_default().push(day);
    }

    buckets
        .into_iter()
        .map(|(month_key, days)| MonthGroup { month_key, days })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn days_in_month(first_of_month: NaiveDate) -> u32 {
    let (next_year, next_month) = if first_of_month.month() == 12 {
        (first_of_month.year() + 1, 1)
    } else {
        (first_of_month.year(), first_of_month.month() + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1).map_or(31, |next| {
        next.signed_duration_since(first_of_month).num_days() as u32
    })
}
