use reqwest::Client;
use serde::Deserialize;

use crate::{
    domain::{
        Location,
        calendar::DailyResponse,
        dates::{DateRange, format_date},
    },
    error::HistoryError,
};

const HISTORY_URL: &str = "https://api.open-meteo.com/v1/forecast";
const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min";

#[derive(Debug, Clone)]
pub struct HistoryClient {
    client: Client,
    base_url: String,
}

impl Default for HistoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(HISTORY_URL)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
        }
    }

    /// Fetch the daily max/min arrays for `range` at `location`.
    ///
    /// Transport failures and non-2xx statuses surface as
    /// [`HistoryError::Network`]; a 2xx body missing any of the three daily
    /// arrays surfaces as [`HistoryError::MalformedResponse`].
    pub async fn fetch_daily(
        &self,
        location: &Location,
        range: &DateRange,
    ) -> Result<DailyResponse, HistoryError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("timezone", location.timezone.name().to_string()),
                ("start_date", format_date(range.start)),
                ("end_date", format_date(range.end)),
                ("daily", DAILY_VARIABLES.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload: HistoryResponse = response
            .json()
            .await
            .map_err(|err| HistoryError::MalformedResponse(err.to_string()))?;

        let daily = require(payload.daily, "daily")?;
        Ok(DailyResponse {
            time: require(daily.time, "daily.time")?,
            temperature_2m_max: require(daily.temperature_2m_max, "daily.temperature_2m_max")?,
            temperature_2m_min: require(daily.temperature_2m_min, "daily.temperature_2m_min")?,
        })
    }
}

fn require<T>(field: Option<T>, name: &str) -> Result<T, HistoryError> {
    field.ok_or_else(|| HistoryError::MalformedResponse(format!("missing field `{name}`")))
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Option<Vec<String>>,
    temperature_2m_max: Option<Vec<Option<f64>>>,
    temperature_2m_min: Option<Vec<Option<f64>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_parses_with_null_temperatures() {
        let payload: HistoryResponse = serde_json::from_str(
            r#"{
                "daily": {
                    "time": ["2024-05-01", "2024-05-02"],
                    "temperature_2m_max": [12.6, null],
                    "temperature_2m_min": [3.1, 4.2]
                }
            }"#,
        )
        .unwrap();

        let daily = payload.daily.unwrap();
        assert_eq!(daily.time.unwrap().len(), 2);
        assert_eq!(daily.temperature_2m_max.unwrap()[1], None);
    }

    #[test]
    fn missing_arrays_are_detected() {
        let payload: HistoryResponse =
            serde_json::from_str(r#"{"daily": {"time": ["2024-05-01"]}}"#).unwrap();
        let daily = payload.daily.unwrap();
        assert!(require(daily.temperature_2m_max, "daily.temperature_2m_max").is_err());
    }
}
