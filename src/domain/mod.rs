pub mod bands;
pub mod calendar;
pub mod dates;
pub mod temperature;

use chrono_tz::Tz;

/// The single fixed location the dashboard reports on.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Tz,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            label: "Crosby, Isle of Man".to_string(),
            latitude: 54.180_314_732_271_85,
            longitude: -4.547_294_080_206_27,
            timezone: chrono_tz::Europe::London,
        }
    }
}

impl Location {
    #[must_use]
    pub fn from_coords(lat: f64, lon: f64, timezone: Tz) -> Self {
        Self {
            label: format!("{lat:.4}, {lon:.4}"),
            latitude: lat,
            longitude: lon,
            timezone,
        }
    }

    #[must_use]
    pub fn coordinates_line(&self) -> String {
        format!(
            "{:.6}, {:.6} ({})",
            self.latitude,
            self.longitude,
            self.timezone.name()
        )
    }
}
