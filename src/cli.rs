use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::domain::Location;

/// Lookback window ending yesterday.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash)]
pub enum RangeOption {
    #[value(name = "7")]
    Week,
    #[value(name = "30")]
    Month,
    #[value(name = "60")]
    TwoMonths,
}

impl RangeOption {
    #[must_use]
    pub fn days(self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::TwoMonths => 60,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::TwoMonths => "60d",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Calendar,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "tempcal",
    version,
    about = "Terminal temperature-history dashboard"
)]
pub struct Cli {
    /// Location label shown in the header (default: Crosby, Isle of Man)
    pub location: Option<String>,

    /// Direct latitude (requires --lon)
    #[arg(long)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long)]
    pub lon: Option<f64>,

    /// IANA timezone used for civil-date arithmetic
    #[arg(long, default_value = "Europe/London")]
    pub timezone: String,

    /// Lookback range in days
    #[arg(long, value_enum, default_value = "7")]
    pub range: RangeOption,

    /// Initial view (overrides the persisted choice)
    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,

    /// Override the history API endpoint
    #[arg(long)]
    pub history_url: Option<String>,

    /// Skip reading and writing the settings file
    #[arg(long)]
    pub no_persist: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            _ => {}
        }
        if self.timezone.parse::<Tz>().is_err() {
            anyhow::bail!("unrecognized timezone `{}`", self.timezone);
        }
        Ok(())
    }

    /// Resolve the dashboard location from the CLI overrides, falling back
    /// to the built-in default for anything left unspecified.
    #[must_use]
    pub fn resolve_location(&self) -> Location {
        let timezone = self
            .timezone
            .parse::<Tz>()
            .unwrap_or(chrono_tz::Europe::London);

        let mut location = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Location::from_coords(lat, lon, timezone),
            _ => Location {
                timezone,
                ..Location::default()
            },
        };
        if let Some(label) = &self.location {
            location.label = label.clone();
        }
        location
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, RangeOption, ViewMode};

    #[test]
    fn parses_numeric_range_names() {
        let cli = Cli::parse_from(["tempcal", "--range", "30"]);
        assert_eq!(cli.range, RangeOption::Month);
        assert_eq!(cli.range.days(), 30);
    }

    #[test]
    fn defaults_to_seven_day_range() {
        let cli = Cli::parse_from(["tempcal"]);
        assert_eq!(cli.range, RangeOption::Week);
        assert!(cli.view.is_none());
    }

    #[test]
    fn rejects_unpaired_coordinates() {
        let cli = Cli::parse_from(["tempcal", "--lat", "54.18"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let cli = Cli::parse_from(["tempcal", "--timezone", "Atlantis/Lost"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn parses_view_override() {
        let cli = Cli::parse_from(["tempcal", "--view", "calendar"]);
        assert_eq!(cli.view, Some(ViewMode::Calendar));
    }

    #[test]
    fn coordinates_override_builds_location() {
        let cli = Cli::parse_from(["tempcal", "--lat", "10.0", "--lon", "20.0"]);
        cli.validate().unwrap();
        let location = cli.resolve_location();
        assert!((location.latitude - 10.0).abs() < f64::EPSILON);
        assert!((location.longitude - 20.0).abs() < f64::EPSILON);
    }
}
