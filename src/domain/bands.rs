//! Temperature-to-colour banding for every displayed reading.
//!
//! The band table is ordered, non-overlapping data with unbounded extremes,
//! so every finite temperature lands in exactly one band. Intervals are
//! half-open `[min, max)`.

use crate::domain::temperature::round_temp;

pub type Rgb = (u8, u8, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandColors {
    pub bg: Rgb,
    pub fg: Rgb,
}

#[derive(Debug, Clone, Copy)]
pub struct TemperatureBand {
    pub min: f64,
    pub max: f64,
    pub colors: BandColors,
}

impl TemperatureBand {
    fn contains(&self, degrees: f64) -> bool {
        degrees >= self.min && degrees < self.max
    }
}

/// Neutral pair for readings the normalizer rejected.
pub const NEUTRAL_FALLBACK: BandColors = BandColors {
    bg: (226, 232, 240),
    fg: (16, 42, 67),
};

const INK: Rgb = (16, 42, 67);
const WHITE: Rgb = (255, 255, 255);

const fn band(min: f64, max: f64, bg: Rgb, fg: Rgb) -> TemperatureBand {
    TemperatureBand {
        min,
        max,
        colors: BandColors { bg, fg },
    }
}

/// Cold-to-hot scale in whole degrees Celsius, 3-degree steps through the
/// temperate middle.
pub const DEFAULT_BANDS: BandTable = BandTable(&[
    band(f64::NEG_INFINITY, 0.0, (11, 31, 94), WHITE),
    band(0.0, 3.0, (18, 60, 139), WHITE),
    band(3.0, 6.0, (30, 90, 168), WHITE),
    band(6.0, 9.0, (29, 122, 174), WHITE),
    band(9.0, 12.0, (31, 138, 138), WHITE),
    band(12.0, 15.0, (46, 158, 77), INK),
    band(15.0, 18.0, (95, 191, 74), INK),
    band(18.0, 21.0, (139, 195, 74), INK),
    band(21.0, 24.0, (197, 216, 45), INK),
    band(24.0, 27.0, (244, 180, 0), INK),
    band(27.0, 30.0, (245, 124, 0), INK),
    band(30.0, f64::INFINITY, (229, 57, 53), WHITE),
]);

#[derive(Debug, Clone, Copy)]
pub struct BandTable(pub &'static [TemperatureBand]);

impl BandTable {
    /// Colour pair for a raw temperature: normalize first, then take the
    /// first band containing the rounded value. Sentinel readings and the
    /// (unreachable) no-match case share the neutral fallback.
    #[must_use]
    pub fn colors_for(&self, celsius: f64) -> BandColors {
        let Some(rounded) = round_temp(celsius) else {
            return NEUTRAL_FALLBACK;
        };
        let degrees = f64::from(rounded);
        self.0
            .iter()
            .find(|band| band.contains(degrees))
            .map_or(NEUTRAL_FALLBACK, |band| band.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_fall_into_the_upper_band() {
        // Half-open intervals: an exact boundary belongs to the band it opens.
        assert_eq!(DEFAULT_BANDS.colors_for(0.0).bg, (18, 60, 139));
        assert_eq!(DEFAULT_BANDS.colors_for(3.0).bg, (30, 90, 168));
        assert_eq!(DEFAULT_BANDS.colors_for(30.0).bg, (229, 57, 53));
    }

    #[test]
    fn extremes_are_unbounded() {
        assert_eq!(DEFAULT_BANDS.colors_for(-40.0).bg, (11, 31, 94));
        assert_eq!(DEFAULT_BANDS.colors_for(55.0).bg, (229, 57, 53));
    }

    #[test]
    fn classification_uses_the_rounded_value() {
        // 2.6 rounds to 3 and must classify as 3, not 2.
        assert_eq!(DEFAULT_BANDS.colors_for(2.6).bg, (30, 90, 168));
        assert_eq!(DEFAULT_BANDS.colors_for(-0.4).bg, (18, 60, 139));
    }

    #[test]
    fn sentinel_maps_to_the_neutral_fallback() {
        assert_eq!(DEFAULT_BANDS.colors_for(f64::NAN), NEUTRAL_FALLBACK);
        assert_eq!(DEFAULT_BANDS.colors_for(f64::INFINITY), NEUTRAL_FALLBACK);
    }

    #[test]
    fn every_whole_degree_maps_to_exactly_one_band() {
        for degrees in -100..=100 {
            let value = f64::from(degrees);
            let matching = DEFAULT_BANDS
                .0
                .iter()
                .filter(|band| band.contains(value))
                .count();
            assert_eq!(matching, 1, "degree {degrees} matched {matching} bands");
        }
    }
}
