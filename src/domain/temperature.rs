/// Round to the nearest whole degree, halves away from zero.
///
/// Non-finite readings collapse to `None`; `f64::round` already carries the
/// away-from-zero tie break, and the cast folds `-0.0` into `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_temp(value: f64) -> Option<i32> {
    if !value.is_finite() {
        return None;
    }
    Some(value.round() as i32)
}

/// Display form of a normalized temperature: an en dash for missing
/// readings, the plain decimal string otherwise.
#[must_use]
pub fn format_temp(value: Option<i32>) -> String {
    match value {
        Some(degrees) => degrees.to_string(),
        None => "\u{2013}".to_string(),
    }
}
