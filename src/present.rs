//! Display-ready strings for one successful lookup.

use crate::advisory::Advisory;
use crate::forecast::WeatherSample;
use crate::geocode::Place;
use crate::numeric::Numeric;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;

/// Shown in place of any unknown measurement.
pub const UNKNOWN_PLACEHOLDER: &str = "—";

/// Shown when the observation time cannot be parsed.
pub const NOW_FALLBACK: &str = "now";

const TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Everything a view needs to draw the result panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub location: String,
    /// One decimal, e.g. `"37.0"`.
    pub temperature: String,
    /// Rounded integer.
    pub humidity: String,
    /// Rounded integer.
    pub rain_chance: String,
    /// One decimal.
    pub precipitation: String,
    pub advice: String,
    /// `dd-mm-YYYY HH:MM` or `"now"`.
    pub updated_at: String,
}

impl Presentation {
    /// Full "Updated: ..." line.
    #[must_use]
    pub fn updated_line(&self) -> String {
        format!("Updated: {}", self.updated_at)
    }
}

/// Map a resolved place, its sample and the derived advisory to strings.
#[must_use]
pub fn present(place: &Place, sample: &WeatherSample, advisory: &Advisory) -> Presentation {
    Presentation {
        location: place.display_name(),
        temperature: one_decimal(sample.temperature_c),
        humidity: rounded(sample.humidity_pct),
        rain_chance: rounded(sample.rain_chance_pct),
        precipitation: one_decimal(sample.precipitation_mm),
        advice: advisory.text(),
        updated_at: format_timestamp(&sample.observed_at),
    }
}

fn one_decimal(value: Numeric) -> String {
    value
        .value()
        .map_or_else(|| UNKNOWN_PLACEHOLDER.to_string(), |v| format!("{v:.1}"))
}

fn rounded(value: Numeric) -> String {
    value
        .value()
        .map_or_else(|| UNKNOWN_PLACEHOLDER.to_string(), |v| format!("{:.0}", round_half_up(v)))
}

/// Halves round towards +infinity, so 2.5 -> 3 and -2.5 -> -2.
fn round_half_up(v: f64) -> f64 {
    let floor = v.floor();
    if v - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Render an observation time for humans.
///
/// Open-Meteo sends local wall time without an offset (`2024-06-01T12:00`),
/// which is shown as is. Timestamps with an offset are converted to the
/// machine's local zone. Anything else becomes `"now"`.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(TIME_FORMAT).to_string();
    }

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map_or_else(|| NOW_FALLBACK.to_string(), |dt| dt.format(TIME_FORMAT).to_string())
}
