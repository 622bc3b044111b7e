//! Current conditions and today's rain chance from the Open-Meteo forecast API.

use crate::error::TransportError;
use crate::http::HttpFetcher;
use crate::numeric::Numeric;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation";
const DAILY_FIELDS: &str = "precipitation_probability_max";

/// One observation, built fresh for every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSample {
    pub temperature_c: Numeric,
    pub humidity_pct: Numeric,
    pub precipitation_mm: Numeric,
    /// Today's maximum precipitation probability.
    pub rain_chance_pct: Numeric,
    /// `current.time` as sent by the service, or the fetch time in RFC 3339.
    pub observed_at: String,
}

impl WeatherSample {
    /// Pull a sample out of a forecast payload.
    ///
    /// Missing blocks, missing fields and non-numeric values all come out as
    /// `Numeric::Unknown`; this never fails. `now` is used when the payload
    /// has no `current.time`.
    #[must_use]
    pub fn from_payload(body: &Value, now: DateTime<Utc>) -> Self {
        let rain_chance_pct = Numeric::from_json(
            body.get("daily")
                .and_then(|d| d.get("precipitation_probability_max"))
                .and_then(Value::as_array)
                .and_then(|days| days.first()),
        );

        let observed_at = current(body, "time")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map_or_else(
                || now.to_rfc3339_opts(SecondsFormat::Millis, true),
                str::to_string,
            );

        Self {
            temperature_c: Numeric::from_json(current(body, "temperature_2m")),
            humidity_pct: Numeric::from_json(current(body, "relative_humidity_2m")),
            precipitation_mm: Numeric::from_json(current(body, "precipitation")),
            rain_chance_pct,
            observed_at,
        }
    }
}

fn current<'a>(body: &'a Value, field: &str) -> Option<&'a Value> {
    body.get("current").and_then(|c| c.get(field))
}

/// Client for the forecast endpoint.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: HttpFetcher,
    url: String,
}

impl ForecastClient {
    pub fn new(http: HttpFetcher, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Fetch current conditions plus one day of daily data for a point.
    pub async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSample, TransportError> {
        let body: Value = self
            .http
            .fetch_json(
                &self.url,
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("current", CURRENT_FIELDS.to_string()),
                    ("daily", DAILY_FIELDS.to_string()),
                    ("forecast_days", "1".to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        let sample = WeatherSample::from_payload(&body, Utc::now());
        debug!(?sample, "forecast decoded");
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 6, 30, 0).unwrap()
    }

    #[test]
    fn test_full_payload() {
        let body = json!({
            "current": {
                "time": "2024-06-01T12:00",
                "temperature_2m": 37,
                "relative_humidity_2m": 20,
                "precipitation": 0.0
            },
            "daily": { "precipitation_probability_max": [10] }
        });
        let sample = WeatherSample::from_payload(&body, fixed_now());

        assert_eq!(sample.temperature_c, Numeric::Known(37.0));
        assert_eq!(sample.humidity_pct, Numeric::Known(20.0));
        assert_eq!(sample.precipitation_mm, Numeric::Known(0.0));
        assert_eq!(sample.rain_chance_pct, Numeric::Known(10.0));
        assert_eq!(sample.observed_at, "2024-06-01T12:00");
    }

    #[test]
    fn test_missing_humidity_is_unknown() {
        let body = json!({
            "current": { "time": "2024-06-01T12:00", "temperature_2m": 22.5 },
            "daily": { "precipitation_probability_max": [55] }
        });
        let sample = WeatherSample::from_payload(&body, fixed_now());

        assert_eq!(sample.temperature_c, Numeric::Known(22.5));
        assert_eq!(sample.humidity_pct, Numeric::Unknown);
        assert_eq!(sample.precipitation_mm, Numeric::Unknown);
    }

    #[test]
    fn test_empty_or_malformed_daily_array() {
        let empty = json!({ "daily": { "precipitation_probability_max": [] } });
        let not_array = json!({ "daily": { "precipitation_probability_max": 80 } });
        let null_first = json!({ "daily": { "precipitation_probability_max": [null, 40] } });

        for body in [empty, not_array, null_first] {
            let sample = WeatherSample::from_payload(&body, fixed_now());
            assert_eq!(sample.rain_chance_pct, Numeric::Unknown, "{body}");
        }
    }

    #[test]
    fn test_observed_at_falls_back_to_now() {
        let sample = WeatherSample::from_payload(&json!({}), fixed_now());
        assert_eq!(sample.observed_at, "2024-06-01T06:30:00.000Z");
        assert_eq!(sample.temperature_c, Numeric::Unknown);
    }

    #[test]
    fn test_non_object_current_block() {
        let body = json!({ "current": "unavailable", "daily": null });
        let sample = WeatherSample::from_payload(&body, fixed_now());
        assert_eq!(sample.temperature_c, Numeric::Unknown);
        assert_eq!(sample.rain_chance_pct, Numeric::Unknown);
    }

    #[test]
    fn test_string_values_are_coerced() {
        let body = json!({
            "current": { "temperature_2m": "31.2", "relative_humidity_2m": "n/a" },
            "daily": { "precipitation_probability_max": ["75"] }
        });
        let sample = WeatherSample::from_payload(&body, fixed_now());
        assert_eq!(sample.temperature_c, Numeric::Known(31.2));
        assert_eq!(sample.humidity_pct, Numeric::Unknown);
        assert_eq!(sample.rain_chance_pct, Numeric::Known(75.0));
    }
}
