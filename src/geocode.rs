//! City name to coordinates via the Open-Meteo geocoding API.

use crate::error::LookupError;
use crate::http::HttpFetcher;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Timezone used when the match carries none.
pub const DEFAULT_TIMEZONE: &str = "auto";

/// A resolved place. Built once per request from the first search match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    /// First-level administrative area; omitted when equal to `name`.
    pub region: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl Place {
    /// `"name, region, country"` with missing parts dropped.
    #[must_use]
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.region.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/* ============================ Wire types ============================ */

#[derive(Deserialize, Debug)]
struct SearchResp {
    // The service omits `results` entirely when nothing matches.
    #[serde(default)]
    results: Option<Vec<SearchMatch>>,
}

#[derive(Deserialize, Debug)]
struct SearchMatch {
    name: String,
    #[serde(default)]
    admin1: Option<String>,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timezone: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<SearchMatch> for Place {
    fn from(m: SearchMatch) -> Self {
        let region = non_empty(m.admin1).filter(|region| *region != m.name);
        Place {
            region,
            country: non_empty(m.country),
            latitude: m.latitude,
            longitude: m.longitude,
            timezone: non_empty(m.timezone).unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            name: m.name,
        }
    }
}

/* ============================ Resolver ============================ */

/// Resolves free-text city names against a geocoding endpoint.
#[derive(Debug, Clone)]
pub struct Geocoder {
    http: HttpFetcher,
    url: String,
    language: String,
}

impl Geocoder {
    pub fn new(http: HttpFetcher, url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            language: language.into(),
        }
    }

    /// Resolve `city` to the single highest-confidence match.
    ///
    /// Blank input is rejected before any request is made. A well-formed
    /// answer with no matches is `LookupError::NotFound`.
    pub async fn resolve_city(&self, city: &str) -> Result<Place, LookupError> {
        let query = city.trim();
        if query.is_empty() {
            return Err(LookupError::Validation);
        }

        let body: SearchResp = self
            .http
            .fetch_json(
                &self.url,
                &[
                    ("name", query.to_string()),
                    ("count", "1".to_string()),
                    ("language", self.language.clone()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let Some(first) = body.results.unwrap_or_default().into_iter().next() else {
            debug!(query, "geocoding returned no results");
            return Err(LookupError::NotFound {
                query: query.to_string(),
            });
        };

        let place = Place::from(first);
        info!(
            "Resolved {:?} to {} ({:.4}, {:.4})",
            query,
            place.display_name(),
            place.latitude,
            place.longitude
        );
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_match(admin1: Option<&str>, country: Option<&str>, tz: Option<&str>) -> SearchMatch {
        SearchMatch {
            name: "Jaipur".into(),
            admin1: admin1.map(Into::into),
            country: country.map(Into::into),
            latitude: 26.91962,
            longitude: 75.78781,
            timezone: tz.map(Into::into),
        }
    }

    #[test]
    fn test_place_from_full_match() {
        let place = Place::from(search_match(Some("Rajasthan"), Some("India"), Some("Asia/Kolkata")));
        assert_eq!(place.name, "Jaipur");
        assert_eq!(place.region.as_deref(), Some("Rajasthan"));
        assert_eq!(place.country.as_deref(), Some("India"));
        assert_eq!(place.timezone, "Asia/Kolkata");
        assert_eq!(place.display_name(), "Jaipur, Rajasthan, India");
    }

    #[test]
    fn test_region_equal_to_name_is_dropped() {
        let place = Place::from(search_match(Some("Jaipur"), Some("India"), None));
        assert_eq!(place.region, None);
        assert_eq!(place.display_name(), "Jaipur, India");
    }

    #[test]
    fn test_missing_parts_and_default_timezone() {
        let place = Place::from(search_match(Some(""), None, Some("")));
        assert_eq!(place.region, None);
        assert_eq!(place.country, None);
        assert_eq!(place.timezone, DEFAULT_TIMEZONE);
        assert_eq!(place.display_name(), "Jaipur");
    }

    #[test]
    fn test_search_response_without_results_field() {
        let body: SearchResp = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(body.results.is_none());
    }

    #[tokio::test]
    async fn test_blank_city_is_rejected_locally() {
        // Port 9 is discard; nothing is ever sent because validation fails first.
        let geocoder = Geocoder::new(
            HttpFetcher::new("mausam-test").unwrap(),
            "http://127.0.0.1:9/v1/search",
            "hi",
        );
        let err = geocoder.resolve_city("   \t").await.unwrap_err();
        assert!(matches!(err, LookupError::Validation));
    }
}
