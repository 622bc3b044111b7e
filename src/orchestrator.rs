//! Request lifecycle: validate, geocode, fetch, advise, present.
//!
//! `Idle -> Loading -> (Success | Failed) -> Idle`. Empty input stays in
//! `Idle`. Taking `&mut self` for a request is what keeps it single-flight.

use crate::advisory::build_advisory;
use crate::config::Config;
use crate::error::{EMPTY_INPUT_MESSAGE, LookupError, TransportError};
use crate::forecast::{ForecastClient, WeatherSample};
use crate::geocode::{Geocoder, Place};
use crate::http::HttpFetcher;
use crate::present::{Presentation, present};
use tracing::{debug, error};

/// Transient status while a request is in flight.
pub const LOADING_MESSAGE: &str = "Fetching weather…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// The display surface the orchestrator drives. It only ever sees strings
/// and `Presentation`s.
pub trait View {
    /// Disable (true) or re-enable (false) the triggering control.
    fn set_loading(&mut self, loading: bool);
    /// Replace the status line. Empty clears it.
    fn set_status(&mut self, message: &str);
    /// Show a fresh result.
    fn render(&mut self, presentation: &Presentation);
    /// Return focus to the city input.
    fn focus_input(&mut self) {}
}

/// How one submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank input; nothing was requested and the view kept its old result.
    Rejected,
    Displayed(Box<Presentation>),
    /// Lookup failed; the view got the generic failure message.
    Failed,
}

pub struct Orchestrator {
    geocoder: Geocoder,
    forecast: ForecastClient,
    phase: Phase,
}

impl Orchestrator {
    pub fn new(geocoder: Geocoder, forecast: ForecastClient) -> Self {
        Self {
            geocoder,
            forecast,
            phase: Phase::Idle,
        }
    }

    /// Wire both clients from config, sharing one HTTP client.
    pub fn from_config(cfg: &Config) -> Result<Self, TransportError> {
        let http = HttpFetcher::new(&cfg.api.user_agent)?;
        Ok(Self::new(
            Geocoder::new(http.clone(), &cfg.api.geocoding_url, &cfg.api.language),
            ForecastClient::new(http, &cfg.api.forecast_url),
        ))
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn transition(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, "phase change");
        self.phase = next;
    }

    /// Handle one user action with the raw text of the city field.
    pub async fn submit<V: View>(&mut self, raw: &str, view: &mut V) -> Outcome {
        let city = raw.trim();
        if city.is_empty() {
            view.set_status(EMPTY_INPUT_MESSAGE);
            view.focus_input();
            return Outcome::Rejected;
        }

        self.transition(Phase::Loading);
        view.set_loading(true);
        view.set_status(LOADING_MESSAGE);

        let outcome = match self.lookup(city).await {
            Ok((place, sample)) => {
                let advisory =
                    build_advisory(sample.temperature_c, sample.humidity_pct, sample.rain_chance_pct);
                let presentation = present(&place, &sample, &advisory);
                view.render(&presentation);
                self.transition(Phase::Success);
                view.set_status("");
                Outcome::Displayed(Box::new(presentation))
            }
            Err(e) => {
                error!(city, error = %e, "weather lookup failed");
                self.transition(Phase::Failed);
                view.set_status(e.user_message());
                Outcome::Failed
            }
        };

        // Runs for both branches.
        view.set_loading(false);
        self.transition(Phase::Idle);
        outcome
    }

    /// Geocode then fetch. Sequential: the fetch needs the coordinates.
    async fn lookup(&self, city: &str) -> Result<(Place, WeatherSample), LookupError> {
        let place = self.geocoder.resolve_city(city).await?;
        let sample = self
            .forecast
            .fetch_weather(place.latitude, place.longitude)
            .await?;
        Ok((place, sample))
    }
}
