//! City weather lookup with Hindi advisory guidance.
//!
//! Pipeline: geocode a city name, fetch current conditions for the match,
//! derive advisory sentences and format everything for display. All data
//! comes from Open-Meteo; nothing is cached between requests.

pub mod advisory;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod http;
pub mod numeric;
pub mod orchestrator;
pub mod present;

pub use advisory::{Advisory, Guidance, build_advisory};
pub use config::{Config, load_config};
pub use error::{EMPTY_INPUT_MESSAGE, FAILURE_MESSAGE, LookupError, TransportError};
pub use forecast::{ForecastClient, WeatherSample};
pub use geocode::{Geocoder, Place};
pub use http::HttpFetcher;
pub use numeric::Numeric;
pub use orchestrator::{LOADING_MESSAGE, Orchestrator, Outcome, Phase, View};
pub use present::{Presentation, UNKNOWN_PLACEHOLDER, present};
