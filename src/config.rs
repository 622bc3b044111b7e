//! YAML configuration with built-in defaults.
//!
//! Both upstream services are keyless, so running without any config file
//! is the normal case.

use anyhow::{Context, Result, bail, ensure};
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Env var naming an explicit config path.
pub const CONFIG_ENV: &str = "MAUSAM_CONFIG";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiCfg,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiCfg {
    pub geocoding_url: String,
    pub forecast_url: String,
    /// Language tag for geocoding result names.
    pub language: String,
    pub user_agent: String,
}

impl Default for ApiCfg {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com/v1/search".into(),
            forecast_url: "https://api.open-meteo.com/v1/forecast".into(),
            language: "hi".into(),
            user_agent: concat!("mausam/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl Config {
    /// Parse a YAML document; missing keys fall back to defaults.
    pub fn from_yaml(s: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(s).context("parsing YAML config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would only fail later at request time.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api.geocoding_url)
            .with_context(|| format!("api.geocoding_url: invalid URL {:?}", self.api.geocoding_url))?;
        Url::parse(&self.api.forecast_url)
            .with_context(|| format!("api.forecast_url: invalid URL {:?}", self.api.forecast_url))?;
        ensure!(!self.api.language.trim().is_empty(), "api.language: must not be empty");
        ensure!(!self.api.user_agent.trim().is_empty(), "api.user_agent: must not be empty");
        Ok(())
    }
}

/// Load config. Search order:
/// `explicit`, `$MAUSAM_CONFIG`, ./config/mausam.yaml, ./mausam.yaml,
/// ~/.config/mausam/config.yaml.
///
/// A path given explicitly or through the env var must exist. When none of
/// the implicit locations has a file the defaults are used.
pub fn load_config(explicit: Option<PathBuf>) -> Result<Config> {
    let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    load_from(explicit.or(env_path), &implicit_candidates())
}

fn implicit_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("./config/mausam.yaml"),
        PathBuf::from("./mausam.yaml"),
    ];
    if let Some(mut d) = dirs::config_dir() {
        d.push("mausam/config.yaml");
        candidates.push(d);
    }
    candidates
}

fn load_from(required: Option<PathBuf>, candidates: &[PathBuf]) -> Result<Config> {
    if let Some(path) = required {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        return read_file(&path);
    }

    for path in candidates {
        if path.exists() {
            return read_file(path);
        }
    }

    debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn read_file(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "loading config");
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    Config::from_yaml(&s).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api.language, "hi");
        assert!(cfg.api.forecast_url.starts_with("https://api.open-meteo.com"));
        assert!(cfg.api.user_agent.starts_with("mausam/"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = Config::from_yaml("api:\n  language: en\n").unwrap();
        assert_eq!(cfg.api.language, "en");
        assert_eq!(cfg.api.geocoding_url, ApiCfg::default().geocoding_url);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = Config::from_yaml("api:\n  forecast_url: not a url\n").unwrap_err();
        assert!(format!("{err:#}").contains("api.forecast_url"));
    }

    #[test]
    fn test_blank_language_rejected() {
        assert!(Config::from_yaml("api:\n  language: \"  \"\n").is_err());
    }

    #[test]
    fn test_missing_required_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(load_from(Some(missing), &[]).is_err());
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("second.yaml");
        let mut f = std::fs::File::create(&second).unwrap();
        writeln!(f, "api:\n  language: ta").unwrap();

        let cfg = load_from(None, &[dir.path().join("first.yaml"), second]).unwrap();
        assert_eq!(cfg.api.language, "ta");
    }

    #[test]
    fn test_no_candidates_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(None, &[dir.path().join("absent.yaml")]).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
