use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = ".stay-scout";
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration, read from `STAY_SCOUT_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Key for the map display; without it maps are simply not shown
    pub maps_api_key: Option<String>,
    /// Base URL of a remote search provider. Unset means the in-process one.
    pub provider_url: Option<String>,
    pub data_dir: PathBuf,
    /// Fixed seed for synthetic match scores
    pub score_seed: Option<u64>,
    pub provider_timeout: Duration,
    /// JSON catalog replacing the built-in listings
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maps_api_key: None,
            provider_url: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            score_seed: None,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            catalog_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self {
            maps_api_key: var("STAY_SCOUT_MAPS_API_KEY"),
            provider_url: var("STAY_SCOUT_PROVIDER_URL"),
            catalog_path: var("STAY_SCOUT_CATALOG").map(PathBuf::from),
            ..Self::default()
        };

        if let Some(dir) = var("STAY_SCOUT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = var("STAY_SCOUT_SCORE_SEED") {
            let seed = seed
                .parse()
                .map_err(|_| Error::Config(format!("STAY_SCOUT_SCORE_SEED is not a number: {}", seed)))?;
            config.score_seed = Some(seed);
        }
        if let Some(secs) = var("STAY_SCOUT_PROVIDER_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::Config(format!("STAY_SCOUT_PROVIDER_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            if secs == 0 {
                return Err(Error::Config("Provider timeout must be at least one second".into()));
            }
            config.provider_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn map_display_enabled(&self) -> bool {
        self.maps_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.map_display_enabled());
        assert_eq!(config.provider_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("STAY_SCOUT_MAPS_API_KEY", "abc123"),
            ("STAY_SCOUT_PROVIDER_URL", "http://localhost:9400"),
            ("STAY_SCOUT_DATA_DIR", "/tmp/scout"),
            ("STAY_SCOUT_SCORE_SEED", "42"),
            ("STAY_SCOUT_PROVIDER_TIMEOUT_SECS", "5"),
            ("STAY_SCOUT_CATALOG", "listings.json"),
        ]))
        .unwrap();

        assert!(config.map_display_enabled());
        assert_eq!(config.provider_url.as_deref(), Some("http://localhost:9400"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/scout"));
        assert_eq!(config.score_seed, Some(42));
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert_eq!(config.catalog_path, Some(PathBuf::from("listings.json")));
    }

    #[test]
    fn test_blank_key_means_maps_disabled() {
        let config = Config::from_lookup(lookup(&[("STAY_SCOUT_MAPS_API_KEY", "  ")])).unwrap();
        assert!(!config.map_display_enabled());
    }

    #[test]
    fn test_bad_numbers_are_config_errors() {
        let err = Config::from_lookup(lookup(&[("STAY_SCOUT_SCORE_SEED", "lucky")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_lookup(lookup(&[("STAY_SCOUT_PROVIDER_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
