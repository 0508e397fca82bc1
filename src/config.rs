use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cli::Cli;
use crate::fetcher::DEFAULT_MAX_SUGGESTIONS;
use crate::service::DEFAULT_MIN_PREFIX_LEN;
use crate::upstream::DATAMUSE_API_URL;

/// Configuration for the suggestion relay
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_dir: PathBuf,
    pub upstream_url: String,
    pub upstream_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
    pub max_suggestions: usize,
    pub min_prefix_len: usize,
    pub stats_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            frontend_dir: PathBuf::from("frontend"),
            upstream_url: DATAMUSE_API_URL.to_string(),
            upstream_timeout_secs: 10,
            cache_ttl_secs: 3600,
            cache_capacity: 1000,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            min_prefix_len: DEFAULT_MIN_PREFIX_LEN,
            stats_interval_secs: 300,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        let _ = dotenv::dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Config {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_var(&get, "PORT", defaults.port)?,
            frontend_dir: get("FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.frontend_dir),
            upstream_url: get("UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            upstream_timeout_secs: parse_var(
                &get,
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout_secs,
            )?,
            cache_ttl_secs: parse_var(&get, "CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            cache_capacity: parse_var(&get, "CACHE_CAPACITY", defaults.cache_capacity)?,
            max_suggestions: parse_var(&get, "MAX_SUGGESTIONS", defaults.max_suggestions)?,
            min_prefix_len: parse_var(&get, "MIN_PREFIX_LEN", defaults.min_prefix_len)?,
            stats_interval_secs: parse_var(
                &get,
                "STATS_INTERVAL_SECS",
                defaults.stats_interval_secs,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Command line flags win over the environment
    pub fn apply_cli(mut self, cli: &Cli) -> Result<Self> {
        if let Some(ref host) = cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(ref dir) = cli.frontend_dir {
            self.frontend_dir = dir.clone();
        }
        if let Some(ref url) = cli.upstream_url {
            self.upstream_url = url.clone();
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.upstream_url.trim().is_empty() {
            return Err(anyhow!("UPSTREAM_URL must not be empty"));
        }

        let positive = [
            ("UPSTREAM_TIMEOUT_SECS", self.upstream_timeout_secs as usize),
            ("CACHE_TTL_SECS", self.cache_ttl_secs as usize),
            ("CACHE_CAPACITY", self.cache_capacity),
            ("MAX_SUGGESTIONS", self.max_suggestions),
            ("MIN_PREFIX_LEN", self.min_prefix_len),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(anyhow!("{} must be greater than zero", name));
            }
        }

        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// `None` when periodic stats logging is disabled
    pub fn stats_interval(&self) -> Option<Duration> {
        (self.stats_interval_secs > 0).then(|| Duration::from_secs(self.stats_interval_secs))
    }
}

fn parse_var<F, T>(get: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid value for {}: {:?} ({})", key, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.upstream_url, DATAMUSE_API_URL);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.max_suggestions, 20);
        assert_eq!(config.min_prefix_len, 2);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8081"),
            ("CACHE_TTL_SECS", "60"),
            ("UPSTREAM_URL", "http://localhost:9000"),
            ("STATS_INTERVAL_SECS", "0"),
        ])
        .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.upstream_url, "http://localhost:9000");
        assert!(config.stats_interval().is_none());
    }

    #[test]
    fn test_hostname_host_is_accepted() {
        let config = assert_ok!(config_from(&[("HOST", "localhost")]));
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_invalid_number_is_error() {
        let err = assert_err!(config_from(&[("CACHE_CAPACITY", "lots")]));
        assert!(err.to_string().contains("CACHE_CAPACITY"));
    }

    #[test]
    fn test_zero_capacity_is_error() {
        assert_err!(config_from(&[("CACHE_CAPACITY", "0")]));
        assert_err!(config_from(&[("MIN_PREFIX_LEN", "0")]));
    }

    #[test]
    fn test_cli_overrides_env() {
        let cli = Cli {
            host: Some("127.0.0.1".to_string()),
            port: Some(9999),
            frontend_dir: None,
            upstream_url: None,
        };
        let config = config_from(&[("PORT", "8081")]).unwrap().apply_cli(&cli).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9999);
        assert_eq!(config.frontend_dir, PathBuf::from("frontend"));
    }
}
