use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_BIND: &str = "0.0.0.0:8097";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server settings, read once from `MARQUEE_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub tmdb_key: String,
    pub home_country: String,
    pub embed_providers: Option<PathBuf>,
    pub http_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let tmdb_key = get("MARQUEE_TMDB_KEY").ok_or(ConfigError::Missing("MARQUEE_TMDB_KEY"))?;

        let home_country = match get("MARQUEE_HOME_COUNTRY") {
            Some(c) if c.len() == 2 && c.chars().all(|ch| ch.is_ascii_alphabetic()) => {
                c.to_ascii_uppercase()
            }
            Some(c) => {
                return Err(ConfigError::Invalid {
                    name: "MARQUEE_HOME_COUNTRY",
                    value: c,
                });
            }
            None => marquee_availability::DEFAULT_HOME_COUNTRY.to_string(),
        };

        let http_timeout = match get("MARQUEE_HTTP_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "MARQUEE_HTTP_TIMEOUT_SECS",
                        value: v,
                    });
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            bind: get("MARQUEE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            tmdb_key,
            home_country,
            embed_providers: get("MARQUEE_EMBED_PROVIDERS").map(PathBuf::from),
            http_timeout,
        })
    }
}
