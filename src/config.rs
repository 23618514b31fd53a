use crate::services::enrichment_service::DEFAULT_MAX_IN_FLIGHT;

pub const API_URL_VAR: &str = "RECEIPT_API_URL";
pub const POINTS_CONCURRENCY_VAR: &str = "RECEIPT_POINTS_CONCURRENCY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidConcurrency { var: &'static str, value: String },
}

/// Client settings, read from the environment (and `.env` via dotenv)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prefix for every service path. Empty means same-origin, i.e. no prefix.
    pub api_url: String,
    /// Upper bound on simultaneous points lookups during a refresh
    pub max_in_flight_lookups: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        let max_in_flight_lookups = match lookup(POINTS_CONCURRENCY_VAR) {
            None => DEFAULT_MAX_IN_FLIGHT,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidConcurrency {
                        var: POINTS_CONCURRENCY_VAR,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            api_url,
            max_in_flight_lookups,
        })
    }
}
