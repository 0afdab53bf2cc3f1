//! Client configuration.
//!
//! Native builds read the environment at startup; the browser build has no
//! environment, so the values are baked in at compile time.

use std::time::Duration;

use crate::error::{ApiError, Result};

pub const DEFAULT_API_URL: &str = "/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub api_url: String,
    /// Per-request timeout. Ignored in the browser, where fetch has none.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load from `TIENDA_API_URL` and `TIENDA_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Values captured when the crate was compiled.
    pub fn from_build_env() -> Result<Self> {
        Self::from_lookup(|key| match key {
            "TIENDA_API_URL" => option_env!("TIENDA_API_URL").map(str::to_string),
            "TIENDA_API_TIMEOUT_SECS" => option_env!("TIENDA_API_TIMEOUT_SECS").map(str::to_string),
            _ => None,
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("TIENDA_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match lookup("TIENDA_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ApiError::Config(format!("TIENDA_API_TIMEOUT_SECS must be a number, got {:?}", raw))
                })?;
                if secs == 0 {
                    return Err(ApiError::Config(
                        "TIENDA_API_TIMEOUT_SECS must be greater than zero".into(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { api_url, timeout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "/api");
    }

    #[test]
    fn test_trims_trailing_slash() {
        let config =
            ClientConfig::from_lookup(lookup(&[("TIENDA_API_URL", "http://localhost:3000/api/")]))
                .unwrap();
        assert_eq!(config.api_url, "http://localhost:3000/api");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("TIENDA_API_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(ClientConfig::from_lookup(lookup(&[("TIENDA_API_TIMEOUT_SECS", "0")])).is_err());

        let config = ClientConfig::from_lookup(lookup(&[("TIENDA_API_TIMEOUT_SECS", "5")])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
