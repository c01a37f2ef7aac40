use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_SEARCH_URL: &str = "https://openlibrary.org/search.json";
pub const DEFAULT_LOG_FILTER: &str = "openlibrary_proxy=info,tower_http=info";
/// Log target for the startup line, enabled whatever the filter says.
pub const STARTUP_TARGET: &str = "openlibrary_proxy::startup";

/// Builds the log filter from `RUST_LOG`-style directives, falling back to
/// [`DEFAULT_LOG_FILTER`] when they are missing or unparsable.
pub fn log_filter(directives: Option<&str>) -> Result<EnvFilter, ParseError> {
    let filter = directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));
    Ok(filter.add_directive(format!("{}=info", STARTUP_TARGET).parse()?))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub search_url: String,
    pub upstream_timeout: Option<Duration>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            upstream_timeout: None,
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => defaults.port,
        };

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => {
                // A zero timeout would fail every upstream call.
                match value.parse::<u64>() {
                    Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                    _ => {
                        return Err(ConfigError::Invalid {
                            name: "UPSTREAM_TIMEOUT_SECS",
                            value,
                        })
                    }
                }
            }
            None => defaults.upstream_timeout,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            search_url: lookup("OPENLIBRARY_SEARCH_URL").unwrap_or(defaults.search_url),
            upstream_timeout,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
