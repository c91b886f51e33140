//! Runtime configuration read from the environment.

use std::net::SocketAddr;

use thiserror::Error;

use storefront_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SERVICE_NAME: &str = "storefront";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    BindAddr { var: &'static str, value: String },

    #[error("{var} must be an http(s) URL: {value}")]
    ProductServiceUrl { var: &'static str, value: String },

    #[error("{var}: {source}")]
    LogFormat {
        var: &'static str,
        #[source]
        source: storefront_observability::UnknownLogFormat,
    },
}

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of a remote product service. `None` resolves against the
    /// in-process catalog.
    pub product_service_url: Option<String>,
    pub log_format: LogFormat,
    /// Echoed by the health endpoint.
    pub service_name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            product_service_url: None,
            log_format: LogFormat::default(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is fine.
        _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("STOREFRONT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::BindAddr {
            var: "STOREFRONT_BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let product_service_url = match get("PRODUCT_SERVICE_URL") {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                Some(url.trim_end_matches('/').to_string())
            }
            Some(url) => {
                return Err(ConfigError::ProductServiceUrl {
                    var: "PRODUCT_SERVICE_URL",
                    value: url,
                });
            }
            None => None,
        };

        let log_format = match get("STOREFRONT_LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|source| ConfigError::LogFormat {
                var: "STOREFRONT_LOG_FORMAT",
                source,
            })?,
            None => LogFormat::default(),
        };

        let service_name =
            get("STOREFRONT_SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        Ok(Self {
            bind_addr,
            product_service_url,
            log_format,
            service_name,
        })
    }
}
