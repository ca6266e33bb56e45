//! Server settings, validated into the pieces the server is built from.

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use crate::{Error, backend::BackendClient, logging::NoiseFilter};

/// The default port to serve the dashboard from.
pub const DEFAULT_PORT: u16 = 3000;
/// The default time limit for each backend request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// The default file for the debug log.
pub const DEFAULT_LOG_FILE: &str = "debug.log";

/// Settings for the dashboard server.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The backend's base URL, without the `/api` prefix.
    pub backend_url: String,
    /// The port to serve the dashboard from.
    pub port: u16,
    /// The time limit for each backend request.
    pub request_timeout: Duration,
    /// Log messages matching any of these patterns are dropped, in addition
    /// to the default patterns.
    pub suppress_patterns: Vec<String>,
    /// Where to write the debug log.
    pub log_file: PathBuf,
}

impl Config {
    /// Settings with defaults for everything except the backend URL.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            port: DEFAULT_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            suppress_patterns: Vec::new(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    /// The local address to listen on.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], self.port))
    }

    /// A client for the configured backend.
    ///
    /// # Errors
    /// Returns [Error::InvalidBackendUrl] if the backend URL is not an
    /// absolute HTTP(S) URL.
    pub fn backend_client(&self) -> Result<BackendClient, Error> {
        BackendClient::new(&self.backend_url, self.request_timeout)
    }

    /// The log filter for the default and configured suppression patterns.
    ///
    /// # Errors
    /// Returns [Error::InvalidSuppressionPattern] if a configured pattern is
    /// not a valid regular expression.
    pub fn noise_filter(&self) -> Result<NoiseFilter, Error> {
        NoiseFilter::with_defaults(&self.suppress_patterns)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::Error;

    use super::Config;

    #[test]
    fn defaults() {
        let config = Config::new("http://localhost:8001");

        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.address().to_string(), "127.0.0.1:3000");
        assert!(config.backend_client().is_ok());
        assert!(config.noise_filter().is_ok());
    }

    #[test]
    fn invalid_backend_url() {
        let config = Config::new("not a url");

        assert!(matches!(
            config.backend_client(),
            Err(Error::InvalidBackendUrl(_))
        ));
    }

    #[test]
    fn invalid_suppression_pattern() {
        let config = Config {
            suppress_patterns: vec!["[".to_owned()],
            ..Config::new("http://localhost:8001")
        };

        assert!(matches!(
            config.noise_filter(),
            Err(Error::InvalidSuppressionPattern(_))
        ));
    }
}
