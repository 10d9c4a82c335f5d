use url::Url;

use crate::error::{MonitorError, Result};

/// Endpoint watched when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080/ws";

/// Monitor configuration. The endpoint is fixed once the engine starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    endpoint: Url,
}

impl MonitorConfig {
    /// Parse and validate an endpoint. Only plain `ws` is accepted; the
    /// transport carries no TLS stack.
    pub fn new(endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint).map_err(|source| MonitorError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;

        match url.scheme() {
            "ws" => Ok(Self { endpoint: url }),
            other => Err(MonitorError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = MonitorConfig::default();
        assert_eq!(config.endpoint().as_str(), "ws://localhost:8080/ws");
    }

    #[test]
    fn test_accepts_ws() {
        let config = MonitorConfig::new("ws://127.0.0.1:9001/feed").unwrap();
        assert_eq!(config.endpoint().port(), Some(9001));
    }

    #[test]
    fn test_rejects_other_schemes() {
        let err = MonitorConfig::new("http://localhost:8080/ws").unwrap_err();
        assert!(matches!(err, MonitorError::UnsupportedScheme(ref s) if s == "http"));

        let err = MonitorConfig::new("wss://example.com/ws").unwrap_err();
        assert!(matches!(err, MonitorError::UnsupportedScheme(ref s) if s == "wss"));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = MonitorConfig::new("not a url").unwrap_err();
        assert!(matches!(err, MonitorError::InvalidEndpoint { .. }));
    }
}
