use thiserror::Error;

/// Errors surfaced to callers of the monitor.
///
/// Socket failures are not in here: they reach the monitor as `error`
/// lifecycle events and end up in the document instead.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported endpoint scheme {0:?}, expected ws")]
    UnsupportedScheme(String),

    #[error("failed to spawn monitor thread: {0}")]
    EngineSpawn(#[from] std::io::Error),

    #[error("monitor engine panicked")]
    EngineCrashed,
}

pub type Result<T, E = MonitorError> = std::result::Result<T, E>;
