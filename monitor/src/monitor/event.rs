/// Lifecycle events delivered to the monitor, one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Open,
    /// Transport failure with a human-readable message
    Error { message: String },
    /// Connection closed, with the close code and reason when known
    Close { code: u16, reason: String },
    /// A text frame carrying (ideally) one JSON value
    Message { data: String },
}

impl LifecycleEvent {
    pub fn error(message: impl Into<String>) -> Self {
        LifecycleEvent::Error {
            message: message.into(),
        }
    }

    pub fn close(code: u16, reason: impl Into<String>) -> Self {
        LifecycleEvent::Close {
            code,
            reason: reason.into(),
        }
    }

    pub fn message(data: impl Into<String>) -> Self {
        LifecycleEvent::Message { data: data.into() }
    }

    /// Event name as a browser would report it.
    pub fn kind(&self) -> &'static str {
        match self {
            LifecycleEvent::Open => "open",
            LifecycleEvent::Error { .. } => "error",
            LifecycleEvent::Close { .. } => "close",
            LifecycleEvent::Message { .. } => "message",
        }
    }
}
