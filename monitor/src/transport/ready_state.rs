use std::sync::atomic::{AtomicU8, Ordering};

/// WebSocket ready states (matching browser API)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

impl ReadyState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            2 => ReadyState::Closing,
            _ => ReadyState::Closed,
        }
    }
}

/// Ready state shared between the socket thread and its owner.
#[derive(Debug)]
pub(crate) struct SharedReadyState(AtomicU8);

impl SharedReadyState {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(ReadyState::Connecting as u8))
    }

    pub(crate) fn load(&self) -> ReadyState {
        ReadyState::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub(crate) fn store(&self, state: ReadyState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }
}
