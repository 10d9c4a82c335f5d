//! WebSocket Transport
//!
//! Owns the socket on its own thread and tokio runtime, and turns socket
//! activity into lifecycle events for the monitor.

mod connection;
mod ready_state;

pub use connection::Connection;
pub use ready_state::ReadyState;
