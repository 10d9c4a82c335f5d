//! Connection Monitor
//!
//! Holds the lifecycle state of the single connection together with the
//! document, and reacts to the four lifecycle events: open, error, close
//! and message.

mod event;
mod reactions;
mod state;

pub use event::LifecycleEvent;
pub use reactions::{ConnectionMonitor, Mutation, pretty_print};
pub use state::ConnectionState;
