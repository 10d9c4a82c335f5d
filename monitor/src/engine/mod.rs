//! Monitor Engine
//!
//! Runs the connection monitor on a dedicated thread. Event sources never
//! touch the monitor directly; they push commands through a
//! [`MonitorClient`] and the engine applies them one at a time.

mod builder;
mod client;
mod event_loop;

pub use builder::MonitorBuilder;
pub use client::MonitorClient;
pub use event_loop::{MonitorCommand, MonitorEngine, MonitorReport};
