//! Socket Monitor
//!
//! Opens one WebSocket connection, mirrors its lifecycle into a document and
//! renders every JSON payload it receives as a pretty-printed block.
//!
//! Socket I/O runs on its own thread; lifecycle events are pushed to a
//! single-threaded engine loop that owns the document, so every reaction
//! runs to completion before the next one starts.

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod monitor;
pub mod surface;
pub mod transport;

pub use config::{DEFAULT_ENDPOINT, MonitorConfig};
pub use document::{Document, Node, NodeId};
pub use engine::{MonitorBuilder, MonitorClient, MonitorCommand, MonitorEngine, MonitorReport};
pub use error::MonitorError;
pub use monitor::{ConnectionMonitor, ConnectionState, LifecycleEvent, Mutation};
pub use surface::{ConsoleSurface, RecordingSurface, Surface};
pub use transport::{Connection, ReadyState};
