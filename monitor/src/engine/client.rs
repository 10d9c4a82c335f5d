use std::sync::mpsc;

use crate::engine::MonitorCommand;
use crate::monitor::LifecycleEvent;

/// Client handle for pushing commands to the monitor thread.
///
/// Cheap to clone and safe to move across threads.
#[derive(Clone, Debug)]
pub struct MonitorClient {
    sender: mpsc::Sender<MonitorCommand>,
}

impl MonitorClient {
    pub(crate) fn new(sender: mpsc::Sender<MonitorCommand>) -> Self {
        Self { sender }
    }

    /// Deliver a lifecycle event to the monitor.
    pub fn dispatch(&self, event: LifecycleEvent) {
        log::debug!("[WebSocket] Dispatching {} event", event.kind());
        if let Err(e) = self.sender.send(MonitorCommand::Dispatch(event)) {
            log::error!("Failed to dispatch event: {}", e);
        }
    }

    /// Tell the monitor the transport has nothing more to deliver.
    pub fn transport_ended(&self) {
        if let Err(e) = self.sender.send(MonitorCommand::TransportEnded) {
            log::warn!("Failed to send transport ended command: {}", e);
        }
    }

    /// Stop the monitor loop.
    pub fn shutdown(&self) {
        let _ = self.sender.send(MonitorCommand::Shutdown);
    }
}
