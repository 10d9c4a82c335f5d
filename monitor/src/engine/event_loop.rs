use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::config::MonitorConfig;
use crate::document::Document;
use crate::engine::MonitorClient;
use crate::error::{MonitorError, Result};
use crate::monitor::{ConnectionMonitor, ConnectionState, LifecycleEvent};
use crate::surface::Surface;
use crate::transport::{Connection, ReadyState};

/// Commands that can be sent to the monitor thread.
#[derive(Debug)]
pub enum MonitorCommand {
    /// Run the reaction for a lifecycle event.
    Dispatch(LifecycleEvent),
    /// The transport finished; everything it produced is already queued.
    TransportEnded,
    /// Stop the loop (page teardown).
    Shutdown,
}

/// What the monitor looked like when its loop stopped.
#[derive(Debug)]
pub struct MonitorReport {
    pub state: ConnectionState,
    pub document: Document,
    pub decode_errors: usize,
}

/// Connection monitor running on a dedicated thread.
pub struct MonitorEngine {
    client: MonitorClient,
    connection: Connection,
    handle: JoinHandle<ConnectionMonitor>,
}

impl MonitorEngine {
    pub(crate) fn start(
        config: MonitorConfig,
        surface: Option<Box<dyn Surface>>,
        client: MonitorClient,
        receiver: Receiver<MonitorCommand>,
    ) -> Result<Self> {
        let endpoint = config.endpoint().clone();
        let monitor = ConnectionMonitor::new(endpoint.as_str());

        let handle = thread::Builder::new()
            .name("socket-monitor".into())
            .spawn(move || run_monitor_loop(receiver, monitor, surface))?;

        let connection = Connection::open(endpoint, client.clone())?;

        Ok(Self {
            client,
            connection,
            handle,
        })
    }

    /// Ready state of the underlying socket.
    pub fn ready_state(&self) -> ReadyState {
        self.connection.ready_state()
    }

    /// Wait until the connection ends and the monitor loop has drained.
    pub fn join(self) -> Result<MonitorReport> {
        let monitor = self.handle.join().map_err(|_| MonitorError::EngineCrashed)?;
        self.connection.join();
        Ok(report(monitor))
    }

    /// Unload the page: stop the monitor and drop the connection without
    /// waiting for the server.
    pub fn teardown(self) -> Result<MonitorReport> {
        self.connection.abort();
        self.client.shutdown();
        let monitor = self.handle.join().map_err(|_| MonitorError::EngineCrashed)?;
        Ok(report(monitor))
    }
}

fn report(monitor: ConnectionMonitor) -> MonitorReport {
    let (state, document, decode_errors) = monitor.into_parts();
    MonitorReport {
        state,
        document,
        decode_errors,
    }
}

/// Main loop for the monitor thread.
fn run_monitor_loop(
    receiver: Receiver<MonitorCommand>,
    mut monitor: ConnectionMonitor,
    mut surface: Option<Box<dyn Surface>>,
) -> ConnectionMonitor {
    log::info!("Monitor thread started for {}", monitor.url());

    loop {
        match receiver.recv() {
            Ok(MonitorCommand::Dispatch(event)) => {
                if let Some(mutation) = monitor.handle(event) {
                    if let Some(surface) = surface.as_mut() {
                        surface.present(monitor.document(), mutation);
                    }
                }
            }
            Ok(MonitorCommand::TransportEnded) => {
                log::info!("Transport ended, stopping monitor ({})", monitor.state());
                break;
            }
            Ok(MonitorCommand::Shutdown) => {
                log::info!("Shutting down monitor");
                break;
            }
            Err(mpsc::RecvError) => {
                log::warn!("All monitor clients dropped, stopping monitor");
                break;
            }
        }
    }

    monitor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;
    use crate::monitor::Mutation;
    use crate::surface::RecordingSurface;

    fn run(commands: Vec<MonitorCommand>) -> (ConnectionMonitor, RecordingSurface) {
        let (sender, receiver) = mpsc::channel();
        for command in commands {
            sender.send(command).unwrap();
        }
        let recorder = RecordingSurface::new();
        let monitor = run_monitor_loop(
            receiver,
            ConnectionMonitor::new("ws://localhost:8080/ws"),
            Some(Box::new(recorder.clone())),
        );
        (monitor, recorder)
    }

    #[test]
    fn test_commands_apply_in_order() {
        let (monitor, recorder) = run(vec![
            MonitorCommand::Dispatch(LifecycleEvent::Open),
            MonitorCommand::Dispatch(LifecycleEvent::message(r#"{"a":1}"#)),
            MonitorCommand::Dispatch(LifecycleEvent::message("[]")),
            MonitorCommand::TransportEnded,
        ]);

        assert_eq!(monitor.state(), ConnectionState::Open);
        let blocks = monitor.document().blocks();
        assert_eq!(blocks[0], &Node::Pre("{\n  \"a\": 1\n}".to_string()));
        assert_eq!(blocks[1], &Node::Pre("[]".to_string()));

        let frames = recorder.frames();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], (Mutation::Replaced, "Connection open".to_string()));
        assert!(matches!(frames[2].0, Mutation::Appended(_)));
    }

    #[test]
    fn test_ignored_events_reach_no_surface() {
        let (monitor, recorder) = run(vec![
            MonitorCommand::Dispatch(LifecycleEvent::Open),
            MonitorCommand::Dispatch(LifecycleEvent::close(1000, "")),
            MonitorCommand::Dispatch(LifecycleEvent::error("late")),
            MonitorCommand::Dispatch(LifecycleEvent::message("{}")),
            MonitorCommand::Shutdown,
        ]);

        assert_eq!(monitor.state(), ConnectionState::Closed);
        assert_eq!(recorder.frames().len(), 2);
        assert_eq!(
            recorder.frames().last(),
            Some(&(Mutation::Replaced, "connection closed".to_string()))
        );
    }

    #[test]
    fn test_commands_after_shutdown_are_not_applied() {
        let (monitor, _) = run(vec![
            MonitorCommand::Dispatch(LifecycleEvent::Open),
            MonitorCommand::Shutdown,
            MonitorCommand::Dispatch(LifecycleEvent::message("{}")),
        ]);

        assert!(monitor.document().blocks().is_empty());
    }

    #[test]
    fn test_loop_stops_when_clients_are_gone() {
        let (sender, receiver) = mpsc::channel();
        sender.send(MonitorCommand::Dispatch(LifecycleEvent::Open)).unwrap();
        drop(sender);

        let monitor = run_monitor_loop(receiver, ConnectionMonitor::new("ws://x/ws"), None);
        assert_eq!(monitor.state(), ConnectionState::Open);
    }
}
