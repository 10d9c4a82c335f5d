use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::Notify;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use url::Url;

use super::ready_state::{ReadyState, SharedReadyState};
use crate::engine::MonitorClient;
use crate::monitor::LifecycleEvent;

/// Close code reported when the connection dropped without a close frame.
const ABNORMAL_CLOSURE: u16 = 1006;
/// Close code reported when the server closed without giving a code.
const NO_STATUS_RECEIVED: u16 = 1005;

/// The single outbound WebSocket connection.
///
/// Opening returns immediately; progress is reported to the monitor as
/// lifecycle events. Nothing is ever sent to the server.
pub struct Connection {
    url: Url,
    ready_state: Arc<SharedReadyState>,
    abort: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl Connection {
    /// Connect to `url` on a dedicated thread.
    pub fn open(url: Url, client: MonitorClient) -> io::Result<Self> {
        let ready_state = Arc::new(SharedReadyState::new());
        let abort = Arc::new(Notify::new());

        let thread_url = url.clone();
        let thread_state = ready_state.clone();
        let thread_abort = abort.clone();

        // Spawn on a separate thread with its own tokio runtime
        let handle = thread::Builder::new()
            .name("socket-monitor-ws".into())
            .spawn(move || run_socket_thread(thread_url, client, thread_state, thread_abort))?;

        Ok(Self {
            url,
            ready_state,
            abort,
            handle,
        })
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state.load()
    }

    /// Wait for the socket thread to finish on its own.
    pub fn join(self) {
        if self.handle.join().is_err() {
            log::error!("[WebSocket] Socket thread panicked");
        }
    }

    /// Drop the connection without producing further events.
    pub fn abort(self) {
        if self.ready_state.load() != ReadyState::Closed {
            self.ready_state.store(ReadyState::Closing);
        }
        log::info!("[WebSocket] Aborting connection to {}", self.url);
        self.abort.notify_one();
        self.join();
    }
}

fn run_socket_thread(
    url: Url,
    client: MonitorClient,
    ready_state: Arc<SharedReadyState>,
    abort: Arc<Notify>,
) {
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("[WebSocket] Failed to create runtime: {}", e);
            fail(
                &client,
                &ready_state,
                format!("Runtime failed: {}", e),
                "Runtime failed",
            );
            client.transport_ended();
            return;
        }
    };

    let aborted = rt.block_on(async {
        tokio::select! {
            _ = abort.notified() => true,
            _ = drive(&url, &client, &ready_state) => false,
        }
    });

    ready_state.store(ReadyState::Closed);
    if aborted {
        log::info!("[WebSocket] Connection aborted");
    } else {
        log::info!("[WebSocket] Connection ended");
        client.transport_ended();
    }
}

/// Connect, handshake and pump frames until the connection ends.
async fn drive(url: &Url, client: &MonitorClient, ready_state: &SharedReadyState) {
    log::info!("[WebSocket] Connecting to {}", url);

    let host = url.host_str().unwrap_or("localhost");
    let port = url.port().unwrap_or(80);
    let addr = format!("{}:{}", host, port);

    log::info!("[WebSocket] Connecting TCP to {}", addr);

    let tcp_stream = match TcpStream::connect(&addr).await {
        Ok(stream) => {
            log::info!("[WebSocket] TCP connected");
            stream
        }
        Err(e) => {
            log::error!("[WebSocket] TCP connection failed: {}", e);
            fail(
                client,
                ready_state,
                format!("TCP connection failed: {}", e),
                "Connection failed",
            );
            return;
        }
    };

    let request = match url.as_str().into_client_request() {
        Ok(req) => req,
        Err(e) => {
            log::error!("[WebSocket] Failed to create request: {}", e);
            fail(
                client,
                ready_state,
                format!("Invalid request: {}", e),
                "Invalid request",
            );
            return;
        }
    };

    log::info!("[WebSocket] Performing WebSocket handshake");

    let mut ws_stream = match tokio_tungstenite::client_async(request, tcp_stream).await {
        Ok((stream, response)) => {
            log::info!(
                "[WebSocket] Connected successfully (status: {})",
                response.status()
            );
            stream
        }
        Err(e) => {
            log::error!("[WebSocket] Handshake failed: {}", e);
            fail(
                client,
                ready_state,
                format!("Handshake failed: {}", e),
                "Handshake failed",
            );
            return;
        }
    };

    ready_state.store(ReadyState::Open);
    client.dispatch(LifecycleEvent::Open);

    loop {
        match ws_stream.next().await {
            Some(Ok(Message::Text(text))) => {
                log::debug!("[WebSocket] Received: {}", preview(&text));
                client.dispatch(LifecycleEvent::message(text.as_str()));
            }
            Some(Ok(Message::Binary(data))) => {
                log::debug!("[WebSocket] Ignoring binary frame ({} bytes)", data.len());
            }
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                // Handled by tungstenite
            }
            Some(Ok(Message::Close(frame))) => {
                let (code, reason) = frame
                    .map(|f| (u16::from(f.code), f.reason.as_str().to_string()))
                    .unwrap_or((NO_STATUS_RECEIVED, String::new()));
                log::info!("[WebSocket] Received close: {} {}", code, reason);
                ready_state.store(ReadyState::Closing);
                client.dispatch(LifecycleEvent::close(code, reason));

                // Flush the close reply queued by tungstenite
                if let Err(e) = ws_stream.close(None).await {
                    log::debug!("[WebSocket] Close handshake incomplete: {}", e);
                }
                break;
            }
            Some(Ok(Message::Frame(_))) => {}
            Some(Err(e)) => {
                log::error!("[WebSocket] Read error: {}", e);
                fail(client, ready_state, e.to_string(), "Connection error");
                break;
            }
            None => {
                log::info!("[WebSocket] Stream ended without close frame");
                client.dispatch(LifecycleEvent::close(ABNORMAL_CLOSURE, "Connection ended"));
                break;
            }
        }
    }
}

/// Report a failure the way a browser does: `error`, then `close`.
fn fail(client: &MonitorClient, ready_state: &SharedReadyState, message: String, reason: &str) {
    ready_state.store(ReadyState::Closed);
    client.dispatch(LifecycleEvent::error(message));
    client.dispatch(LifecycleEvent::close(ABNORMAL_CLOSURE, reason));
}

/// First 100 characters of a payload, for logging.
fn preview(text: &str) -> &str {
    match text.char_indices().nth(100) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
