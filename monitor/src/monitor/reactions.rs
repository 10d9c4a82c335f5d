use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::document::{Document, Node, NodeId};

use super::{ConnectionState, LifecycleEvent};

/// Status line shown once the connection opens.
pub const OPEN_TEXT: &str = "Connection open";
/// Status line shown once the connection closes.
pub const CLOSED_TEXT: &str = "connection closed";

/// How a reaction changed the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The body was replaced wholesale
    Replaced,
    /// A block was appended and scrolled into view
    Appended(NodeId),
}

/// The single connection of a page and everything it renders.
#[derive(Debug)]
pub struct ConnectionMonitor {
    url: String,
    state: ConnectionState,
    document: Document,
    decode_errors: usize,
}

impl ConnectionMonitor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: ConnectionState::default(),
            document: Document::new(),
            decode_errors: 0,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of payloads that failed to decode as JSON.
    pub fn decode_errors(&self) -> usize {
        self.decode_errors
    }

    pub fn into_parts(self) -> (ConnectionState, Document, usize) {
        (self.state, self.document, self.decode_errors)
    }

    /// Route an event to its reaction. Returns `None` when the event had no
    /// effect in the current state.
    pub fn handle(&mut self, event: LifecycleEvent) -> Option<Mutation> {
        match event {
            LifecycleEvent::Open => self.on_open(),
            LifecycleEvent::Error { message } => self.on_error(&message),
            LifecycleEvent::Close { code, reason } => self.on_close(code, &reason),
            LifecycleEvent::Message { data } => self.on_message(&data),
        }
    }

    pub fn on_open(&mut self) -> Option<Mutation> {
        if !self.transition(ConnectionState::Open, "open") {
            return None;
        }
        log::info!("[WebSocket] connection open ({})", self.url);
        self.document.replace_body(OPEN_TEXT);
        Some(Mutation::Replaced)
    }

    pub fn on_error(&mut self, message: &str) -> Option<Mutation> {
        if !self.transition(ConnectionState::Errored, "error") {
            return None;
        }
        log::error!("[WebSocket] error occurred: {}", message);
        self.document.replace_body(message);
        Some(Mutation::Replaced)
    }

    pub fn on_close(&mut self, code: u16, reason: &str) -> Option<Mutation> {
        if !self.transition(ConnectionState::Closed, "close") {
            return None;
        }
        log::info!("[WebSocket] connection closed (code {}, reason {:?})", code, reason);
        self.document.replace_body(CLOSED_TEXT);
        Some(Mutation::Replaced)
    }

    pub fn on_message(&mut self, data: &str) -> Option<Mutation> {
        if self.state != ConnectionState::Open {
            log::debug!("[WebSocket] ignoring message while {}", self.state);
            return None;
        }

        let node = match pretty_print(data) {
            Ok(text) => Node::Pre(text),
            Err(e) => {
                self.decode_errors += 1;
                log::warn!(
                    "[WebSocket] dropping undecodable payload ({} bytes): {}",
                    data.len(),
                    e
                );
                Node::Diagnostic(format!("invalid JSON payload: {}", e))
            }
        };

        let id = self.document.append(node);
        self.document.scroll_into_view(id);
        Some(Mutation::Appended(id))
    }

    fn transition(&mut self, next: ConnectionState, event: &str) -> bool {
        if !self.state.can_transition_to(next) {
            log::debug!("[WebSocket] ignoring {} event while {}", event, self.state);
            return false;
        }
        self.state = next;
        true
    }
}

/// Parse a payload as JSON and re-serialize it with 2-space indentation.
///
/// Number literals are written back exactly as received and nesting depth
/// is only bounded by memory.
pub fn pretty_print(data: &str) -> Result<String, serde_json::Error> {
    let mut json = serde_json::Deserializer::from_str(data);
    json.disable_recursion_limit();
    let value = serde_json::Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;

    let mut out = Vec::with_capacity(data.len() * 2);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::new());
    value.serialize(serde_stacker::Serializer::new(&mut ser))?;

    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}
