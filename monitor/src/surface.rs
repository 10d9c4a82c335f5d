//! Surfaces
//!
//! A surface is where document changes become visible. The engine hands it
//! every mutation right after the reaction that produced it.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::document::Document;
use crate::monitor::Mutation;

pub trait Surface: Send + 'static {
    fn present(&mut self, document: &Document, mutation: Mutation);
}

/// Writes status lines and payload blocks to any writer, usually stdout.
pub struct ConsoleSurface<W> {
    out: W,
}

impl<W: Write + Send + 'static> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_mutation(&mut self, document: &Document, mutation: Mutation) -> std::io::Result<()> {
        match mutation {
            Mutation::Replaced => {
                for node in document.nodes() {
                    writeln!(self.out, "== {}", node.text())?;
                }
            }
            Mutation::Appended(id) => {
                if let Some(node) = document.get(id) {
                    writeln!(self.out, "{}\n", node.text())?;
                }
            }
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> Surface for ConsoleSurface<W> {
    fn present(&mut self, document: &Document, mutation: Mutation) {
        if let Err(e) = self.write_mutation(document, mutation) {
            log::warn!("Failed to write to console: {}", e);
        }
    }
}

/// Keeps every mutation together with a snapshot of the visible text.
///
/// Cloning shares the underlying log, so one handle can be given to the
/// engine and the other kept for inspection.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    frames: Arc<Mutex<Vec<(Mutation, String)>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<(Mutation, String)> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Mutation, String)>> {
        self.frames.lock().unwrap_or_else(|poisoned| {
            log::warn!("Recording surface lock poisoned, keeping recorded frames");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl Surface for RecordingSurface {
    fn present(&mut self, document: &Document, mutation: Mutation) {
        self.lock().push((mutation, document.text()));
    }
}
