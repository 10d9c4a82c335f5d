use std::sync::mpsc;

use crate::config::MonitorConfig;
use crate::engine::{MonitorClient, MonitorEngine};
use crate::error::Result;
use crate::surface::Surface;

/// Configures and starts a [`MonitorEngine`].
pub struct MonitorBuilder {
    config: MonitorConfig,
    surface: Option<Box<dyn Surface>>,
}

impl MonitorBuilder {
    pub fn new() -> Self {
        MonitorBuilder {
            config: MonitorConfig::default(),
            surface: None,
        }
    }

    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_surface(mut self, surface: impl Surface) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Start the monitor thread, then open the connection.
    pub fn start(self) -> Result<MonitorEngine> {
        let (sender, receiver) = mpsc::channel();
        let client = MonitorClient::new(sender);
        MonitorEngine::start(self.config, self.surface, client, receiver)
    }
}

impl Default for MonitorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
