//! Serve command.
//!
//! Wires the configured word list and stats store into a game service and
//! runs the TCP server.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::server::Server;
use crate::service::GameService;
use crate::stats::{FileStatsStore, MemoryStatsStore, StatsStore};
use crate::words::WordList;

/// Options for the serve command.
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    /// Bind address, overriding config.
    pub address: Option<String>,
    /// Keep statistics in memory only.
    pub ephemeral: bool,
}

/// The serve command implementation.
pub struct ServeCommand {
    config: Config,
    clock: Arc<dyn Clock>,
}

impl ServeCommand {
    /// Create a new serve command on the system clock.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a different clock (tests).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the game service from config.
    ///
    /// Fails when a configured word list cannot be loaded.
    pub fn build_service(&self, options: &ServeOptions) -> Result<GameService> {
        let words = WordList::load(self.config.words.list_path.as_deref(), self.clock.clone())?;
        tracing::info!("Word list ready ({} words)", words.len());

        let stats: Arc<dyn StatsStore> = if options.ephemeral {
            tracing::info!("Statistics kept in memory only");
            Arc::new(MemoryStatsStore::new(self.clock.clone()))
        } else {
            tracing::info!("Statistics file: {}", self.config.stats.path.display());
            Arc::new(FileStatsStore::new(
                &self.config.stats.path,
                self.clock.clone(),
            ))
        };

        Ok(GameService::new(Arc::new(words), stats)
            .with_count_abandoned(self.config.game.count_abandoned))
    }

    /// Build the service and bind the listener.
    pub fn bind(&self, options: &ServeOptions) -> Result<Server> {
        let service = Arc::new(self.build_service(options)?);
        let address = options
            .address
            .as_deref()
            .unwrap_or(&self.config.server.address);

        Ok(Server::bind(address, service)?.with_idle_timeout(self.config.server.idle_timeout()))
    }

    /// Serve until the listener fails.
    pub fn run(&self, options: &ServeOptions) -> Result<()> {
        self.bind(options)?.serve()
    }
}
