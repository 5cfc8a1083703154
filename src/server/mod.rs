//! TCP transport.
//!
//! One OS thread per connection. Each connection carries exactly one call:
//! a game (`play`) or a statistics query. See [`crate::protocol`] for the
//! line format.

mod connection;

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::{BestEffort, Result, WordleError};
use crate::service::GameService;

pub use connection::handle_connection;

/// Listening game server.
pub struct Server {
    listener: TcpListener,
    service: Arc<GameService>,
    /// Read timeout per connection. `None` waits forever.
    idle_timeout: Option<Duration>,
}

impl Server {
    /// Bind to `address` (e.g. `127.0.0.1:7043`).
    pub fn bind(address: &str, service: Arc<GameService>) -> Result<Self> {
        let listener = TcpListener::bind(address)?;
        Ok(Self {
            listener,
            service,
            idle_timeout: None,
        })
    }

    /// Abandon sessions whose client sends nothing for `timeout`.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails.
    pub fn serve(self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => self.spawn(stream),
                Err(e) => tracing::warn!("Failed to accept connection: {}", e),
            }
        }
        Ok(())
    }

    fn spawn(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .map_err(WordleError::from)
            .best_effort_with("Failed to read peer address", "unknown".to_string());
        let service = Arc::clone(&self.service);
        let idle_timeout = self.idle_timeout;

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer))
            .spawn(move || {
                tracing::debug!("Connection from {}", peer);
                if let Err(e) = handle_connection(stream, &service, idle_timeout) {
                    tracing::info!("Connection from {} ended: {}", peer, e);
                }
            });

        if let Err(e) = spawned {
            tracing::warn!("Failed to start connection thread: {}", e);
        }
    }
}
