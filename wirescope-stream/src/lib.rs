mod connection;
mod error;
mod gate;
#[cfg(test)]
mod gate_test;

use url::Url;
use wirescope_core::snapshot_stream_endpoint;

pub use connection::Connection;
pub use error::TransportError;
pub use gate::{GatedStream, StreamEvent, Subscription};

/// Live snapshot session: endpoint resolution, one connection, and the
/// pausable fan-out behind a single handle.
#[derive(Debug)]
pub struct SnapshotStream {
    gate: GatedStream,
    connection: Connection,
}

impl SnapshotStream {
    /// Resolves the stream endpoint from the backend base URL and connects.
    pub async fn connect(base: &Url) -> Result<Self, TransportError> {
        let endpoint =
            snapshot_stream_endpoint(base).map_err(|err| TransportError::Connect(err.to_string()))?;
        Self::open(endpoint).await
    }

    pub async fn open(endpoint: Url) -> Result<Self, TransportError> {
        let gate = GatedStream::new();
        let connection = Connection::open(endpoint, gate.clone()).await?;
        Ok(Self { gate, connection })
    }

    pub fn subscribe(&self) -> Subscription {
        self.gate.subscribe()
    }

    pub fn pause(&self) {
        self.gate.pause();
    }

    pub fn play(&self) {
        self.gate.play();
    }

    pub fn is_paused(&self) -> bool {
        self.gate.is_paused()
    }

    /// Tears the session down: closes the socket and releases every
    /// subscriber. Idempotent.
    pub fn dispose(&mut self) {
        self.connection.dispose();
        self.gate.shutdown();
    }
}

impl Drop for SnapshotStream {
    fn drop(&mut self) {
        self.dispose();
    }
}
