use thiserror::Error;

/// Connection-level failure. Terminal for the session: the stream ends for
/// every subscriber and nothing reconnects until the owner rebuilds the
/// whole pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Protocol(String),
    #[error("stream closed by remote")]
    Closed,
}
