use thiserror::Error;

use crate::snapshot::Snapshot;

/// A wire frame that failed structural parse. Carries the original frame so
/// observers can log it; one bad frame never terminates the stream.
#[derive(Debug, Clone, Error)]
#[error("invalid snapshot frame: {reason}")]
pub struct DecodeError {
    pub frame: String,
    pub reason: String,
}

pub fn decode_frame(raw: &str) -> Result<Snapshot, DecodeError> {
    serde_json::from_str(raw).map_err(|err| DecodeError {
        frame: raw.to_string(),
        reason: err.to_string(),
    })
}
