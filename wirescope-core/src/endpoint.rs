use thiserror::Error;
use url::Url;

pub const SNAPSHOT_STREAM_PATH: &str = "__admin/api/snapshot/stream";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
    #[error("invalid base url: {0}")]
    InvalidBase(String),
}

/// Derives the snapshot stream endpoint from the backend's base URL:
/// upgrades the scheme to its WebSocket equivalent, rewrites the path to the
/// fixed admin stream resource, and drops any query or fragment. Applying it
/// to its own output yields the same URL.
pub fn snapshot_stream_endpoint(base: &Url) -> Result<Url, EndpointError> {
    let scheme = match base.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
    };
    let mut target = base.clone();
    target
        .set_scheme(scheme)
        .map_err(|()| EndpointError::InvalidBase(base.to_string()))?;
    target.set_path(SNAPSHOT_STREAM_PATH);
    target.set_query(None);
    target.set_fragment(None);
    Ok(target)
}
