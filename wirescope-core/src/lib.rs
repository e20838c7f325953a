mod decode;
mod endpoint;
mod snapshot;

pub use decode::{DecodeError, decode_frame};
pub use endpoint::{EndpointError, SNAPSHOT_STREAM_PATH, snapshot_stream_endpoint};
pub use snapshot::{HttpRequest, HttpResponse, Snapshot, SnapshotUrl};
