use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// One intercepted request/response exchange as reported by the capture
/// backend. Field names mirror the backend's wire JSON exactly; a snapshot
/// is immutable once decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    #[serde(rename = "ID")]
    pub id: String,
    /// Elapsed time in nanoseconds, carried as numeric text on the wire.
    pub duration: String,
    pub secure: bool,
    /// Empty when the exchange completed normally.
    pub error: String,
    pub request: HttpRequest,
    /// Absent while the exchange is pending or when it errored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<HttpResponse>,
}

impl Snapshot {
    pub fn duration_nanos(&self) -> Option<u64> {
        self.duration.parse().ok()
    }

    pub fn completed(&self) -> bool {
        self.response.is_some()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct HttpRequest {
    pub body: String,
    pub content_type: String,
    /// -1 when the backend could not determine the length.
    pub content_length: i64,
    pub header: HashMap<String, Vec<String>>,
    pub raw: String,
    #[serde(rename = "URL")]
    pub url: SnapshotUrl,
    pub method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct HttpResponse {
    pub body: String,
    pub content_type: String,
    pub content_length: i64,
    pub header: HashMap<String, Vec<String>>,
    pub raw: String,
    pub status: String,
    pub status_code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotUrl {
    pub scheme: String,
    pub opaque: String,
    pub user: Option<String>,
    pub host: String,
    pub path: String,
    pub raw_query: String,
}

impl SnapshotUrl {
    /// Assembles the request target for display in table cells.
    pub fn display(&self) -> String {
        if self.raw_query.is_empty() {
            format!("{}://{}{}", self.scheme, self.host, self.path)
        } else {
            format!("{}://{}{}?{}", self.scheme, self.host, self.path, self.raw_query)
        }
    }

    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.display())
    }
}
