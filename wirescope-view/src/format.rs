use std::borrow::Cow;

/// Display mode for a message body, picked by substring match on the
/// content type. Anything unrecognized falls back to plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    Json,
    Xml,
    Html,
    Plaintext,
}

impl BodyMode {
    pub fn from_content_type(content_type: &str) -> Self {
        let lowered = content_type.to_ascii_lowercase();
        if lowered.contains("json") {
            BodyMode::Json
        } else if lowered.contains("xml") {
            BodyMode::Xml
        } else if lowered.contains("html") {
            BodyMode::Html
        } else {
            BodyMode::Plaintext
        }
    }
}

/// Splits a raw query string into percent-decoded pairs, keys in first
/// occurrence order, repeated keys folded into one value list in arrival
/// order.
pub fn decompose_query(raw_query: &str) -> Vec<(String, Vec<String>)> {
    let mut pairs: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in url::form_urlencoded::parse(raw_query.as_bytes()) {
        append_pair(&mut pairs, key, value);
    }
    pairs
}

fn append_pair(pairs: &mut Vec<(String, Vec<String>)>, key: Cow<'_, str>, value: Cow<'_, str>) {
    match pairs.iter_mut().find(|(name, _)| *name == key) {
        Some((_, values)) => values.push(value.into_owned()),
        None => pairs.push((key.into_owned(), vec![value.into_owned()])),
    }
}

const BYTE_UNITS: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

pub fn human_bytes(bytes: i64) -> String {
    let mut value = bytes as f64;
    if value.abs() < 1024.0 {
        return format!("{bytes} B");
    }
    let mut unit = 0;
    value /= 1024.0;
    while value.abs() >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", BYTE_UNITS[unit])
}

const NS_PER_MILLISECOND: f64 = 1e6;
const NS_PER_SECOND: f64 = 1e9;
const NS_PER_MINUTE: f64 = NS_PER_SECOND * 60.0;
const NS_PER_HOUR: f64 = NS_PER_MINUTE * 60.0;
const NS_PER_DAY: f64 = NS_PER_HOUR * 24.0;

pub fn human_duration_nanos(nanos: u64) -> String {
    let value = nanos as f64;
    if value >= NS_PER_DAY {
        format!("{:.1}d", value / NS_PER_DAY)
    } else if value >= NS_PER_HOUR {
        format!("{:.1}hr", value / NS_PER_HOUR)
    } else if value >= NS_PER_MINUTE {
        format!("{:.1}m", value / NS_PER_MINUTE)
    } else if value >= NS_PER_SECOND {
        format!("{:.1}s", value / NS_PER_SECOND)
    } else if value >= NS_PER_MILLISECOND {
        format!("{:.1}ms", value / NS_PER_MILLISECOND)
    } else {
        format!("{nanos}ns")
    }
}
