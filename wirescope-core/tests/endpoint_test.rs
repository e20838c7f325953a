use assert_matches::assert_matches;
use url::Url;
use wirescope_core::{EndpointError, snapshot_stream_endpoint};

#[test]
fn upgrades_https_and_rewrites_path() {
    let base = Url::parse("https://host:9090/app?x=1").unwrap();
    let endpoint = snapshot_stream_endpoint(&base).unwrap();

    assert_eq!(endpoint.scheme(), "wss");
    assert_eq!(endpoint.host_str(), Some("host"));
    assert_eq!(endpoint.port(), Some(9090));
    assert!(endpoint.path().ends_with("__admin/api/snapshot/stream"));
    assert_eq!(endpoint.query(), None);
}

#[test]
fn upgrades_plain_http_to_ws() {
    let base = Url::parse("http://127.0.0.1:8080/").unwrap();
    let endpoint = snapshot_stream_endpoint(&base).unwrap();
    assert_eq!(
        endpoint.as_str(),
        "ws://127.0.0.1:8080/__admin/api/snapshot/stream"
    );
}

#[test]
fn is_idempotent_on_its_own_output() {
    let base = Url::parse("https://host/deep/path#frag").unwrap();
    let once = snapshot_stream_endpoint(&base).unwrap();
    let twice = snapshot_stream_endpoint(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn rejects_non_http_schemes() {
    let base = Url::parse("ftp://host/").unwrap();
    let err = snapshot_stream_endpoint(&base).unwrap_err();
    assert_matches!(err, EndpointError::UnsupportedScheme(scheme) if scheme == "ftp");
}
