use std::collections::HashMap;

use assert_matches::assert_matches;
use futures_util::{FutureExt, StreamExt};
use wirescope_core::{DecodeError, HttpRequest, Snapshot, SnapshotUrl};

use crate::error::TransportError;
use crate::gate::{GatedStream, StreamEvent};

fn sample_snapshot(id: &str) -> Snapshot {
    Snapshot {
        id: id.to_string(),
        duration: "1000000".to_string(),
        secure: false,
        error: String::new(),
        request: HttpRequest {
            body: String::new(),
            content_type: String::new(),
            content_length: 0,
            header: HashMap::new(),
            raw: String::new(),
            url: SnapshotUrl {
                scheme: "http".to_string(),
                opaque: String::new(),
                user: None,
                host: "example.com".to_string(),
                path: "/".to_string(),
                raw_query: String::new(),
            },
            method: "GET".to_string(),
        },
        response: None,
    }
}

fn sample_decode_error() -> DecodeError {
    DecodeError {
        frame: "{broken".to_string(),
        reason: "expected value".to_string(),
    }
}

async fn next_id(subscription: &mut crate::gate::Subscription) -> String {
    match subscription.next().await {
        Some(StreamEvent::Snapshot(snapshot)) => snapshot.id,
        other => panic!("expected snapshot, got {other:?}"),
    }
}

#[tokio::test]
async fn delivers_to_every_subscriber_in_order() {
    let gate = GatedStream::new();
    let mut first = gate.subscribe();
    let mut second = gate.subscribe();

    gate.publish_snapshot(sample_snapshot("a"));
    gate.publish_snapshot(sample_snapshot("b"));

    assert_eq!(next_id(&mut first).await, "a");
    assert_eq!(next_id(&mut first).await, "b");
    assert_eq!(next_id(&mut second).await, "a");
    assert_eq!(next_id(&mut second).await, "b");
}

#[tokio::test]
async fn paused_frames_are_dropped_not_buffered() {
    let gate = GatedStream::new();
    let mut subscription = gate.subscribe();

    gate.pause();
    assert!(gate.is_paused());
    for n in 0..100 {
        gate.publish_snapshot(sample_snapshot(&format!("dropped-{n}")));
    }
    gate.publish_decode_failure(sample_decode_error());
    assert!(subscription.next().now_or_never().is_none());

    gate.play();
    assert!(!gate.is_paused());
    gate.publish_snapshot(sample_snapshot("after-resume"));

    assert_eq!(next_id(&mut subscription).await, "after-resume");
    assert!(subscription.next().now_or_never().is_none());
}

#[tokio::test]
async fn decode_failure_does_not_terminate_the_subscription() {
    let gate = GatedStream::new();
    let mut subscription = gate.subscribe();

    gate.publish_snapshot(sample_snapshot("before"));
    gate.publish_decode_failure(sample_decode_error());
    gate.publish_snapshot(sample_snapshot("after"));

    assert_eq!(next_id(&mut subscription).await, "before");
    assert_matches!(
        subscription.next().await,
        Some(StreamEvent::DecodeFailure(err)) if err.frame == "{broken"
    );
    assert_eq!(next_id(&mut subscription).await, "after");
}

#[tokio::test]
async fn close_is_terminal_and_reaches_paused_subscribers() {
    let gate = GatedStream::new();
    let mut subscription = gate.subscribe();

    gate.pause();
    gate.publish_closed(TransportError::Closed);

    assert_matches!(
        subscription.next().await,
        Some(StreamEvent::Closed(TransportError::Closed))
    );
    assert!(subscription.next().await.is_none());

    // publishes after the terminal event are no-ops
    gate.publish_snapshot(sample_snapshot("late"));
    assert_eq!(gate.subscriber_count(), 0);
}

#[tokio::test]
async fn unsubscribing_one_observer_leaves_others_attached() {
    let gate = GatedStream::new();
    let mut kept = gate.subscribe();
    let dropped = gate.subscribe();
    assert_eq!(gate.subscriber_count(), 2);

    dropped.unsubscribe();
    assert_eq!(gate.subscriber_count(), 1);

    gate.publish_snapshot(sample_snapshot("still-flowing"));
    assert_eq!(next_id(&mut kept).await, "still-flowing");
}

#[tokio::test]
async fn subscribing_after_close_yields_nothing() {
    let gate = GatedStream::new();
    gate.publish_closed(TransportError::Protocol("reset".to_string()));

    let mut subscription = gate.subscribe();
    assert!(subscription.next().await.is_none());
}

#[tokio::test]
async fn shutdown_ends_subscriptions_without_terminal_event() {
    let gate = GatedStream::new();
    let mut subscription = gate.subscribe();

    gate.shutdown();
    assert!(subscription.next().await.is_none());
}
