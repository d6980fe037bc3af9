use super::*;
use crate::test_helpers::{MockTransport, page_json, test_client};
use std::time::Duration;

fn word_count(mock: &Arc<MockTransport>) -> (WordCount, StatusNotifier) {
    let notifier = StatusNotifier::new();
    (WordCount::new(test_client(mock), notifier.clone()), notifier)
}

// =============================================================
// load
// =============================================================

#[tokio::test(start_paused = true)]
async fn load_updates_total() {
    let mock = Arc::new(MockTransport::new());
    mock.push_json(200, page_json(1234));
    let (count, notifier) = word_count(&mock);

    assert_eq!(count.total(), 0);
    assert_eq!(count.load().await, Ok(1234));
    assert_eq!(count.total(), 1234);
    assert!(notifier.current().is_none());
}

#[tokio::test(start_paused = true)]
async fn load_non_json_raises_one_error_status() {
    let mock = Arc::new(MockTransport::new());
    mock.push_text(502, "Bad Gateway");
    let (count, notifier) = word_count(&mock);

    assert!(count.load().await.is_err());
    let status = notifier.current().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.message, COUNT_BAD_RESPONSE_MESSAGE);
    assert_eq!(count.total(), 0);
}

#[tokio::test(start_paused = true)]
async fn load_api_error_uses_server_message() {
    let mock = Arc::new(MockTransport::new());
    mock.push_json(200, serde_json::json!({ "success": false, "message": "rate limited" }));
    let (count, notifier) = word_count(&mock);

    let _ = count.load().await;
    assert_eq!(notifier.current().unwrap().message, "rate limited");
}

#[tokio::test(start_paused = true)]
async fn load_network_failure_message() {
    let mock = Arc::new(MockTransport::new());
    mock.push_network_error();
    let (count, notifier) = word_count(&mock);

    let _ = count.load().await;
    assert_eq!(notifier.current().unwrap().message, COUNT_NETWORK_MESSAGE);
}

#[tokio::test(start_paused = true)]
async fn closed_count_refuses_reads() {
    let mock = Arc::new(MockTransport::new());
    mock.push_json(200, page_json(9));
    let (count, notifier) = word_count(&mock);

    count.close();
    assert_eq!(count.load().await, Err(ApiFailure::Aborted));
    assert!(notifier.current().is_none());
    assert_eq!(mock.get_count(), 0);

    count.open();
    assert_eq!(count.load().await, Ok(9));
}

#[tokio::test(start_paused = true)]
async fn close_during_read_is_silent() {
    let mock = Arc::new(MockTransport::new().with_delay(Duration::from_millis(300)));
    mock.push_json(200, page_json(9));
    let (count, notifier) = word_count(&mock);

    let (result, ()) = tokio::join!(count.load(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        count.close();
    });

    assert_eq!(result, Err(ApiFailure::Aborted));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(notifier.current().is_none());
    assert_eq!(count.total(), 0);
}

// =============================================================
// ordering
// =============================================================

#[tokio::test(start_paused = true)]
async fn newer_read_supersedes_slow_one() {
    let mock = Arc::new(MockTransport::new());
    mock.push_json_after(Duration::from_millis(1000), 200, page_json(100));
    mock.push_json_after(Duration::from_millis(10), 200, page_json(101));
    let (count, notifier) = word_count(&mock);

    let (slow, fast) = tokio::join!(count.load(), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        count.load().await
    });

    assert_eq!(slow, Err(ApiFailure::Aborted));
    assert_eq!(fast, Ok(101));
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(count.total(), 101);
    assert!(notifier.current().is_none());
}

#[tokio::test(start_paused = true)]
async fn superseded_read_failure_is_silent() {
    let mock = Arc::new(MockTransport::new());
    mock.push_network_error_after(Duration::from_millis(1000));
    mock.push_json_after(Duration::from_millis(10), 200, page_json(7));
    let (count, notifier) = word_count(&mock);

    let (slow, fast) = tokio::join!(count.load(), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        count.load().await
    });

    assert_eq!(slow, Err(ApiFailure::Aborted));
    assert_eq!(fast, Ok(7));
    assert!(notifier.current().is_none());
}

#[test]
fn aborted_has_no_message() {
    assert_eq!(count_failure_message(&ApiFailure::Aborted), None);
    assert_eq!(
        count_failure_message(&ApiFailure::Api { status: 500, message: None }).as_deref(),
        Some(COUNT_API_ERROR_MESSAGE)
    );
}
