use super::*;
use crate::clock::SystemClock;
use crate::memory::MemoryCommentStore;
use std::sync::Arc;

fn store() -> MemoryCommentStore {
    MemoryCommentStore::recording(Arc::new(SystemClock))
}

#[tokio::test]
async fn reachable_backend_reports_success() {
    let store = store();
    let status = probe_connection(&store).await;
    assert_eq!(status, ProbeStatus::Connected);
    assert_eq!(
        status.to_string(),
        "Hello World! Database connection successful."
    );
    assert_eq!(store.probe_count(), 1);
}

#[tokio::test]
async fn missing_table_reports_description_and_collection_name() {
    let store = store();
    store.set_failure(Some(PortError::Backend(
        "relation \"public.comments\" does not exist".to_string(),
    )));
    let status = probe_connection(&store).await;
    let text = status.to_string();
    assert!(matches!(status, ProbeStatus::BackendError(_)));
    assert!(text.contains("relation \"public.comments\" does not exist"));
    assert!(text.contains("'comments'"));
}

#[tokio::test]
async fn transport_failure_reports_unexpected_error() {
    let store = store();
    store.set_failure(Some(PortError::Unexpected("connection refused".to_string())));
    let status = probe_connection(&store).await;
    assert_eq!(status.to_string(), "Unexpected error: connection refused");
    assert_eq!(status.kind(), "unexpected");
}

#[tokio::test]
async fn probe_does_not_retry() {
    let store = store();
    store.set_failure(Some(PortError::Unexpected("timeout".to_string())));
    probe_connection(&store).await;
    assert_eq!(store.call_count(), 1);
}

#[test]
fn checking_status_text() {
    assert_eq!(
        ProbeStatus::Checking.to_string(),
        "Checking database connection..."
    );
    assert_eq!(ProbeStatus::Checking.kind(), "checking");
}
