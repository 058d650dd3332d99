use super::*;
use crate::memory::MemoryCommentStore;
use crate::ports::PortError;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use futures::channel::mpsc;
use futures::StreamExt;
use uuid::Uuid;

// =============================================================================
// Helpers
// =============================================================================

struct FixedClock(DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Noon local time, comfortably after midnight.
fn noon() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .earliest()
        .expect("noon exists")
}

fn comment(content: &str, created_at: DateTime<Local>) -> Comment {
    Comment {
        id: Uuid::new_v4(),
        content: content.to_string(),
        created_at: created_at.with_timezone(&Utc),
    }
}

fn panel_with(rows: Vec<Comment>) -> (CommentPanel, Arc<MemoryCommentStore>) {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(noon()));
    let store = Arc::new(MemoryCommentStore::recording(clock.clone()).with_rows(rows));
    (CommentPanel::new(store.clone(), clock), store)
}

fn notice_text(panel: &CommentPanel) -> Option<String> {
    panel.snapshot().notice.map(|n| n.text)
}

// =============================================================================
// submit: validation
// =============================================================================

#[tokio::test]
async fn blank_draft_is_a_silent_no_op() {
    let (panel, store) = panel_with(vec![]);
    panel.set_draft("   ");
    let before = panel.snapshot();

    assert_eq!(panel.submit().await, SubmitOutcome::Ignored);
    assert_eq!(store.call_count(), 0);
    assert_eq!(panel.snapshot(), before);
}

#[tokio::test]
async fn over_long_draft_is_rejected_without_network_call() {
    let (panel, store) = panel_with(vec![]);
    let draft = "x".repeat(501);
    panel.set_draft(draft.clone());

    assert_eq!(panel.submit().await, SubmitOutcome::Rejected);
    assert_eq!(store.call_count(), 0);

    let snapshot = panel.snapshot();
    assert_eq!(snapshot.draft, draft);
    assert!(!snapshot.is_submitting);
    let notice = snapshot.notice.expect("error notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Error: Comment must be 500 characters or less.");
}

#[tokio::test]
async fn valid_draft_issues_exactly_one_insert_with_exact_content() {
    let drafts = vec!["a".to_string(), " padded ".to_string(), "z".repeat(500)];
    for draft in drafts {
        let (panel, store) = panel_with(vec![]);
        panel.set_draft(draft.clone());
        panel.submit().await;
        assert_eq!(store.inserted(), vec![draft]);
        assert_eq!(store.call_count(), 1);
    }
}

// =============================================================================
// submit: outcomes
// =============================================================================

#[tokio::test]
async fn successful_submit_clears_draft_and_reports_success() {
    let (panel, _store) = panel_with(vec![]);
    panel.set_draft("hello");

    assert_eq!(
        panel.submit().await,
        SubmitOutcome::Submitted { refreshed: false }
    );

    let snapshot = panel.snapshot();
    assert_eq!(snapshot.draft, "");
    assert!(!snapshot.is_submitting);
    assert!(!snapshot.can_submit);
    assert_eq!(
        snapshot.notice,
        Some(Notice::success(SUBMIT_SUCCESS))
    );
}

#[tokio::test]
async fn failed_submit_keeps_draft_and_embeds_context() {
    let (panel, store) = panel_with(vec![]);
    store.set_failure(Some(PortError::Backend(
        "new row violates check constraint".to_string(),
    )));
    panel.set_draft("hello");

    assert_eq!(panel.submit().await, SubmitOutcome::Failed);

    let snapshot = panel.snapshot();
    assert_eq!(snapshot.draft, "hello");
    assert!(!snapshot.is_submitting);
    assert_eq!(
        snapshot.notice.map(|n| n.text),
        Some(
            "Error: new row violates check constraint. (Table: 'comments', Column: 'content')"
                .to_string()
        )
    );
}

#[tokio::test]
async fn submit_does_not_refresh_when_list_is_empty() {
    let (panel, store) = panel_with(vec![]);
    panel.set_draft("first");
    panel.submit().await;
    assert!(store.queries().is_empty());
    assert!(panel.snapshot().comments.is_empty());
}

#[tokio::test]
async fn submit_refreshes_list_already_showing() {
    let earlier = comment("earlier", noon() - Duration::hours(2));
    let (panel, store) = panel_with(vec![earlier.clone()]);
    panel.fetch_today().await;
    assert_eq!(panel.snapshot().comments.len(), 1);

    panel.set_draft("later");
    assert_eq!(
        panel.submit().await,
        SubmitOutcome::Submitted { refreshed: true }
    );

    let snapshot = panel.snapshot();
    let contents: Vec<_> = snapshot.comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["later", "earlier"]);
    assert_eq!(store.queries().len(), 2);
    // The refresh clears the message line when it starts.
    assert_eq!(snapshot.notice, None);
    assert!(!snapshot.is_fetching);
}

#[tokio::test]
async fn failed_submit_does_not_refresh() {
    let earlier = comment("earlier", noon() - Duration::hours(2));
    let (panel, store) = panel_with(vec![earlier]);
    panel.fetch_today().await;

    store.set_failure(Some(PortError::Unexpected("socket closed".to_string())));
    panel.set_draft("later");
    panel.submit().await;

    assert_eq!(store.queries().len(), 1);
    assert_eq!(panel.snapshot().comments.len(), 1);
}

// =============================================================================
// fetch_today
// =============================================================================

#[tokio::test]
async fn fetch_queries_from_local_midnight() {
    let (panel, store) = panel_with(vec![]);
    panel.fetch_today().await;

    let midnight = Local
        .with_ymd_and_hms(2024, 6, 15, 0, 0, 0)
        .earliest()
        .expect("midnight exists")
        .with_timezone(&Utc);
    assert_eq!(store.queries(), vec![midnight]);
}

#[tokio::test]
async fn fetch_keeps_only_today_newest_first() {
    let t = noon();
    let rows = vec![
        comment("yesterday", t - Duration::days(1)),
        comment("an hour ago", t - Duration::hours(1)),
        comment("now", t),
    ];
    let (panel, _store) = panel_with(rows);

    assert_eq!(panel.fetch_today().await, FetchOutcome::Loaded { count: 2 });

    let snapshot = panel.snapshot();
    let contents: Vec<_> = snapshot.comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["now", "an hour ago"]);
    assert_eq!(snapshot.notice, None);
    assert!(!snapshot.is_fetching);
}

#[tokio::test]
async fn repeated_fetches_are_idempotent() {
    let t = noon();
    let rows = vec![
        comment("a", t - Duration::hours(3)),
        comment("b", t - Duration::hours(1)),
    ];
    let (panel, _store) = panel_with(rows);

    panel.fetch_today().await;
    let first = panel.snapshot();
    panel.fetch_today().await;
    assert_eq!(panel.snapshot(), first);
}

#[tokio::test]
async fn fetch_with_no_rows_reports_empty_day() {
    let (panel, _store) = panel_with(vec![comment("old", noon() - Duration::days(2))]);

    assert_eq!(panel.fetch_today().await, FetchOutcome::Loaded { count: 0 });

    let snapshot = panel.snapshot();
    assert!(snapshot.comments.is_empty());
    assert_eq!(snapshot.notice, Some(Notice::info(NO_COMMENTS_TODAY)));
}

#[tokio::test]
async fn failed_fetch_leaves_list_unchanged() {
    let (panel, store) = panel_with(vec![comment("kept", noon() - Duration::hours(1))]);
    panel.fetch_today().await;

    store.set_failure(Some(PortError::Unexpected("connection reset".to_string())));
    assert_eq!(panel.fetch_today().await, FetchOutcome::Failed);

    let snapshot = panel.snapshot();
    assert_eq!(snapshot.comments.len(), 1);
    assert!(!snapshot.is_fetching);
    assert_eq!(
        notice_text(&panel),
        Some("Error fetching comments: connection reset".to_string())
    );
}

// =============================================================================
// listener
// =============================================================================

#[tokio::test]
async fn listener_sees_in_flight_flag_raised_then_cleared() {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(noon()));
    let store = Arc::new(MemoryCommentStore::recording(clock.clone()));
    let (tx, rx) = mpsc::unbounded();
    let panel = CommentPanel::new(store, clock).with_listener(tx);

    panel.set_draft("hello");
    panel.submit().await;
    drop(panel);

    let snapshots: Vec<PanelSnapshot> = rx.collect().await;
    let flags: Vec<bool> = snapshots.iter().map(|s| s.is_submitting).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert_eq!(snapshots[1].notice, None);
    assert_eq!(
        snapshots[2].notice.as_ref().map(|n| n.text.as_str()),
        Some(SUBMIT_SUCCESS)
    );
}

#[tokio::test]
async fn can_submit_tracks_draft() {
    let (panel, _store) = panel_with(vec![]);
    assert!(!panel.snapshot().can_submit);
    panel.set_draft("x");
    assert!(panel.snapshot().can_submit);
    panel.set_draft(" ");
    assert!(!panel.snapshot().can_submit);
}
