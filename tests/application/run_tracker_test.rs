use std::time::Duration;

use quizpress::application::services::RunTracker;

#[test]
fn given_single_run_when_checking_then_it_is_current() {
    let tracker = RunTracker::new();

    let ticket = tracker.begin(Some("session-a"));

    assert!(ticket.is_current());
    assert_eq!(ticket.session(), Some("session-a"));
}

#[test]
fn given_newer_run_in_same_session_when_checking_old_ticket_then_it_is_superseded() {
    let tracker = RunTracker::new();

    let older = tracker.begin(Some("session-a"));
    let newer = tracker.begin(Some("session-a"));

    assert!(!older.is_current());
    assert!(newer.is_current());
}

#[test]
fn given_runs_in_different_sessions_when_checking_then_both_are_current() {
    let tracker = RunTracker::new();

    let first = tracker.begin(Some("session-a"));
    let second = tracker.begin(Some("session-b"));

    assert!(tracker.is_current(&first));
    assert!(tracker.is_current(&second));
}

#[test]
fn given_runs_without_session_when_checking_then_they_are_never_superseded() {
    let tracker = RunTracker::new();

    let first = tracker.begin(None);
    let second = tracker.begin(None);

    assert!(first.is_current());
    assert!(second.is_current());
    assert_ne!(first.run(), second.run());
    assert_eq!(tracker.active_sessions(), 0);
}

#[test]
fn given_older_ticket_dropped_when_newer_is_active_then_newer_stays_current() {
    let tracker = RunTracker::new();

    let older = tracker.begin(Some("session-a"));
    let newer = tracker.begin(Some("session-a"));
    drop(older);

    assert!(newer.is_current());
    assert_eq!(tracker.active_sessions(), 1);
}

#[test]
fn given_newer_ticket_dropped_first_when_older_completes_then_older_is_still_superseded() {
    let tracker = RunTracker::new();

    let older = tracker.begin(Some("session-a"));
    let newer = tracker.begin(Some("session-a"));
    drop(newer);

    assert!(!older.is_current());
}

#[test]
fn given_only_ticket_dropped_when_checking_tracker_then_session_is_cleared() {
    let tracker = RunTracker::new();

    let ticket = tracker.begin(Some("session-a"));
    assert_eq!(tracker.active_sessions(), 1);
    drop(ticket);

    assert_eq!(tracker.active_sessions(), 0);
}

#[test]
fn given_all_tickets_dropped_when_starting_again_then_new_run_is_current() {
    let tracker = RunTracker::new();

    let first = tracker.begin(Some("session-a"));
    drop(first);
    let second = tracker.begin(Some("session-a"));

    assert!(second.is_current());
}

#[tokio::test]
async fn given_request_future_cancelled_when_holding_ticket_then_session_is_cleared() {
    let tracker = RunTracker::new();

    let request = async {
        let _ticket = tracker.begin(Some("session-a"));
        tokio::time::sleep(Duration::from_secs(60)).await;
    };
    let cancelled = tokio::time::timeout(Duration::from_millis(20), request).await;

    assert!(cancelled.is_err());
    assert_eq!(tracker.active_sessions(), 0);
}
