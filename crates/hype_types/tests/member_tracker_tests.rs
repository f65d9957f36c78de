//! Tests for member waits across threads.

use hype_types::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

fn wait_for_waiters(tracker: &MemberTracker, count: usize) {
    while tracker.pending_waiters() < count {
        thread::yield_now();
    }
}

#[test]
fn test_late_waiter_sees_stored_member() {
    let tracker = MemberTracker::new();
    tracker.add_member(Member::field("name", TypeId(0)));

    let member = tracker.wait_for_member("name", Duration::from_millis(1)).unwrap();
    assert_eq!(member, Member::field("name", TypeId(0)));
    assert_eq!(tracker.pending_waiters(), 0);
}

#[test]
fn test_early_waiters_are_all_woken() {
    let tracker = Arc::new(MemberTracker::new());
    let waits: Vec<_> = (0..4).map(|_| tracker.spawn_wait("getName", WAIT).unwrap()).collect();
    wait_for_waiters(&tracker, 4);

    tracker.add_member(Member::method("getName", TypeId(7)));

    for wait in waits {
        assert_eq!(wait.name(), "getName");
        assert_eq!(wait.join().unwrap(), Member::method("getName", TypeId(7)));
    }
    assert_eq!(tracker.pending_waiters(), 0);
}

#[test]
fn test_waiters_only_wake_for_their_name() {
    let tracker = Arc::new(MemberTracker::new());
    let wait = tracker.spawn_wait("b", WAIT).unwrap();
    wait_for_waiters(&tracker, 1);

    tracker.add_member(Member::field("a", TypeId(1)));
    assert_eq!(tracker.pending_waiters(), 1);

    tracker.add_member(Member::field("b", TypeId(2)));
    assert_eq!(wait.join().unwrap().ty(), TypeId(2));
}

#[test]
fn test_seal_fails_outstanding_waiters() {
    let tracker = Arc::new(MemberTracker::new());
    let wait = tracker.spawn_wait("never", WAIT).unwrap();
    wait_for_waiters(&tracker, 1);

    let orphaned = tracker.seal();
    assert_eq!(orphaned, vec!["never".to_string()]);

    let err = wait.join().unwrap_err();
    assert!(matches!(err, WaitError::Sealed { .. }));
    assert_eq!(err.member_name(), "never");
}

#[test]
fn test_wait_after_seal_fails_immediately() {
    let tracker = MemberTracker::new();
    tracker.add_member(Member::field("present", TypeId(0)));
    tracker.seal();

    assert!(tracker.wait_for_member("present", WAIT).is_ok());
    assert!(matches!(
        tracker.wait_for_member("absent", WAIT),
        Err(WaitError::Sealed { .. })
    ));
}

#[test]
fn test_wait_times_out() {
    let tracker = MemberTracker::new();
    let err = tracker.wait_for_member("slow", Duration::from_millis(20)).unwrap_err();
    match err {
        WaitError::TimedOut { name, timeout } => {
            assert_eq!(name, "slow");
            assert_eq!(timeout, Duration::from_millis(20));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[test]
fn test_member_added_from_another_thread() {
    let tracker = Arc::new(MemberTracker::new());
    let producer = {
        let tracker = Arc::clone(&tracker);
        thread::spawn(move || {
            for i in 0..50u32 {
                tracker.add_member(Member::field(format!("f{}", i), TypeId(i)));
            }
        })
    };

    let member = tracker.wait_for_member("f49", WAIT).unwrap();
    assert_eq!(member.ty(), TypeId(49));
    producer.join().unwrap();
    assert_eq!(tracker.len(), 50);
}
