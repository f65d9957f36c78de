//! Member storage for objects and interfaces.
//!
//! An object literal is registered field by field, but a method body may
//! reference a sibling through `this` before that sibling has been processed.
//! The tracker lets such a reference wait for the member on a separate
//! thread while registration carries on with the remaining fields.
//!
//! Member insertion and waiter registration happen under one lock, so a
//! waiter either sees the member already stored or is registered before the
//! member arrives and gets woken by it. Every waiter for a name is woken when
//! that name is added.

use crate::error::WaitError;
use crate::types::Member;
use crossbeam::channel::{self, RecvTimeoutError, Sender};
use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::trace;

#[derive(Default)]
struct TrackerState {
    members: IndexMap<String, Member>,
    listeners: FxHashMap<String, Vec<Sender<Member>>>,
    sealed: bool,
}

/// The member set of one object or interface.
#[derive(Default)]
pub struct MemberTracker {
    state: Mutex<TrackerState>,
}

impl MemberTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `member` and wake everyone waiting for its name.
    ///
    /// Returns the member previously stored under the same name, if any. The
    /// new member replaces it.
    pub fn add_member(&self, member: Member) -> Option<Member> {
        let mut state = self.state.lock();
        let name = member.name().to_string();

        if let Some(waiters) = state.listeners.remove(&name) {
            trace!(member = %name, waiters = waiters.len(), "waking member waiters");
            for waiter in waiters {
                // The receiver is gone if its wait already timed out.
                let _ = waiter.send(member.clone());
            }
        }

        state.members.insert(name, member)
    }

    /// Get the member named `name`, blocking the calling thread until it is
    /// added, the tracker is sealed, or `timeout` elapses.
    pub fn wait_for_member(&self, name: &str, timeout: Duration) -> Result<Member, WaitError> {
        let receiver = {
            let mut state = self.state.lock();
            if let Some(member) = state.members.get(name) {
                return Ok(member.clone());
            }
            if state.sealed {
                return Err(WaitError::Sealed { name: name.to_string() });
            }

            let (sender, receiver) = channel::bounded(1);
            state.listeners.entry(name.to_string()).or_default().push(sender);
            receiver
        };

        trace!(member = name, "waiting for member");
        match receiver.recv_timeout(timeout) {
            Ok(member) => Ok(member),
            Err(RecvTimeoutError::Timeout) => Err(WaitError::TimedOut {
                name: name.to_string(),
                timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(WaitError::Sealed {
                name: name.to_string(),
            }),
        }
    }

    /// Run [`wait_for_member`](Self::wait_for_member) on its own thread.
    pub fn spawn_wait(
        self: &Arc<Self>,
        name: &str,
        timeout: Duration,
    ) -> Result<MemberWait, WaitError> {
        let tracker = Arc::clone(self);
        let member_name = name.to_string();
        let handle = thread::Builder::new()
            .name("hype-member-wait".to_string())
            .spawn(move || tracker.wait_for_member(&member_name, timeout))
            .map_err(|source| WaitError::Spawn {
                name: name.to_string(),
                source,
            })?;

        Ok(MemberWait {
            name: name.to_string(),
            handle,
        })
    }

    /// Mark the member set as complete.
    ///
    /// Every outstanding waiter fails with [`WaitError::Sealed`], and later
    /// waits for absent members fail immediately. Returns the names that
    /// still had waiters.
    pub fn seal(&self) -> Vec<String> {
        let mut state = self.state.lock();
        state.sealed = true;
        let orphaned: Vec<String> = state
            .listeners
            .drain()
            .filter(|(_, waiters)| !waiters.is_empty())
            .map(|(name, _)| name)
            .collect();
        if !orphaned.is_empty() {
            trace!(?orphaned, "sealed with outstanding waiters");
        }
        orphaned
    }

    pub fn is_sealed(&self) -> bool {
        self.state.lock().sealed
    }

    pub fn member(&self, name: &str) -> Option<Member> {
        self.state.lock().members.get(name).cloned()
    }

    /// A snapshot of the members in declaration order.
    pub fn members(&self) -> Vec<Member> {
        self.state.lock().members.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of registered waiters that have not been woken yet.
    pub fn pending_waiters(&self) -> usize {
        self.state.lock().listeners.values().map(Vec::len).sum()
    }
}

impl fmt::Debug for MemberTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MemberTracker")
            .field("members", &state.members.keys().collect::<Vec<_>>())
            .field("sealed", &state.sealed)
            .finish()
    }
}

/// A wait running on its own thread.
#[derive(Debug)]
pub struct MemberWait {
    name: String,
    handle: JoinHandle<Result<Member, WaitError>>,
}

impl MemberWait {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block until the waiter finishes.
    pub fn join(self) -> Result<Member, WaitError> {
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => Err(WaitError::Abandoned { name: self.name }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hype_core::TypeId;

    #[test]
    fn test_add_member_returns_previous() {
        let tracker = MemberTracker::new();
        assert!(tracker.add_member(Member::field("a", TypeId(0))).is_none());
        let previous = tracker.add_member(Member::field("a", TypeId(1)));
        assert_eq!(previous, Some(Member::field("a", TypeId(0))));
        assert_eq!(tracker.member("a"), Some(Member::field("a", TypeId(1))));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_members_keep_declaration_order() {
        let tracker = MemberTracker::new();
        tracker.add_member(Member::field("z", TypeId(0)));
        tracker.add_member(Member::field("a", TypeId(0)));
        let names: Vec<_> = tracker.members().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn test_seal_reports_waited_names() {
        let tracker = Arc::new(MemberTracker::new());
        let wait = tracker.spawn_wait("missing", Duration::from_secs(5)).unwrap();
        while tracker.pending_waiters() == 0 {
            thread::yield_now();
        }
        assert_eq!(tracker.seal(), vec!["missing".to_string()]);
        assert!(matches!(wait.join(), Err(WaitError::Sealed { .. })));
        assert!(tracker.is_sealed());
    }
}
