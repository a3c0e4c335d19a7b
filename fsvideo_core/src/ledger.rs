// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance listener bookkeeping.
//!
//! [`EventLedger`] records, for every event target a widget has attached
//! listeners to, the ordered list of `(event, handler, listener)`
//! registrations. `handler` is the caller's identity for the routine being
//! invoked (compared with `==`); `listener` is the native handle that must be
//! passed back to the platform to detach it.
//!
//! The ledger itself never touches the platform. [`deregister`] hands the
//! removed registrations back, most recent first, and the caller detaches
//! each listener. Together with only registering after a successful attach,
//! this keeps the ledger and the native listener set in step.
//!
//! Targets receive a [`TargetId`] lazily on first registration. Ids come from
//! a counter owned by the ledger, so two widgets never share numbering state.
//!
//! [`deregister`]: EventLedger::deregister

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Opaque per-ledger identifier for an event target.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(u32);

impl TargetId {
    /// Returns the raw id (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}

/// One attached listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration<K, L> {
    /// Event name, e.g. `"resize"`.
    pub event: String,
    /// Identity of the routine the listener invokes.
    pub handler: K,
    /// Native listener handle.
    pub listener: L,
}

/// Mapping from event targets to their registered listeners.
///
/// `T` is the target handle (compared with `==`), `K` the handler identity
/// and `L` the native listener handle.
pub struct EventLedger<T, K, L> {
    next_id: u32,
    targets: Vec<(T, TargetId)>,
    entries: BTreeMap<TargetId, Vec<Registration<K, L>>>,
}

impl<T, K, L> fmt::Debug for EventLedger<T, K, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLedger")
            .field("targets", &self.targets.len())
            .field(
                "registrations",
                &self.entries.values().map(Vec::len).sum::<usize>(),
            )
            .finish_non_exhaustive()
    }
}

impl<T, K, L> Default for EventLedger<T, K, L> {
    fn default() -> Self {
        Self {
            next_id: 0,
            targets: Vec::new(),
            entries: BTreeMap::new(),
        }
    }
}

impl<T: PartialEq + Clone, K: PartialEq, L> EventLedger<T, K, L> {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id assigned to `target`, if anything was ever registered
    /// on it.
    #[must_use]
    pub fn target_id(&self, target: &T) -> Option<TargetId> {
        self.targets
            .iter()
            .find_map(|(t, id)| (t == target).then_some(*id))
    }

    fn assign(&mut self, target: &T) -> TargetId {
        if let Some(id) = self.target_id(target) {
            return id;
        }
        self.next_id += 1;
        let id = TargetId(self.next_id);
        self.targets.push((target.clone(), id));
        id
    }

    /// Records a listener attached to `target` for `event`.
    ///
    /// Registrations are never de-duplicated: the same `(event, handler)`
    /// pair may be recorded several times and each is removed independently.
    pub fn register(&mut self, target: &T, event: &str, handler: K, listener: L) -> TargetId {
        let id = self.assign(target);
        self.entries.entry(id).or_default().push(Registration {
            event: String::from(event),
            handler,
            listener,
        });
        id
    }

    /// Removes registrations from `target` and returns them, most recent
    /// first.
    ///
    /// - With a `handler`, removes only the most recently added registration
    ///   matching both `event` (any event if `None`) and `handler`.
    /// - Without a `handler`, removes every registration for `event`, or
    ///   every registration on the target if `event` is also `None`.
    ///
    /// Unknown targets and unmatched handlers yield an empty list.
    pub fn deregister(
        &mut self,
        target: &T,
        event: Option<&str>,
        handler: Option<&K>,
    ) -> Vec<Registration<K, L>> {
        let mut removed = Vec::new();
        let Some(id) = self.target_id(target) else {
            return removed;
        };
        let Some(list) = self.entries.get_mut(&id) else {
            return removed;
        };

        for i in (0..list.len()).rev() {
            let item = &list[i];
            if event.is_some_and(|e| item.event != e) {
                continue;
            }
            match handler {
                Some(h) if item.handler == *h => {
                    removed.push(list.remove(i));
                    break;
                }
                Some(_) => {}
                None => removed.push(list.remove(i)),
            }
        }
        removed
    }

    /// Drops `target` from the ledger: its id and every registration still
    /// recorded on it. Returns those registrations, most recent first.
    ///
    /// The ledger holds no reference to `target` afterwards. Registering on
    /// it again assigns a fresh id.
    pub fn forget(&mut self, target: &T) -> Vec<Registration<K, L>> {
        let Some(pos) = self.targets.iter().position(|(t, _)| t == target) else {
            return Vec::new();
        };
        let (_, id) = self.targets.swap_remove(pos);
        let mut removed = self.entries.remove(&id).unwrap_or_default();
        removed.reverse();
        removed
    }

    /// Returns the registrations on `target`, oldest first.
    #[must_use]
    pub fn registrations(&self, target: &T) -> &[Registration<K, L>] {
        self.target_id(target)
            .and_then(|id| self.entries.get(&id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of registrations for `event` on `target`.
    #[must_use]
    pub fn count(&self, target: &T, event: &str) -> usize {
        self.registrations(target)
            .iter()
            .filter(|r| r.event == event)
            .count()
    }

    /// Returns the total number of registrations across all targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns `true` if no listeners are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}
