// Copyright 2026 the FsVideo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce over host timers.
//!
//! [`Debouncer`] does not own a clock or a timer queue. The caller schedules
//! a host timer for every trigger and hands it to [`trigger`], which returns
//! the previously pending timer so the caller can cancel it. When a timer
//! fires, [`settle`] takes it and reports the burst it closes. Only the last
//! trigger of a burst takes effect; earlier ones are discarded.
//!
//! [`trigger`]: Debouncer::trigger
//! [`settle`]: Debouncer::settle

use core::fmt;
use core::time::Duration;

use crate::time::HostTime;

/// Default quiet window for viewport resize bursts.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(100);

/// A burst closed by [`Debouncer::settle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settled<T> {
    /// The timer that fired.
    pub timer: T,
    /// Number of triggers collapsed into this settlement.
    pub triggers: u32,
    /// Host time of the first trigger in the burst.
    pub first_trigger: HostTime,
}

/// Tracks at most one pending timer for a trailing-edge debounce.
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<T>,
    triggers: u32,
    first_trigger: HostTime,
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("quiet", &self.quiet)
            .field("pending", &self.pending.is_some())
            .field("triggers", &self.triggers)
            .finish_non_exhaustive()
    }
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet window.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            triggers: 0,
            first_trigger: HostTime(0),
        }
    }

    /// Returns the quiet window the caller should schedule timers with.
    #[must_use]
    pub const fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Returns `true` if a timer is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a trigger at `now` whose trailing call is scheduled on
    /// `timer`.
    ///
    /// Returns the timer this one replaces; the caller must cancel it.
    pub fn trigger(&mut self, now: HostTime, timer: T) -> Option<T> {
        let previous = self.pending.replace(timer);
        if previous.is_none() {
            self.triggers = 0;
            self.first_trigger = now;
        }
        self.triggers += 1;
        previous
    }

    /// Takes the pending timer when it fires.
    ///
    /// Returns `None` if nothing is pending (the timer was cancelled or
    /// already settled), in which case the caller must not run the debounced
    /// action.
    pub fn settle(&mut self) -> Option<Settled<T>> {
        let timer = self.pending.take()?;
        let triggers = core::mem::take(&mut self.triggers);
        Some(Settled {
            timer,
            triggers,
            first_trigger: self.first_trigger,
        })
    }

    /// Takes the pending timer without running the debounced action.
    pub fn cancel(&mut self) -> Option<T> {
        self.triggers = 0;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_trigger_has_nothing_to_cancel() {
        let mut d = Debouncer::new(DEFAULT_QUIET);
        assert_eq!(d.trigger(HostTime(10), 1_u32), None);
        assert!(d.is_pending());
    }

    #[test]
    fn retrigger_hands_back_previous_timer() {
        let mut d = Debouncer::new(DEFAULT_QUIET);
        d.trigger(HostTime(10), 1_u32);
        assert_eq!(d.trigger(HostTime(20), 2), Some(1));
        assert_eq!(d.trigger(HostTime(30), 3), Some(2));

        let settled = d.settle().unwrap();
        assert_eq!(settled.timer, 3);
        assert_eq!(settled.triggers, 3);
        assert_eq!(settled.first_trigger, HostTime(10));
        assert!(!d.is_pending());
    }

    #[test]
    fn settle_without_pending_is_none() {
        let mut d: Debouncer<u32> = Debouncer::new(DEFAULT_QUIET);
        assert_eq!(d.settle(), None);

        d.trigger(HostTime(0), 1);
        d.settle();
        assert_eq!(d.settle(), None);
    }

    #[test]
    fn bursts_are_counted_separately() {
        let mut d = Debouncer::new(DEFAULT_QUIET);
        d.trigger(HostTime(0), 1_u32);
        d.trigger(HostTime(5), 2);
        d.settle();

        d.trigger(HostTime(500), 3);
        let settled = d.settle().unwrap();
        assert_eq!(settled.triggers, 1);
        assert_eq!(settled.first_trigger, HostTime(500));
    }

    #[test]
    fn cancel_drops_pending_burst() {
        let mut d = Debouncer::new(Duration::from_millis(250));
        assert_eq!(d.quiet(), Duration::from_millis(250));
        d.trigger(HostTime(0), 9_u32);
        assert_eq!(d.cancel(), Some(9));
        assert_eq!(d.settle(), None);
        assert_eq!(d.cancel(), None);
    }
}
