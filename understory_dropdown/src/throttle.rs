// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small rate limiter with a single trailing slot.
//!
//! [`Throttle`] bounds how often a piece of work runs under bursty input. The first call
//! in a quiet period runs immediately (leading edge). Calls that land inside the interval
//! are coalesced into one pending call that becomes due at the end of the interval
//! (trailing edge). The host drives time: every method takes a timestamp in
//! milliseconds, and [`Throttle::deadline`] tells the host when to come back.
//!
//! ```
//! use understory_dropdown::Throttle;
//!
//! let mut throttle = Throttle::new(100);
//!
//! // Leading edge runs right away.
//! assert!(throttle.call(0));
//! // A burst inside the interval is coalesced…
//! assert!(!throttle.call(10));
//! assert!(!throttle.call(20));
//! assert_eq!(throttle.deadline(), Some(100));
//! // …into a single trailing run.
//! assert!(!throttle.poll(99));
//! assert!(throttle.poll(100));
//! assert_eq!(throttle.deadline(), None);
//! ```

/// Leading + trailing edge throttle over host-supplied millisecond timestamps.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: u64,
    /// Timestamp of the most recent run.
    last_run: Option<u64>,
    /// When the coalesced call becomes due, if one is pending.
    pending: Option<u64>,
}

impl Throttle {
    /// Creates a throttle that runs at most once per `interval` milliseconds.
    #[must_use]
    pub const fn new(interval: u64) -> Self {
        Self {
            interval,
            last_run: None,
            pending: None,
        }
    }

    /// Returns the configured interval in milliseconds.
    #[must_use]
    pub const fn interval(&self) -> u64 {
        self.interval
    }

    /// Records an invocation at `now`.
    ///
    /// Returns `true` if the work should run immediately. Otherwise the invocation is
    /// folded into the pending slot and will be reported by [`Throttle::poll`].
    pub fn call(&mut self, now: u64) -> bool {
        match self.last_run {
            Some(last) if now < last.saturating_add(self.interval) => {
                self.pending = Some(last.saturating_add(self.interval));
                false
            }
            _ => {
                self.last_run = Some(now);
                self.pending = None;
                true
            }
        }
    }

    /// Fires the pending trailing call if it is due at `now`.
    ///
    /// Returns `true` if the work should run now.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.pending {
            Some(due) if now >= due => {
                self.pending = None;
                self.last_run = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Returns when the pending call becomes due, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<u64> {
        self.pending
    }

    /// Returns `true` if a trailing call is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any pending call and forgets the last run.
    ///
    /// After this, no stale trailing call can fire and the next [`Throttle::call`] runs
    /// immediately.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_run = None;
    }
}
