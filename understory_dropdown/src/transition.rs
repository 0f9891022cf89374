// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/exit transition with mount-on-enter and unmount-on-exit.
//!
//! The overlay only exists while it is entering, entered, or exiting. Class names follow
//! the `react-transition-group` scheme so existing stylesheets keep working:
//!
//! | Phase      | Classes                                  |
//! |------------|------------------------------------------|
//! | `Entering` | `{prefix}-enter {prefix}-enter-active`   |
//! | `Entered`  | `{prefix}-enter-done`                    |
//! | `Exiting`  | `{prefix}-exit {prefix}-exit-active`     |
//! | `Exited`   | (not mounted)                            |

use alloc::format;
use alloc::string::String;

/// Phase of a [`Transition`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// Hidden and unmounted.
    Exited,
    /// Mounted and animating in.
    Entering,
    /// Mounted and fully shown.
    Entered,
    /// Mounted and animating out.
    Exiting,
}

/// Fixed-duration enter/exit state machine.
#[derive(Clone, Debug)]
pub struct Transition {
    duration: u64,
    phase: TransitionPhase,
    started_at: u64,
}

impl Transition {
    /// Creates a transition that starts settled: `Entered` when `shown`, `Exited` otherwise.
    ///
    /// There is no appear animation for the initial state.
    #[must_use]
    pub const fn new(shown: bool, duration: u64) -> Self {
        Self {
            duration,
            phase: if shown {
                TransitionPhase::Entered
            } else {
                TransitionPhase::Exited
            },
            started_at: 0,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Returns `true` if the overlay node should exist.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        !matches!(self.phase, TransitionPhase::Exited)
    }

    /// Drives the transition toward shown or hidden.
    ///
    /// Reversing mid-animation restarts the timer from `now`. Returns `true` if the phase
    /// changed.
    pub fn set_in(&mut self, shown: bool, now: u64) -> bool {
        let next = match (shown, self.phase) {
            (true, TransitionPhase::Exited | TransitionPhase::Exiting) => {
                TransitionPhase::Entering
            }
            (false, TransitionPhase::Entered | TransitionPhase::Entering) => {
                TransitionPhase::Exiting
            }
            _ => return false,
        };
        self.phase = next;
        self.started_at = now;
        true
    }

    /// Settles an in-flight animation once its duration has elapsed.
    ///
    /// Returns `true` if the phase changed.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline() {
            Some(due) if now >= due => {
                self.phase = match self.phase {
                    TransitionPhase::Entering => TransitionPhase::Entered,
                    _ => TransitionPhase::Exited,
                };
                true
            }
            _ => false,
        }
    }

    /// Returns when the in-flight animation settles, if one is running.
    #[must_use]
    pub const fn deadline(&self) -> Option<u64> {
        match self.phase {
            TransitionPhase::Entering | TransitionPhase::Exiting => {
                Some(self.started_at.saturating_add(self.duration))
            }
            TransitionPhase::Entered | TransitionPhase::Exited => None,
        }
    }

    /// Returns the class names for the current phase, or `None` while unmounted.
    #[must_use]
    pub fn class_names(&self, prefix: &str) -> Option<String> {
        match self.phase {
            TransitionPhase::Exited => None,
            TransitionPhase::Entering => Some(format!("{prefix}-enter {prefix}-enter-active")),
            TransitionPhase::Entered => Some(format!("{prefix}-enter-done")),
            TransitionPhase::Exiting => Some(format!("{prefix}-exit {prefix}-exit-active")),
        }
    }
}
