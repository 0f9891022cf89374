// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for a [`Dropdown`](crate::Dropdown).

use alloc::string::String;

use crate::geometry::DEFAULT_GAP;

/// Default interval between resize-driven recomputations, in milliseconds.
pub const DEFAULT_RESIZE_INTERVAL_MS: u64 = 100;

/// Default enter/exit transition duration, in milliseconds.
pub const DEFAULT_TRANSITION_MS: u64 = 200;

/// Default identifier of the overlay container.
pub const DEFAULT_MOUNT_POINT_ID: &str = "overlay";

/// Dropdown configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownConfig {
    /// Vertical distance between the target's bottom edge and the overlay's top edge.
    pub gap: f64,
    /// Minimum time between resize-driven recomputations, in milliseconds.
    pub resize_interval_ms: u64,
    /// Enter/exit transition duration, in milliseconds.
    pub transition_ms: u64,
    /// Identifier of the overlay container resolved through
    /// [`Viewport::mount_point`](crate::Viewport::mount_point).
    pub mount_point_id: String,
    /// Base class applied to the overlay node, before any caller class.
    pub class_name: String,
    /// Prefix for transition class names.
    pub transition_class: String,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            resize_interval_ms: DEFAULT_RESIZE_INTERVAL_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
            mount_point_id: DEFAULT_MOUNT_POINT_ID.into(),
            class_name: "dropdown".into(),
            transition_class: "dropdown-animation".into(),
        }
    }
}

impl DropdownConfig {
    /// Sets the gap below the target.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the resize throttle interval.
    #[must_use]
    pub fn with_resize_interval(mut self, interval_ms: u64) -> Self {
        self.resize_interval_ms = interval_ms;
        self
    }

    /// Sets the transition duration.
    #[must_use]
    pub fn with_transition(mut self, duration_ms: u64) -> Self {
        self.transition_ms = duration_ms;
        self
    }

    /// Sets the overlay container identifier.
    #[must_use]
    pub fn with_mount_point(mut self, id: impl Into<String>) -> Self {
        self.mount_point_id = id.into();
        self
    }

    /// Sets the base class and transition class prefix.
    #[must_use]
    pub fn with_classes(
        mut self,
        class_name: impl Into<String>,
        transition_class: impl Into<String>,
    ) -> Self {
        self.class_name = class_name.into();
        self.transition_class = transition_class.into();
        self
    }
}
