// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored overlay geometry.
//!
//! The overlay hangs below its target: its top edge sits [`DEFAULT_GAP`] logical units
//! under the target's bottom edge and its right edge lines up with the target's right
//! edge. Results are in document space (the current scroll offset is folded in), so they
//! stay put while the page scrolls.

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::{Rect, Size, Vec2};

/// Default vertical distance between the target's bottom edge and the overlay's top edge.
pub const DEFAULT_GAP: f64 = 12.0;

/// Document-space position of the overlay.
///
/// `top` is measured from the top of the document; `right` is the distance from the
/// overlay's right edge to the right edge of the viewport, shifted by horizontal scroll.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Coordinates {
    /// Distance from the document top to the overlay's top edge.
    pub top: f64,
    /// Distance from the overlay's right edge to the viewport's right edge.
    pub right: f64,
}

/// Computes overlay [`Coordinates`] for a target.
///
/// `target` is the target's bounding box relative to the viewport, `scroll` the current
/// scroll offset and `viewport` the current viewport size.
///
/// This has no hidden state and must be called again whenever scroll or viewport
/// geometry may have changed.
///
/// ```
/// use kurbo::{Rect, Size, Vec2};
/// use understory_dropdown::{Coordinates, DEFAULT_GAP, calc_coords};
///
/// let target = Rect::new(50.0, 100.0, 150.0, 120.0);
/// let coords = calc_coords(target, Vec2::ZERO, Size::new(1000.0, 800.0), DEFAULT_GAP);
/// assert_eq!(coords, Coordinates { top: 132.0, right: 850.0 });
/// ```
#[must_use]
pub fn calc_coords(target: Rect, scroll: Vec2, viewport: Size, gap: f64) -> Coordinates {
    Coordinates {
        top: scroll.y + target.y1 + gap,
        right: viewport.width - target.x1 - scroll.x,
    }
}

/// Read access to a target's current bounding box.
///
/// Rects are relative to the viewport (like a DOM `getBoundingClientRect`). `None` means
/// the target is not mounted; callers treat that as a zero rect.
pub trait BoundingRect {
    /// Returns the target's current viewport-relative bounds, if mounted.
    fn bounding_rect(&self) -> Option<Rect>;
}

impl BoundingRect for Rect {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl BoundingRect for Option<Rect> {
    fn bounding_rect(&self) -> Option<Rect> {
        *self
    }
}

impl BoundingRect for Cell<Rect> {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(self.get())
    }
}

impl BoundingRect for Cell<Option<Rect>> {
    fn bounding_rect(&self) -> Option<Rect> {
        self.get()
    }
}

impl<T: BoundingRect + ?Sized> BoundingRect for &T {
    fn bounding_rect(&self) -> Option<Rect> {
        (**self).bounding_rect()
    }
}

impl<T: BoundingRect + ?Sized> BoundingRect for Rc<T> {
    fn bounding_rect(&self) -> Option<Rect> {
        (**self).bounding_rect()
    }
}
