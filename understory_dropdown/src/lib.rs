// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dropdown --heading-base-level=0

//! Understory Dropdown: a headless, anchored overlay.
//!
//! This crate models the lifecycle of a single floating overlay (a dropdown, popover, or
//! menu panel) that hangs below a trigger element, renders into a separate overlay layer,
//! animates in and out, and dismisses itself on outside interaction. It owns the parts
//! that are easy to get subtly wrong:
//!
//! - **Geometry** ([`calc_coords`]): target bounds + scroll + viewport size → document
//!   coordinates for the overlay's top and right edges.
//! - **Visibility** ([`Dropdown`]): mirrors the caller's shown flag, reports every desired
//!   change through a callback, and never flips the flag on its own.
//! - **Listeners**: exactly one global interaction listener and one resize listener while
//!   open, none while closed, and none after teardown on any exit path.
//! - **Rate limiting** ([`Throttle`]): resize bursts are coalesced into at most one
//!   recomputation per interval, with explicit cancellation.
//! - **Output** ([`OverlayNode`]): class, style, and passthrough for the host renderer,
//!   gated by a mount-on-enter/unmount-on-exit [`Transition`].
//!
//! It does not know about any widget system or document. The host implements
//! [`Viewport`] to expose scroll, size, listener registration, and the overlay mount
//! point, then routes events it receives for registered listeners back into the
//! dropdown. Time is supplied by the host as millisecond timestamps.
//!
//! This is not a layout solver: there is no collision detection, flipping, or
//! multi-anchor support.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Rect, Size, Vec2};
//! use understory_dropdown::{
//!     Coordinates, Dropdown, ListenerId, ListenerKind, OverlayProps, Viewport,
//! };
//!
//! #[derive(Default)]
//! struct Window {
//!     listeners: Vec<(ListenerId, ListenerKind)>,
//!     next_id: u64,
//! }
//!
//! impl Viewport for Window {
//!     type MountPoint = &'static str;
//!
//!     fn scroll_offset(&self) -> Vec2 {
//!         Vec2::ZERO
//!     }
//!     fn size(&self) -> Size {
//!         Size::new(1000.0, 800.0)
//!     }
//!     fn listen(&mut self, kind: ListenerKind) -> ListenerId {
//!         self.next_id += 1;
//!         let id = ListenerId(self.next_id);
//!         self.listeners.push((id, kind));
//!         id
//!     }
//!     fn unlisten(&mut self, id: ListenerId) {
//!         self.listeners.retain(|(l, _)| *l != id);
//!     }
//!     fn mount_point(&self, id: &str) -> Option<&'static str> {
//!         (id == "overlay").then_some("overlay")
//!     }
//! }
//!
//! let mut window = Window::default();
//! // The application's source of truth.
//! let shown = Rc::new(RefCell::new(false));
//! let on_shown_change = {
//!     let shown = Rc::clone(&shown);
//!     move |value| *shown.borrow_mut() = value
//! };
//!
//! let trigger = Rect::new(50.0, 100.0, 150.0, 120.0);
//! let mut dropdown = Dropdown::mount(trigger, &mut window, false, on_shown_change);
//! assert_eq!(dropdown.coordinates(), Coordinates { top: 132.0, right: 850.0 });
//!
//! // The trigger's handler opens the dropdown.
//! dropdown.set_shown(true, 0);
//! assert_eq!(dropdown.viewport().listeners.len(), 2);
//!
//! let props = OverlayProps::new("menu items").with_class("user-menu");
//! let node = dropdown.render(&props).unwrap().expect("entering overlay is mounted");
//! assert_eq!(node.style.get("top"), Some("132px"));
//!
//! // A click anywhere requests a close; the application applies it.
//! dropdown.on_global_interaction();
//! assert!(!*shown.borrow());
//! // Read the flag out first: the callback writes to it during `set_shown`.
//! let value = *shown.borrow();
//! dropdown.set_shown(value, 50);
//! assert!(dropdown.viewport().listeners.is_empty());
//!
//! // After the exit transition the node is gone.
//! dropdown.poll(250);
//! assert!(dropdown.render(&props).unwrap().is_none());
//! ```
//!
//! ## Driving time
//!
//! Resize handling and transitions both finish in the future. After any call, ask
//! [`Dropdown::next_deadline`] when to come back and call [`Dropdown::poll`] at or after
//! that time. [`Dropdown::poll`] returns `true` when the host should render again.
//!
//! ## Trigger clicks
//!
//! The interaction listener does not exclude the trigger. Clicking the trigger while the
//! dropdown is open yields a close request from the dropdown in addition to whatever the
//! trigger's own handler does; hosts that toggle on trigger clicks should account for
//! both.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo` and
//!   `tracing`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point
//!   math.
//!
//! Diagnostics are emitted with `tracing`; install a subscriber in the host to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod dropdown;
mod error;
mod geometry;
mod listeners;
mod render;
mod throttle;
mod transition;
mod viewport;

#[cfg(test)]
mod test_util;

pub use config::{
    DEFAULT_MOUNT_POINT_ID, DEFAULT_RESIZE_INTERVAL_MS, DEFAULT_TRANSITION_MS, DropdownConfig,
};
pub use dropdown::Dropdown;
pub use error::DropdownError;
pub use geometry::{BoundingRect, Coordinates, DEFAULT_GAP, calc_coords};
pub use render::{OverlayNode, OverlayProps, Style};
pub use throttle::Throttle;
pub use transition::{Transition, TransitionPhase};
pub use viewport::{ListenerId, ListenerKind, ListenerKinds, Viewport};
