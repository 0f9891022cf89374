// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dropdown lifecycle: visibility, listeners, and coordinates.

use core::fmt;

use kurbo::Rect;

use crate::config::DropdownConfig;
use crate::error::DropdownError;
use crate::geometry::{BoundingRect, Coordinates, calc_coords};
use crate::listeners::Listeners;
use crate::render::{self, OverlayNode, OverlayProps};
use crate::throttle::Throttle;
use crate::transition::{Transition, TransitionPhase};
use crate::viewport::{ListenerKind, ListenerKinds, Viewport};

/// A floating overlay anchored below a target.
///
/// The caller owns the shown flag. The dropdown mirrors it only to decide which
/// listeners are bound and which way the transition runs, and it reports every desired
/// change through `on_shown_change`:
///
/// - once at mount, with the initial value;
/// - on every change applied through [`Dropdown::set_shown`];
/// - as a close request (`false`) for each outside interaction while open.
///
/// A close request does not hide the overlay by itself. It stays open, with its
/// listeners bound, until the caller applies `false` with [`Dropdown::set_shown`].
///
/// Interactions on the trigger itself are not filtered out. If the trigger also toggles
/// the flag, a click on it while open produces both a close request from here and
/// whatever the trigger's own handler does.
///
/// The callback runs synchronously inside [`Dropdown::mount`], [`Dropdown::set_shown`],
/// and [`Dropdown::on_global_interaction`]. Callers must not hold a borrow of the store
/// the callback writes to across those calls.
///
/// Dropping the dropdown (or calling [`Dropdown::unmount`]) releases every listener and
/// cancels any pending resize recomputation, whatever the current state.
pub struct Dropdown<T, V, F>
where
    V: Viewport,
    F: FnMut(bool),
{
    target: T,
    viewport: V,
    on_shown_change: F,
    config: DropdownConfig,
    shown: bool,
    coordinates: Coordinates,
    listeners: Listeners,
    resize: Throttle,
    transition: Transition,
}

impl<T, V, F> Dropdown<T, V, F>
where
    T: BoundingRect,
    V: Viewport,
    F: FnMut(bool),
{
    /// Mounts a dropdown with the default [`DropdownConfig`].
    pub fn mount(target: T, viewport: V, shown: bool, on_shown_change: F) -> Self {
        Self::mount_with_config(
            DropdownConfig::default(),
            target,
            viewport,
            shown,
            on_shown_change,
        )
    }

    /// Mounts a dropdown.
    ///
    /// Coordinates are computed once here from the target's current geometry; after
    /// that only resize events recompute them. `on_shown_change(shown)` is invoked
    /// before this returns, and listeners are bound if `shown` is `true`.
    pub fn mount_with_config(
        config: DropdownConfig,
        target: T,
        viewport: V,
        shown: bool,
        on_shown_change: F,
    ) -> Self {
        let mut dropdown = Self {
            resize: Throttle::new(config.resize_interval_ms),
            transition: Transition::new(shown, config.transition_ms),
            target,
            viewport,
            on_shown_change,
            config,
            shown,
            coordinates: Coordinates::default(),
            listeners: Listeners::default(),
        };
        dropdown.coordinates = dropdown.compute_coordinates();
        tracing::debug!(shown, "dropdown mounted");

        (dropdown.on_shown_change)(shown);
        if shown {
            dropdown.listeners.attach(&mut dropdown.viewport);
        }
        dropdown
    }

    /// Applies the caller's shown flag at time `now` (milliseconds).
    ///
    /// Level-triggered: applying the current value does nothing. Returns `true` if the
    /// state changed.
    pub fn set_shown(&mut self, shown: bool, now: u64) -> bool {
        if shown == self.shown {
            return false;
        }
        self.shown = shown;
        tracing::debug!(shown, "dropdown shown state changed");

        if !shown {
            self.listeners.detach(&mut self.viewport);
            self.resize.cancel();
        }
        (self.on_shown_change)(shown);
        if shown {
            self.listeners.attach(&mut self.viewport);
        }
        self.transition.set_in(shown, now);
        true
    }

    /// Handles a document-wide pointer-down/click routed by the host.
    ///
    /// While open this requests a close through `on_shown_change(false)` and returns
    /// `true`. While closed no listener is bound and this is a no-op.
    pub fn on_global_interaction(&mut self) -> bool {
        if !self.listeners.is_bound(ListenerKind::GlobalInteraction) {
            return false;
        }
        tracing::debug!("outside interaction, requesting close");
        (self.on_shown_change)(false);
        true
    }

    /// Handles a viewport resize routed by the host at time `now` (milliseconds).
    ///
    /// Recomputation is throttled to once per
    /// [`resize_interval_ms`](DropdownConfig::resize_interval_ms); bursts are coalesced
    /// into one trailing recomputation delivered by [`Dropdown::poll`]. Returns `true` if
    /// coordinates were recomputed now. A no-op while closed.
    pub fn on_resize(&mut self, now: u64) -> bool {
        if !self.listeners.is_bound(ListenerKind::Resize) {
            return false;
        }
        if self.resize.call(now) {
            self.coordinates = self.compute_coordinates();
            true
        } else {
            tracing::trace!(now, "resize coalesced");
            false
        }
    }

    /// Advances timers to `now` (milliseconds).
    ///
    /// Runs a due trailing resize recomputation and settles a finished transition.
    /// Returns `true` if anything visible changed and the host should render again.
    pub fn poll(&mut self, now: u64) -> bool {
        let mut changed = false;
        if self.resize.poll(now) {
            self.coordinates = self.compute_coordinates();
            changed = true;
        }
        changed |= self.transition.poll(now);
        changed
    }

    /// Returns the earliest time [`Dropdown::poll`] has work to do, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.resize.deadline(), self.transition.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Projects the current state into an overlay node.
    ///
    /// Fails if the mount point cannot be resolved, whether or not the overlay is
    /// shown. Returns `Ok(None)` while the transition is unmounted.
    pub fn render<'a, C>(
        &self,
        props: &'a OverlayProps<C>,
    ) -> Result<Option<OverlayNode<'a, V::MountPoint, C>>, DropdownError> {
        let id = &self.config.mount_point_id;
        let mount_point = self
            .viewport
            .mount_point(id)
            .ok_or_else(|| DropdownError::MissingMountPoint { id: id.clone() })?;
        Ok(render::project(
            mount_point,
            props,
            self.coordinates,
            &self.transition,
            &self.config,
        ))
    }

    /// Tears the dropdown down, releasing all listeners.
    ///
    /// Equivalent to dropping; the teardown itself lives in the `Drop` impl. Provided for
    /// explicit call sites.
    pub fn unmount(self) {
        tracing::debug!(shown = self.shown, "dropdown unmounting");
    }

    /// Returns the mirrored shown flag.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Returns the most recently computed coordinates.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Returns the transition phase.
    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    /// Returns the listener kinds currently bound.
    #[must_use]
    pub fn active_listeners(&self) -> ListenerKinds {
        self.listeners.active()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    /// Returns the target handle.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the viewport.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    fn compute_coordinates(&self) -> Coordinates {
        let rect = self.target.bounding_rect().unwrap_or_else(|| {
            tracing::warn!("dropdown target is not mounted, positioning from an empty rect");
            Rect::ZERO
        });
        let coordinates = calc_coords(
            rect,
            self.viewport.scroll_offset(),
            self.viewport.size(),
            self.config.gap,
        );
        tracing::trace!(?coordinates, "dropdown coordinates computed");
        coordinates
    }
}

impl<T, V, F> Drop for Dropdown<T, V, F>
where
    V: Viewport,
    F: FnMut(bool),
{
    fn drop(&mut self) {
        self.resize.cancel();
        self.listeners.detach(&mut self.viewport);
    }
}

impl<T, V, F> fmt::Debug for Dropdown<T, V, F>
where
    T: fmt::Debug,
    V: Viewport + fmt::Debug,
    F: FnMut(bool),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("target", &self.target)
            .field("viewport", &self.viewport)
            .field("config", &self.config)
            .field("shown", &self.shown)
            .field("coordinates", &self.coordinates)
            .field("listeners", &self.listeners)
            .field("resize", &self.resize)
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::FakeViewport;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Vec2;

    const TARGET: Rect = Rect::new(50.0, 100.0, 150.0, 120.0);

    type Log = Rc<RefCell<Vec<bool>>>;

    fn recorder() -> (Log, impl FnMut(bool)) {
        let log = Log::default();
        let sink = {
            let log = Rc::clone(&log);
            move |shown| log.borrow_mut().push(shown)
        };
        (log, sink)
    }

    #[test]
    fn mount_computes_coordinates_and_syncs_shown() {
        let mut viewport = FakeViewport::new();
        let (log, sink) = recorder();
        let dropdown = Dropdown::mount(TARGET, &mut viewport, false, sink);

        assert_eq!(
            dropdown.coordinates(),
            Coordinates {
                top: 132.0,
                right: 850.0
            }
        );
        assert_eq!(*log.borrow(), [false]);
        assert_eq!(dropdown.viewport().geometry_reads(), 1);
        assert!(dropdown.active_listeners().is_empty());
    }

    #[test]
    fn mount_shown_binds_listeners_immediately() {
        let mut viewport = FakeViewport::new();
        let (log, sink) = recorder();
        let dropdown = Dropdown::mount(TARGET, &mut viewport, true, sink);

        assert_eq!(*log.borrow(), [true]);
        assert_eq!(dropdown.active_listeners(), ListenerKinds::all());
        assert_eq!(dropdown.phase(), TransitionPhase::Entered);
    }

    #[test]
    fn toggle_registers_and_unregisters_once_per_kind() {
        let mut viewport = FakeViewport::new();
        let (log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, false, sink);

        assert!(dropdown.set_shown(true, 0));
        assert!(dropdown.set_shown(false, 10));

        for kind in ListenerKind::ALL {
            assert_eq!(dropdown.viewport().registrations(kind), 1);
            assert_eq!(dropdown.viewport().unregistrations(kind), 1);
            assert_eq!(dropdown.viewport().active(kind), 0);
        }
        assert_eq!(*log.borrow(), [false, true, false]);
    }

    #[test]
    fn repeated_flag_is_a_no_op() {
        let mut viewport = FakeViewport::new();
        let (log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, false, sink);

        assert!(dropdown.set_shown(true, 0));
        assert!(!dropdown.set_shown(true, 5));
        assert!(!dropdown.set_shown(true, 6));

        assert_eq!(
            dropdown.viewport().registrations(ListenerKind::GlobalInteraction),
            1
        );
        assert_eq!(*log.borrow(), [false, true]);
    }

    #[test]
    fn opening_does_not_recompute_coordinates() {
        let target = Rc::new(Cell::new(TARGET));
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let mut dropdown = Dropdown::mount(Rc::clone(&target), &mut viewport, false, sink);

        target.set(Rect::new(0.0, 0.0, 10.0, 10.0));
        dropdown.set_shown(true, 0);

        assert_eq!(dropdown.viewport().geometry_reads(), 1);
        assert_eq!(dropdown.coordinates().top, 132.0);
    }

    #[test]
    fn closed_ignores_interaction_and_resize() {
        let mut viewport = FakeViewport::new();
        let (log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, false, sink);

        assert!(!dropdown.on_global_interaction());
        assert!(!dropdown.on_resize(0));
        assert!(!dropdown.poll(1_000));

        // Also after an open/close round trip.
        dropdown.set_shown(true, 0);
        dropdown.set_shown(false, 10);
        log.borrow_mut().clear();
        assert!(!dropdown.on_global_interaction());
        assert!(!dropdown.on_resize(500));

        assert!(log.borrow().is_empty());
        assert_eq!(dropdown.viewport().geometry_reads(), 1);
    }

    #[test]
    fn outside_interaction_requests_close_once() {
        let mut viewport = FakeViewport::new();
        let (log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, true, sink);
        log.borrow_mut().clear();

        assert!(dropdown.on_global_interaction());
        assert_eq!(*log.borrow(), [false]);

        // The caller's flag is authoritative: nothing closes until it says so.
        assert!(dropdown.is_shown());
        assert_eq!(dropdown.active_listeners(), ListenerKinds::all());

        dropdown.set_shown(false, 0);
        assert_eq!(*log.borrow(), [false, false]);
        assert!(dropdown.active_listeners().is_empty());
    }

    #[test]
    fn resize_burst_recomputes_at_most_once() {
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, true, sink);
        let base = dropdown.viewport().geometry_reads();

        let ran = (0..10_u64).filter(|i| dropdown.on_resize(i * 5)).count();

        assert_eq!(ran, 1);
        assert_eq!(dropdown.viewport().geometry_reads() - base, 1);
        assert_eq!(dropdown.next_deadline(), Some(100));
    }

    #[test]
    fn coalesced_resize_runs_on_trailing_edge() {
        let target = Rc::new(Cell::new(TARGET));
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let mut dropdown = Dropdown::mount(Rc::clone(&target), &mut viewport, true, sink);

        assert!(dropdown.on_resize(0));
        target.set(Rect::new(50.0, 200.0, 150.0, 220.0));
        assert!(!dropdown.on_resize(40));
        assert_eq!(dropdown.coordinates().top, 132.0);

        assert!(!dropdown.poll(99));
        assert!(dropdown.poll(100));
        assert_eq!(dropdown.coordinates().top, 232.0);
        assert_eq!(dropdown.next_deadline(), None);
    }

    #[test]
    fn spaced_resizes_each_recompute() {
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, true, sink);
        let base = dropdown.viewport().geometry_reads();

        for t in [0, 150, 300, 450] {
            assert!(dropdown.on_resize(t));
        }
        assert_eq!(dropdown.viewport().geometry_reads() - base, 4);
    }

    #[test]
    fn resize_tracks_scroll_and_viewport() {
        let mut viewport = FakeViewport::new();
        viewport.scroll = Vec2::new(20.0, 400.0);
        viewport.size = kurbo::Size::new(1280.0, 720.0);
        let (_log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, true, sink);

        assert_eq!(
            dropdown.coordinates(),
            Coordinates {
                top: 400.0 + 120.0 + 12.0,
                right: 1280.0 - 150.0 - 20.0,
            }
        );
        assert!(dropdown.on_resize(0));
    }

    #[test]
    fn closing_cancels_pending_resize() {
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, true, sink);

        assert!(dropdown.on_resize(0));
        assert!(!dropdown.on_resize(10));
        dropdown.set_shown(false, 20);
        let reads = dropdown.viewport().geometry_reads();

        // Only the exit transition is left to settle.
        assert_eq!(dropdown.next_deadline(), Some(220));
        dropdown.poll(1_000);
        assert_eq!(dropdown.viewport().geometry_reads(), reads);
    }

    #[test]
    fn next_deadline_picks_earliest_timer() {
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, false, sink);

        dropdown.set_shown(true, 0);
        assert!(dropdown.on_resize(10));
        assert!(!dropdown.on_resize(20));
        // Trailing resize at 110 beats the enter transition at 200.
        assert_eq!(dropdown.next_deadline(), Some(110));

        assert!(dropdown.poll(110));
        assert_eq!(dropdown.next_deadline(), Some(200));
        assert!(dropdown.poll(200));
        assert_eq!(dropdown.next_deadline(), None);
    }

    #[test]
    fn callback_can_write_caller_store_during_set_shown() {
        let store = Rc::new(RefCell::new(false));
        let sink = {
            let store = Rc::clone(&store);
            move |value| *store.borrow_mut() = value
        };
        let mut viewport = FakeViewport::new();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, true, sink);

        assert!(dropdown.on_global_interaction());
        let value = *store.borrow();
        assert!(!value);
        assert!(dropdown.set_shown(value, 0));
        assert!(!*store.borrow());
        assert!(dropdown.active_listeners().is_empty());
    }

    #[test]
    fn unmount_while_shown_releases_listeners() {
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, false, sink);
        dropdown.set_shown(true, 0);
        dropdown.on_resize(0);
        dropdown.on_resize(10);
        dropdown.unmount();

        for kind in ListenerKind::ALL {
            assert_eq!(viewport.active(kind), 0);
            assert_eq!(viewport.registrations(kind), 1);
            assert_eq!(viewport.unregistrations(kind), 1);
        }
    }

    #[test]
    fn drop_while_shown_releases_listeners() {
        let mut viewport = FakeViewport::new();
        {
            let (_log, sink) = recorder();
            let _dropdown = Dropdown::mount(TARGET, &mut viewport, true, sink);
        }
        for kind in ListenerKind::ALL {
            assert_eq!(viewport.active(kind), 0);
        }
    }

    #[test]
    fn drop_while_closed_touches_nothing() {
        let mut viewport = FakeViewport::new();
        {
            let (_log, sink) = recorder();
            let _dropdown = Dropdown::mount(TARGET, &mut viewport, false, sink);
        }
        for kind in ListenerKind::ALL {
            assert_eq!(viewport.registrations(kind), 0);
            assert_eq!(viewport.unregistrations(kind), 0);
        }
    }

    #[test]
    fn unmounted_target_positions_from_empty_rect() {
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let dropdown = Dropdown::mount(None::<Rect>, &mut viewport, false, sink);

        assert_eq!(
            dropdown.coordinates(),
            Coordinates {
                top: 12.0,
                right: 1000.0
            }
        );
    }

    #[test]
    fn render_requires_mount_point_even_when_closed() {
        let mut viewport = FakeViewport::new();
        viewport.has_mount_point = false;
        let (_log, sink) = recorder();
        let dropdown = Dropdown::mount(TARGET, &mut viewport, false, sink);

        let err = dropdown.render(&OverlayProps::new(())).unwrap_err();
        assert_eq!(
            err,
            DropdownError::MissingMountPoint {
                id: "overlay".into()
            }
        );
    }

    #[test]
    fn render_mounts_on_enter_and_unmounts_after_exit() {
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let mut dropdown = Dropdown::mount(TARGET, &mut viewport, false, sink);
        let props = OverlayProps::new("items").with_style("top", "0px");

        assert!(dropdown.render(&props).unwrap().is_none());

        dropdown.set_shown(true, 1_000);
        let node = dropdown.render(&props).unwrap().unwrap();
        assert_eq!(node.phase, TransitionPhase::Entering);
        assert_eq!(node.mount_point, "overlay");
        assert_eq!(node.style.get("top"), Some("132px"));
        assert_eq!(node.style.get("right"), Some("850px"));

        assert!(dropdown.poll(1_200));
        assert_eq!(dropdown.phase(), TransitionPhase::Entered);

        dropdown.set_shown(false, 2_000);
        let node = dropdown.render(&props).unwrap().unwrap();
        assert_eq!(node.phase, TransitionPhase::Exiting);
        assert_eq!(
            node.class,
            "dropdown dropdown-animation-exit dropdown-animation-exit-active"
        );

        assert!(dropdown.poll(2_200));
        assert!(dropdown.render(&props).unwrap().is_none());
    }

    #[test]
    fn custom_config_is_honored() {
        let mut viewport = FakeViewport::new();
        let (_log, sink) = recorder();
        let config = DropdownConfig::default()
            .with_gap(4.0)
            .with_resize_interval(16)
            .with_mount_point("popups");
        let mut dropdown = Dropdown::mount_with_config(config, TARGET, &mut viewport, true, sink);

        assert_eq!(dropdown.coordinates().top, 124.0);
        assert!(dropdown.on_resize(0));
        assert!(dropdown.on_resize(16));
        // The fake only knows the default container.
        assert!(matches!(
            dropdown.render(&OverlayProps::new(())),
            Err(DropdownError::MissingMountPoint { .. })
        ));
    }
}
