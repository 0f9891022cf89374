// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory viewport for unit tests.

use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::{Size, Vec2};

use crate::viewport::{ListenerId, ListenerKind, Viewport};

#[derive(Debug)]
pub(crate) struct FakeViewport {
    pub(crate) scroll: Vec2,
    pub(crate) size: Size,
    pub(crate) has_mount_point: bool,
    next_id: u64,
    bound: Vec<(ListenerId, ListenerKind)>,
    log: Vec<(ListenerKind, bool)>,
    scroll_reads: Cell<usize>,
}

impl FakeViewport {
    pub(crate) fn new() -> Self {
        Self {
            scroll: Vec2::ZERO,
            size: Size::new(1000.0, 800.0),
            has_mount_point: true,
            next_id: 1,
            bound: Vec::new(),
            log: Vec::new(),
            scroll_reads: Cell::new(0),
        }
    }

    /// Number of `listen` calls for `kind`.
    pub(crate) fn registrations(&self, kind: ListenerKind) -> usize {
        self.log.iter().filter(|&&e| e == (kind, true)).count()
    }

    /// Number of `unlisten` calls for `kind`.
    pub(crate) fn unregistrations(&self, kind: ListenerKind) -> usize {
        self.log.iter().filter(|&&e| e == (kind, false)).count()
    }

    /// Listeners of `kind` still bound.
    pub(crate) fn active(&self, kind: ListenerKind) -> usize {
        self.bound.iter().filter(|(_, k)| *k == kind).count()
    }

    /// Every geometry computation reads the scroll offset exactly once.
    pub(crate) fn geometry_reads(&self) -> usize {
        self.scroll_reads.get()
    }
}

impl Viewport for FakeViewport {
    type MountPoint = &'static str;

    fn scroll_offset(&self) -> Vec2 {
        self.scroll_reads.set(self.scroll_reads.get() + 1);
        self.scroll
    }

    fn size(&self) -> Size {
        self.size
    }

    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.bound.push((id, kind));
        self.log.push((kind, true));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        let pos = self
            .bound
            .iter()
            .position(|(bound, _)| *bound == id)
            .expect("unlisten of an unknown registration");
        let (_, kind) = self.bound.remove(pos);
        self.log.push((kind, false));
    }

    fn mount_point(&self, id: &str) -> Option<Self::MountPoint> {
        (self.has_mount_point && id == "overlay").then_some("overlay")
    }
}
