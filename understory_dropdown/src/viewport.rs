// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host capability a dropdown needs from its environment.
//!
//! A [`Viewport`] stands in for the ambient window/document: it reports scroll and size,
//! hands out listener registrations, and resolves the overlay mount point. The dropdown
//! never sees host callbacks; once a listener is registered, the host routes matching
//! events back by calling [`Dropdown::on_global_interaction`] or
//! [`Dropdown::on_resize`].
//!
//! [`Dropdown::on_global_interaction`]: crate::Dropdown::on_global_interaction
//! [`Dropdown::on_resize`]: crate::Dropdown::on_resize

use kurbo::{Size, Vec2};

/// Kind of global listener a dropdown registers while open.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Document-wide pointer-down/click stream, used for outside dismissal.
    GlobalInteraction,
    /// Viewport resize notifications.
    Resize,
}

impl ListenerKind {
    /// Both kinds, in registration order.
    pub const ALL: [Self; 2] = [Self::GlobalInteraction, Self::Resize];
}

bitflags::bitflags! {
    /// Set of [`ListenerKind`]s, used to report which listeners are currently bound.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ListenerKinds: u8 {
        /// A global interaction listener is bound.
        const GLOBAL_INTERACTION = 0b0000_0001;
        /// A resize listener is bound.
        const RESIZE             = 0b0000_0010;
    }
}

impl From<ListenerKind> for ListenerKinds {
    fn from(kind: ListenerKind) -> Self {
        match kind {
            ListenerKind::GlobalInteraction => Self::GLOBAL_INTERACTION,
            ListenerKind::Resize => Self::RESIZE,
        }
    }
}

/// Host-issued handle for one listener registration.
///
/// The host chooses the value; the dropdown only stores it and hands it back to
/// [`Viewport::unlisten`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Window/document services used by a dropdown.
pub trait Viewport {
    /// Handle to the overlay container, as understood by the host renderer.
    type MountPoint;

    /// Returns the current document scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Returns the current viewport size.
    fn size(&self) -> Size;

    /// Starts delivering events of `kind` and returns the registration handle.
    fn listen(&mut self, kind: ListenerKind) -> ListenerId;

    /// Stops delivering events for a registration returned by [`Viewport::listen`].
    fn unlisten(&mut self, id: ListenerId);

    /// Resolves the overlay container with the given identifier.
    fn mount_point(&self, id: &str) -> Option<Self::MountPoint>;
}

impl<V: Viewport + ?Sized> Viewport for &mut V {
    type MountPoint = V::MountPoint;

    fn scroll_offset(&self) -> Vec2 {
        (**self).scroll_offset()
    }

    fn size(&self) -> Size {
        (**self).size()
    }

    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        (**self).listen(kind)
    }

    fn unlisten(&mut self, id: ListenerId) {
        (**self).unlisten(id);
    }

    fn mount_point(&self, id: &str) -> Option<Self::MountPoint> {
        (**self).mount_point(id)
    }
}
