// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ownership of the two global listener registrations.

use crate::viewport::{ListenerId, ListenerKind, ListenerKinds, Viewport};

/// The listener registrations held by one dropdown.
///
/// Registrations are exclusively owned here. [`Listeners::attach`] and
/// [`Listeners::detach`] are always called in pairs by the dropdown; attaching twice is a
/// bug, not something this type papers over.
#[derive(Clone, Debug, Default)]
pub(crate) struct Listeners {
    interaction: Option<ListenerId>,
    resize: Option<ListenerId>,
}

impl Listeners {
    /// Registers one listener per [`ListenerKind`].
    pub(crate) fn attach<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        debug_assert!(
            self.active().is_empty(),
            "listeners attached twice: {:?}",
            self.active()
        );
        for kind in ListenerKind::ALL {
            let id = viewport.listen(kind);
            tracing::debug!(?kind, ?id, "dropdown listener attached");
            *self.slot(kind) = Some(id);
        }
    }

    /// Unregisters every listener this set holds. Safe to call when nothing is bound.
    pub(crate) fn detach<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        for kind in ListenerKind::ALL {
            if let Some(id) = self.slot(kind).take() {
                viewport.unlisten(id);
                tracing::debug!(?kind, ?id, "dropdown listener detached");
            }
        }
    }

    /// Returns `true` if a listener of `kind` is bound.
    pub(crate) fn is_bound(&self, kind: ListenerKind) -> bool {
        match kind {
            ListenerKind::GlobalInteraction => self.interaction.is_some(),
            ListenerKind::Resize => self.resize.is_some(),
        }
    }

    /// Returns the set of bound listener kinds.
    pub(crate) fn active(&self) -> ListenerKinds {
        ListenerKind::ALL
            .into_iter()
            .filter(|&kind| self.is_bound(kind))
            .fold(ListenerKinds::empty(), |acc, kind| acc | ListenerKinds::from(kind))
    }

    fn slot(&mut self, kind: ListenerKind) -> &mut Option<ListenerId> {
        match kind {
            ListenerKind::GlobalInteraction => &mut self.interaction,
            ListenerKind::Resize => &mut self.resize,
        }
    }
}
