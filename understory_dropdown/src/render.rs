// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection of dropdown state into a renderable overlay node.
//!
//! The crate does not draw anything. [`Dropdown::render`](crate::Dropdown::render) yields
//! an [`OverlayNode`] that a host renderer mounts into the resolved container, outside the
//! trigger's ancestry.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::config::DropdownConfig;
use crate::geometry::Coordinates;
use crate::transition::{Transition, TransitionPhase};

/// Ordered style declarations; later [`Style::set`] calls replace earlier values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    entries: SmallVec<[(String, String); 4]>,
}

impl Style {
    /// Creates an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any existing declaration in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value declared for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (name, value) in iter {
            style.set(name, value);
        }
        style
    }
}

/// Caller-supplied passthrough for the overlay node.
#[derive(Clone, Debug, Default)]
pub struct OverlayProps<C> {
    /// Extra class appended after the base class.
    pub class: Option<String>,
    /// Caller style. `top` and `right` are overwritten by computed coordinates.
    pub style: Style,
    /// Opaque attributes forwarded to the node.
    pub attributes: Vec<(String, String)>,
    /// Overlay content.
    pub children: C,
}

impl<C> OverlayProps<C> {
    /// Creates props with the given children and nothing else.
    pub fn new(children: C) -> Self {
        Self {
            class: None,
            style: Style::new(),
            attributes: Vec::new(),
            children,
        }
    }

    /// Sets the extra class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Adds a style declaration.
    #[must_use]
    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.set(name, value);
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// A mounted overlay, ready for the host renderer.
#[derive(Clone, Debug)]
pub struct OverlayNode<'a, M, C> {
    /// Container the node is rendered into.
    pub mount_point: M,
    /// Base class, caller class, then transition classes.
    pub class: String,
    /// Caller style with computed `top`/`right` applied last.
    pub style: Style,
    /// Caller attributes.
    pub attributes: &'a [(String, String)],
    /// Caller children.
    pub children: &'a C,
    /// Transition phase the node is in.
    pub phase: TransitionPhase,
    /// Coordinates used for `top`/`right`.
    pub coordinates: Coordinates,
}

/// Builds the node for the current state, or `None` while the transition is unmounted.
pub(crate) fn project<'a, M, C>(
    mount_point: M,
    props: &'a OverlayProps<C>,
    coordinates: Coordinates,
    transition: &Transition,
    config: &DropdownConfig,
) -> Option<OverlayNode<'a, M, C>> {
    let transition_classes = transition.class_names(&config.transition_class)?;

    let mut class = config.class_name.clone();
    for extra in [props.class.as_deref(), Some(transition_classes.as_str())]
        .into_iter()
        .flatten()
        .filter(|c| !c.is_empty())
    {
        if !class.is_empty() {
            class.push(' ');
        }
        class.push_str(extra);
    }

    let mut style = props.style.clone();
    style.set("top", format!("{}px", coordinates.top));
    style.set("right", format!("{}px", coordinates.right));

    Some(OverlayNode {
        mount_point,
        class,
        style,
        attributes: &props.attributes,
        children: &props.children,
        phase: transition.phase(),
        coordinates,
    })
}
