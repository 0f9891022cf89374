// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while rendering a dropdown.

use alloc::string::String;

/// Errors surfaced to the host renderer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DropdownError {
    /// The overlay container could not be resolved at render time.
    #[error("overlay mount point `{id}` not found")]
    MissingMountPoint {
        /// Identifier that was looked up.
        id: String,
    },
}
