// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types reported by theme application and registry loading.

use alloc::string::String;

use understory_widget::NodeId;

use crate::name::StyleName;

/// A configuration problem found while applying a theme.
///
/// Every variant is logged through `tracing` where it is detected; the value
/// is returned so callers can react, but nothing has been mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// The binding on `node` does not name a style.
    #[error("style binding on {node:?} has no style name")]
    MissingStyleName {
        /// Node carrying the binding.
        node: NodeId,
    },
    /// There is no registry to resolve styles against.
    #[error("no style registry to apply to {node:?}")]
    MissingRegistry {
        /// Node carrying the binding.
        node: NodeId,
    },
    /// The registry has no entry under the requested name.
    #[error("style '{name}' not found in registry '{registry}'")]
    UnknownStyle {
        /// Requested style.
        name: StyleName,
        /// Label of the registry that was searched.
        registry: String,
    },
    /// No theme binding encloses the node.
    #[error("no theme binding encloses {node:?}")]
    NotAttached {
        /// Node that was looked up.
        node: NodeId,
    },
}

/// A problem assembling a [`ThemeLibrary`](crate::ThemeLibrary) from records.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LibraryError {
    /// Two registries share a label.
    #[error("registry '{label}' is defined more than once")]
    DuplicateRegistry {
        /// The repeated label.
        label: String,
    },
    /// A registry names a base that is not in the library.
    #[error("registry '{registry}' inherits from unknown registry '{base}'")]
    UnknownBase {
        /// The inheriting registry.
        registry: String,
        /// The missing base label.
        base: String,
    },
}
