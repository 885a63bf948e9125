// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sub-style slots that either name a registry entry or embed a style.

use alloc::rc::Rc;

use serde::{Deserialize, Serialize};
use understory_widget::WidgetRef;

use crate::name::StyleName;
use crate::value::{ApplyCx, ShapeStyle, StyleValue};

/// How a [`StyleRef`] finds its style.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefMode {
    /// Resolve [`StyleRef::name`] against the registry being applied.
    #[default]
    Reference,
    /// Use [`StyleRef::style`] directly.
    Embedded,
}

/// A sub-style slot inside a composite style.
///
/// In [`RefMode::Reference`] the slot is shared: it names an entry that is
/// looked up in the registry at apply time, so the entry can be overridden
/// further down an inheritance chain. In [`RefMode::Embedded`] the slot owns
/// its own style. Both fields are kept regardless of the mode so switching
/// back and forth loses nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct StyleRef<T> {
    /// Lookup mode.
    pub mode: RefMode,
    /// Name resolved in reference mode.
    pub name: Option<StyleName>,
    /// Style used in embedded mode.
    pub style: T,
}

impl<T: Default> StyleRef<T> {
    /// A slot resolving `name` against the registry.
    #[must_use]
    pub fn reference(name: impl Into<StyleName>) -> Self {
        Self {
            mode: RefMode::Reference,
            name: Some(name.into()),
            style: T::default(),
        }
    }

    /// A slot owning `style`.
    #[must_use]
    pub fn embedded(style: T) -> Self {
        Self {
            mode: RefMode::Embedded,
            name: None,
            style,
        }
    }

    /// A reference slot with no name; applying it does nothing.
    #[must_use]
    pub fn unset() -> Self {
        Self::default()
    }
}

impl<T: ShapeStyle> StyleRef<T> {
    /// Resolves a reference-mode slot against the context's registry.
    ///
    /// Returns `None` in embedded mode, when the name is unset, when there is
    /// no registry, or when the registry has no such entry.
    #[must_use]
    pub fn resolve(&self, cx: &ApplyCx<'_>) -> Option<Rc<StyleValue>> {
        if self.mode != RefMode::Reference {
            return None;
        }
        let name = self.name.as_ref()?;
        cx.registry()?.resolve(name)
    }

    /// Applies the slot's style to `widget`.
    ///
    /// Anything that cannot be resolved is skipped without error.
    pub fn apply(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        match self.mode {
            RefMode::Embedded => self.style.apply_to_widget(cx, widget),
            RefMode::Reference => match self.resolve(cx) {
                Some(value) => value.apply_to_widget(cx.tree_mut(), widget),
                None => tracing::trace!(
                    name = ?self.name.as_ref().map(StyleName::as_str),
                    node = ?widget.node,
                    "sub-style reference not resolved, skipping"
                ),
            },
        }
    }

    /// Applies to `widget` when one was found.
    pub(crate) fn apply_found(&self, cx: &mut ApplyCx<'_>, widget: Option<WidgetRef>) {
        if let Some(widget) = widget {
            self.apply(cx, widget);
        }
    }
}
