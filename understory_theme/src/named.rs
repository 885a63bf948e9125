// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Authored registry content: per-kind lists of named styles.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::composite::{
    ButtonStyle, DropdownStyle, InputFieldStyle, ScrollViewStyle, ScrollbarStyle, SliderStyle,
    ToggleStyle,
};
use crate::leaf::{ImageStyle, LabelStyle, TransitionStyle};
use crate::name::StyleName;
use crate::value::{ShapeStyle, StyleKind, StyleValue};

/// A style paired with an optional name.
///
/// Entries without a name are drafts: they are stored and persisted but never
/// resolvable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct NamedStyle<T> {
    name: Option<StyleName>,
    style: T,
}

impl<T> NamedStyle<T> {
    /// Creates a named entry.
    #[must_use]
    pub fn new(name: impl Into<StyleName>, style: T) -> Self {
        Self {
            name: Some(name.into()),
            style,
        }
    }

    /// Creates an unnamed draft entry.
    #[must_use]
    pub fn unnamed(style: T) -> Self {
        Self { name: None, style }
    }

    /// Returns the entry's name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> Option<&StyleName> {
        self.name.as_ref()
    }

    /// Renames the entry; `None` turns it into a draft.
    pub fn set_name(&mut self, name: Option<StyleName>) {
        self.name = name;
    }

    /// Returns the style.
    #[must_use]
    #[inline]
    pub fn style(&self) -> &T {
        &self.style
    }

    /// Returns the style, mutably.
    pub fn style_mut(&mut self) -> &mut T {
        &mut self.style
    }
}

impl<T: ShapeStyle> NamedStyle<T> {
    /// Returns an unlinked [`StyleValue`] holding a copy of the style.
    #[must_use]
    pub fn to_value(&self) -> StyleValue {
        StyleValue::new(self.style.clone())
    }
}

/// The authored content of one registry, one list per style kind.
///
/// List order matters: within a registry, a later entry overrides an earlier
/// one of the same name, and kinds are merged in field order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleLists {
    /// Button styles.
    pub buttons: Vec<NamedStyle<ButtonStyle>>,
    /// Dropdown styles.
    pub dropdowns: Vec<NamedStyle<DropdownStyle>>,
    /// Image styles.
    pub images: Vec<NamedStyle<ImageStyle>>,
    /// Input field styles.
    pub input_fields: Vec<NamedStyle<InputFieldStyle>>,
    /// Label styles.
    pub labels: Vec<NamedStyle<LabelStyle>>,
    /// Scrollbar styles.
    pub scrollbars: Vec<NamedStyle<ScrollbarStyle>>,
    /// Scroll view styles.
    pub scroll_views: Vec<NamedStyle<ScrollViewStyle>>,
    /// Slider styles.
    pub sliders: Vec<NamedStyle<SliderStyle>>,
    /// Toggle styles.
    pub toggles: Vec<NamedStyle<ToggleStyle>>,
    /// Transition styles.
    pub transitions: Vec<NamedStyle<TransitionStyle>>,
}

impl StyleLists {
    /// Appends a named style, builder style.
    #[must_use]
    pub fn with<S: ShapeStyle>(mut self, name: impl Into<StyleName>, style: S) -> Self {
        self.insert(name, style);
        self
    }

    /// Appends a named style to the list for its kind.
    pub fn insert<S: ShapeStyle>(&mut self, name: impl Into<StyleName>, style: S) {
        S::entries_mut(self).push(NamedStyle::new(name, style));
    }

    /// Returns the entries of one kind.
    #[must_use]
    pub fn of<S: ShapeStyle>(&self) -> &[NamedStyle<S>] {
        S::entries(self)
    }

    /// Returns the entries of one kind, mutably.
    pub fn of_mut<S: ShapeStyle>(&mut self) -> &mut Vec<NamedStyle<S>> {
        S::entries_mut(self)
    }

    /// Total number of entries across all kinds, drafts included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
            + self.dropdowns.len()
            + self.images.len()
            + self.input_fields.len()
            + self.labels.len()
            + self.scrollbars.len()
            + self.scroll_views.len()
            + self.sliders.len()
            + self.toggles.len()
            + self.transitions.len()
    }

    /// Returns `true` if there are no entries of any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends every entry, kind after kind in field order.
    pub(crate) fn collect_into(&self, out: &mut Vec<(Option<StyleName>, StyleKind)>) {
        fn push<S: ShapeStyle>(
            out: &mut Vec<(Option<StyleName>, StyleKind)>,
            entries: &[NamedStyle<S>],
        ) {
            out.extend(
                entries
                    .iter()
                    .map(|e| (e.name.clone(), e.style.clone().into())),
            );
        }
        push(out, &self.buttons);
        push(out, &self.dropdowns);
        push(out, &self.images);
        push(out, &self.input_fields);
        push(out, &self.labels);
        push(out, &self.scrollbars);
        push(out, &self.scroll_views);
        push(out, &self.sliders);
        push(out, &self.toggles);
        push(out, &self.transitions);
    }
}
