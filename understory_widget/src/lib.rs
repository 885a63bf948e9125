// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Widget: a minimal typed widget tree.
//!
//! This crate models the small slice of a UI toolkit that a theming layer
//! needs to talk to: named nodes arranged in a tree, each carrying a few typed
//! widgets whose visual attributes can be read and assigned.
//!
//! - [`WidgetTree`]: arena of nodes with generational [`NodeId`] handles.
//! - [`Widget`] / [`WidgetKind`]: the closed set of widget shapes
//!   ([`Image`], [`Label`], [`Button`], [`Dropdown`], [`InputField`],
//!   [`Slider`], [`Toggle`], [`Scrollbar`], [`ScrollView`]).
//! - [`WidgetShape`]: typed access to one shape, including the
//!   [`SelectableState`] capability shared by interactive widgets.
//! - [`WidgetRef`]: handle naming one widget instance (node plus kind).
//!
//! Queries mirror what composite widgets need to locate their parts:
//!
//! - [`WidgetTree::widget`]: the widget of a shape on a node.
//! - [`WidgetTree::find_in_children`]: the first widget of a shape on or beneath a node.
//! - [`WidgetTree::find_path`]: a child node by `/`-separated name path.
//!
//! ```rust
//! use understory_widget::{Image, Slider, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let slider = tree.insert(None, "Slider");
//! tree.add_widget(slider, Slider::default());
//! let area = tree.insert(Some(slider), "Fill Area");
//! let fill = tree.insert(Some(area), "Fill");
//! tree.add_widget(fill, Image::default());
//!
//! let found = tree.find_path(slider, "Fill Area/Fill").unwrap();
//! assert!(tree.widget::<Image>(found).is_some());
//! ```
//!
//! This is not a layout engine and does no rendering.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;
mod widget;

pub use tree::{Descendants, WidgetTree};
pub use types::{
    AnimationTriggers, ColorBlock, FontId, FontRef, FontStyles, GradientPresetId, MaterialId,
    NodeId, SpriteId, SpriteState, Transition, VertexGradient,
};
pub use widget::{
    Button, Dropdown, Image, InputField, Label, ScrollView, Scrollbar, SelectableState, Slider,
    Toggle, Widget, WidgetKind, WidgetRef, WidgetShape,
};

pub use peniko::Color;
