// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Theme: inheritable named styles applied to widget trees.
//!
//! This crate resolves styles by name through a chain of registries and
//! applies them to the typed widgets of an [`understory_widget::WidgetTree`].
//!
//! - [`StyleRegistry`]: per-kind lists of named styles plus an optional base
//!   registry. Lookups go through a resolved map that is rebuilt lazily,
//!   base entries first so derived registries override them.
//! - [`StyleValue`] / [`StyleKind`]: a resolved style. Applying it to a node or
//!   a widget handle dispatches on the widget's shape and is a no-op when the
//!   shape does not match.
//! - Leaf styles ([`ImageStyle`], [`LabelStyle`], [`TransitionStyle`]) copy an
//!   attribute set onto one widget. Composite styles ([`ButtonStyle`],
//!   [`DropdownStyle`], [`InputFieldStyle`], [`ScrollbarStyle`],
//!   [`ScrollViewStyle`], [`SliderStyle`], [`ToggleStyle`]) also style the
//!   widget's parts through [`StyleRef`] slots.
//! - [`StyleRef`]: a slot that either names a registry entry or embeds a style.
//! - [`ThemeHost`], [`ThemeBinding`], [`StyleBinding`]: the runtime side.
//!   Themes attach to subtrees with a current registry; elements beneath them
//!   name the style they want and are styled when they register and whenever
//!   the theme is applied.
//! - [`ThemeLibrary`] / [`RegistryRecord`]: serde-friendly persistence with
//!   bases linked by label.
//!
//! ```rust
//! use understory_theme::{ButtonStyle, LabelStyle, StyleLists, StyleName, StyleRef, StyleRegistry};
//! use understory_widget::{Button, Label, WidgetTree};
//!
//! let base = StyleRegistry::with_styles(
//!     "Base",
//!     StyleLists::default()
//!         .with("Caption", LabelStyle { font_size: 24.0, ..LabelStyle::default() })
//!         .with("Primary", ButtonStyle {
//!             label: StyleRef::reference("Caption"),
//!             ..ButtonStyle::default()
//!         }),
//! );
//!
//! let mut tree = WidgetTree::new();
//! let button = tree.insert(None, "Button");
//! tree.add_widget(button, Button::default());
//! let text = tree.insert(Some(button), "Text");
//! tree.add_widget(text, Label::new("Play"));
//!
//! let style = base.resolve(&StyleName::new("Primary")).unwrap();
//! style.apply_to_node(&mut tree, button);
//! assert_eq!(tree.widget::<Label>(text).unwrap().font_size, 24.0);
//! ```
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Configuration errors
//! are reported through `tracing` and returned as [`ThemeError`]; missing
//! widget parts are skipped silently.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod binding;
mod composite;
mod error;
mod host;
mod leaf;
mod library;
mod name;
mod named;
mod registry;
mod style_ref;
mod value;

pub use binding::{ElementFilter, StyleBinding, ThemeBinding};
pub use composite::{
    ButtonStyle, DropdownStyle, InputFieldStyle, ScrollViewStyle, ScrollbarStyle,
    SelectableStyle, SliderStyle, ToggleStyle,
};
pub use error::{LibraryError, ThemeError};
pub use host::{Phase, ThemeFilter, ThemeHost};
pub use leaf::{ImageStyle, LabelStyle, TransitionStyle};
pub use library::{RegistryRecord, ThemeLibrary};
pub use name::StyleName;
pub use named::{NamedStyle, StyleLists};
pub use registry::{RebuildStats, StyleMap, StyleRegistry};
pub use style_ref::{RefMode, StyleRef};
pub use value::{ApplyCx, ShapeStyle, StyleKind, StyleValue};
