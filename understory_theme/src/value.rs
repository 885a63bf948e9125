// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style values and shape-typed dispatch.
//!
//! Every concrete style implements [`ShapeStyle`] for exactly one widget
//! shape. [`StyleKind`] closes the set of concrete styles, and [`StyleValue`]
//! is what a registry hands out: a style kind plus a non-owning link to the
//! registry it was resolved against.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use understory_widget::{NodeId, WidgetRef, WidgetShape, WidgetTree};

use crate::composite::{
    ButtonStyle, DropdownStyle, InputFieldStyle, ScrollViewStyle, ScrollbarStyle, SliderStyle,
    ToggleStyle,
};
use crate::leaf::{ImageStyle, LabelStyle, TransitionStyle};
use crate::named::{NamedStyle, StyleLists};
use crate::registry::StyleRegistry;

/// State threaded through one style application.
///
/// Holds the widget tree being mutated and the registry used to resolve
/// nested [`StyleRef`](crate::StyleRef)s in reference mode.
pub struct ApplyCx<'a> {
    tree: &'a mut WidgetTree,
    registry: Option<Rc<StyleRegistry>>,
}

impl core::fmt::Debug for ApplyCx<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApplyCx")
            .field("tree_len", &self.tree.len())
            .field("registry", &self.registry.as_ref().map(|r| r.label()))
            .finish()
    }
}

impl<'a> ApplyCx<'a> {
    /// Creates a context resolving nested references against `registry`.
    pub fn new(tree: &'a mut WidgetTree, registry: Option<Rc<StyleRegistry>>) -> Self {
        Self { tree, registry }
    }

    /// Returns the tree being styled.
    #[must_use]
    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    /// Returns the tree being styled, mutably.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.tree
    }

    /// Returns the registry nested references resolve against.
    #[must_use]
    pub fn registry(&self) -> Option<&Rc<StyleRegistry>> {
        self.registry.as_ref()
    }

    /// Returns a handle to the `T` widget on `node`, if both exist.
    #[must_use]
    pub fn widget_on<T: WidgetShape>(&self, node: Option<NodeId>) -> Option<WidgetRef> {
        node.and_then(|n| self.tree.widget_ref::<T>(n))
    }

    /// Returns a handle to the `T` widget on the child of `node` at `path`.
    #[must_use]
    pub fn widget_at_path<T: WidgetShape>(&self, node: NodeId, path: &str) -> Option<WidgetRef> {
        self.widget_on::<T>(self.tree.find_path(node, path))
    }
}

/// A style bound to one widget shape.
///
/// Implementors assign their attributes in [`ShapeStyle::apply_shape`]; the
/// provided methods handle the two entry points (by node and by widget) and
/// skip targets of the wrong shape.
pub trait ShapeStyle: Clone + Into<StyleKind> {
    /// The widget shape this style assigns to.
    type Shape: WidgetShape;

    /// Assigns this style to `widget`, which is known to have shape [`Self::Shape`].
    ///
    /// A widget that has gone away in the meantime is skipped.
    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef);

    /// Returns the registry list holding styles of this type.
    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>];

    /// Mutable variant of [`ShapeStyle::entries`].
    fn entries_mut(lists: &mut StyleLists) -> &mut alloc::vec::Vec<NamedStyle<Self>>;

    /// Applies to the first widget of the required shape on `node`; no-op if there is none.
    fn apply_to_node(&self, cx: &mut ApplyCx<'_>, node: NodeId) {
        if let Some(widget) = cx.tree().widget_ref::<Self::Shape>(node) {
            self.apply_shape(cx, widget);
        }
    }

    /// Applies to `widget` if it has the required shape; no-op otherwise.
    fn apply_to_widget(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        if widget.matches::<Self::Shape>() {
            self.apply_shape(cx, widget);
        }
    }
}

/// The closed set of concrete styles.
#[derive(Clone, Debug)]
pub enum StyleKind {
    /// See [`ButtonStyle`].
    Button(ButtonStyle),
    /// See [`DropdownStyle`].
    Dropdown(DropdownStyle),
    /// See [`ImageStyle`].
    Image(ImageStyle),
    /// See [`InputFieldStyle`].
    InputField(InputFieldStyle),
    /// See [`LabelStyle`].
    Label(LabelStyle),
    /// See [`ScrollbarStyle`].
    Scrollbar(ScrollbarStyle),
    /// See [`ScrollViewStyle`].
    ScrollView(ScrollViewStyle),
    /// See [`SliderStyle`].
    Slider(SliderStyle),
    /// See [`ToggleStyle`].
    Toggle(ToggleStyle),
    /// See [`TransitionStyle`].
    Transition(TransitionStyle),
}

macro_rules! dispatch {
    ($kind:expr, $style:ident => $body:expr) => {
        match $kind {
            StyleKind::Button($style) => $body,
            StyleKind::Dropdown($style) => $body,
            StyleKind::Image($style) => $body,
            StyleKind::InputField($style) => $body,
            StyleKind::Label($style) => $body,
            StyleKind::Scrollbar($style) => $body,
            StyleKind::ScrollView($style) => $body,
            StyleKind::Slider($style) => $body,
            StyleKind::Toggle($style) => $body,
            StyleKind::Transition($style) => $body,
        }
    };
}

impl StyleKind {
    /// Applies to the first widget of the matching shape on `node`.
    pub fn apply_to_node(&self, cx: &mut ApplyCx<'_>, node: NodeId) {
        dispatch!(self, style => style.apply_to_node(cx, node));
    }

    /// Applies to `widget` if its shape matches this kind.
    pub fn apply_to_widget(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        dispatch!(self, style => style.apply_to_widget(cx, widget));
    }

    /// Returns `true` if this kind assigns to widgets of `widget`'s shape.
    #[must_use]
    pub fn accepts(&self, widget: WidgetRef) -> bool {
        fn accepts<S: ShapeStyle>(_: &S, widget: WidgetRef) -> bool {
            widget.matches::<S::Shape>()
        }
        dispatch!(self, style => accepts(style, widget))
    }
}

macro_rules! style_kind_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for StyleKind {
                fn from(style: $ty) -> Self {
                    Self::$variant(style)
                }
            }
        )*
    };
}

style_kind_from!(
    Button(ButtonStyle),
    Dropdown(DropdownStyle),
    Image(ImageStyle),
    InputField(InputFieldStyle),
    Label(LabelStyle),
    Scrollbar(ScrollbarStyle),
    ScrollView(ScrollViewStyle),
    Slider(SliderStyle),
    Toggle(ToggleStyle),
    Transition(TransitionStyle),
);

/// A resolved style: a [`StyleKind`] plus a weak link to its registry.
///
/// The link is set by [`StyleValue::initialize`] when a registry rebuilds its
/// resolved map, and is only read while applying, to resolve nested
/// references. It never keeps the registry alive, so a value may be moved to
/// or shared with another registry freely.
#[derive(Clone, Debug)]
pub struct StyleValue {
    kind: StyleKind,
    registry: RefCell<Weak<StyleRegistry>>,
}

impl StyleValue {
    /// Creates an unlinked value.
    #[must_use]
    pub fn new(kind: impl Into<StyleKind>) -> Self {
        Self {
            kind: kind.into(),
            registry: RefCell::new(Weak::new()),
        }
    }

    /// Returns the concrete style.
    #[must_use]
    pub fn kind(&self) -> &StyleKind {
        &self.kind
    }

    /// Links this value to the registry it was resolved against.
    pub fn initialize(&self, registry: &Rc<StyleRegistry>) {
        self.link(Rc::downgrade(registry));
    }

    pub(crate) fn link(&self, registry: Weak<StyleRegistry>) {
        *self.registry.borrow_mut() = registry;
    }

    /// Returns the linked registry, if it is still alive.
    #[must_use]
    pub fn registry(&self) -> Option<Rc<StyleRegistry>> {
        self.registry.borrow().upgrade()
    }

    /// Applies to the first widget of the matching shape on `node`.
    pub fn apply_to_node(&self, tree: &mut WidgetTree, node: NodeId) {
        let mut cx = ApplyCx::new(tree, self.registry());
        self.kind.apply_to_node(&mut cx, node);
    }

    /// Applies to `widget` if its shape matches; no-op otherwise.
    pub fn apply_to_widget(&self, tree: &mut WidgetTree, widget: WidgetRef) {
        let mut cx = ApplyCx::new(tree, self.registry());
        self.kind.apply_to_widget(&mut cx, widget);
    }
}

impl<S: ShapeStyle> From<S> for StyleValue {
    fn from(style: S) -> Self {
        Self::new(style)
    }
}
