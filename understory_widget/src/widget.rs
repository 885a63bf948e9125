// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget shapes and typed access to them.
//!
//! A node carries zero or more [`Widget`]s, at most one per [`WidgetKind`].
//! Code that wants one particular shape goes through [`WidgetShape`], which
//! also covers the [`SelectableState`] capability shared by every
//! interactive widget.

use alloc::string::String;

use peniko::Color;

use crate::types::{
    AnimationTriggers, ColorBlock, FontRef, FontStyles, GradientPresetId, MaterialId, NodeId,
    SpriteId, SpriteState, Transition, VertexGradient,
};

/// Discriminant of a [`Widget`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// [`Image`].
    Image,
    /// [`Label`].
    Label,
    /// [`Button`].
    Button,
    /// [`Dropdown`].
    Dropdown,
    /// [`InputField`].
    InputField,
    /// [`Slider`].
    Slider,
    /// [`Toggle`].
    Toggle,
    /// [`Scrollbar`].
    Scrollbar,
    /// [`ScrollView`].
    ScrollView,
}

impl WidgetKind {
    /// Returns `true` for kinds that carry a [`SelectableState`].
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Dropdown
                | Self::InputField
                | Self::Slider
                | Self::Toggle
                | Self::Scrollbar
        )
    }
}

/// A sprite-backed graphic.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    /// Sprite drawn by the image.
    pub sprite: Option<SpriteId>,
    /// Material override; `None` uses the host default.
    pub material: Option<MaterialId>,
    /// Tint color.
    pub color: Color,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            sprite: None,
            material: None,
            color: Color::WHITE,
        }
    }
}

/// A text label.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Displayed text.
    pub text: String,
    /// Font face.
    pub font: Option<FontRef>,
    /// Material the glyphs render with.
    pub font_material: Option<MaterialId>,
    /// Decoration flags.
    pub font_style: FontStyles,
    /// Point size used when auto-sizing is off.
    pub font_size: f32,
    /// Fit the text into its rectangle between the min and max sizes.
    pub auto_size: bool,
    /// Lower auto-size bound.
    pub font_size_min: f32,
    /// Upper auto-size bound.
    pub font_size_max: f32,
    /// Base text color.
    pub color: Color,
    /// Whether the four-corner gradient is enabled.
    pub vertex_gradient: bool,
    /// Shared gradient preset, overriding [`Label::gradient`] when set.
    pub gradient_preset: Option<GradientPresetId>,
    /// Inline four-corner gradient.
    pub gradient: VertexGradient,
    /// Ignore color tags embedded in the text.
    pub override_color_tags: bool,
}

impl Label {
    /// A label showing `text` with default attributes.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: None,
            font_material: None,
            font_style: FontStyles::empty(),
            font_size: 36.0,
            auto_size: false,
            font_size_min: 18.0,
            font_size_max: 72.0,
            color: Color::WHITE,
            vertex_gradient: false,
            gradient_preset: None,
            gradient: VertexGradient::default(),
            override_color_tags: false,
        }
    }
}

/// Interaction visuals shared by every selectable widget.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectableState {
    /// Node whose [`Image`] is tinted or swapped by the transition.
    pub target_graphic: Option<NodeId>,
    /// Active transition mode.
    pub transition: Transition,
    /// Tints for [`Transition::ColorTint`].
    pub colors: ColorBlock,
    /// Sprites for [`Transition::SpriteSwap`].
    pub sprite_state: SpriteState,
    /// Triggers for [`Transition::Animation`].
    pub animation_triggers: AnimationTriggers,
}

/// A clickable button.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Button {
    /// Interaction visuals.
    pub selectable: SelectableState,
}

/// A drop-down list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dropdown {
    /// Interaction visuals.
    pub selectable: SelectableState,
    /// Node holding the [`Label`] that shows the current choice.
    pub caption_text: Option<NodeId>,
    /// Node holding the [`Label`] used by each list item.
    pub item_text: Option<NodeId>,
    /// Root of the popup template (item toggle and scroll view live beneath it).
    pub template: Option<NodeId>,
}

/// An editable text field.
#[derive(Clone, Debug, PartialEq)]
pub struct InputField {
    /// Interaction visuals.
    pub selectable: SelectableState,
    /// Node holding the [`Label`] that renders the entered text.
    pub text_component: Option<NodeId>,
    /// Node holding the placeholder graphic; styled only when it is a [`Label`].
    pub placeholder: Option<NodeId>,
    /// Node holding the vertical [`Scrollbar`].
    pub vertical_scrollbar: Option<NodeId>,
    /// Use [`InputField::caret_color`] instead of the text color.
    pub custom_caret_color: bool,
    /// Caret color.
    pub caret_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
}

impl Default for InputField {
    fn default() -> Self {
        Self {
            selectable: SelectableState::default(),
            text_component: None,
            placeholder: None,
            vertical_scrollbar: None,
            custom_caret_color: false,
            caret_color: Color::from_rgba8(50, 50, 50, 255),
            selection_color: Color::from_rgba8(168, 206, 255, 192),
        }
    }
}

/// A value slider; its parts live in `Background` and `Fill Area/Fill` children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Slider {
    /// Interaction visuals.
    pub selectable: SelectableState,
    /// Normalized value.
    pub value: f32,
}

/// An on/off toggle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toggle {
    /// Interaction visuals.
    pub selectable: SelectableState,
    /// Node of the graphic shown while on (the checkmark).
    pub graphic: Option<NodeId>,
    /// Current state.
    pub is_on: bool,
}

/// A scrollbar; its track is the [`Image`] on the same node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scrollbar {
    /// Interaction visuals.
    pub selectable: SelectableState,
    /// Normalized handle position.
    pub value: f32,
}

/// A scrollable viewport; its background is the [`Image`] on the same node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollView {
    /// Node holding the horizontal [`Scrollbar`].
    pub horizontal_scrollbar: Option<NodeId>,
    /// Node holding the vertical [`Scrollbar`].
    pub vertical_scrollbar: Option<NodeId>,
}

/// Any widget a node can carry.
#[derive(Clone, Debug, PartialEq)]
pub enum Widget {
    /// See [`Image`].
    Image(Image),
    /// See [`Label`].
    Label(Label),
    /// See [`Button`].
    Button(Button),
    /// See [`Dropdown`].
    Dropdown(Dropdown),
    /// See [`InputField`].
    InputField(InputField),
    /// See [`Slider`].
    Slider(Slider),
    /// See [`Toggle`].
    Toggle(Toggle),
    /// See [`Scrollbar`].
    Scrollbar(Scrollbar),
    /// See [`ScrollView`].
    ScrollView(ScrollView),
}

impl Widget {
    /// Returns the discriminant of this widget.
    #[must_use]
    pub const fn kind(&self) -> WidgetKind {
        match self {
            Self::Image(_) => WidgetKind::Image,
            Self::Label(_) => WidgetKind::Label,
            Self::Button(_) => WidgetKind::Button,
            Self::Dropdown(_) => WidgetKind::Dropdown,
            Self::InputField(_) => WidgetKind::InputField,
            Self::Slider(_) => WidgetKind::Slider,
            Self::Toggle(_) => WidgetKind::Toggle,
            Self::Scrollbar(_) => WidgetKind::Scrollbar,
            Self::ScrollView(_) => WidgetKind::ScrollView,
        }
    }

    /// Returns the interaction visuals if this widget is selectable.
    #[must_use]
    pub fn selectable(&self) -> Option<&SelectableState> {
        match self {
            Self::Button(w) => Some(&w.selectable),
            Self::Dropdown(w) => Some(&w.selectable),
            Self::InputField(w) => Some(&w.selectable),
            Self::Slider(w) => Some(&w.selectable),
            Self::Toggle(w) => Some(&w.selectable),
            Self::Scrollbar(w) => Some(&w.selectable),
            Self::Image(_) | Self::Label(_) | Self::ScrollView(_) => None,
        }
    }

    /// Mutable variant of [`Widget::selectable`].
    pub fn selectable_mut(&mut self) -> Option<&mut SelectableState> {
        match self {
            Self::Button(w) => Some(&mut w.selectable),
            Self::Dropdown(w) => Some(&mut w.selectable),
            Self::InputField(w) => Some(&mut w.selectable),
            Self::Slider(w) => Some(&mut w.selectable),
            Self::Toggle(w) => Some(&mut w.selectable),
            Self::Scrollbar(w) => Some(&mut w.selectable),
            Self::Image(_) | Self::Label(_) | Self::ScrollView(_) => None,
        }
    }
}

/// Typed view onto a [`Widget`].
///
/// Concrete shapes match exactly one [`WidgetKind`]. [`SelectableState`] is a
/// capability shape matching every selectable kind.
pub trait WidgetShape: Sized {
    /// Returns `true` if a widget of `kind` can be viewed as `Self`.
    fn matches(kind: WidgetKind) -> bool;

    /// Views `widget` as `Self`, if it has this shape.
    fn from_widget(widget: &Widget) -> Option<&Self>;

    /// Mutable variant of [`WidgetShape::from_widget`].
    fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self>;
}

macro_rules! concrete_shape {
    ($($ty:ident),* $(,)?) => {
        $(
            impl WidgetShape for $ty {
                #[inline]
                fn matches(kind: WidgetKind) -> bool {
                    kind == WidgetKind::$ty
                }

                #[inline]
                fn from_widget(widget: &Widget) -> Option<&Self> {
                    match widget {
                        Widget::$ty(w) => Some(w),
                        _ => None,
                    }
                }

                #[inline]
                fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self> {
                    match widget {
                        Widget::$ty(w) => Some(w),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Widget {
                fn from(widget: $ty) -> Self {
                    Self::$ty(widget)
                }
            }
        )*
    };
}

concrete_shape!(
    Image, Label, Button, Dropdown, InputField, Slider, Toggle, Scrollbar, ScrollView,
);

impl WidgetShape for SelectableState {
    #[inline]
    fn matches(kind: WidgetKind) -> bool {
        kind.is_selectable()
    }

    #[inline]
    fn from_widget(widget: &Widget) -> Option<&Self> {
        widget.selectable()
    }

    #[inline]
    fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self> {
        widget.selectable_mut()
    }
}

/// Handle to one widget instance: the node it lives on plus its kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WidgetRef {
    /// Node carrying the widget.
    pub node: NodeId,
    /// Kind of the widget on that node.
    pub kind: WidgetKind,
}

impl WidgetRef {
    /// Creates a handle.
    #[must_use]
    pub const fn new(node: NodeId, kind: WidgetKind) -> Self {
        Self { node, kind }
    }

    /// Returns `true` if the referenced widget can be viewed as `T`.
    #[must_use]
    pub fn matches<T: WidgetShape>(self) -> bool {
        T::matches(self.kind)
    }
}
