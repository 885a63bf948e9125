// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite styles for widgets assembled from several parts.
//!
//! A composite assigns its own direct attributes (if it has any), then the
//! shared [`SelectableStyle`] parts, then each nested [`StyleRef`] to the
//! part found by a fixed lookup rule. Parts that cannot be found are skipped.

use alloc::vec::Vec;

use peniko::Color;
use serde::{Deserialize, Serialize};
use understory_widget::{
    Button, Dropdown, Image, InputField, Label, ScrollView, Scrollbar, SelectableState, Slider,
    Toggle, WidgetRef,
};

use crate::leaf::{ImageStyle, LabelStyle, TransitionStyle};
use crate::named::{NamedStyle, StyleLists};
use crate::style_ref::StyleRef;
use crate::value::{ApplyCx, ShapeStyle};

/// Parts shared by every selectable widget style.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectableStyle {
    /// Applied to the [`Image`] on the widget's target graphic node.
    pub image: StyleRef<ImageStyle>,
    /// Applied to the widget's interaction visuals.
    pub transition: StyleRef<TransitionStyle>,
}

impl SelectableStyle {
    /// Applies the target graphic and transition parts to a selectable `widget`.
    pub fn apply_to(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        let target = cx
            .tree()
            .get::<SelectableState>(widget)
            .and_then(|state| state.target_graphic);
        let image = cx.widget_on::<Image>(target);
        self.image.apply_found(cx, image);
        self.transition.apply(cx, widget);
    }
}

/// Style for [`Button`]s; the label is the first [`Label`] on or beneath the button.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyle {
    /// Target graphic and transition.
    pub selectable: SelectableStyle,
    /// Caption label.
    pub label: StyleRef<LabelStyle>,
}

impl ShapeStyle for ButtonStyle {
    type Shape = Button;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        self.selectable.apply_to(cx, widget);
        let label = cx.tree().find_in_children::<Label>(widget.node);
        self.label.apply_found(cx, label);
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.buttons
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.buttons
    }
}

/// Style for [`Dropdown`]s.
///
/// The arrow is the [`Image`] on the `Arrow` child. The item toggle and the
/// scroll view are the first ones found on or beneath the popup template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownStyle {
    /// Target graphic and transition.
    pub selectable: SelectableStyle,
    /// Arrow image.
    pub arrow: StyleRef<ImageStyle>,
    /// Label showing the current choice.
    pub caption: StyleRef<LabelStyle>,
    /// Label of each list item.
    pub item_label: StyleRef<LabelStyle>,
    /// Toggle of each list item.
    pub item_toggle: StyleRef<ToggleStyle>,
    /// Popup scroll view.
    pub scroll_view: StyleRef<ScrollViewStyle>,
}

impl ShapeStyle for DropdownStyle {
    type Shape = Dropdown;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        self.selectable.apply_to(cx, widget);

        let arrow = cx.widget_at_path::<Image>(widget.node, "Arrow");
        self.arrow.apply_found(cx, arrow);

        let Some(dropdown) = cx.tree().get::<Dropdown>(widget) else {
            return;
        };
        let (caption, item_text, template) =
            (dropdown.caption_text, dropdown.item_text, dropdown.template);

        let caption = cx.widget_on::<Label>(caption);
        self.caption.apply_found(cx, caption);

        let item_label = cx.widget_on::<Label>(item_text);
        self.item_label.apply_found(cx, item_label);

        if let Some(template) = template {
            let toggle = cx.tree().find_in_children::<Toggle>(template);
            self.item_toggle.apply_found(cx, toggle);

            let scroll_view = cx.tree().find_in_children::<ScrollView>(template);
            self.scroll_view.apply_found(cx, scroll_view);
        }
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.dropdowns
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.dropdowns
    }
}

/// Style for [`InputField`]s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFieldStyle {
    /// Target graphic and transition.
    pub selectable: SelectableStyle,
    /// Label rendering the entered text.
    pub text: StyleRef<LabelStyle>,
    /// Placeholder, when the placeholder is a [`Label`].
    pub placeholder: StyleRef<LabelStyle>,
    /// Vertical scrollbar.
    pub vertical_scrollbar: StyleRef<ScrollbarStyle>,
    /// Use [`InputFieldStyle::caret_color`] instead of the text color.
    pub custom_caret_color: bool,
    /// Caret color.
    pub caret_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
}

impl Default for InputFieldStyle {
    fn default() -> Self {
        Self {
            selectable: SelectableStyle::default(),
            text: StyleRef::default(),
            placeholder: StyleRef::default(),
            vertical_scrollbar: StyleRef::default(),
            custom_caret_color: false,
            caret_color: Color::from_rgba8(50, 50, 50, 255),
            selection_color: Color::from_rgba8(168, 206, 255, 192),
        }
    }
}

impl ShapeStyle for InputFieldStyle {
    type Shape = InputField;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        let Some(field) = cx.tree_mut().get_mut::<InputField>(widget) else {
            return;
        };
        field.custom_caret_color = self.custom_caret_color;
        field.caret_color = self.caret_color;
        field.selection_color = self.selection_color;
        let (text, placeholder, scrollbar) = (
            field.text_component,
            field.placeholder,
            field.vertical_scrollbar,
        );

        self.selectable.apply_to(cx, widget);

        let text = cx.widget_on::<Label>(text);
        self.text.apply_found(cx, text);

        let placeholder = cx.widget_on::<Label>(placeholder);
        self.placeholder.apply_found(cx, placeholder);

        let scrollbar = cx.widget_on::<Scrollbar>(scrollbar);
        self.vertical_scrollbar.apply_found(cx, scrollbar);
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.input_fields
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.input_fields
    }
}

/// Style for [`Scrollbar`]s; the track is the [`Image`] on the scrollbar's node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollbarStyle {
    /// Handle graphic and transition.
    pub selectable: SelectableStyle,
    /// Track image.
    pub background: StyleRef<ImageStyle>,
}

impl ShapeStyle for ScrollbarStyle {
    type Shape = Scrollbar;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        self.selectable.apply_to(cx, widget);
        let background = cx.widget_on::<Image>(Some(widget.node));
        self.background.apply_found(cx, background);
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.scrollbars
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.scrollbars
    }
}

/// Style for [`ScrollView`]s; the background is the [`Image`] on the view's node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollViewStyle {
    /// Background image.
    pub background: StyleRef<ImageStyle>,
    /// Horizontal scrollbar.
    pub horizontal_scrollbar: StyleRef<ScrollbarStyle>,
    /// Vertical scrollbar.
    pub vertical_scrollbar: StyleRef<ScrollbarStyle>,
}

impl ShapeStyle for ScrollViewStyle {
    type Shape = ScrollView;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        let background = cx.widget_on::<Image>(Some(widget.node));
        self.background.apply_found(cx, background);

        let Some(view) = cx.tree().get::<ScrollView>(widget) else {
            return;
        };
        let (horizontal, vertical) = (view.horizontal_scrollbar, view.vertical_scrollbar);

        let horizontal = cx.widget_on::<Scrollbar>(horizontal);
        self.horizontal_scrollbar.apply_found(cx, horizontal);

        let vertical = cx.widget_on::<Scrollbar>(vertical);
        self.vertical_scrollbar.apply_found(cx, vertical);
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.scroll_views
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.scroll_views
    }
}

/// Style for [`Slider`]s; parts live at `Background` and `Fill Area/Fill`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderStyle {
    /// Handle graphic and transition.
    pub selectable: SelectableStyle,
    /// Track image.
    pub background: StyleRef<ImageStyle>,
    /// Fill image.
    pub fill: StyleRef<ImageStyle>,
}

impl ShapeStyle for SliderStyle {
    type Shape = Slider;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        self.selectable.apply_to(cx, widget);

        let background = cx.widget_at_path::<Image>(widget.node, "Background");
        self.background.apply_found(cx, background);

        let fill = cx.widget_at_path::<Image>(widget.node, "Fill Area/Fill");
        self.fill.apply_found(cx, fill);
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.sliders
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.sliders
    }
}

/// Style for [`Toggle`]s.
///
/// The checkmark is the toggle's graphic node, styled only when it carries an
/// [`Image`]. The label is the first [`Label`] on or beneath the toggle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleStyle {
    /// Box graphic and transition.
    pub selectable: SelectableStyle,
    /// Checkmark image.
    pub checkmark: StyleRef<ImageStyle>,
    /// Caption label.
    pub label: StyleRef<LabelStyle>,
}

impl ShapeStyle for ToggleStyle {
    type Shape = Toggle;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        self.selectable.apply_to(cx, widget);

        let graphic = cx.tree().get::<Toggle>(widget).and_then(|t| t.graphic);
        let checkmark = cx.widget_on::<Image>(graphic);
        self.checkmark.apply_found(cx, checkmark);

        let label = cx.tree().find_in_children::<Label>(widget.node);
        self.label.apply_found(cx, label);
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.toggles
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.toggles
    }
}
