// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf styles: attribute sets copied verbatim onto a single widget.

use alloc::vec::Vec;

use peniko::Color;
use serde::{Deserialize, Serialize};
use understory_widget::{
    AnimationTriggers, ColorBlock, FontRef, FontStyles, GradientPresetId, Image, Label,
    MaterialId, SelectableState, SpriteId, SpriteState, Transition, VertexGradient, WidgetRef,
};

use crate::named::{NamedStyle, StyleLists};
use crate::value::{ApplyCx, ShapeStyle};

/// Style for [`Image`] widgets: sprite, material and tint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageStyle {
    /// Sprite to show; `None` clears it.
    pub sprite: Option<SpriteId>,
    /// Material override; `None` clears it.
    pub material: Option<MaterialId>,
    /// Tint color.
    pub color: Color,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            sprite: None,
            material: None,
            color: Color::WHITE,
        }
    }
}

impl ShapeStyle for ImageStyle {
    type Shape = Image;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        let Some(image) = cx.tree_mut().get_mut::<Image>(widget) else {
            return;
        };
        image.sprite = self.sprite;
        image.material = self.material;
        image.color = self.color;
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.images
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.images
    }
}

/// Style for [`Label`] widgets.
///
/// The glyph material is the override material when one is given, and the
/// font's own material otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    /// Font face.
    pub font: Option<FontRef>,
    /// Material used instead of the font's default.
    pub override_material: Option<MaterialId>,
    /// Decoration flags.
    pub font_style: FontStyles,
    /// Point size used when auto-sizing is off.
    pub font_size: f32,
    /// Fit the text between the min and max sizes.
    pub auto_size: bool,
    /// Lower auto-size bound.
    pub font_size_min: f32,
    /// Upper auto-size bound.
    pub font_size_max: f32,
    /// Base text color.
    pub color: Color,
    /// Enable the four-corner gradient.
    pub vertex_gradient: bool,
    /// Shared gradient preset.
    pub gradient_preset: Option<GradientPresetId>,
    /// Inline four-corner gradient.
    pub gradient: VertexGradient,
    /// Ignore color tags embedded in the text.
    pub override_color_tags: bool,
}

impl LabelStyle {
    /// Returns the material glyphs render with under this style.
    #[must_use]
    pub fn material(&self) -> Option<MaterialId> {
        self.override_material.or(self.font.map(|f| f.material))
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font: None,
            override_material: None,
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

impl ShapeStyle for LabelStyle {
    type Shape = Label;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        let material = self.material();
        let Some(label) = cx.tree_mut().get_mut::<Label>(widget) else {
            return;
        };
        label.font = self.font;
        label.font_material = material;
        label.font_style = self.font_style;
        label.font_size = self.font_size;
        label.auto_size = self.auto_size;
        label.font_size_min = self.font_size_min;
        label.font_size_max = self.font_size_max;
        label.color = self.color;
        label.vertex_gradient = self.vertex_gradient;
        label.gradient_preset = self.gradient_preset;
        label.gradient = self.gradient;
        label.override_color_tags = self.override_color_tags;
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.labels
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.labels
    }
}

/// Style for the interaction visuals of any selectable widget.
///
/// Applying sets the transition mode and then only the payload that mode
/// reads; the other payloads on the widget are left as they were.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionStyle {
    /// Transition mode.
    pub transition: Transition,
    /// Tints, used by [`Transition::ColorTint`].
    pub colors: ColorBlock,
    /// Sprites, used by [`Transition::SpriteSwap`].
    pub sprite_state: SpriteState,
    /// Trigger names, used by [`Transition::Animation`].
    pub animation_triggers: AnimationTriggers,
}

impl ShapeStyle for TransitionStyle {
    type Shape = SelectableState;

    fn apply_shape(&self, cx: &mut ApplyCx<'_>, widget: WidgetRef) {
        let Some(state) = cx.tree_mut().get_mut::<SelectableState>(widget) else {
            return;
        };
        state.transition = self.transition;
        match self.transition {
            Transition::None => {}
            Transition::ColorTint => state.colors = self.colors,
            Transition::SpriteSwap => state.sprite_state = self.sprite_state,
            Transition::Animation => state.animation_triggers = self.animation_triggers.clone(),
        }
    }

    fn entries(lists: &StyleLists) -> &[NamedStyle<Self>] {
        &lists.transitions
    }

    fn entries_mut(lists: &mut StyleLists) -> &mut Vec<NamedStyle<Self>> {
        &mut lists.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_widget::{Button, FontId, WidgetTree};

    #[test]
    fn image_style_overwrites_every_attribute() {
        let mut tree = WidgetTree::new();
        let node = tree.insert(None, "Icon");
        let handle = tree
            .add_widget(
                node,
                Image {
                    sprite: Some(SpriteId::new(4)),
                    material: Some(MaterialId::new(2)),
                    color: Color::BLACK,
                },
            )
            .unwrap();

        let style = ImageStyle {
            sprite: Some(SpriteId::new(7)),
            ..ImageStyle::default()
        };
        style.apply_to_widget(&mut ApplyCx::new(&mut tree, None), handle);

        let image = tree.widget::<Image>(node).unwrap();
        assert_eq!(image.sprite, Some(SpriteId::new(7)));
        assert_eq!(image.material, None);
        assert_eq!(image.color, Color::WHITE);
    }

    #[test]
    fn label_material_prefers_override() {
        let font = FontRef::new(FontId::new(1), MaterialId::new(10));
        let mut style = LabelStyle {
            font: Some(font),
            ..LabelStyle::default()
        };
        assert_eq!(style.material(), Some(MaterialId::new(10)));

        style.override_material = Some(MaterialId::new(11));
        assert_eq!(style.material(), Some(MaterialId::new(11)));

        style.font = None;
        assert_eq!(style.material(), Some(MaterialId::new(11)));
    }

    #[test]
    fn label_style_keeps_text() {
        let mut tree = WidgetTree::new();
        let node = tree.insert(None, "Text");
        tree.add_widget(node, Label::new("Play"));

        let style = LabelStyle {
            font_size: 24.0,
            font_style: FontStyles::BOLD,
            color: Color::BLACK,
            ..LabelStyle::default()
        };
        style.apply_to_node(&mut ApplyCx::new(&mut tree, None), node);

        let label = tree.widget::<Label>(node).unwrap();
        assert_eq!(label.text, "Play");
        assert_eq!(label.font_size, 24.0);
        assert_eq!(label.font_style, FontStyles::BOLD);
        assert_eq!(label.color, Color::BLACK);
    }

    #[test]
    fn transition_copies_only_the_selected_payload() {
        let mut tree = WidgetTree::new();
        let node = tree.insert(None, "Button");
        let handle = tree.add_widget(node, Button::default()).unwrap();

        let swap = SpriteState {
            pressed: Some(SpriteId::new(3)),
            ..SpriteState::default()
        };
        let tint = ColorBlock {
            normal_color: Color::BLACK,
            ..ColorBlock::default()
        };
        let style = TransitionStyle {
            transition: Transition::SpriteSwap,
            colors: tint,
            sprite_state: swap,
            animation_triggers: AnimationTriggers::default(),
        };
        style.apply_to_widget(&mut ApplyCx::new(&mut tree, None), handle);

        let state = &tree.widget::<Button>(node).unwrap().selectable;
        assert_eq!(state.transition, Transition::SpriteSwap);
        assert_eq!(state.sprite_state, swap);
        assert_eq!(state.colors, ColorBlock::default());
    }

    #[test]
    fn transition_none_sets_mode_only() {
        let mut tree = WidgetTree::new();
        let node = tree.insert(None, "Button");
        let handle = tree.add_widget(node, Button::default()).unwrap();

        let style = TransitionStyle {
            transition: Transition::None,
            sprite_state: SpriteState {
                disabled: Some(SpriteId::new(1)),
                ..SpriteState::default()
            },
            ..TransitionStyle::default()
        };
        style.apply_to_widget(&mut ApplyCx::new(&mut tree, None), handle);

        let state = &tree.widget::<Button>(node).unwrap().selectable;
        assert_eq!(state.transition, Transition::None);
        assert_eq!(state.sprite_state, SpriteState::default());
    }
}
