// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: node identifiers, asset handles, and the attribute
//! payloads that widgets carry and styles assign.

use alloc::string::String;

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Identifier for a node in a [`WidgetTree`](crate::WidgetTree).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`WidgetTree::is_alive`](crate::WidgetTree::is_alive) to check whether a `NodeId` still
/// refers to a live node. Stale `NodeId`s never alias a different live node because the
/// generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a sprite asset owned by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteId(u32);

impl SpriteId {
    /// Creates a sprite handle from a raw host id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw host id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Handle to a material asset owned by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(u32);

impl MaterialId {
    /// Creates a material handle from a raw host id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw host id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Handle to a font asset owned by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontId(u32);

impl FontId {
    /// Creates a font handle from a raw host id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw host id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Handle to a shared gradient preset owned by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradientPresetId(u32);

impl GradientPresetId {
    /// Creates a gradient preset handle from a raw host id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw host id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// A font together with the material it renders with by default.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FontRef {
    /// The font face.
    pub id: FontId,
    /// The material used when no override material is given.
    pub material: MaterialId,
}

impl FontRef {
    /// Pairs a font with its default material.
    #[must_use]
    pub const fn new(id: FontId, material: MaterialId) -> Self {
        Self { id, material }
    }
}

bitflags::bitflags! {
    /// Text decoration flags for labels.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FontStyles: u16 {
        /// Bold weight.
        const BOLD          = 1 << 0;
        /// Italic slant.
        const ITALIC        = 1 << 1;
        /// Underlined.
        const UNDERLINE     = 1 << 2;
        /// Rendered in lower case.
        const LOWERCASE     = 1 << 3;
        /// Rendered in upper case.
        const UPPERCASE     = 1 << 4;
        /// Rendered in small capitals.
        const SMALL_CAPS    = 1 << 5;
        /// Struck through.
        const STRIKETHROUGH = 1 << 6;
        /// Raised and reduced.
        const SUPERSCRIPT   = 1 << 7;
        /// Lowered and reduced.
        const SUBSCRIPT     = 1 << 8;
        /// Highlighted background.
        const HIGHLIGHT     = 1 << 9;
    }
}

/// Four-corner color gradient applied to label glyph quads.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexGradient {
    /// Top-left corner color.
    pub top_left: Color,
    /// Top-right corner color.
    pub top_right: Color,
    /// Bottom-left corner color.
    pub bottom_left: Color,
    /// Bottom-right corner color.
    pub bottom_right: Color,
}

impl VertexGradient {
    /// A gradient with the same color in every corner.
    #[must_use]
    pub const fn uniform(color: Color) -> Self {
        Self {
            top_left: color,
            top_right: color,
            bottom_left: color,
            bottom_right: color,
        }
    }
}

impl Default for VertexGradient {
    fn default() -> Self {
        Self::uniform(Color::WHITE)
    }
}

/// How a selectable widget visualizes its interaction state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// No visual transition.
    None,
    /// Tint the target graphic using a [`ColorBlock`].
    #[default]
    ColorTint,
    /// Swap the target graphic's sprite using a [`SpriteState`].
    SpriteSwap,
    /// Fire animation triggers named by [`AnimationTriggers`].
    Animation,
}

/// Per-state tint colors for [`Transition::ColorTint`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBlock {
    /// Tint when idle.
    pub normal_color: Color,
    /// Tint when hovered.
    pub highlighted_color: Color,
    /// Tint when pressed.
    pub pressed_color: Color,
    /// Tint when selected.
    pub selected_color: Color,
    /// Tint when not interactable.
    pub disabled_color: Color,
    /// Multiplier applied to every tint.
    pub color_multiplier: f32,
    /// Seconds spent fading between tints.
    pub fade_duration: f32,
}

impl Default for ColorBlock {
    fn default() -> Self {
        Self {
            normal_color: Color::WHITE,
            highlighted_color: Color::from_rgba8(245, 245, 245, 255),
            pressed_color: Color::from_rgba8(200, 200, 200, 255),
            selected_color: Color::from_rgba8(245, 245, 245, 255),
            disabled_color: Color::from_rgba8(200, 200, 200, 128),
            color_multiplier: 1.0,
            fade_duration: 0.1,
        }
    }
}

/// Per-state sprites for [`Transition::SpriteSwap`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteState {
    /// Sprite when hovered.
    pub highlighted: Option<SpriteId>,
    /// Sprite when pressed.
    pub pressed: Option<SpriteId>,
    /// Sprite when selected.
    pub selected: Option<SpriteId>,
    /// Sprite when not interactable.
    pub disabled: Option<SpriteId>,
}

/// Per-state animation trigger names for [`Transition::Animation`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTriggers {
    /// Trigger fired when idle.
    pub normal: String,
    /// Trigger fired when hovered.
    pub highlighted: String,
    /// Trigger fired when pressed.
    pub pressed: String,
    /// Trigger fired when selected.
    pub selected: String,
    /// Trigger fired when not interactable.
    pub disabled: String,
}

impl Default for AnimationTriggers {
    fn default() -> Self {
        Self {
            normal: String::from("Normal"),
            highlighted: String::from("Highlighted"),
            pressed: String::from("Pressed"),
            selected: String::from("Selected"),
            disabled: String::from("Disabled"),
        }
    }
}
