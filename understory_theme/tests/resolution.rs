// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for registry resolution in the `understory_theme` crate.
//!
//! These exercise inheritance, indirection through references, and loading
//! registries from serialized records.

use std::rc::Rc;

use understory_theme::{
    ButtonStyle, ImageStyle, LabelStyle, RefMode, RegistryRecord, SliderStyle, StyleKind,
    StyleLists, StyleName, StyleRef, StyleRegistry, ThemeLibrary,
};
use understory_widget::{
    Button, Color, Image, Label, MaterialId, NodeId, Slider, SpriteId, WidgetTree,
};

const RED: Color = Color::from_rgba8(255, 0, 0, 255);
const BLUE: Color = Color::from_rgba8(0, 0, 255, 255);

fn tinted(color: Color) -> ImageStyle {
    ImageStyle {
        color,
        ..ImageStyle::default()
    }
}

fn button_with_text(tree: &mut WidgetTree) -> (NodeId, NodeId) {
    let button = tree.insert(None, "Button");
    tree.add_widget(button, Button::default());
    let text = tree.insert(Some(button), "Text");
    tree.add_widget(text, Label::new("Start"));
    (button, text)
}

#[test]
fn primary_image_resolves_and_applies() {
    let registry =
        StyleRegistry::with_styles("Base", StyleLists::default().with("Primary", tinted(RED)));
    let mut tree = WidgetTree::new();
    let node = tree.insert(None, "Panel");
    tree.add_widget(node, Image::default());

    let value = registry.resolve(&StyleName::new("Primary")).unwrap();
    value.apply_to_node(&mut tree, node);

    assert_eq!(tree.widget::<Image>(node).unwrap().color, RED);
}

#[test]
fn derived_registry_overrides_its_base() {
    let base =
        StyleRegistry::with_styles("Base", StyleLists::default().with("Primary", tinted(RED)));
    let dark =
        StyleRegistry::with_styles("Dark", StyleLists::default().with("Primary", tinted(BLUE)));
    dark.set_base(Some(&base));

    let mut tree = WidgetTree::new();
    let node = tree.insert(None, "Panel");
    tree.add_widget(node, Image::default());

    dark.resolve(&StyleName::new("Primary"))
        .unwrap()
        .apply_to_node(&mut tree, node);
    assert_eq!(tree.widget::<Image>(node).unwrap().color, BLUE);

    base.resolve(&StyleName::new("Primary"))
        .unwrap()
        .apply_to_node(&mut tree, node);
    assert_eq!(tree.widget::<Image>(node).unwrap().color, RED);
}

#[test]
fn button_label_reference_resolves_in_the_applying_registry() {
    let base = StyleRegistry::with_styles(
        "Base",
        StyleLists::default()
            .with(
                "Label",
                LabelStyle {
                    font_size: 24.0,
                    ..LabelStyle::default()
                },
            )
            .with(
                "Primary",
                ButtonStyle {
                    label: StyleRef::reference("Label"),
                    ..ButtonStyle::default()
                },
            ),
    );
    // The derived registry only overrides the shared label; the button style
    // comes from the base and picks up the override.
    let large = StyleRegistry::with_styles(
        "Large",
        StyleLists::default().with(
            "Label",
            LabelStyle {
                font_size: 48.0,
                ..LabelStyle::default()
            },
        ),
    );
    large.set_base(Some(&base));

    let mut tree = WidgetTree::new();
    let (button, text) = button_with_text(&mut tree);

    base.resolve(&StyleName::new("Primary"))
        .unwrap()
        .apply_to_node(&mut tree, button);
    assert_eq!(tree.widget::<Label>(text).unwrap().font_size, 24.0);
    assert_eq!(tree.widget::<Label>(text).unwrap().text, "Start");

    large
        .resolve(&StyleName::new("Primary"))
        .unwrap()
        .apply_to_node(&mut tree, button);
    assert_eq!(tree.widget::<Label>(text).unwrap().font_size, 48.0);
}

#[test]
fn embedded_sub_style_uses_its_own_values() {
    let registry = StyleRegistry::with_styles(
        "Base",
        StyleLists::default().with(
            "Primary",
            ButtonStyle {
                label: StyleRef {
                    mode: RefMode::Embedded,
                    name: Some(StyleName::new("Label")),
                    style: LabelStyle {
                        font_size: 30.0,
                        ..LabelStyle::default()
                    },
                },
                ..ButtonStyle::default()
            },
        ),
    );

    let mut tree = WidgetTree::new();
    let (button, text) = button_with_text(&mut tree);
    registry
        .resolve(&StyleName::new("Primary"))
        .unwrap()
        .apply_to_node(&mut tree, button);

    assert_eq!(tree.widget::<Label>(text).unwrap().font_size, 30.0);
}

#[test]
fn slider_with_missing_fill_styles_what_exists() {
    let registry = StyleRegistry::with_styles(
        "Base",
        StyleLists::default()
            .with("Track", tinted(RED))
            .with(
                "Slider",
                SliderStyle {
                    background: StyleRef::reference("Track"),
                    fill: StyleRef::reference("Track"),
                    ..SliderStyle::default()
                },
            ),
    );

    let mut tree = WidgetTree::new();
    let slider = tree.insert(None, "Slider");
    tree.add_widget(slider, Slider::default());
    let background = tree.insert(Some(slider), "Background");
    tree.add_widget(background, Image::default());
    tree.insert(Some(slider), "Fill Area");

    registry
        .resolve(&StyleName::new("Slider"))
        .unwrap()
        .apply_to_node(&mut tree, slider);

    assert_eq!(tree.widget::<Image>(background).unwrap().color, RED);
}

#[test]
fn value_outlives_a_dropped_registry() {
    let mut tree = WidgetTree::new();
    let (button, text) = button_with_text(&mut tree);

    let value = {
        let registry = StyleRegistry::with_styles(
            "Temp",
            StyleLists::default()
                .with(
                    "Label",
                    LabelStyle {
                        font_size: 10.0,
                        ..LabelStyle::default()
                    },
                )
                .with(
                    "Primary",
                    ButtonStyle {
                        label: StyleRef::reference("Label"),
                        ..ButtonStyle::default()
                    },
                ),
        );
        registry.resolve(&StyleName::new("Primary")).unwrap()
    };

    // With the registry gone the reference cannot resolve; applying is a no-op.
    assert!(value.registry().is_none());
    value.apply_to_node(&mut tree, button);
    assert_eq!(tree.widget::<Label>(text).unwrap().font_size, 36.0);
}

#[test]
fn library_loads_from_json() {
    let json = r#"[
        {
            "label": "Dark",
            "base": "Base",
            "styles": {
                "images": [
                    { "name": "Primary", "style": { "material": 7 } }
                ]
            }
        },
        {
            "label": "Base",
            "styles": {
                "images": [
                    { "name": "Primary", "style": { "sprite": 1 } },
                    { "name": "Icon", "style": { "sprite": 2 } }
                ],
                "buttons": [
                    { "name": "Start", "style": { "label": { "name": "Caption" } } }
                ]
            }
        }
    ]"#;
    let records: Vec<RegistryRecord> = serde_json::from_str(json).unwrap();
    let library = ThemeLibrary::from_records(records).unwrap();

    let dark = library.get("Dark").unwrap();
    let base = library.get("Base").unwrap();
    assert!(Rc::ptr_eq(&dark.base().unwrap(), base));

    let primary = dark.resolve(&StyleName::new("Primary")).unwrap();
    match primary.kind() {
        StyleKind::Image(image) => {
            assert_eq!(image.material, Some(MaterialId::new(7)));
            assert_eq!(image.sprite, None);
            assert_eq!(image.color, Color::WHITE);
        }
        other => panic!("expected an image style, got {other:?}"),
    }

    let icon = dark.resolve(&StyleName::new("Icon")).unwrap();
    match icon.kind() {
        StyleKind::Image(image) => assert_eq!(image.sprite, Some(SpriteId::new(2))),
        other => panic!("expected an image style, got {other:?}"),
    }

    let start = dark.resolve(&StyleName::new("Start")).unwrap();
    match start.kind() {
        StyleKind::Button(button) => {
            assert_eq!(button.label.mode, RefMode::Reference);
            assert_eq!(button.label.name, Some(StyleName::new("Caption")));
        }
        other => panic!("expected a button style, got {other:?}"),
    }
}

#[test]
fn records_round_trip_through_json() {
    let base =
        StyleRegistry::with_styles("Base", StyleLists::default().with("Primary", tinted(RED)));
    let dark = StyleRegistry::new("Dark");
    dark.set_base(Some(&base));

    let mut library = ThemeLibrary::new();
    library.insert(base.clone()).unwrap();
    library.insert(dark.clone()).unwrap();

    let json = serde_json::to_string(&library.to_records()).unwrap();
    let records: Vec<RegistryRecord> = serde_json::from_str(&json).unwrap();
    let reloaded = ThemeLibrary::from_records(records).unwrap();

    assert_eq!(reloaded.to_records(), library.to_records());
    assert!(
        reloaded
            .get("Dark")
            .unwrap()
            .contains(&StyleName::new("Primary"))
    );
}
