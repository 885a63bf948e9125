// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_widget` crate.
//!
//! These build small prefab-like hierarchies and check the structural
//! queries composite widgets rely on.

use understory_widget::{
    Button, Color, ColorBlock, Dropdown, Image, Label, NodeId, ScrollView, Scrollbar,
    SelectableState, Toggle, WidgetKind, WidgetTree,
};

fn dropdown_prefab(tree: &mut WidgetTree) -> (NodeId, NodeId, NodeId) {
    let root = tree.insert(None, "Dropdown");
    let caption = tree.insert(Some(root), "Label");
    tree.add_widget(caption, Label::new("Option A"));
    let arrow = tree.insert(Some(root), "Arrow");
    tree.add_widget(arrow, Image::default());

    let template = tree.insert(Some(root), "Template");
    tree.add_widget(template, ScrollView::default());
    let viewport = tree.insert(Some(template), "Viewport");
    let item = tree.insert(Some(viewport), "Item");
    tree.add_widget(item, Toggle::default());

    tree.add_widget(
        root,
        Dropdown {
            caption_text: Some(caption),
            template: Some(template),
            ..Dropdown::default()
        },
    );
    (root, template, item)
}

#[test]
fn dropdown_parts_are_reachable() {
    let mut tree = WidgetTree::new();
    let (root, template, item) = dropdown_prefab(&mut tree);

    let arrow = tree.find_path(root, "Arrow").unwrap();
    assert!(tree.widget::<Image>(arrow).is_some());

    let dropdown = tree.widget::<Dropdown>(root).unwrap();
    assert_eq!(dropdown.template, Some(template));

    let toggle = tree.find_in_children::<Toggle>(template).unwrap();
    assert_eq!(toggle.node, item);
    assert_eq!(toggle.kind, WidgetKind::Toggle);

    let scroll = tree.find_in_children::<ScrollView>(template).unwrap();
    assert_eq!(scroll.node, template);
}

#[test]
fn selectable_capability_is_found_on_any_interactive_widget() {
    let mut tree = WidgetTree::new();
    let node = tree.insert(None, "Scrollbar");
    tree.add_widget(node, Image::default());
    tree.add_widget(node, Scrollbar::default());

    let handle = tree.widget_ref::<SelectableState>(node).unwrap();
    assert_eq!(handle.kind, WidgetKind::Scrollbar);

    tree.get_mut::<SelectableState>(handle)
        .unwrap()
        .colors
        .normal_color = Color::BLACK;
    assert_eq!(
        tree.widget::<Scrollbar>(node).unwrap().selectable.colors.normal_color,
        Color::BLACK
    );
}

#[test]
fn stale_handles_resolve_to_nothing() {
    let mut tree = WidgetTree::new();
    let node = tree.insert(None, "Button");
    let handle = tree.add_widget(node, Button::default()).unwrap();
    tree.remove(node);

    assert!(tree.get::<Button>(handle).is_none());
    assert!(tree.find_in_children::<Button>(node).is_none());
    assert_eq!(tree.ancestors(node).count(), 0);
    assert!(tree.add_widget(node, Image::default()).is_none());
}

#[test]
fn partial_color_block_fills_defaults() {
    let block: ColorBlock = serde_json::from_str(r#"{ "fade_duration": 0.25 }"#).unwrap();
    assert_eq!(block.fade_duration, 0.25);
    assert_eq!(block.color_multiplier, 1.0);
    assert_eq!(block.normal_color, ColorBlock::default().normal_color);
}
