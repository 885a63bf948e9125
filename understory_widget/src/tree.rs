// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget tree: named nodes, parent/child links, and widget queries.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::types::NodeId;
use crate::widget::{Widget, WidgetRef, WidgetShape};

#[derive(Debug)]
struct NodeData {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    widgets: SmallVec<[Widget; 2]>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<NodeData>,
}

/// Arena of named nodes, each carrying a small set of widgets.
///
/// Node names are not unique; structural lookups such as
/// [`WidgetTree::find_path`] take the first child with a matching name.
#[derive(Debug, Default)]
pub struct WidgetTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl WidgetTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the tree has no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Inserts a node named `name` as the last child of `parent`.
    ///
    /// A `parent` that is `None` or no longer alive makes the new node a root.
    pub fn insert(&mut self, parent: Option<NodeId>, name: impl Into<String>) -> NodeId {
        let parent = parent.filter(|p| self.is_alive(*p));
        let data = NodeData {
            name: name.into(),
            parent,
            children: Vec::new(),
            widgets: SmallVec::new(),
        };

        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(data);
            NodeId::new(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "trees beyond u32::MAX nodes are not supported"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                node: Some(data),
            });
            NodeId::new(idx, 1)
        };

        if let Some(parent) = parent
            && let Some(p) = self.data_mut(parent)
        {
            p.children.push(id);
        }
        self.live += 1;
        id
    }

    /// Removes `id` and its whole subtree.
    ///
    /// Returns `false` if `id` was not alive.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(parent) = self.parent(id)
            && let Some(p) = self.data_mut(parent)
        {
            p.children.retain(|c| *c != id);
        }
        let doomed: Vec<NodeId> = self.descendants(id).collect();
        for node in doomed {
            self.slots[node.idx()].node = None;
            self.free.push(node.0);
            self.live -= 1;
        }
        true
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.data(id).is_some()
    }

    /// Returns the node's name.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.data(id).map(|d| d.name.as_str())
    }

    /// Returns the node's parent.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).and_then(|d| d.parent)
    }

    /// Returns the node's children in insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data(id).map_or(&[], |d| d.children.as_slice())
    }

    /// Returns the widgets carried by the node.
    #[must_use]
    pub fn widgets(&self, id: NodeId) -> &[Widget] {
        self.data(id).map_or(&[], |d| d.widgets.as_slice())
    }

    /// Attaches `widget` to the node, replacing any widget of the same kind.
    ///
    /// Returns a handle to the attached widget, or `None` if `id` is not alive.
    pub fn add_widget(&mut self, id: NodeId, widget: impl Into<Widget>) -> Option<WidgetRef> {
        let widget = widget.into();
        let kind = widget.kind();
        let data = self.data_mut(id)?;
        if let Some(existing) = data.widgets.iter_mut().find(|w| w.kind() == kind) {
            *existing = widget;
        } else {
            data.widgets.push(widget);
        }
        Some(WidgetRef::new(id, kind))
    }

    /// Returns the first widget of shape `T` on the node itself.
    #[must_use]
    pub fn widget<T: WidgetShape>(&self, id: NodeId) -> Option<&T> {
        self.widgets(id).iter().find_map(T::from_widget)
    }

    /// Mutable variant of [`WidgetTree::widget`].
    pub fn widget_mut<T: WidgetShape>(&mut self, id: NodeId) -> Option<&mut T> {
        self.data_mut(id)?
            .widgets
            .iter_mut()
            .find_map(T::from_widget_mut)
    }

    /// Returns a handle to the first widget of shape `T` on the node itself.
    #[must_use]
    pub fn widget_ref<T: WidgetShape>(&self, id: NodeId) -> Option<WidgetRef> {
        self.widgets(id)
            .iter()
            .find(|w| T::matches(w.kind()))
            .map(|w| WidgetRef::new(id, w.kind()))
    }

    /// Resolves a widget handle as shape `T`.
    ///
    /// Returns `None` if the node is gone, the widget was removed, or the
    /// widget does not have shape `T`.
    #[must_use]
    pub fn get<T: WidgetShape>(&self, widget: WidgetRef) -> Option<&T> {
        self.widgets(widget.node)
            .iter()
            .find(|w| w.kind() == widget.kind)
            .and_then(T::from_widget)
    }

    /// Mutable variant of [`WidgetTree::get`].
    pub fn get_mut<T: WidgetShape>(&mut self, widget: WidgetRef) -> Option<&mut T> {
        self.data_mut(widget.node)?
            .widgets
            .iter_mut()
            .find(|w| w.kind() == widget.kind)
            .and_then(T::from_widget_mut)
    }

    /// Returns the first widget of shape `T` on the node or beneath it,
    /// searching depth-first in pre-order with the node itself first.
    #[must_use]
    pub fn find_in_children<T: WidgetShape>(&self, id: NodeId) -> Option<WidgetRef> {
        self.descendants(id)
            .find_map(|node| self.widget_ref::<T>(node))
    }

    /// Follows a `/`-separated path of child names starting at `id`.
    ///
    /// Each segment selects the first child with that name. Empty segments
    /// are ignored, so `""` resolves to `id` itself.
    #[must_use]
    pub fn find_path(&self, id: NodeId, path: &str) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(id, |node, segment| {
                self.children(node)
                    .iter()
                    .copied()
                    .find(|child| self.name(*child) == Some(segment))
            })
    }

    /// Iterates the node and its ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.is_alive(id).then_some(id);
        core::iter::successors(start, |node| self.parent(*node))
    }

    /// Iterates the node and all of its descendants in depth-first pre-order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if self.is_alive(id) {
            stack.push(id);
        }
        Descendants { tree: self, stack }
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_ref()
    }

    fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_mut()
    }
}

/// Pre-order iterator returned by [`WidgetTree::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a WidgetTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(node).iter().rev().copied());
        Some(node)
    }
}
