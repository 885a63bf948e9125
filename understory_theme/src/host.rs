// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The live set of theme and element bindings for one widget tree.

use alloc::rc::Rc;
use alloc::vec::Vec;

use hashbrown::HashMap;
use understory_widget::{NodeId, WidgetTree};

use crate::binding::{StyleBinding, ThemeBinding};
use crate::error::ThemeError;
use crate::name::StyleName;
use crate::registry::StyleRegistry;

/// Predicate selecting which themes [`ThemeHost::apply_all`] touches.
pub type ThemeFilter<'a> = &'a dyn Fn(&ThemeBinding) -> bool;

/// Lifecycle phase of the host application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Normal operation: element lists are maintained by registration.
    #[default]
    Running,
    /// Authoring: applying a theme rebuilds its registry and rediscovers its
    /// elements from the tree.
    Editing,
    /// The host is reloading or switching modes; theme application does nothing.
    Suspended,
}

/// Owner of every [`ThemeBinding`] and [`StyleBinding`] attached to a tree.
///
/// Themes attach to a node and cover its subtree. An element belongs to the
/// nearest theme on its node or above it.
///
/// ```rust
/// use understory_theme::{ImageStyle, Phase, StyleLists, StyleName, StyleRegistry, ThemeHost};
/// use understory_widget::{Color, Image, WidgetTree};
///
/// let red = Color::from_rgba8(255, 0, 0, 255);
/// let registry = StyleRegistry::with_styles(
///     "Base",
///     StyleLists::default().with("Primary", ImageStyle { color: red, ..ImageStyle::default() }),
/// );
///
/// let mut tree = WidgetTree::new();
/// let canvas = tree.insert(None, "Canvas");
/// let panel = tree.insert(Some(canvas), "Panel");
/// tree.add_widget(panel, Image::default());
///
/// let mut host = ThemeHost::new(Phase::Running);
/// host.attach_theme(&mut tree, canvas, Some(registry));
/// host.attach_element(&mut tree, panel, Some(StyleName::new("Primary")));
///
/// assert_eq!(tree.widget::<Image>(panel).unwrap().color, red);
/// ```
#[derive(Debug, Default)]
pub struct ThemeHost {
    phase: Phase,
    themes: Vec<Rc<ThemeBinding>>,
    elements: HashMap<NodeId, Rc<StyleBinding>>,
}

impl ThemeHost {
    /// Creates an empty host in `phase`.
    #[must_use]
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            ..Self::default()
        }
    }

    /// Returns the current phase.
    #[must_use]
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Switches phase.
    pub fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "theme host phase changed");
        self.phase = phase;
    }

    /// Returns the attached themes, in attach order.
    #[must_use]
    pub fn themes(&self) -> &[Rc<ThemeBinding>] {
        &self.themes
    }

    /// Returns the theme attached to `node` itself.
    #[must_use]
    pub fn theme_at(&self, node: NodeId) -> Option<&Rc<ThemeBinding>> {
        self.themes.iter().find(|t| t.node() == node)
    }

    /// Returns the element binding on `node`.
    #[must_use]
    pub fn element_at(&self, node: NodeId) -> Option<&Rc<StyleBinding>> {
        self.elements.get(&node)
    }

    /// Returns the closest theme on `node` or one of its ancestors.
    #[must_use]
    pub fn nearest_theme(&self, tree: &WidgetTree, node: NodeId) -> Option<&Rc<ThemeBinding>> {
        tree.ancestors(node).find_map(|n| self.theme_at(n))
    }

    /// Returns the element bindings on `node` and beneath it, in pre-order.
    #[must_use]
    pub fn elements_beneath(&self, tree: &WidgetTree, node: NodeId) -> Vec<Rc<StyleBinding>> {
        tree.descendants(node)
            .filter_map(|n| self.element_at(n).cloned())
            .collect()
    }

    /// Attaches a theme to `node`, or returns the one already there.
    ///
    /// Elements beneath `node` that now have this theme as their nearest one
    /// move to it. When a registry is given, it becomes current and is
    /// applied right away, also for a theme that was already attached.
    pub fn attach_theme(
        &mut self,
        tree: &mut WidgetTree,
        node: NodeId,
        registry: Option<Rc<StyleRegistry>>,
    ) -> Rc<ThemeBinding> {
        if let Some(existing) = self.theme_at(node).cloned() {
            if let Some(registry) = registry {
                // Logged where it failed; attaching still succeeds.
                let _ = existing.apply_registry(self, tree, registry, None);
            }
            return existing;
        }
        let theme = ThemeBinding::new(node, registry);
        self.themes.push(theme.clone());
        tracing::debug!(node = ?node, "attached theme");

        for element in self.elements_beneath(tree, node) {
            let nearest = self.nearest_theme(tree, element.node());
            if !nearest.is_some_and(|t| Rc::ptr_eq(t, &theme)) {
                continue;
            }
            if let Some(previous) = element.theme() {
                previous.unregister(&element);
            }
            theme.adopt(&element);
        }

        if theme.current().is_some() {
            // Logged where it failed; attaching still succeeds.
            let _ = theme.apply_theme(self, tree, None);
        }
        theme
    }

    /// Detaches the theme on `node`.
    ///
    /// Its elements move to the next enclosing theme, if any, without being
    /// re-applied. Returns `false` if no theme was attached there.
    pub fn detach_theme(&mut self, tree: &WidgetTree, node: NodeId) -> bool {
        let Some(index) = self.themes.iter().position(|t| t.node() == node) else {
            return false;
        };
        let theme = self.themes.remove(index);
        for element in theme.release() {
            if let Some(outer) = self.nearest_theme(tree, element.node()) {
                outer.adopt(&element);
            }
        }
        tracing::debug!(node = ?node, "detached theme");
        true
    }

    /// Makes `registry` current for the theme on `node` and applies it.
    pub fn set_registry(
        &self,
        tree: &mut WidgetTree,
        node: NodeId,
        registry: Rc<StyleRegistry>,
    ) -> Result<usize, ThemeError> {
        let Some(theme) = self.theme_at(node).cloned() else {
            tracing::error!(node = ?node, "no theme attached to node");
            return Err(ThemeError::NotAttached { node });
        };
        theme.apply_registry(self, tree, registry, None)
    }

    /// Attaches a style binding to `node`, or returns the one already there.
    ///
    /// A new binding registers with its nearest theme, which applies to it
    /// immediately.
    pub fn attach_element(
        &mut self,
        tree: &mut WidgetTree,
        node: NodeId,
        name: Option<StyleName>,
    ) -> Rc<StyleBinding> {
        if let Some(existing) = self.element_at(node) {
            return existing.clone();
        }
        let element = StyleBinding::new(node, name);
        self.elements.insert(node, element.clone());
        match self.nearest_theme(tree, node).cloned() {
            Some(theme) => {
                theme.register(tree, &element);
            }
            None => tracing::debug!(node = ?node, "style binding has no enclosing theme"),
        }
        element
    }

    /// Detaches the style binding on `node`; returns `false` if there was none.
    pub fn detach_element(&mut self, node: NodeId) -> bool {
        let Some(element) = self.elements.remove(&node) else {
            return false;
        };
        if let Some(theme) = element.theme() {
            theme.unregister(&element);
        }
        true
    }

    /// Drops every binding whose node is no longer in `tree`; returns how many.
    pub fn prune(&mut self, tree: &WidgetTree) -> usize {
        let dead_elements: Vec<_> = self
            .elements
            .keys()
            .copied()
            .filter(|&n| !tree.is_alive(n))
            .collect();
        let dead_themes: Vec<_> = self
            .themes
            .iter()
            .map(|t| t.node())
            .filter(|&n| !tree.is_alive(n))
            .collect();

        let mut removed = 0;
        for node in dead_elements {
            removed += usize::from(self.detach_element(node));
        }
        for node in dead_themes {
            removed += usize::from(self.detach_theme(tree, node));
        }
        removed
    }

    /// Applies every theme that has a current registry and passes `filter`;
    /// returns how many elements were styled.
    pub fn apply_all(&self, tree: &mut WidgetTree, filter: Option<ThemeFilter<'_>>) -> usize {
        if self.phase == Phase::Suspended {
            tracing::trace!("host suspended, themes not applied");
            return 0;
        }
        let mut applied = 0;
        for theme in &self.themes {
            if theme.current().is_none() || filter.is_some_and(|f| !f(&**theme)) {
                continue;
            }
            // Themes with a registry cannot fail here.
            applied += theme.apply_theme(self, tree, None).unwrap_or(0);
        }
        applied
    }

    /// Rebuilds `registry` after its content changed and re-applies every
    /// theme using it; returns how many elements were styled.
    pub fn registry_changed(&self, tree: &mut WidgetTree, registry: &Rc<StyleRegistry>) -> usize {
        registry.invalidate();
        registry.force_rebuild();
        self.apply_all(
            tree,
            Some(&|theme: &ThemeBinding| {
                theme
                    .current()
                    .is_some_and(|current| Rc::ptr_eq(&current, registry))
            }),
        )
    }

    /// Re-applies the theme enclosing `node` after the element there changed.
    pub fn element_changed(
        &self,
        tree: &mut WidgetTree,
        node: NodeId,
    ) -> Result<usize, ThemeError> {
        let Some(theme) = self.nearest_theme(tree, node).cloned() else {
            tracing::debug!(node = ?node, "changed element has no enclosing theme");
            return Err(ThemeError::NotAttached { node });
        };
        theme.apply_theme(self, tree, None)
    }
}
