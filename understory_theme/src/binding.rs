// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime bindings: themes attached to subtrees and styled elements inside them.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use understory_widget::{NodeId, WidgetTree};

use crate::error::ThemeError;
use crate::host::{Phase, ThemeHost};
use crate::name::StyleName;
use crate::registry::StyleRegistry;

/// Predicate selecting which elements a theme application touches.
pub type ElementFilter<'a> = &'a dyn Fn(&StyleBinding) -> bool;

/// A node that asks to be styled by name.
///
/// The binding remembers the theme it registered with, weakly.
pub struct StyleBinding {
    node: NodeId,
    name: RefCell<Option<StyleName>>,
    theme: RefCell<Weak<ThemeBinding>>,
}

impl fmt::Debug for StyleBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleBinding")
            .field("node", &self.node)
            .field("name", &self.name.borrow())
            .field("theme", &self.theme.borrow().upgrade().map(|t| t.node()))
            .finish()
    }
}

impl StyleBinding {
    /// Creates an unregistered binding for `node`.
    #[must_use]
    pub fn new(node: NodeId, name: Option<StyleName>) -> Rc<Self> {
        Rc::new(Self {
            node,
            name: RefCell::new(name),
            theme: RefCell::new(Weak::new()),
        })
    }

    /// Returns the styled node.
    #[must_use]
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the requested style name.
    #[must_use]
    pub fn name(&self) -> Option<StyleName> {
        self.name.borrow().clone()
    }

    /// Changes the requested style name; nothing is re-applied.
    pub fn set_name(&self, name: Option<StyleName>) {
        *self.name.borrow_mut() = name;
    }

    /// Returns the theme this binding is registered with, if it is still attached.
    #[must_use]
    pub fn theme(&self) -> Option<Rc<ThemeBinding>> {
        self.theme.borrow().upgrade()
    }

    pub(crate) fn link(&self, theme: Weak<ThemeBinding>) {
        *self.theme.borrow_mut() = theme;
    }

    fn is_linked_to(&self, theme: &ThemeBinding) -> bool {
        core::ptr::eq(self.theme.borrow().as_ptr(), theme)
    }

    /// Resolves this binding's name in `registry` and applies it to the node.
    ///
    /// A missing name, a missing registry and an unknown name are each logged
    /// and returned without touching the tree.
    pub fn apply_theme(
        &self,
        tree: &mut WidgetTree,
        registry: Option<&Rc<StyleRegistry>>,
    ) -> Result<(), ThemeError> {
        let Some(name) = self.name() else {
            tracing::error!(node = ?self.node, "style binding has no style name");
            return Err(ThemeError::MissingStyleName { node: self.node });
        };
        let Some(registry) = registry else {
            tracing::error!(node = ?self.node, style = %name, "no style registry to apply");
            return Err(ThemeError::MissingRegistry { node: self.node });
        };
        let Some(value) = registry.resolve(&name) else {
            tracing::error!(
                node = ?self.node,
                style = %name,
                registry = %registry.label(),
                "style not found in registry"
            );
            return Err(ThemeError::UnknownStyle {
                name,
                registry: registry.label().into(),
            });
        };
        value.apply_to_node(tree, self.node);
        tracing::trace!(node = ?self.node, style = %name, "applied style");
        Ok(())
    }
}

/// A theme attached to a subtree: a current registry plus the elements
/// registered beneath it.
///
/// Created and destroyed through [`ThemeHost`].
pub struct ThemeBinding {
    this: Weak<Self>,
    node: NodeId,
    current: RefCell<Option<Rc<StyleRegistry>>>,
    elements: RefCell<Vec<Rc<StyleBinding>>>,
}

impl fmt::Debug for ThemeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeBinding")
            .field("node", &self.node)
            .field(
                "current",
                &self.current.borrow().as_ref().map(|r| r.label()),
            )
            .field("elements", &self.elements.borrow().len())
            .finish_non_exhaustive()
    }
}

impl ThemeBinding {
    pub(crate) fn new(node: NodeId, current: Option<Rc<StyleRegistry>>) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            node,
            current: RefCell::new(current),
            elements: RefCell::new(Vec::new()),
        })
    }

    /// Returns the subtree root this theme is attached to.
    #[must_use]
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the current registry.
    #[must_use]
    pub fn current(&self) -> Option<Rc<StyleRegistry>> {
        self.current.borrow().clone()
    }

    /// Returns the registered elements, in registration order.
    #[must_use]
    pub fn elements(&self) -> Vec<Rc<StyleBinding>> {
        self.elements.borrow().clone()
    }

    /// Returns `true` if `element` is registered here.
    #[must_use]
    pub fn contains(&self, element: &Rc<StyleBinding>) -> bool {
        self.elements.borrow().iter().any(|e| Rc::ptr_eq(e, element))
    }

    /// Registers `element`, applying the current registry to it first.
    ///
    /// Returns `false` if it was already registered.
    pub fn register(&self, tree: &mut WidgetTree, element: &Rc<StyleBinding>) -> bool {
        if self.contains(element) {
            return false;
        }
        let current = self.current();
        // Failures are logged by the element and do not block registration.
        let _ = element.apply_theme(tree, current.as_ref());
        self.adopt(element);
        true
    }

    /// Links and records `element` without applying anything.
    pub(crate) fn adopt(&self, element: &Rc<StyleBinding>) {
        if !self.contains(element) {
            element.link(self.this.clone());
            self.elements.borrow_mut().push(element.clone());
        }
    }

    /// Removes `element`; returns `false` if it was not registered.
    pub fn unregister(&self, element: &Rc<StyleBinding>) -> bool {
        let mut elements = self.elements.borrow_mut();
        let Some(index) = elements.iter().position(|e| Rc::ptr_eq(e, element)) else {
            return false;
        };
        elements.remove(index);
        if element.is_linked_to(self) {
            element.link(Weak::new());
        }
        true
    }

    /// Detaches every element, leaving them unlinked; returns them.
    pub(crate) fn release(&self) -> Vec<Rc<StyleBinding>> {
        let elements = core::mem::take(&mut *self.elements.borrow_mut());
        for element in &elements {
            if element.is_linked_to(self) {
                element.link(Weak::new());
            }
        }
        elements
    }

    /// Makes `registry` current, then applies it.
    pub fn apply_registry(
        &self,
        host: &ThemeHost,
        tree: &mut WidgetTree,
        registry: Rc<StyleRegistry>,
        filter: Option<ElementFilter<'_>>,
    ) -> Result<usize, ThemeError> {
        *self.current.borrow_mut() = Some(registry);
        self.apply_theme(host, tree, filter)
    }

    /// Applies the current registry to every registered element that has a
    /// name, is still in the tree, and passes `filter`; returns how many were
    /// styled.
    ///
    /// While the host is editing, the registry is rebuilt and the element
    /// list is recomputed from the tree first. While suspended, nothing
    /// happens.
    pub fn apply_theme(
        &self,
        host: &ThemeHost,
        tree: &mut WidgetTree,
        filter: Option<ElementFilter<'_>>,
    ) -> Result<usize, ThemeError> {
        if host.phase() == Phase::Suspended {
            tracing::trace!(node = ?self.node, "host suspended, theme not applied");
            return Ok(0);
        }
        let Some(registry) = self.current() else {
            tracing::error!(node = ?self.node, "theme has no style registry");
            return Err(ThemeError::MissingRegistry { node: self.node });
        };

        if host.phase() == Phase::Editing {
            registry.force_rebuild();
            self.rescan(host, tree);
        }

        let mut applied = 0;
        for element in self.elements() {
            if element.name.borrow().is_none() || filter.is_some_and(|f| !f(&*element)) {
                continue;
            }
            if !tree.is_alive(element.node()) {
                tracing::trace!(node = ?element.node(), "element node removed, skipped");
                continue;
            }
            if element.apply_theme(tree, Some(&registry)).is_ok() {
                applied += 1;
            }
        }
        tracing::debug!(
            node = ?self.node,
            registry = %registry.label(),
            applied,
            "applied theme"
        );
        Ok(applied)
    }

    /// Replaces the element list with the bindings beneath this theme's node
    /// whose nearest theme is this one.
    fn rescan(&self, host: &ThemeHost, tree: &WidgetTree) {
        let found: Vec<_> = host
            .elements_beneath(tree, self.node)
            .into_iter()
            .filter(|e| {
                host.nearest_theme(tree, e.node())
                    .is_some_and(|t| core::ptr::eq(Rc::as_ptr(t), self))
            })
            .collect();
        for element in self.release() {
            if !found.iter().any(|e| Rc::ptr_eq(e, &element)) {
                tracing::trace!(node = ?element.node(), "element left theme during rescan");
            }
        }
        for element in &found {
            self.adopt(element);
        }
    }
}
