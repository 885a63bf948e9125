// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style registries with single inheritance and a lazily rebuilt resolved map.
//!
//! ## Resolution
//!
//! A registry's resolved map is built by walking the base chain depth first,
//! base before derived, and inserting every named entry in order. Later
//! entries overwrite earlier ones, so a derived registry overrides its base
//! and, within one registry, the last entry of a name wins. Unnamed entries
//! are skipped.
//!
//! ## Staleness
//!
//! Each registry carries a revision that moves whenever its content or base
//! changes. A resolved map remembers the revision of every registry in the
//! chain it was built from and is rebuilt on the next lookup once any of them
//! has moved or been dropped.
//!
//! ## Cycles
//!
//! The walk keeps the registries it has visited and stops at the first one it
//! sees twice. Entries already collected stay in the map; the repetition is
//! reported through `tracing` and in [`RebuildStats::cycle_at`].

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, Ref, RefCell};
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::name::StyleName;
use crate::named::StyleLists;
use crate::value::{StyleKind, StyleValue};

type Chain = SmallVec<[(Weak<StyleRegistry>, u64); 4]>;

/// Resolved names of a registry, as returned by [`StyleRegistry::style_map`].
pub type StyleMap = HashMap<StyleName, Rc<StyleValue>>;

/// Summary of one [`StyleRegistry::force_rebuild`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuildStats {
    /// Registries visited along the base chain, this one included.
    pub registries: usize,
    /// Entries collected, drafts included.
    pub collected: usize,
    /// Distinct names in the resolved map.
    pub resolved: usize,
    /// Unnamed entries skipped.
    pub unnamed: usize,
    /// Label of the registry where the base chain repeated, if it did.
    pub cycle_at: Option<String>,
}

#[derive(Default)]
struct ResolvedMap {
    built: bool,
    map: Rc<StyleMap>,
    chain: Chain,
}

/// A named collection of styles that can inherit from a base registry.
///
/// Registries are shared (`Rc`) and single-threaded. The base link is weak:
/// a registry does not keep its base alive, and a dropped base ends the chain.
///
/// ```rust
/// use understory_theme::{ImageStyle, StyleLists, StyleName, StyleRegistry};
///
/// let base = StyleRegistry::with_styles(
///     "Base",
///     StyleLists::default().with("Panel", ImageStyle::default()),
/// );
/// let dark = StyleRegistry::new("Dark");
/// dark.set_base(Some(&base));
///
/// assert!(dark.resolve(&StyleName::new("Panel")).is_some());
/// assert!(dark.resolve(&StyleName::new("Missing")).is_none());
/// ```
pub struct StyleRegistry {
    this: Weak<Self>,
    label: String,
    base: RefCell<Weak<Self>>,
    styles: RefCell<StyleLists>,
    revision: Cell<u64>,
    cache: RefCell<ResolvedMap>,
    rebuilds: Cell<u64>,
}

impl fmt::Debug for StyleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.base();
        f.debug_struct("StyleRegistry")
            .field("label", &self.label)
            .field("base", &base.as_ref().map(|b| b.label()))
            .field("entries", &self.styles.borrow().len())
            .field("revision", &self.revision.get())
            .field("built", &self.cache.borrow().built)
            .finish_non_exhaustive()
    }
}

impl StyleRegistry {
    /// Creates an empty registry with no base.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Rc<Self> {
        Self::with_styles(label, StyleLists::default())
    }

    /// Creates a registry holding `styles`, with no base.
    #[must_use]
    pub fn with_styles(label: impl Into<String>, styles: StyleLists) -> Rc<Self> {
        let label = label.into();
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            label,
            base: RefCell::new(Weak::new()),
            styles: RefCell::new(styles),
            revision: Cell::new(0),
            cache: RefCell::new(ResolvedMap::default()),
            rebuilds: Cell::new(0),
        })
    }

    /// Returns the registry's label.
    #[must_use]
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the content revision; it moves on every edit or base change.
    #[must_use]
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Returns how many times the resolved map has been rebuilt.
    #[must_use]
    #[inline]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.get()
    }

    /// Returns the base registry, if one is set and still alive.
    #[must_use]
    pub fn base(&self) -> Option<Rc<Self>> {
        self.base.borrow().upgrade()
    }

    /// Sets or clears the base registry.
    ///
    /// Creating a cycle is allowed; resolution truncates it.
    pub fn set_base(&self, base: Option<&Rc<Self>>) {
        *self.base.borrow_mut() = base.map_or_else(Weak::new, Rc::downgrade);
        self.invalidate();
    }

    /// Returns the authored content.
    #[must_use]
    pub fn styles(&self) -> Ref<'_, StyleLists> {
        self.styles.borrow()
    }

    /// Edits the authored content and invalidates resolved maps built from it.
    pub fn edit<R>(&self, f: impl FnOnce(&mut StyleLists) -> R) -> R {
        let out = f(&mut self.styles.borrow_mut());
        self.invalidate();
        out
    }

    /// Marks this registry changed.
    ///
    /// Its own resolved map and those of registries deriving from it are
    /// rebuilt on their next lookup.
    pub fn invalidate(&self) {
        self.revision.set(self.revision.get().wrapping_add(1));
        self.cache.borrow_mut().built = false;
    }

    /// Returns `true` if the next lookup will rebuild the resolved map.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        let cache = self.cache.borrow();
        !cache.built
            || cache.chain.iter().any(|(registry, revision)| {
                registry
                    .upgrade()
                    .is_none_or(|r| r.revision.get() != *revision)
            })
    }

    /// Looks up `name`, rebuilding the resolved map first if it is stale.
    #[must_use]
    pub fn resolve(&self, name: &StyleName) -> Option<Rc<StyleValue>> {
        self.refresh();
        self.cache.borrow().map.get(name).cloned()
    }

    /// Returns `true` if `name` resolves.
    #[must_use]
    pub fn contains(&self, name: &StyleName) -> bool {
        self.refresh();
        self.cache.borrow().map.contains_key(name)
    }

    /// Number of resolvable names, inherited ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.refresh();
        self.cache.borrow().map.len()
    }

    /// Returns `true` if no name resolves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the resolved map, rebuilding it first if it is stale.
    ///
    /// The map is a snapshot: later rebuilds replace the registry's map and
    /// leave this one untouched.
    #[must_use]
    pub fn style_map(&self) -> Rc<StyleMap> {
        self.refresh();
        self.cache.borrow().map.clone()
    }

    fn refresh(&self) {
        if self.is_stale() {
            self.force_rebuild();
        }
    }

    /// Rebuilds the resolved map from the base chain and own content.
    ///
    /// Each named value in the new map is a fresh copy linked back to this
    /// registry, so nested references inside it resolve here.
    pub fn force_rebuild(&self) -> RebuildStats {
        let mut chain = Chain::new();
        let mut collected = Vec::new();
        let cycle_at = self.collect(&mut chain, &mut collected);

        if let Some(repeated) = &cycle_at {
            tracing::warn!(
                registry = %self.label,
                repeated = %repeated,
                "base chain repeats; inheritance truncated"
            );
        }

        let mut stats = RebuildStats {
            registries: chain.len(),
            collected: collected.len(),
            cycle_at,
            ..RebuildStats::default()
        };

        let mut map = StyleMap::with_capacity(collected.len());
        for (name, kind) in collected {
            let Some(name) = name else {
                stats.unnamed += 1;
                continue;
            };
            let value = StyleValue::new(kind);
            value.link(self.this.clone());
            map.insert(name, Rc::new(value));
        }
        stats.resolved = map.len();

        {
            let mut cache = self.cache.borrow_mut();
            cache.map = Rc::new(map);
            cache.chain = chain;
            cache.built = true;
        }
        self.rebuilds.set(self.rebuilds.get() + 1);

        tracing::debug!(
            registry = %self.label,
            registries = stats.registries,
            resolved = stats.resolved,
            unnamed = stats.unnamed,
            "rebuilt style map"
        );
        stats
    }

    /// Pushes the chain's entries base first; returns the repeated label on a cycle.
    fn collect(
        &self,
        chain: &mut Chain,
        out: &mut Vec<(Option<StyleName>, StyleKind)>,
    ) -> Option<String> {
        if chain
            .iter()
            .any(|(visited, _)| core::ptr::eq(visited.as_ptr(), self))
        {
            return Some(self.label.clone());
        }
        chain.push((self.this.clone(), self.revision.get()));

        let cycle_at = match self.base() {
            Some(base) => base.collect(chain, out),
            None => None,
        };
        self.styles.borrow().collect_into(out);
        cycle_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{ImageStyle, LabelStyle};
    use crate::named::NamedStyle;
    use peniko::Color;

    fn image(color: Color) -> ImageStyle {
        ImageStyle {
            color,
            ..ImageStyle::default()
        }
    }

    fn color_of(registry: &StyleRegistry, name: &str) -> Option<Color> {
        let value = registry.resolve(&StyleName::new(name))?;
        match value.kind() {
            StyleKind::Image(style) => Some(style.color),
            _ => None,
        }
    }

    const RED: Color = Color::from_rgba8(255, 0, 0, 255);
    const BLUE: Color = Color::from_rgba8(0, 0, 255, 255);

    #[test]
    fn derived_entries_override_base() {
        let base = StyleRegistry::with_styles(
            "Base",
            StyleLists::default()
                .with("Primary", image(RED))
                .with("Secondary", image(RED)),
        );
        let derived = StyleRegistry::with_styles(
            "Derived",
            StyleLists::default().with("Primary", image(BLUE)),
        );
        derived.set_base(Some(&base));

        assert_eq!(color_of(&derived, "Primary"), Some(BLUE));
        assert_eq!(color_of(&derived, "Secondary"), Some(RED));
        assert_eq!(color_of(&base, "Primary"), Some(RED));
    }

    #[test]
    fn later_entry_of_same_name_wins() {
        let registry = StyleRegistry::with_styles(
            "Base",
            StyleLists::default()
                .with("Primary", image(RED))
                .with("Primary", image(BLUE)),
        );
        assert_eq!(color_of(&registry, "Primary"), Some(BLUE));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn names_are_shared_across_kinds() {
        // Kinds merge in a fixed order, so a label entry replaces an image
        // entry of the same name.
        let registry = StyleRegistry::with_styles(
            "Base",
            StyleLists::default()
                .with("Shared", image(RED))
                .with("Shared", LabelStyle::default()),
        );
        let value = registry.resolve(&StyleName::new("Shared")).unwrap();
        assert!(matches!(value.kind(), StyleKind::Label(_)));
    }

    #[test]
    fn inheritance_is_transitive() {
        let a = StyleRegistry::with_styles("A", StyleLists::default().with("Deep", image(RED)));
        let b = StyleRegistry::new("B");
        let c = StyleRegistry::new("C");
        b.set_base(Some(&a));
        c.set_base(Some(&b));

        assert_eq!(color_of(&c, "Deep"), Some(RED));
        assert_eq!(c.force_rebuild().registries, 3);
    }

    #[test]
    fn unnamed_entries_are_skipped() {
        let registry = StyleRegistry::new("Drafts");
        registry.edit(|lists| {
            lists.images.push(NamedStyle::unnamed(image(RED)));
            lists.insert("Named", image(BLUE));
        });

        let stats = registry.force_rebuild();
        assert_eq!(stats.collected, 2);
        assert_eq!(stats.unnamed, 1);
        assert_eq!(stats.resolved, 1);
    }

    #[test]
    fn self_cycle_terminates() {
        let registry =
            StyleRegistry::with_styles("Loop", StyleLists::default().with("Primary", image(RED)));
        registry.set_base(Some(&registry));

        let stats = registry.force_rebuild();
        assert_eq!(stats.cycle_at.as_deref(), Some("Loop"));
        assert_eq!(stats.registries, 1);
        assert_eq!(color_of(&registry, "Primary"), Some(RED));
    }

    #[test]
    fn mutual_cycle_terminates_with_partial_map() {
        let a = StyleRegistry::with_styles("A", StyleLists::default().with("FromA", image(RED)));
        let b = StyleRegistry::with_styles("B", StyleLists::default().with("FromB", image(BLUE)));
        a.set_base(Some(&b));
        b.set_base(Some(&a));

        let stats = a.force_rebuild();
        assert_eq!(stats.cycle_at.as_deref(), Some("A"));
        assert_eq!(stats.registries, 2);
        assert_eq!(color_of(&a, "FromA"), Some(RED));
        assert_eq!(color_of(&a, "FromB"), Some(BLUE));
    }

    #[test]
    fn first_resolve_rebuilds_once() {
        let registry =
            StyleRegistry::with_styles("Base", StyleLists::default().with("Primary", image(RED)));
        assert_eq!(registry.rebuild_count(), 0);
        assert!(registry.is_stale());

        let _ = registry.resolve(&StyleName::new("Primary"));
        let _ = registry.resolve(&StyleName::new("Missing"));
        assert!(registry.contains(&StyleName::new("Primary")));
        assert_eq!(registry.rebuild_count(), 1);
    }

    #[test]
    fn empty_registry_builds_once() {
        let registry = StyleRegistry::new("Empty");
        assert!(registry.is_empty());
        assert!(registry.is_empty());
        assert_eq!(registry.rebuild_count(), 1);
    }

    #[test]
    fn force_rebuild_reflects_latest_content() {
        let registry =
            StyleRegistry::with_styles("Base", StyleLists::default().with("Primary", image(RED)));
        assert_eq!(color_of(&registry, "Primary"), Some(RED));

        registry.styles.borrow_mut().images[0].style_mut().color = BLUE;
        // Edits behind the registry's back are only picked up by an explicit rebuild.
        assert_eq!(color_of(&registry, "Primary"), Some(RED));
        registry.force_rebuild();
        assert_eq!(color_of(&registry, "Primary"), Some(BLUE));
    }

    #[test]
    fn base_edits_make_derived_stale() {
        let base = StyleRegistry::new("Base");
        let derived = StyleRegistry::new("Derived");
        derived.set_base(Some(&base));
        assert_eq!(color_of(&derived, "Late"), None);
        assert!(!derived.is_stale());

        base.edit(|lists| lists.insert("Late", image(RED)));
        assert!(derived.is_stale());
        assert_eq!(color_of(&derived, "Late"), Some(RED));
    }

    #[test]
    fn dropped_base_ends_the_chain() {
        let derived = StyleRegistry::new("Derived");
        {
            let base =
                StyleRegistry::with_styles("Base", StyleLists::default().with("Gone", image(RED)));
            derived.set_base(Some(&base));
            assert_eq!(color_of(&derived, "Gone"), Some(RED));
        }
        assert!(derived.base().is_none());
        assert!(derived.is_stale());
        assert_eq!(color_of(&derived, "Gone"), None);
    }

    #[test]
    fn resolved_values_link_to_the_resolving_registry() {
        let base =
            StyleRegistry::with_styles("Base", StyleLists::default().with("Primary", image(RED)));
        let derived = StyleRegistry::new("Derived");
        derived.set_base(Some(&base));

        let from_derived = derived.resolve(&StyleName::new("Primary")).unwrap();
        let from_base = base.resolve(&StyleName::new("Primary")).unwrap();
        assert!(Rc::ptr_eq(&from_derived.registry().unwrap(), &derived));
        assert!(Rc::ptr_eq(&from_base.registry().unwrap(), &base));
        assert!(!Rc::ptr_eq(&from_derived, &from_base));
    }

    #[test]
    fn style_map_exposes_every_name() {
        let registry = StyleRegistry::with_styles(
            "Base",
            StyleLists::default()
                .with("A", image(RED))
                .with("B", LabelStyle::default()),
        );
        let map = registry.style_map();
        let mut names: Vec<_> = map.keys().map(StyleName::as_str).collect();
        names.sort_unstable();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn style_map_snapshot_survives_rebuilds() {
        let base =
            StyleRegistry::with_styles("Base", StyleLists::default().with("A", image(RED)));
        let derived = StyleRegistry::new("Derived");
        derived.set_base(Some(&base));

        let map = derived.style_map();
        base.edit(|lists| lists.insert("B", image(BLUE)));
        derived.edit(|lists| lists.insert("C", image(BLUE)));

        assert_eq!(color_of(&derived, "B"), Some(BLUE));
        assert_eq!(derived.len(), 3);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&StyleName::new("A")));
        assert_eq!(derived.style_map().len(), 3);
    }
}
