// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted registry records and the library that links them.

use alloc::borrow::ToOwned;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::named::StyleLists;
use crate::registry::StyleRegistry;

/// Serialized form of one registry: its label, base label, and content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryRecord {
    /// Registry label, unique within a library.
    pub label: String,
    /// Label of the base registry.
    pub base: Option<String>,
    /// Authored content.
    pub styles: StyleLists,
}

impl StyleRegistry {
    /// Captures this registry's label, base label and content.
    #[must_use]
    pub fn to_record(&self) -> RegistryRecord {
        RegistryRecord {
            label: self.label().to_owned(),
            base: self.base().map(|b| b.label().to_owned()),
            styles: self.styles().clone(),
        }
    }
}

/// An owning set of registries addressed by label.
///
/// Registries hold their bases weakly; the library is what keeps a loaded
/// family of registries alive.
#[derive(Debug, Default)]
pub struct ThemeLibrary {
    registries: Vec<Rc<StyleRegistry>>,
    index: HashMap<String, usize>,
}

impl ThemeLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds registries from records and links their bases by label.
    ///
    /// Records may appear in any order. Base cycles are accepted and left for
    /// resolution to truncate.
    pub fn from_records(
        records: impl IntoIterator<Item = RegistryRecord>,
    ) -> Result<Self, LibraryError> {
        let mut library = Self::new();
        let mut bases = Vec::new();
        for record in records {
            let registry = StyleRegistry::with_styles(record.label, record.styles);
            library.insert(registry.clone())?;
            bases.push((registry, record.base));
        }

        for (registry, base) in bases {
            let Some(base) = base else {
                continue;
            };
            let Some(target) = library.get(&base) else {
                tracing::warn!(
                    registry = %registry.label(),
                    base = %base,
                    "registry inherits from unknown registry"
                );
                return Err(LibraryError::UnknownBase {
                    registry: registry.label().to_owned(),
                    base,
                });
            };
            registry.set_base(Some(target));
        }

        tracing::debug!(registries = library.len(), "loaded style registries");
        Ok(library)
    }

    /// Adds a registry; its label must not be taken.
    pub fn insert(&mut self, registry: Rc<StyleRegistry>) -> Result<(), LibraryError> {
        if self.index.contains_key(registry.label()) {
            tracing::warn!(registry = %registry.label(), "duplicate registry label");
            return Err(LibraryError::DuplicateRegistry {
                label: registry.label().to_owned(),
            });
        }
        self.index
            .insert(registry.label().to_owned(), self.registries.len());
        self.registries.push(registry);
        Ok(())
    }

    /// Returns the registry with `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Rc<StyleRegistry>> {
        self.index.get(label).map(|&i| &self.registries[i])
    }

    /// Iterates registries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<StyleRegistry>> + '_ {
        self.registries.iter()
    }

    /// Number of registries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    /// Returns `true` if the library holds no registries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    /// Captures every registry as a record, in insertion order.
    #[must_use]
    pub fn to_records(&self) -> Vec<RegistryRecord> {
        self.registries.iter().map(|r| r.to_record()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::ImageStyle;
    use crate::name::StyleName;

    fn record(label: &str, base: Option<&str>) -> RegistryRecord {
        RegistryRecord {
            label: label.to_owned(),
            base: base.map(ToOwned::to_owned),
            styles: StyleLists::default().with(label, ImageStyle::default()),
        }
    }

    #[test]
    fn bases_link_regardless_of_order() {
        let library =
            ThemeLibrary::from_records([record("Dark", Some("Base")), record("Base", None)])
                .unwrap();

        let dark = library.get("Dark").unwrap();
        let base = library.get("Base").unwrap();
        assert!(Rc::ptr_eq(&dark.base().unwrap(), base));
        assert!(dark.contains(&StyleName::new("Base")));
        assert!(dark.contains(&StyleName::new("Dark")));
        assert!(!base.contains(&StyleName::new("Dark")));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = ThemeLibrary::from_records([record("Base", None), record("Base", None)])
            .unwrap_err();
        assert_eq!(
            err,
            LibraryError::DuplicateRegistry {
                label: "Base".to_owned()
            }
        );
    }

    #[test]
    fn unknown_base_is_rejected() {
        let err = ThemeLibrary::from_records([record("Dark", Some("Missing"))]).unwrap_err();
        assert_eq!(
            err,
            LibraryError::UnknownBase {
                registry: "Dark".to_owned(),
                base: "Missing".to_owned(),
            }
        );
    }

    #[test]
    fn records_capture_current_state() {
        let records = [record("Base", None), record("Dark", Some("Base"))];
        let library = ThemeLibrary::from_records(records.clone()).unwrap();
        assert_eq!(library.to_records(), records);
        assert_eq!(library.iter().count(), 2);
    }
}
