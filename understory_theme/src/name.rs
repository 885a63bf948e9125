// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style name tokens.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a named style inside a [`StyleRegistry`](crate::StyleRegistry).
///
/// Names compare and hash by their string value, so two tokens created from
/// the same text are interchangeable map keys. Cloning is cheap (`Rc`).
///
/// ```rust
/// use understory_theme::StyleName;
///
/// let a = StyleName::new("Primary");
/// let b = StyleName::from("Primary");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Primary");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct StyleName(Rc<str>);

impl StyleName {
    /// Creates a name from text.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Rc::from(name))
    }

    /// Returns the name's text.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StyleName {
    fn from(name: String) -> Self {
        Self(Rc::from(name))
    }
}

impl From<StyleName> for String {
    fn from(name: StyleName) -> Self {
        Self::from(name.as_str())
    }
}

impl fmt::Debug for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StyleName").field(&self.as_str()).finish()
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use hashbrown::HashSet;

    #[test]
    fn equality_is_by_value() {
        let a = StyleName::new("Primary");
        let b = StyleName::from(String::from("Primary"));
        assert_eq!(a, b);
        assert_ne!(a, StyleName::new("Secondary"));

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn debug_and_display() {
        let name = StyleName::new("Primary");
        assert_eq!(format!("{:?}", name), "StyleName(\"Primary\")");
        assert_eq!(format!("{}", name), "Primary");
    }
}
