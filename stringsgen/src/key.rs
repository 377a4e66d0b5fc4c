//! Keys, key components and key paths.
//!
//! A [`Key`] is the flat dotted identifier of one resource entry. It is split
//! into a [`KeyPath`] of validated [`KeyComponent`]s when the hierarchy is
//! built.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Dotted flat identifier of one resource entry, e.g. `home.welcome`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(String);

impl Key {
    pub fn new(value: impl Into<String>) -> Self {
        Key(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One non-empty, dot-free segment of a [`Key`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct KeyComponent(String);

impl KeyComponent {
    /// Returns `None` for an empty value or one containing `.`.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() || value.contains('.') {
            return None;
        }
        Some(KeyComponent(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for KeyComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered sequence of key components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    components: Vec<KeyComponent>,
}

impl KeyPath {
    pub fn new(components: Vec<KeyComponent>) -> Self {
        KeyPath { components }
    }

    /// Splits a key on `.`; fails if any segment is not a valid component.
    ///
    /// ```rust
    /// use stringsgen::key::{Key, KeyPath};
    ///
    /// let path = KeyPath::parse(&Key::new("home.welcome")).unwrap();
    /// assert_eq!(path.len(), 2);
    /// assert!(KeyPath::parse(&Key::new("home..welcome")).is_none());
    /// ```
    pub fn parse(key: &Key) -> Option<Self> {
        key.as_str()
            .split('.')
            .map(KeyComponent::new)
            .collect::<Option<Vec<_>>>()
            .map(KeyPath::new)
    }

    pub fn components(&self) -> &[KeyComponent] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn last(&self) -> Option<&KeyComponent> {
        self.components.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyComponent> {
        self.components.iter()
    }

    pub fn appending(&self, component: KeyComponent) -> KeyPath {
        let mut components = self.components.clone();
        components.push(component);
        KeyPath { components }
    }

    pub fn prepending(&self, component: KeyComponent) -> KeyPath {
        let mut components = Vec::with_capacity(self.components.len() + 1);
        components.push(component);
        components.extend(self.components.iter().cloned());
        KeyPath { components }
    }

    pub fn joined(&self, other: &KeyPath) -> KeyPath {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        KeyPath { components }
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, component) in self.components.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            f.write_str(component.as_str())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a KeyComponent;
    type IntoIter = std::slice::Iter<'a, KeyComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

/// Name of a template placeholder, without the `#` key marker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ParameterName(String);

impl ParameterName {
    pub fn new(value: impl Into<String>) -> Self {
        ParameterName(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ParameterName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
