//! Resource model produced by the parser and the hierarchy builder.
//!
//! Values keep their literal text here; the [`crate::skeleton`] pass reduces
//! them to their shape before code generation.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
    str::FromStr,
};

use serde::Serialize;

use crate::key::{KeyComponent, ParameterName};

/// Standard CLDR plural forms, ordered canonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }

    /// Suffix appended to a base key to look up this category's variant.
    pub fn key_suffix(self) -> String {
        format!("${}", self.name())
    }
}

impl FromStr for PluralCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PluralCategory::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| format!("Unknown plural category: {}", s))
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed value, before the skeleton pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Literal text with escapes already resolved.
    Constant(String),

    /// Text with at least one placeholder.
    Template(Vec<TemplateComponent>),
}

impl Value {
    /// Placeholder names in first-occurrence order, without duplicates.
    pub fn parameter_names(&self) -> Vec<ParameterName> {
        let mut names = Vec::new();
        self.collect_parameter_names(&mut names);
        names
    }

    pub(crate) fn collect_parameter_names(&self, names: &mut Vec<ParameterName>) {
        if let Value::Template(components) = self {
            for component in components {
                if let TemplateComponent::Parameter(name) = component {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateComponent {
    Constant(String),
    Parameter(ParameterName),
}

/// One resource entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Simple(Value),

    /// Variants per plural category; never empty.
    Pluralized {
        values: BTreeMap<PluralCategory, Value>,
        /// The numeric parameter that selects the category at the use site.
        key_parameter: Option<ParameterName>,
    },
}

/// A node of the resource tree.
///
/// Items and child namespaces live in separate maps. Iteration order of both
/// is unspecified; sort before emitting anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Namespace {
    pub items: HashMap<KeyComponent, Item>,
    pub namespaces: HashMap<KeyComponent, Namespace>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.namespaces.is_empty()
    }

    /// Number of items in this namespace and all of its descendants.
    pub fn item_count(&self) -> usize {
        self.items.len()
            + self
                .namespaces
                .values()
                .map(Namespace::item_count)
                .sum::<usize>()
    }
}

/// The whole resource tree of one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Strings {
    pub root: Namespace,
}

impl Strings {
    pub fn new(root: Namespace) -> Self {
        Strings { root }
    }
}
