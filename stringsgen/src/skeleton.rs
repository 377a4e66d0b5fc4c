//! The literal-free shape of a [`Strings`] tree.
//!
//! Code generation only needs parameter lists and plural category sets, so
//! every value is reduced to that shape and the variants of a pluralized
//! item are merged into one.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Serialize, Serializer};

use crate::{
    key::{KeyComponent, ParameterName},
    types::{Item, Namespace, PluralCategory, Strings, Value},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkeletonValue {
    Constant,
    /// Parameters in first-occurrence order, without duplicates.
    Template(Vec<ParameterName>),
}

impl SkeletonValue {
    pub fn parameters(&self) -> &[ParameterName] {
        match self {
            SkeletonValue::Constant => &[],
            SkeletonValue::Template(parameters) => parameters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkeletonItem {
    Simple(SkeletonValue),
    Pluralized {
        value: SkeletonValue,
        categories: BTreeSet<PluralCategory>,
        #[serde(skip_serializing_if = "Option::is_none")]
        key_parameter: Option<ParameterName>,
    },
}

impl SkeletonItem {
    pub fn is_pluralized(&self) -> bool {
        matches!(self, SkeletonItem::Pluralized { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SkeletonNamespace {
    #[serde(serialize_with = "serialize_sorted")]
    pub items: HashMap<KeyComponent, SkeletonItem>,
    #[serde(serialize_with = "serialize_sorted")]
    pub namespaces: HashMap<KeyComponent, SkeletonNamespace>,
}

impl SkeletonNamespace {
    /// Whether this namespace or any descendant holds a pluralized item.
    pub fn uses_pluralized_strings(&self) -> bool {
        self.items.values().any(SkeletonItem::is_pluralized)
            || self
                .namespaces
                .values()
                .any(SkeletonNamespace::uses_pluralized_strings)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StringsSkeleton {
    pub root: SkeletonNamespace,
}

impl StringsSkeleton {
    pub fn uses_pluralized_strings(&self) -> bool {
        self.root.uses_pluralized_strings()
    }
}

fn serialize_sorted<V, S>(map: &HashMap<KeyComponent, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    V: Serialize,
    S: Serializer,
{
    map.iter().collect::<BTreeMap<_, _>>().serialize(serializer)
}

/// Extracts the skeleton of a resource tree. Cannot fail.
pub fn make_skeleton(strings: &Strings) -> StringsSkeleton {
    StringsSkeleton {
        root: skeleton_for_namespace(&strings.root),
    }
}

fn skeleton_for_namespace(namespace: &Namespace) -> SkeletonNamespace {
    SkeletonNamespace {
        items: namespace
            .items
            .iter()
            .map(|(component, item)| (component.clone(), skeleton_for_item(item)))
            .collect(),
        namespaces: namespace
            .namespaces
            .iter()
            .map(|(component, child)| (component.clone(), skeleton_for_namespace(child)))
            .collect(),
    }
}

fn skeleton_for_item(item: &Item) -> SkeletonItem {
    match item {
        Item::Simple(Value::Constant(_)) => SkeletonItem::Simple(SkeletonValue::Constant),
        Item::Simple(value @ Value::Template(_)) => {
            SkeletonItem::Simple(SkeletonValue::Template(value.parameter_names()))
        }
        Item::Pluralized {
            values,
            key_parameter,
        } => {
            // `values` is keyed by category, so this walks the canonical order.
            let mut parameters = Vec::new();
            let mut is_template = false;
            for value in values.values() {
                if matches!(value, Value::Template(_)) {
                    is_template = true;
                    value.collect_parameter_names(&mut parameters);
                }
            }

            SkeletonItem::Pluralized {
                value: if is_template {
                    SkeletonValue::Template(parameters)
                } else {
                    SkeletonValue::Constant
                },
                categories: values.keys().copied().collect(),
                key_parameter: key_parameter.clone(),
            }
        }
    }
}
