//! Folds the flat `Key → Item` mapping into a tree of namespaces.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::Error,
    key::{Key, KeyPath},
    types::{Item, Namespace, Strings},
};

/// Builds the namespace tree by splitting every key on `.`.
///
/// Intermediate namespaces are created on demand and shared between sibling
/// keys. A namespace may not hold an item and a child namespace under the
/// same component: `a` and `a.b` together fail with [`Error::NameCollision`].
pub fn make_hierarchical(items: BTreeMap<Key, Item>) -> Result<Strings, Error> {
    let mut root = Namespace::new();

    for (key, item) in items {
        let path =
            KeyPath::parse(&key).ok_or_else(|| Error::InvalidKeyPath(key.to_string()))?;
        let Some((last, parents)) = path.components().split_last() else {
            return Err(Error::InvalidKeyPath(key.to_string()));
        };

        let mut node = &mut root;
        for component in parents {
            node = node.namespaces.entry(component.clone()).or_default();
        }
        node.items.insert(last.clone(), item);
    }

    if let Some(path) = find_collision(&root, &KeyPath::default()) {
        return Err(Error::NameCollision(path.to_string()));
    }

    debug!(
        items = root.item_count(),
        namespaces = root.namespaces.len(),
        "built namespace hierarchy"
    );

    Ok(Strings::new(root))
}

fn find_collision(namespace: &Namespace, path: &KeyPath) -> Option<KeyPath> {
    let mut children: Vec<_> = namespace.namespaces.iter().collect();
    children.sort_by(|a, b| a.0.cmp(b.0));

    for (component, child) in children {
        let child_path = path.appending(component.clone());
        if namespace.items.contains_key(component) {
            return Some(child_path);
        }
        if let Some(collision) = find_collision(child, &child_path) {
            return Some(collision);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyComponent;
    use crate::types::Value;

    fn constant(text: &str) -> Item {
        Item::Simple(Value::Constant(text.to_string()))
    }

    fn component(value: &str) -> KeyComponent {
        KeyComponent::new(value).unwrap()
    }

    #[test]
    fn test_builds_nested_namespaces() {
        let mut items = BTreeMap::new();
        items.insert(Key::new("ok"), constant("OK"));
        items.insert(Key::new("home.title"), constant("Home"));
        items.insert(Key::new("home.screen.subtitle"), constant("Sub"));
        items.insert(Key::new("home.screen.footer"), constant("Foot"));

        let strings = make_hierarchical(items).unwrap();
        let root = &strings.root;
        assert_eq!(root.items.len(), 1);
        assert!(root.items.contains_key(&component("ok")));

        let home = &root.namespaces[&component("home")];
        assert_eq!(home.items[&component("title")], constant("Home"));

        let screen = &home.namespaces[&component("screen")];
        assert_eq!(screen.items.len(), 2);
        assert!(screen.namespaces.is_empty());
        assert_eq!(root.item_count(), 4);
    }

    #[test]
    fn test_invalid_key_path() {
        let mut items = BTreeMap::new();
        items.insert(Key::new("home..title"), constant("x"));

        let error = make_hierarchical(items).unwrap_err();
        assert!(matches!(error, Error::InvalidKeyPath(key) if key == "home..title"));
    }

    #[test]
    fn test_empty_key_is_invalid() {
        let mut items = BTreeMap::new();
        items.insert(Key::new(""), constant("x"));

        assert!(matches!(
            make_hierarchical(items).unwrap_err(),
            Error::InvalidKeyPath(_)
        ));
    }

    #[test]
    fn test_item_and_namespace_collision() {
        let mut items = BTreeMap::new();
        items.insert(Key::new("home"), constant("Home"));
        items.insert(Key::new("home.title"), constant("Title"));

        let error = make_hierarchical(items).unwrap_err();
        assert!(matches!(error, Error::NameCollision(path) if path == "home"));
    }

    #[test]
    fn test_nested_collision_reports_full_path() {
        let mut items = BTreeMap::new();
        items.insert(Key::new("a.b"), constant("1"));
        items.insert(Key::new("a.b.c"), constant("2"));

        let error = make_hierarchical(items).unwrap_err();
        assert!(matches!(error, Error::NameCollision(path) if path == "a.b"));
    }

    #[test]
    fn test_empty_input_gives_empty_tree() {
        let strings = make_hierarchical(BTreeMap::new()).unwrap();
        assert!(strings.root.is_empty());
    }
}
