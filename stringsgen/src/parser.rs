//! Turns the flat raw key/value mapping into parsed [`Item`]s.
//!
//! Keys of the form `<base>$<category>` are collected into one pluralized
//! item per base key; all other keys become simple items.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    str::FromStr,
};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    error::Error,
    key::{Key, ParameterName},
    template::parse_value,
    types::{Item, PluralCategory, Value},
};

lazy_static! {
    static ref PLURAL_KEY_REGEX: Regex = Regex::new(r"^([^$]+)\$(.+)$").unwrap();
}

/// Plural variants collected for one base key.
#[derive(Debug, Default)]
struct PluralVariants {
    values: BTreeMap<PluralCategory, Value>,
    key_parameter: Option<ParameterName>,
}

/// Splits `apples$one` into `("apples", "one")`.
pub fn split_plural_key(raw_key: &str) -> Option<(&str, &str)> {
    let captures = PLURAL_KEY_REGEX.captures(raw_key)?;
    let base = captures.get(1)?.as_str();
    let category = captures.get(2)?.as_str();
    Some((base, category))
}

/// Parses every raw pair and assembles one [`Item`] per key.
///
/// The input is iterated in key order, so a duplicate category for the same
/// base key resolves deterministically.
pub fn parse_items(raw: &BTreeMap<String, String>) -> Result<BTreeMap<Key, Item>, Error> {
    let mut simple_values: BTreeMap<Key, Value> = BTreeMap::new();
    let mut plural_values: BTreeMap<Key, PluralVariants> = BTreeMap::new();

    for (raw_key, raw_value) in raw {
        let parsed = parse_value(raw_value).map_err(|source| Error::Template {
            key: raw_key.clone(),
            source,
        })?;

        let Some((base, raw_category)) = split_plural_key(raw_key) else {
            simple_values.insert(Key::new(raw_key.as_str()), parsed.value);
            continue;
        };

        let category = PluralCategory::from_str(raw_category).map_err(|_| {
            Error::UnknownPluralCategory {
                key: raw_key.clone(),
                category: raw_category.to_string(),
            }
        })?;

        let variants = plural_values.entry(Key::new(base)).or_default();
        if let Some(name) = parsed.key_parameter {
            match &variants.key_parameter {
                Some(existing) if existing != &name => {
                    return Err(Error::ConflictingKeyParameter {
                        key: base.to_string(),
                        first: existing.to_string(),
                        second: name.to_string(),
                    });
                }
                Some(_) => {}
                None => variants.key_parameter = Some(name),
            }
        }
        variants.values.insert(category, parsed.value);
    }

    debug!(
        simple = simple_values.len(),
        pluralized = plural_values.len(),
        "parsed resource values"
    );

    let mut items: BTreeMap<Key, Item> = simple_values
        .into_iter()
        .map(|(key, value)| (key, Item::Simple(value)))
        .collect();

    for (key, variants) in plural_values {
        match items.entry(key) {
            Entry::Occupied(entry) => {
                return Err(Error::MixedPluralization(entry.key().to_string()));
            }
            Entry::Vacant(entry) => {
                entry.insert(Item::Pluralized {
                    values: variants.values,
                    key_parameter: variants.key_parameter,
                });
            }
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TemplateComponent;

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_split_plural_key() {
        assert_eq!(split_plural_key("apples$one"), Some(("apples", "one")));
        assert_eq!(
            split_plural_key("cart.items$other"),
            Some(("cart.items", "other"))
        );
        assert_eq!(split_plural_key("apples"), None);
        assert_eq!(split_plural_key("$one"), None);
        assert_eq!(split_plural_key("apples$"), None);
    }

    #[test]
    fn test_parse_simple_items() {
        let items = parse_items(&raw(&[
            ("title", "Welcome"),
            ("greeting", "Hello {name}"),
        ]))
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[&Key::new("title")],
            Item::Simple(Value::Constant("Welcome".to_string()))
        );
        assert_eq!(
            items[&Key::new("greeting")],
            Item::Simple(Value::Template(vec![
                TemplateComponent::Constant("Hello ".to_string()),
                TemplateComponent::Parameter(ParameterName::new("name")),
            ]))
        );
    }

    #[test]
    fn test_parse_pluralized_item() {
        let items = parse_items(&raw(&[
            ("apples$one", "{#count} apple"),
            ("apples$other", "{#count} apples"),
        ]))
        .unwrap();

        assert_eq!(items.len(), 1);
        let Item::Pluralized {
            values,
            key_parameter,
        } = &items[&Key::new("apples")]
        else {
            panic!("expected a pluralized item");
        };
        assert_eq!(
            values.keys().copied().collect::<Vec<_>>(),
            vec![PluralCategory::One, PluralCategory::Other]
        );
        assert_eq!(key_parameter, &Some(ParameterName::new("count")));
    }

    #[test]
    fn test_key_parameter_from_any_variant() {
        let items = parse_items(&raw(&[
            ("apples$one", "one apple"),
            ("apples$other", "{#count} apples"),
        ]))
        .unwrap();

        let Item::Pluralized { key_parameter, .. } = &items[&Key::new("apples")] else {
            panic!("expected a pluralized item");
        };
        assert_eq!(key_parameter, &Some(ParameterName::new("count")));
    }

    #[test]
    fn test_pluralized_without_key_parameter() {
        let items = parse_items(&raw(&[
            ("apples$one", "{count} apple"),
            ("apples$other", "{count} apples"),
        ]))
        .unwrap();

        let Item::Pluralized { key_parameter, .. } = &items[&Key::new("apples")] else {
            panic!("expected a pluralized item");
        };
        assert_eq!(key_parameter, &None);
    }

    #[test]
    fn test_unknown_plural_category() {
        let error = parse_items(&raw(&[("apples$lots", "many apples")])).unwrap_err();
        match error {
            Error::UnknownPluralCategory { key, category } => {
                assert_eq!(key, "apples$lots");
                assert_eq!(category, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_conflicting_key_parameter() {
        let error = parse_items(&raw(&[
            ("apples$one", "{#n} apple"),
            ("apples$other", "{#m} apples"),
        ]))
        .unwrap_err();
        match error {
            Error::ConflictingKeyParameter { key, first, second } => {
                assert_eq!(key, "apples");
                assert_eq!(first, "n");
                assert_eq!(second, "m");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mixed_pluralization_rejected() {
        let error = parse_items(&raw(&[("k", "value"), ("k$one", "one value")])).unwrap_err();
        assert!(matches!(error, Error::MixedPluralization(key) if key == "k"));
    }

    #[test]
    fn test_template_error_names_key() {
        let error = parse_items(&raw(&[("broken", "{name")])).unwrap_err();
        match error {
            Error::Template { key, source } => {
                assert_eq!(key, "broken");
                assert_eq!(source.offset(), 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_items(&BTreeMap::new()).unwrap().is_empty());
    }
}
