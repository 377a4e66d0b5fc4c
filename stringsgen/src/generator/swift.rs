//! Swift code generator.
//!
//! The output is one file: a fixed runtime preamble (bundle lookup, template
//! substitution, plural dispatch) followed by one `enum` per namespace with a
//! static accessor per string.

use indoc::indoc;

use super::{
    GeneratorOptions,
    writer::{Signature, Writer},
};
use crate::{
    key::{KeyComponent, KeyPath, ParameterName},
    skeleton::{SkeletonItem, SkeletonNamespace, SkeletonValue, StringsSkeleton},
    traits::Generator,
    types::PluralCategory,
};

/// Module providing `PluralizedString` and plural category resolution.
pub const PLURAL_RUNTIME_MODULE: &str = "JetPack";

const HEADER: &str = indoc! {"
    // This file is automatically generated by stringsgen.
    // Do not edit it manually, as your changes will be overwritten.

"};

#[derive(Debug, Clone, Default)]
pub struct SwiftGenerator {
    options: GeneratorOptions,
}

/// Shape of one leaf accessor.
#[derive(Debug, Clone, Copy)]
struct Leaf<'a> {
    name: &'a KeyComponent,
    key: &'a str,
    is_pluralized: bool,
    key_parameter: Option<&'a ParameterName>,
}

impl SwiftGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        SwiftGenerator { options }
    }

    fn visibility(&self) -> &'static str {
        self.options.visibility.keyword()
    }

    fn write_imports(&self, w: &mut Writer, emits_pluralized: bool) {
        w.line("import Foundation");
        if self.options.emits_runtime_import && emits_pluralized {
            w.line(&format!("import {PLURAL_RUNTIME_MODULE}"));
        }
    }

    fn write_preamble(&self, w: &mut Writer, emits_pluralized: bool) {
        let attributed = self.options.emits_attributed_templates;

        w.blank_lines(2);
        w.line("private let __bundle: Bundle = {");
        w.indent(|w| {
            w.line("class Dummy {}");
            w.line("");
            w.line("return Bundle(for: Dummy.self)");
        });
        w.line("}()");

        if emits_pluralized {
            w.blank_lines(2);
            w.line("private let __defaultFormatter: NumberFormatter = {");
            w.indent(|w| {
                w.line("let formatter = NumberFormatter()");
                w.line("formatter.locale = Locale.autoupdatingCurrent");
                w.line("formatter.numberStyle = .decimal");
                w.line("");
                w.line("return formatter");
            });
            w.line("}()");

            w.blank_lines(2);
            self.write_key_suffix(w);
        }

        w.blank_lines(2);
        self.write_lookups(w, emits_pluralized, attributed);

        w.blank_lines(2);
        self.write_substitution(w, attributed);

        w.blank_lines(2);
        self.write_try_string(w, emits_pluralized);

        if emits_pluralized {
            if attributed {
                w.blank_lines(3);
                self.write_pluralized_type(w, true);
            }
            w.blank_lines(3);
            self.write_pluralized_type(w, false);
        }
    }

    fn write_key_suffix(&self, w: &mut Writer) {
        w.function(
            Signature::new("private", "__keySuffix")
                .external_name("for")
                .parameters("category: Locale.PluralCategory")
                .returns("String"),
            |w| {
                w.line("switch category {");
                for category in PluralCategory::ALL {
                    let case = format!("case .{}:", category.name());
                    w.line_with(|w| {
                        w.add(&format!("{case:<13}return "));
                        w.add_string_literal(&category.key_suffix());
                    });
                }
                w.line("}");
            },
        );
    }

    fn write_lookups(&self, w: &mut Writer, emits_pluralized: bool, attributed: bool) {
        w.function(
            Signature::new("private", "__string")
                .parameters("key: String, parameters: [String : String]? = nil")
                .returns("String"),
            |w| {
                w.line("return __tryString(key).map { __substituteTemplateParameters(template: $0, parameters: parameters) } ?? key");
            },
        );

        if attributed {
            w.blank_lines(2);
            w.function(
                Signature::new("private", "__string")
                    .parameters("key: String, parameters: [String : NSAttributedString]")
                    .returns("NSAttributedString"),
                |w| {
                    w.line("return __tryString(key).map { __substituteTemplateParameters(template: $0, parameters: parameters) } ?? NSAttributedString(string: key)");
                },
            );
        }

        if !emits_pluralized {
            return;
        }

        let variants: &[(&str, &str, &str)] = if attributed {
            &[
                ("String", "String", "key"),
                (
                    "NSAttributedString",
                    "NSAttributedString",
                    "NSAttributedString(string: key)",
                ),
            ]
        } else {
            &[("String", "String", "key")]
        };

        for (parameter_type, return_type, fallback) in variants {
            let parameters =
                format!("key: String, pluralCategory: Locale.PluralCategory, parameters: [String : {parameter_type}]?");
            w.blank_lines(2);
            w.function(
                Signature::new("private", "__string")
                    .parameters(&parameters)
                    .returns(return_type),
                |w| {
                    w.line("guard let template = __tryString(key, pluralCategory: pluralCategory) else {");
                    w.indent(|w| w.line(&format!("return {fallback}")));
                    w.line("}");
                    w.line("");
                    w.line("return __substituteTemplateParameters(template: template, parameters: parameters)");
                },
            );
        }

        for (parameter_type, return_type, _) in variants {
            let parameters = format!(
                "key: String, number: NSNumber, formatter: NumberFormatter, parameters: [String : {parameter_type}]?"
            );
            w.blank_lines(2);
            w.function(
                Signature::new("private", "__string")
                    .parameters(&parameters)
                    .returns(return_type),
                |w| {
                    w.line("return __string(key, pluralCategory: Locale.current.pluralCategoryForNumber(number, formatter: formatter), parameters: parameters)");
                },
            );
        }
    }

    fn write_substitution(&self, w: &mut Writer, attributed: bool) {
        let version = self.options.swift_version;

        w.function(
            Signature::new("private", "__parameterValue<Value>")
                .external_name("named")
                .parameters("name: String, in parameters: [String : Value]")
                .returns("Value?"),
            |w| {
                w.line("if let value = parameters[name] {");
                w.indent(|w| w.line("return value"));
                w.line("}");
                w.line("if name.hasPrefix(\"#\") {");
                w.indent(|w| {
                    w.line(&format!(
                        "return parameters[String({}.dropFirst())]",
                        version.characters_of("name")
                    ))
                });
                w.line("}");
                w.line("");
                w.line("return parameters[\"#\" + name]");
            },
        );

        w.blank_lines(2);
        w.function(
            Signature::new("private", "__substituteTemplateParameters")
                .external_name("template")
                .parameters("template: String, parameters: [String : String]?")
                .returns("String"),
            |w| {
                w.line("guard let parameters = parameters else {");
                w.indent(|w| w.line("return template"));
                w.line("}");
                w.line("");
                w.line("var result = \"\"");
                w.line("return __substituteTemplateParameters(");
                w.indent(|w| {
                    w.line("template:    template,");
                    w.line("onCharacter: { result.append($0) },");
                    w.line("onParameter: { result += __parameterValue(named: $0, in: parameters) ?? \"{\\($0)}\" }");
                });
                w.line(") ? result : template");
            },
        );

        if attributed {
            w.blank_lines(2);
            w.function(
                Signature::new("private", "__substituteTemplateParameters")
                    .external_name("template")
                    .parameters("template: String, parameters: [String : NSAttributedString]?")
                    .returns("NSAttributedString"),
                |w| {
                    w.line("guard let parameters = parameters else {");
                    w.indent(|w| w.line("return NSAttributedString(string: template)"));
                    w.line("}");
                    w.line("");
                    w.line("let result = NSMutableAttributedString()");
                    w.line("var currentConstant = \"\"");
                    w.line("");
                    w.line("let success = __substituteTemplateParameters(");
                    w.indent(|w| {
                        w.line("template:    template,");
                        w.line("onCharacter: { currentConstant.append($0) },");
                        w.line("onParameter: { parameterName in");
                        w.indent(|w| {
                            w.line("if !currentConstant.isEmpty {");
                            w.indent(|w| {
                                w.line("result.append(NSAttributedString(string: currentConstant))");
                                w.line("currentConstant = \"\"");
                            });
                            w.line("}");
                            w.line("");
                            w.line("result.append(__parameterValue(named: parameterName, in: parameters) ?? NSAttributedString(string: \"{\\(parameterName)}\"))");
                        });
                        w.line("}");
                    });
                    w.line(")");
                    w.line("guard success else {");
                    w.indent(|w| w.line("return NSAttributedString(string: template)"));
                    w.line("}");
                    w.line("");
                    w.line("if !currentConstant.isEmpty {");
                    w.indent(|w| {
                        w.line("result.append(NSAttributedString(string: currentConstant))")
                    });
                    w.line("}");
                    w.line("");
                    w.line("return result");
                },
            );
        }

        w.blank_lines(2);
        w.function(
            Signature::new("private", "__substituteTemplateParameters")
                .external_name("template")
                .parameters("template: String, onCharacter: (Character) -> Void, onParameter: (String) -> Void")
                .returns("Bool"),
            |w| write_substitution_scanner(w, &version.characters_of("template")),
        );
    }

    fn write_try_string(&self, w: &mut Writer, emits_pluralized: bool) {
        let table_name = self.options.table_name.clone();

        w.function(
            Signature::new("private", "__tryString")
                .parameters("key: String")
                .returns("String?"),
            |w| {
                w.line_with(|w| {
                    w.add("let value = __bundle.localizedString(forKey: key, value: \"\\u{0}\", table: ");
                    match &table_name {
                        Some(name) => w.add_string_literal(name),
                        None => w.add("nil"),
                    }
                    w.add(")");
                });
                w.line("guard value != \"\\u{0}\" else {");
                w.indent(|w| w.line("return nil"));
                w.line("}");
                w.line("");
                w.line("return value");
            },
        );

        if emits_pluralized {
            w.blank_lines(2);
            w.function(
                Signature::new("private", "__tryString")
                    .parameters("key: String, pluralCategory: Locale.PluralCategory")
                    .returns("String?"),
                |w| {
                    w.line("let keySuffix = __keySuffix(for: pluralCategory)");
                    w.line(&format!(
                        "return __tryString(\"\\(key)\\(keySuffix)\") ?? __tryString(\"\\(key){}\")",
                        PluralCategory::Other.key_suffix()
                    ));
                },
            );
        }
    }

    fn write_pluralized_type(&self, w: &mut Writer, attributed: bool) {
        let (type_name, protocol, value_type, parameters_type, default) = if attributed {
            (
                "__PluralizedAttributedString",
                "PluralizedAttributedString",
                "NSAttributedString",
                "[String : NSAttributedString]",
                "",
            )
        } else {
            (
                "__PluralizedString",
                "PluralizedString",
                "String",
                "[String : String]?",
                " = nil",
            )
        };

        w.line(&format!("fileprivate struct {type_name}: {protocol} {{"));
        w.indent(|w| {
            w.line("");
            w.line("private var key: String");
            w.line(&format!("private var parameters: {parameters_type}"));
            w.blank_lines(2);
            w.initializer(
                "fileprivate",
                &format!("_ key: String, parameters: {parameters_type}{default}"),
                |w| {
                    w.line("self.key = key");
                    w.line("self.parameters = parameters");
                },
            );
            w.blank_lines(2);
            w.function(
                Signature::new("fileprivate", "forPluralCategory")
                    .parameters("pluralCategory: Locale.PluralCategory")
                    .returns(value_type),
                |w| {
                    w.line("return __string(key, pluralCategory: pluralCategory, parameters: parameters)");
                },
            );
        });
        w.line("}");
    }

    fn write_namespace(
        &self,
        w: &mut Writer,
        namespace: &SkeletonNamespace,
        parent_path: &KeyPath,
        component: Option<&KeyComponent>,
    ) {
        let (type_name, path) = match component {
            Some(component) => (
                capitalize_first(component.as_str()),
                parent_path.appending(component.clone()),
            ),
            None => (self.options.type_name.clone(), parent_path.clone()),
        };

        w.line("");
        w.line_with(|w| {
            w.add(self.visibility());
            w.add(" enum ");
            w.add_identifier(&type_name);
            w.add(" {");
        });
        w.indent(|w| {
            let mut namespaces: Vec<_> = namespace.namespaces.iter().collect();
            namespaces.sort_by(|a, b| a.0.cmp(b.0));
            for (child_component, child) in namespaces {
                self.write_namespace(w, child, &path, Some(child_component));
            }

            let mut items: Vec<_> = namespace.items.iter().collect();
            items.sort_by(|a, b| a.0.cmp(b.0));
            for (item_component, item) in items {
                self.write_item(w, item, &path, item_component);
            }
        });
        w.line("}");

        if component.is_some() {
            w.line("");
        }
    }

    fn write_item(
        &self,
        w: &mut Writer,
        item: &SkeletonItem,
        parent_path: &KeyPath,
        component: &KeyComponent,
    ) {
        let key = parent_path.appending(component.clone()).to_string();
        let (value, leaf) = match item {
            SkeletonItem::Simple(value) => (
                value,
                Leaf {
                    name: component,
                    key: &key,
                    is_pluralized: false,
                    key_parameter: None,
                },
            ),
            SkeletonItem::Pluralized {
                value,
                key_parameter,
                ..
            } => (
                value,
                Leaf {
                    name: component,
                    key: &key,
                    is_pluralized: true,
                    key_parameter: key_parameter.as_ref(),
                },
            ),
        };

        w.line("");
        match value {
            SkeletonValue::Constant => self.write_constant_accessor(w, leaf),
            SkeletonValue::Template(parameters) => {
                self.write_template_accessor(w, leaf, parameters, false);
                if self.options.emits_attributed_templates && !parameters.is_empty() {
                    self.write_template_accessor(w, leaf, parameters, true);
                }
            }
        }
    }

    fn write_constant_accessor(&self, w: &mut Writer, leaf: Leaf<'_>) {
        let (return_type, callee) = if leaf.is_pluralized {
            ("PluralizedString", "__PluralizedString")
        } else {
            ("String", "__string")
        };

        w.line_with(|w| {
            w.add(self.visibility());
            w.add(" static var ");
            w.add_identifier(leaf.name.as_str());
            w.add(": ");
            w.add(return_type);
        });
        w.indent(|w| {
            w.line_with(|w| {
                w.add("{ return ");
                w.add(callee);
                w.add("(");
                w.add_string_literal(leaf.key);
                w.add(") }");
            });
        });
    }

    fn write_template_accessor(
        &self,
        w: &mut Writer,
        leaf: Leaf<'_>,
        parameters: &[ParameterName],
        attributed: bool,
    ) {
        let version = self.options.swift_version;
        let resolves_eagerly = !leaf.is_pluralized || leaf.key_parameter.is_some();
        let is_key_parameter = |name: &ParameterName| leaf.key_parameter == Some(name);

        w.line_with(|w| {
            w.add(self.visibility());
            w.add(" static func ");
            w.add_identifier(leaf.name.as_str());
            w.add("(");

            for (index, name) in parameters.iter().enumerate() {
                if index > 0 {
                    w.add(", ");
                }
                w.add_identifier(name.as_str());
                w.add(": ");

                if is_key_parameter(name) {
                    w.add("NSNumber");
                    if attributed {
                        w.add(&format!(
                            ", {}Attributes: [{} : {}]",
                            name,
                            version.attribute_key_type(),
                            version.attribute_value_type()
                        ));
                    }
                } else if attributed {
                    w.add("NSAttributedString");
                } else {
                    w.add("String");
                }
            }

            if leaf.key_parameter.is_some() {
                w.add(", formatter: NumberFormatter = __defaultFormatter");
            }

            w.add(") -> ");
            w.add(match (resolves_eagerly, attributed) {
                (true, false) => "String",
                (true, true) => "NSAttributedString",
                (false, false) => "PluralizedString",
                (false, true) => "PluralizedAttributedString",
            });
        });

        w.indent(|w| {
            w.line_with(|w| {
                w.add("{ return ");
                w.add(match (resolves_eagerly, attributed) {
                    (true, _) => "__string",
                    (false, false) => "__PluralizedString",
                    (false, true) => "__PluralizedAttributedString",
                });
                w.add("(");
                w.add_string_literal(leaf.key);
                if let Some(key_parameter) = leaf.key_parameter {
                    w.add(", number: ");
                    w.add_identifier(key_parameter.as_str());
                    w.add(", formatter: formatter");
                }
                w.add(", parameters: ");
                write_parameter_dictionary(w, parameters, leaf.key_parameter, attributed);
                w.add(") }");
            });
        });
    }
}

impl Generator for SwiftGenerator {
    fn generate(&self, skeleton: &StringsSkeleton) -> String {
        let emits_pluralized = skeleton.uses_pluralized_strings();
        let mut w = Writer::new();

        w.add(HEADER);
        self.write_imports(&mut w, emits_pluralized);
        self.write_preamble(&mut w, emits_pluralized);
        w.blank_lines(2);
        self.write_namespace(&mut w, &skeleton.root, &KeyPath::default(), None);

        w.into_buffer()
    }
}

fn write_parameter_dictionary(
    w: &mut Writer,
    parameters: &[ParameterName],
    key_parameter: Option<&ParameterName>,
    attributed: bool,
) {
    w.add("[");
    for (index, name) in parameters.iter().enumerate() {
        if index > 0 {
            w.add(", ");
        }

        if key_parameter == Some(name) {
            w.add_string_literal(&format!("#{name}"));
            w.add(": ");
            if attributed {
                w.add("NSAttributedString(string: ");
            }
            w.add("formatter.string(for: ");
            w.add_identifier(name.as_str());
            w.add(") ?? \"\"");
            if attributed {
                w.add(&format!(", attributes: {name}Attributes)"));
            }
        } else {
            w.add_string_literal(name.as_str());
            w.add(": ");
            w.add_identifier(name.as_str());
        }
    }
    w.add("]");
}

/// Runtime scanner mirroring [`crate::template`]: walks the template and
/// reports literal characters and parameter names.
fn write_substitution_scanner(w: &mut Writer, characters: &str) {
    w.line("var currentParameter = \"\"");
    w.line("var isParsingParameter = false");
    w.line("var isAwaitingClosingCurlyBracket = false");
    w.line("");
    w.line(&format!("for character in {characters} {{"));
    w.indent(|w| {
        w.line("if isAwaitingClosingCurlyBracket && character != \"}\" {");
        w.indent(|w| w.line("return false"));
        w.line("}");
        w.line("");
        w.line("switch character {");
        w.line("case \"{\":");
        w.indent(|w| {
            w.line("if isParsingParameter {");
            w.indent(|w| {
                w.line("if !currentParameter.isEmpty {");
                w.indent(|w| w.line("return false"));
                w.line("}");
                w.line("");
                w.line("isParsingParameter = false");
                w.line("onCharacter(\"{\")");
            });
            w.line("}");
            w.line("else {");
            w.indent(|w| w.line("isParsingParameter = true"));
            w.line("}");
        });
        w.line("");
        w.line("case \"}\":");
        w.indent(|w| {
            w.line("if isParsingParameter {");
            w.indent(|w| {
                w.line("if currentParameter.isEmpty {");
                w.indent(|w| w.line("return false"));
                w.line("}");
                w.line("");
                w.line("onParameter(currentParameter)");
                w.line("currentParameter = \"\"");
                w.line("isParsingParameter = false");
            });
            w.line("}");
            w.line("else if isAwaitingClosingCurlyBracket {");
            w.indent(|w| w.line("isAwaitingClosingCurlyBracket = false"));
            w.line("}");
            w.line("else {");
            w.indent(|w| {
                w.line("onCharacter(\"}\")");
                w.line("isAwaitingClosingCurlyBracket = true");
            });
            w.line("}");
        });
        w.line("");
        w.line("default:");
        w.indent(|w| {
            w.line("if isParsingParameter {");
            w.indent(|w| w.line("currentParameter.append(character)"));
            w.line("}");
            w.line("else {");
            w.indent(|w| w.line("onCharacter(character)"));
            w.line("}");
        });
        w.line("}");
    });
    w.line("}");
    w.line("");
    w.line("guard !isParsingParameter && !isAwaitingClosingCurlyBracket else {");
    w.indent(|w| w.line("return false"));
    w.line("}");
    w.line("");
    w.line("return true");
}

fn capitalize_first(value: &str) -> String {
    let mut characters = value.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};

    use super::*;
    use crate::generator::{SwiftVersion, Visibility};

    fn component(value: &str) -> KeyComponent {
        KeyComponent::new(value).unwrap()
    }

    fn names(names: &[&str]) -> Vec<ParameterName> {
        names.iter().map(|name| ParameterName::new(*name)).collect()
    }

    fn skeleton_with(items: Vec<(&str, SkeletonItem)>) -> StringsSkeleton {
        StringsSkeleton {
            root: SkeletonNamespace {
                items: items
                    .into_iter()
                    .map(|(name, item)| (component(name), item))
                    .collect(),
                namespaces: HashMap::new(),
            },
        }
    }

    fn generate(options: GeneratorOptions, skeleton: &StringsSkeleton) -> String {
        SwiftGenerator::new(options).generate(skeleton)
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("home"), "Home");
        assert_eq!(capitalize_first("éclair"), "Éclair");
        assert_eq!(capitalize_first("Home"), "Home");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_constant_accessor() {
        let skeleton =
            skeleton_with(vec![("title", SkeletonItem::Simple(SkeletonValue::Constant))]);
        let output = generate(GeneratorOptions::default(), &skeleton);

        assert!(output.contains(
            "internal enum Strings {\n\n\tinternal static var title: String\n\t\t{ return __string(\"title\") }\n}\n"
        ));
        assert!(!output.contains("import JetPack"));
        assert!(!output.contains("__keySuffix"));
    }

    #[test]
    fn test_template_accessor_with_attributed_twin() {
        let skeleton = skeleton_with(vec![(
            "greeting",
            SkeletonItem::Simple(SkeletonValue::Template(names(&["name", "count"]))),
        )]);
        let output = generate(GeneratorOptions::default(), &skeleton);

        assert!(output.contains(
            "\tinternal static func greeting(name: String, count: String) -> String\n\t\t{ return __string(\"greeting\", parameters: [\"name\": name, \"count\": count]) }\n"
        ));
        assert!(output.contains(
            "\tinternal static func greeting(name: NSAttributedString, count: NSAttributedString) -> NSAttributedString\n"
        ));
    }

    #[test]
    fn test_attributed_twins_can_be_disabled() {
        let skeleton = skeleton_with(vec![(
            "greeting",
            SkeletonItem::Simple(SkeletonValue::Template(names(&["name"]))),
        )]);
        let output = generate(
            GeneratorOptions::default().with_attributed_templates(false),
            &skeleton,
        );

        assert!(!output.contains("NSAttributedString"));
    }

    #[test]
    fn test_pluralized_constant_is_lazy() {
        let skeleton = skeleton_with(vec![(
            "apples",
            SkeletonItem::Pluralized {
                value: SkeletonValue::Constant,
                categories: BTreeSet::from([PluralCategory::One, PluralCategory::Other]),
                key_parameter: None,
            },
        )]);
        let output = generate(GeneratorOptions::default(), &skeleton);

        assert!(output.contains("import JetPack\n"));
        assert!(output.contains(
            "\tinternal static var apples: PluralizedString\n\t\t{ return __PluralizedString(\"apples\") }\n"
        ));
        assert!(output.contains("fileprivate struct __PluralizedString: PluralizedString {"));
        assert!(output.contains("case .few:   return \"$few\""));
        assert!(output.contains("case .other: return \"$other\""));
    }

    #[test]
    fn test_pluralized_template_without_key_parameter() {
        let skeleton = skeleton_with(vec![(
            "files",
            SkeletonItem::Pluralized {
                value: SkeletonValue::Template(names(&["count"])),
                categories: BTreeSet::from([PluralCategory::One, PluralCategory::Other]),
                key_parameter: None,
            },
        )]);
        let output = generate(GeneratorOptions::default(), &skeleton);

        assert!(output.contains(
            "\tinternal static func files(count: String) -> PluralizedString\n\t\t{ return __PluralizedString(\"files\", parameters: [\"count\": count]) }\n"
        ));
        assert!(output.contains(
            "\tinternal static func files(count: NSAttributedString) -> PluralizedAttributedString\n\t\t{ return __PluralizedAttributedString(\"files\", parameters: [\"count\": count]) }\n"
        ));
    }

    #[test]
    fn test_pluralized_template_with_key_parameter() {
        let skeleton = skeleton_with(vec![(
            "files",
            SkeletonItem::Pluralized {
                value: SkeletonValue::Template(names(&["owner", "count"])),
                categories: BTreeSet::from([PluralCategory::One, PluralCategory::Other]),
                key_parameter: Some(ParameterName::new("count")),
            },
        )]);
        let output = generate(
            GeneratorOptions::default().with_swift_version(SwiftVersion::Swift5),
            &skeleton,
        );

        assert!(output.contains(
            "\tinternal static func files(owner: String, count: NSNumber, formatter: NumberFormatter = __defaultFormatter) -> String\n\t\t{ return __string(\"files\", number: count, formatter: formatter, parameters: [\"owner\": owner, \"#count\": formatter.string(for: count) ?? \"\"]) }\n"
        ));
        assert!(output.contains(
            "(owner: NSAttributedString, count: NSNumber, countAttributes: [NSAttributedString.Key : Any], formatter: NumberFormatter = __defaultFormatter) -> NSAttributedString"
        ));
        assert!(output.contains(
            "\"#count\": NSAttributedString(string: formatter.string(for: count) ?? \"\", attributes: countAttributes)"
        ));
    }

    #[test]
    fn test_namespaces_before_items_and_sorted() {
        let mut inner = SkeletonNamespace::default();
        inner
            .items
            .insert(component("title"), SkeletonItem::Simple(SkeletonValue::Constant));

        let mut root = SkeletonNamespace::default();
        for name in ["b", "a", "c"] {
            root.items
                .insert(component(name), SkeletonItem::Simple(SkeletonValue::Constant));
        }
        root.namespaces.insert(component("zeta"), inner.clone());
        root.namespaces.insert(component("alpha"), inner);

        let output = generate(GeneratorOptions::default(), &StringsSkeleton { root });
        let position = |needle: &str| output.find(needle).unwrap();

        assert!(position("enum Alpha") < position("enum Zeta"));
        assert!(position("enum Zeta") < position("static var a:"));
        assert!(position("static var a:") < position("static var b:"));
        assert!(position("static var b:") < position("static var c:"));
        assert!(output.contains("{ return __string(\"alpha.title\") }"));
        assert!(output.contains("{ return __string(\"zeta.title\") }"));
    }

    #[test]
    fn test_reserved_words_are_escaped() {
        let mut root = SkeletonNamespace::default();
        root.items.insert(
            component("default"),
            SkeletonItem::Simple(SkeletonValue::Template(names(&["in"]))),
        );
        root.namespaces
            .insert(component("self"), SkeletonNamespace::default());

        let output = generate(
            GeneratorOptions::default().with_attributed_templates(false),
            &StringsSkeleton { root },
        );

        assert!(output.contains(
            "internal static func `default`(`in`: String) -> String\n\t\t{ return __string(\"default\", parameters: [\"in\": `in`]) }"
        ));
        assert!(output.contains("internal enum `Self` {"));
    }

    #[test]
    fn test_configuration_surface() {
        let skeleton =
            skeleton_with(vec![("title", SkeletonItem::Simple(SkeletonValue::Constant))]);
        let output = generate(
            GeneratorOptions::default()
                .with_type_name("L10n")
                .with_visibility(Visibility::Public)
                .with_table_name(Some("Main".to_string())),
            &skeleton,
        );

        assert!(output.contains("public enum L10n {"));
        assert!(output.contains("public static var title: String"));
        assert!(output.contains("table: \"Main\")"));

        let output = generate(GeneratorOptions::default(), &skeleton);
        assert!(output.contains("table: nil)"));
    }

    #[test]
    fn test_runtime_import_can_be_disabled() {
        let skeleton = skeleton_with(vec![(
            "apples",
            SkeletonItem::Pluralized {
                value: SkeletonValue::Constant,
                categories: BTreeSet::from([PluralCategory::Other]),
                key_parameter: None,
            },
        )]);
        let output = generate(
            GeneratorOptions::default().with_runtime_import(false),
            &skeleton,
        );

        assert!(!output.contains("import JetPack"));
        assert!(output.contains("__PluralizedString"));
    }

    #[test]
    fn test_swift3_character_iteration() {
        let skeleton = StringsSkeleton::default();
        let output = generate(
            GeneratorOptions::default().with_swift_version(SwiftVersion::Swift3),
            &skeleton,
        );
        assert!(output.contains("for character in template.characters {"));

        let output = generate(GeneratorOptions::default(), &skeleton);
        assert!(output.contains("for character in template {"));
    }

    #[test]
    fn test_substitution_looks_parameters_up_through_helper() {
        let output = generate(GeneratorOptions::default(), &StringsSkeleton::default());

        assert!(output.contains(
            "private func __parameterValue<Value>(named name: String, in parameters: [String : Value]) -> Value? {\n"
        ));
        assert!(output.contains("\t\treturn parameters[String(name.dropFirst())]\n"));
        assert!(output.contains("\treturn parameters[\"#\" + name]\n"));

        assert!(output.contains(
            "onParameter: { result += __parameterValue(named: $0, in: parameters) ?? \"{\\($0)}\" }"
        ));
        assert!(output.contains(
            "result.append(__parameterValue(named: parameterName, in: parameters) ?? NSAttributedString(string: \"{\\(parameterName)}\"))"
        ));
        assert!(!output.contains("parameters[$0]"));
        assert!(!output.contains("parameters[parameterName]"));

        let output = generate(
            GeneratorOptions::default().with_swift_version(SwiftVersion::Swift3),
            &StringsSkeleton::default(),
        );
        assert!(output.contains("return parameters[String(name.characters.dropFirst())]"));
    }

    #[test]
    fn test_keys_are_escaped_literals() {
        let skeleton = skeleton_with(vec![(
            "say\"hi",
            SkeletonItem::Simple(SkeletonValue::Constant),
        )]);
        let output = generate(GeneratorOptions::default(), &skeleton);
        assert!(output.contains("{ return __string(\"say\\\"hi\") }"));
    }
}
