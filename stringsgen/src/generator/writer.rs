//! Indentation-aware text buffer used by the Swift generator.

use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    /// Words that must be wrapped in backticks to be used as Swift identifiers.
    static ref SWIFT_KEYWORDS: HashSet<&'static str> = [
        // declarations
        "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func",
        "import", "init", "inout", "internal", "let", "operator", "private", "protocol",
        "public", "static", "struct", "subscript", "typealias", "var",
        // statements
        "break", "case", "continue", "default", "defer", "do", "else", "fallthrough", "for",
        "guard", "if", "in", "repeat", "return", "switch", "where", "while",
        // expressions and types
        "as", "Any", "catch", "false", "is", "nil", "rethrows", "super", "self", "Self",
        "throw", "throws", "true", "try",
        // contextual
        "associativity", "convenience", "dynamic", "didSet", "final", "get", "infix",
        "indirect", "lazy", "left", "mutating", "none", "nonmutating", "optional",
        "override", "postfix", "precedence", "prefix", "Protocol", "required", "right",
        "set", "Type", "unowned", "weak", "willSet",
    ]
    .into_iter()
    .collect();
}

pub fn is_swift_keyword(identifier: &str) -> bool {
    SWIFT_KEYWORDS.contains(identifier)
}

/// Signature of a free function or method to be written by [`Writer::function`].
#[derive(Debug, Clone, Copy)]
pub struct Signature<'a> {
    visibility: &'a str,
    name: &'a str,
    external_name: Option<&'a str>,
    parameters: Option<&'a str>,
    return_type: Option<&'a str>,
}

impl<'a> Signature<'a> {
    pub fn new(visibility: &'a str, name: &'a str) -> Self {
        Signature {
            visibility,
            name,
            external_name: None,
            parameters: None,
            return_type: None,
        }
    }

    /// Argument label of the first parameter. Without one the first
    /// parameter is written unlabeled (`_ key: String`).
    pub fn external_name(mut self, name: &'a str) -> Self {
        self.external_name = Some(name);
        self
    }

    pub fn parameters(mut self, parameters: &'a str) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn returns(mut self, return_type: &'a str) -> Self {
        self.return_type = Some(return_type);
        self
    }
}

#[derive(Debug, Default)]
pub struct Writer {
    buffer: String,
    line_prefix: String,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_buffer(self) -> String {
        self.buffer
    }

    pub fn add(&mut self, content: &str) {
        self.buffer.push_str(content);
    }

    /// Adds an identifier, wrapped in backticks if it is a reserved word.
    pub fn add_identifier(&mut self, identifier: &str) {
        if is_swift_keyword(identifier) {
            self.buffer.push('`');
            self.buffer.push_str(identifier);
            self.buffer.push('`');
        } else {
            self.buffer.push_str(identifier);
        }
    }

    /// Adds `value` as a quoted Swift string literal.
    pub fn add_string_literal(&mut self, value: &str) {
        self.buffer.push('"');
        for character in value.chars() {
            match character {
                '"' => self.buffer.push_str("\\\""),
                '\\' => self.buffer.push_str("\\\\"),
                '\n' => self.buffer.push_str("\\n"),
                '\r' => self.buffer.push_str("\\r"),
                '\t' => self.buffer.push_str("\\t"),
                '\0' => self.buffer.push_str("\\0"),
                c if c.is_control() => {
                    self.buffer.push_str(&format!("\\u{{{:x}}}", c as u32));
                }
                c => self.buffer.push(c),
            }
        }
        self.buffer.push('"');
    }

    /// Writes one indented line; an empty line gets no indentation.
    pub fn line(&mut self, line: &str) {
        if !line.is_empty() {
            self.buffer.push_str(&self.line_prefix);
            self.buffer.push_str(line);
        }
        self.buffer.push('\n');
    }

    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.buffer.push('\n');
        }
    }

    /// Writes one indented line assembled by `build`.
    pub fn line_with(&mut self, build: impl FnOnce(&mut Self)) {
        self.buffer.push_str(&self.line_prefix);
        build(self);
        self.buffer.push('\n');
    }

    pub fn indent(&mut self, body: impl FnOnce(&mut Self)) {
        let previous = self.line_prefix.clone();
        self.line_prefix.push('\t');
        body(self);
        self.line_prefix = previous;
    }

    pub fn function(&mut self, signature: Signature<'_>, body: impl FnOnce(&mut Self)) {
        self.buffer.push_str(&self.line_prefix);
        self.add(signature.visibility);
        self.add(" func ");
        self.add_identifier(signature.name);
        self.add("(");

        if let Some(parameters) = signature.parameters {
            match signature.external_name {
                Some(external_name) if parameters.starts_with(&format!("{external_name}:")) => {}
                Some(external_name) => {
                    self.add_identifier(external_name);
                    self.add(" ");
                }
                None => self.add("_ "),
            }
            self.add(parameters);
        }

        self.add(")");
        if let Some(return_type) = signature.return_type {
            self.add(" -> ");
            self.add_identifier(return_type);
        }
        self.add(" {\n");

        self.indent(body);
        self.line("}");
    }

    pub fn initializer(&mut self, visibility: &str, parameters: &str, body: impl FnOnce(&mut Self)) {
        self.buffer.push_str(&self.line_prefix);
        self.add(visibility);
        self.add(" init(");
        self.add(parameters);
        self.add(") {\n");

        self.indent(body);
        self.line("}");
    }
}
