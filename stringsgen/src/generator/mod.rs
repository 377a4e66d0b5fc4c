//! Code generation from a [`crate::skeleton::StringsSkeleton`].
//!
//! [`GeneratorOptions`] is the whole configuration surface; the CLI maps its
//! flags onto it.

pub mod swift;
pub mod writer;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub use swift::SwiftGenerator;

use crate::Error;

/// Visibility of the generated types and accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Visible within the consuming module only.
    #[default]
    Internal,
    /// Visible to other modules.
    Public,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Internal => "internal",
            Visibility::Public => "public",
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internal" => Ok(Visibility::Internal),
            "public" => Ok(Visibility::Public),
            other => Err(Error::InvalidOption(format!(
                "unknown visibility '{other}', expected internal or public"
            ))),
        }
    }
}

/// Swift language version the generated code targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwiftVersion {
    Swift3,
    #[default]
    Swift4,
    Swift5,
}

impl SwiftVersion {
    /// Key type of attribute dictionaries for attributed accessors.
    pub fn attribute_key_type(self) -> &'static str {
        match self {
            SwiftVersion::Swift3 => "String",
            SwiftVersion::Swift4 => "NSAttributedStringKey",
            SwiftVersion::Swift5 => "NSAttributedString.Key",
        }
    }

    pub fn attribute_value_type(self) -> &'static str {
        match self {
            SwiftVersion::Swift3 => "AnyObject",
            SwiftVersion::Swift4 | SwiftVersion::Swift5 => "Any",
        }
    }

    /// Expression iterating the characters of the string `expression`.
    pub fn characters_of(self, expression: &str) -> String {
        match self {
            SwiftVersion::Swift3 => format!("{expression}.characters"),
            SwiftVersion::Swift4 | SwiftVersion::Swift5 => expression.to_string(),
        }
    }
}

impl Display for SwiftVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SwiftVersion::Swift3 => write!(f, "swift3"),
            SwiftVersion::Swift4 => write!(f, "swift4"),
            SwiftVersion::Swift5 => write!(f, "swift5"),
        }
    }
}

impl FromStr for SwiftVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.strip_prefix("swift").unwrap_or(&s) {
            "3" => Ok(SwiftVersion::Swift3),
            "4" => Ok(SwiftVersion::Swift4),
            "5" => Ok(SwiftVersion::Swift5),
            _ => Err(Error::InvalidOption(format!(
                "unknown Swift version '{s}', expected 3, 4 or 5"
            ))),
        }
    }
}

/// Configuration of the code generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Name of the root type holding all strings and namespaces.
    pub type_name: String,
    pub visibility: Visibility,
    /// Strings table to look values up in; `None` uses `Localizable`.
    pub table_name: Option<String>,
    /// Emit `NSAttributedString` twins of accessors that take parameters.
    pub emits_attributed_templates: bool,
    /// Emit the import of the plural runtime module when pluralized strings exist.
    pub emits_runtime_import: bool,
    pub swift_version: SwiftVersion,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            type_name: "Strings".to_string(),
            visibility: Visibility::Internal,
            table_name: None,
            emits_attributed_templates: true,
            emits_runtime_import: true,
            swift_version: SwiftVersion::Swift4,
        }
    }
}

impl GeneratorOptions {
    /// Creates default generator options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the table name; an empty name means the default table.
    pub fn with_table_name(mut self, table_name: Option<String>) -> Self {
        self.table_name = table_name.filter(|name| !name.is_empty());
        self
    }

    pub fn with_attributed_templates(mut self, emits: bool) -> Self {
        self.emits_attributed_templates = emits;
        self
    }

    pub fn with_runtime_import(mut self, emits: bool) -> Self {
        self.emits_runtime_import = emits;
        self
    }

    pub fn with_swift_version(mut self, version: SwiftVersion) -> Self {
        self.swift_version = version;
        self
    }
}
