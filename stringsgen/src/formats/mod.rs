//! Input formats a string table can be read from.
//!
//! Every format decodes to the same flat `raw key → raw value` map consumed
//! by [`crate::parser::parse_items`].

pub mod json;
pub mod strings;

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

pub use json::Format as JsonFormat;
pub use strings::Format as StringsFormat;

use crate::{Error, traits::Parser};

/// Represents all supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Apple `.strings` property list.
    Strings,
    /// Flat JSON object of strings.
    Json,
}

/// # Example
/// ```rust
/// use stringsgen::formats::InputFormat;
/// assert_eq!(InputFormat::Strings.to_string(), "strings");
/// assert_eq!(InputFormat::Json.to_string(), "json");
/// ```
impl Display for InputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Strings => write!(f, "strings"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

/// Accepts `strings` and `json`, case-insensitively.
///
/// # Example
/// ```rust
/// use stringsgen::formats::InputFormat;
/// use std::str::FromStr;
/// assert_eq!(InputFormat::from_str("Strings").unwrap(), InputFormat::Strings);
/// assert!(InputFormat::from_str("xml").is_err());
/// ```
impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "strings" => Ok(InputFormat::Strings),
            "json" => Ok(InputFormat::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl InputFormat {
    /// Infers the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        path.extension()
            .and_then(|extension| extension.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?
            .parse()
    }

    /// Reads the raw string table at `path` in this format.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<BTreeMap<String, String>, Error> {
        Ok(match self {
            InputFormat::Strings => StringsFormat::read_from(path)?.into(),
            InputFormat::Json => JsonFormat::read_from(path)?.into(),
        })
    }

    /// Decodes the raw string table from in-memory text.
    pub fn read_str(&self, content: &str) -> Result<BTreeMap<String, String>, Error> {
        Ok(match self {
            InputFormat::Strings => StringsFormat::from_str(content)?.into(),
            InputFormat::Json => JsonFormat::from_str(content)?.into(),
        })
    }
}

/// Reads a raw string table, inferring its format from the extension.
pub fn read_raw_strings<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>, Error> {
    InputFormat::from_path(&path)?.read_file(path)
}
