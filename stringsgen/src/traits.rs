//! Traits at the two ends of the pipeline: reading resources and emitting code.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use crate::{error::Error, skeleton::StringsSkeleton};

/// A trait for decoding a flat string resource from one file.
///
/// # Example
///
/// ```rust,no_run
/// use stringsgen::traits::Parser;
/// let format = stringsgen::formats::strings::Format::read_from("en.lproj/Localizable.strings")?;
/// println!("{} strings", format.entries.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// Turns a skeleton into source code. Output must be deterministic.
pub trait Generator {
    fn generate(&self, skeleton: &StringsSkeleton) -> String;
}
