//! Decoder for flat JSON string tables: `{ "home.title": "Welcome", ... }`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{error::Error, traits::Parser};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub entries: BTreeMap<String, String>,
}

impl Parser for Format {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader)
            .map_err(|e| Error::decode_error(format!("invalid JSON: {e}")))?;

        let Value::Object(object) = value else {
            return Err(Error::decode_error("top-level JSON value must be an object"));
        };

        let entries = object
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(text) => Ok((key, text)),
                _ => Err(Error::decode_error(format!(
                    "value of '{key}' is not a string"
                ))),
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(Format { entries })
    }
}

impl From<Format> for BTreeMap<String, String> {
    fn from(value: Format) -> Self {
        value.entries
    }
}
