//! Manifest encoding and decoding
//!
//! A manifest is a JSON array. Two entry shapes are understood:
//!
//! ```json
//! ["ms-python.python@2024.2.1", "esbenp.prettier-vscode"]
//! [{ "id": "ms-python.python", "version": "2024.2.1", "disabled": false }]
//! ```
//!
//! Decoding accepts either shape (also mixed). Encoding writes exactly one,
//! chosen by [`ManifestFormat`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::ExtensionRecord;

/// Which entry shape to write on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFormat {
    /// `"id"` or `"id@version"` strings. Disabled state is not recorded.
    #[default]
    Identifiers,
    /// `{ id, version, disabled }` objects.
    Exact,
}

impl ManifestFormat {
    pub fn from_exact(exact: bool) -> Self {
        if exact { Self::Exact } else { Self::Identifiers }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Entry {
    Spec(String),
    Record(ExtensionRecord),
}

/// An ordered list of extension records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    records: Vec<ExtensionRecord>,
}

impl Manifest {
    pub fn new(records: Vec<ExtensionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ExtensionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifiers in manifest order.
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    /// Serialize to pretty-printed JSON with a trailing newline.
    pub fn encode(&self, format: ManifestFormat) -> Result<String> {
        let entries: Vec<Entry> = match format {
            ManifestFormat::Identifiers => self
                .records
                .iter()
                .map(|r| Entry::Spec(r.install_spec()))
                .collect(),
            ManifestFormat::Exact => self.records.iter().cloned().map(Entry::Record).collect(),
        };

        let mut json = serde_json::to_string_pretty(&entries).map_err(Error::Serialize)?;
        json.push('\n');
        Ok(json)
    }

    /// Parse a manifest document.
    ///
    /// Fails with [`Error::InvalidManifest`] on malformed JSON, a non-array
    /// top level, an entry of the wrong type, or an empty identifier.
    pub fn decode(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| Error::invalid_manifest(format!("not valid JSON: {e}")))?;

        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(Error::invalid_manifest(format!(
                    "expected a JSON array at the top level, found {}",
                    json_type_name(&other)
                )));
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let entry: Entry = serde_json::from_value(item).map_err(|_| {
                Error::invalid_manifest(format!(
                    "entry {index} must be a string or an object with a string \"id\""
                ))
            })?;

            let record = match entry {
                Entry::Spec(spec) => ExtensionRecord::parse_spec(&spec),
                Entry::Record(mut record) => {
                    record.id = record.id.trim().to_string();
                    record.version = record.version.filter(|v| !v.trim().is_empty());
                    record
                }
            };

            if record.id.is_empty() {
                return Err(Error::invalid_manifest(format!(
                    "entry {index} has an empty extension identifier"
                )));
            }
            records.push(record);
        }

        Ok(Self { records })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
