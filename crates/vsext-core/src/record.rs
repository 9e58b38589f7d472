//! Extension records and editor listing parsing

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single installed (or to-be-installed) editor extension.
///
/// `id` is the publisher-qualified identifier (`publisher.name`). It is never
/// interpreted beyond being passed verbatim to the editor CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    pub id: String,

    /// Pinned version; `None` installs the latest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub disabled: bool,
}

impl ExtensionRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
            disabled: false,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Parse an `id` or `id@version` specifier.
    ///
    /// The split happens at the first `@`. An empty version is treated as
    /// absent.
    pub fn parse_spec(spec: &str) -> Self {
        let spec = spec.trim();
        match spec.split_once('@') {
            Some((id, version)) => {
                let version = version.trim();
                Self {
                    id: id.trim().to_string(),
                    version: (!version.is_empty()).then(|| version.to_string()),
                    disabled: false,
                }
            }
            None => Self::new(spec),
        }
    }

    /// The argument handed to `--install-extension`.
    pub fn install_spec(&self) -> String {
        match &self.version {
            Some(version) => format!("{}@{}", self.id, version),
            None => self.id.clone(),
        }
    }
}

impl fmt::Display for ExtensionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.install_spec())
    }
}

/// Set `disabled` on every record whose id appears in `disabled_ids`.
pub fn mark_disabled(records: &mut [ExtensionRecord], disabled_ids: &[String]) {
    let disabled: HashSet<&str> = disabled_ids.iter().map(String::as_str).collect();
    for record in records {
        record.disabled = disabled.contains(record.id.as_str());
    }
}
