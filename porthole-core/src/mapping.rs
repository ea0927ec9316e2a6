//! The persisted service-to-console-URL mapping.
//!
//! One JSON document shaped `{"services": {<name>: {"console": <url>}}}`,
//! meant to be edited by hand. `BTreeMap` keys keep serialization order
//! stable, so rewriting an unchanged mapping is byte-identical and diffs of
//! the file stay readable.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Region token embedded in synthesized console URL templates. Lookups
/// replace it with the caller's region.
pub const DEFAULT_REGION: &str = "us-west-1";

/// One service's console entry. The service name is the mapping key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Console URL template containing [`DEFAULT_REGION`] as the region token.
    pub console: String,
}

impl ServiceEntry {
    /// The default console template for `name`. The console path segment does
    /// not always match the endpoint name, so entries get edited after the
    /// fact.
    pub fn default_for(name: &str) -> Self {
        Self {
            console: format!(
                "https://{DEFAULT_REGION}.console.aws.amazon.com/{name}/home?region={DEFAULT_REGION}#"
            ),
        }
    }
}

/// The user-editable mapping, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMapping {
    /// Absent key decodes as an empty mapping rather than an error.
    #[serde(default)]
    pub services: BTreeMap<String, ServiceEntry>,
}

impl ServiceMapping {
    /// Load a mapping from `path`. Missing-file and malformed-content cases
    /// are distinct errors; any leniency is the caller's decision.
    pub fn load_from_path(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the mapping to `path`, pretty-printed, replacing prior content.
    pub fn save_to_path(&self, path: &Path) -> io::Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }
}
