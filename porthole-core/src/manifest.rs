//! Upstream endpoints manifest decoding.
//!
//! The manifest is an external document we do not own; only the service names
//! of its first partition matter here. The shape is checked explicitly so a
//! well-formed document with missing keys reports what is wrong instead of a
//! generic decode failure.

use std::path::Path;

use serde_json::Value;

use crate::error::ManifestError;

/// The upstream manifest, reduced to what the reconciler consumes.
#[derive(Debug)]
pub struct UpstreamManifest {
    names: Vec<String>,
}

impl UpstreamManifest {
    /// Read and decode the manifest at `path`.
    ///
    /// The document must carry a non-empty `partitions` array whose first
    /// element has a `services` object; anything else is
    /// [`ManifestError::InvalidStructure`].
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let invalid = |reason: &str| ManifestError::InvalidStructure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let partitions = document
            .get("partitions")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("`partitions` is missing or not an array"))?;
        let first = partitions
            .first()
            .ok_or_else(|| invalid("`partitions` is empty"))?;
        let services = first
            .get("services")
            .and_then(Value::as_object)
            .ok_or_else(|| invalid("first partition has no `services` object"))?;

        Ok(Self {
            names: services.keys().cloned().collect(),
        })
    }

    /// Service names of the first partition.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
