//! In-memory lookup cache over the persisted mapping.
//!
//! [`UrlMap`] flattens the edited mapping into name-to-URL pairs. A missing
//! cache file is bootstrapped from the hosted pre-built copy; a present but
//! unreadable file is an error for the caller to handle.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::Config;
use crate::error::LoadError;
use crate::fetch::Fetcher;
use crate::mapping::{ServiceMapping, DEFAULT_REGION};

/// Flat service-name to console-URL map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlMap {
    urls: BTreeMap<String, String>,
}

impl UrlMap {
    /// Load the mapping named by `config`, fetching the hosted copy first if
    /// no local file exists.
    pub async fn load(config: &Config, fetcher: &Fetcher) -> Result<Self, LoadError> {
        let path = config.edited_path();
        if !path.exists() {
            debug!(url = %config.fallback_url, "no local mapping, fetching pre-built copy");
            fetcher.fetch(&config.fallback_url, &path).await?;
        }
        let mapping = ServiceMapping::load_from_path(&path)?;
        Ok(Self::from_mapping(mapping))
    }

    /// Build a map directly from an already-loaded mapping.
    pub fn from_mapping(mapping: ServiceMapping) -> Self {
        let urls: BTreeMap<String, String> = mapping
            .services
            .into_iter()
            .map(|(name, entry)| (name, entry.console))
            .collect();
        for (name, url) in &urls {
            debug!(service = %name, url = %url, "loaded service");
        }
        Self { urls }
    }

    /// Console URL template for `service`, if known.
    pub fn resolve(&self, service: &str) -> Option<&str> {
        self.urls.get(service).map(String::as_str)
    }

    /// Console URL for `service` with every occurrence of the default region
    /// token replaced by `region`. The region is substituted as given; no
    /// validation against real AWS regions happens here.
    pub fn resolve_in_region(&self, service: &str, region: &str) -> Option<String> {
        self.resolve(service)
            .map(|url| url.replace(DEFAULT_REGION, region))
    }

    /// All known service names, ascending.
    pub fn names(&self) -> Vec<&str> {
        self.urls.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
