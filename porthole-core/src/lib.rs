//! porthole core library.
//!
//! Resolves AWS service names to console URLs through a small pipeline: the
//! public endpoints manifest supplies the set of service names, a locally
//! persisted and user-editable mapping supplies the console URL for each
//! name, and lookups substitute the caller's region into the URL.

pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod manifest;
pub mod mapping;
pub mod reconcile;

pub use cache::UrlMap;
pub use config::Config;
pub use console::Console;
pub use error::{FetchError, LoadError, ManifestError, ReconcileError};
pub use fetch::{FetchOutcome, Fetcher};
pub use manifest::UpstreamManifest;
pub use mapping::{ServiceEntry, ServiceMapping, DEFAULT_REGION};
pub use reconcile::{ReconcileSummary, Reconciler};
