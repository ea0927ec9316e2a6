//! Error types for the fetch, reconcile and lookup pipeline.
//!
//! One enum per contract so callers can match on exactly the failures that
//! contract can produce. Library code never exits the process; the binaries
//! decide what is fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while getting a remote file onto the local disk.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to write downloaded file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while decoding the upstream endpoints manifest.
///
/// `Parse` means the document is not JSON at all; `InvalidStructure` means it
/// is well-formed JSON that does not have the shape the upstream publishes.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read upstream manifest {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("upstream manifest {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("upstream manifest {path} has an unexpected structure: {reason}")]
    InvalidStructure { path: PathBuf, reason: String },
}

/// Failures of a reconcile run.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to write merged mapping {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while loading the service mapping for lookups.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to read service mapping {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("service mapping {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
