//! Runtime configuration.
//!
//! Every file location and remote endpoint flows through [`Config`]; nothing
//! in the library reads global state, which keeps the whole pipeline
//! redirectable in tests via [`Config::with_data_dir`].

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Upstream manifest that defines the set of AWS service names.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://raw.githubusercontent.com/aws/aws-sdk-net/master/sdk/src/Core/endpoints.json";

/// Hosted copy of the merged mapping, fetched when no local copy exists yet.
pub const DEFAULT_FALLBACK_URL: &str =
    "https://raw.githubusercontent.com/taylormonacelli/porthole/main/endpoints_edited.json";

/// On-disk name of the raw upstream manifest.
pub const UPSTREAM_FILE: &str = "endpoints.json";

/// On-disk name of the merged, user-editable mapping.
pub const EDITED_FILE: &str = "endpoints_edited.json";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding both the raw manifest and the edited mapping.
    pub data_dir: PathBuf,
    /// URL the upstream manifest is fetched from.
    pub upstream_url: String,
    /// URL of the hosted pre-built mapping.
    pub fallback_url: String,
    /// Timeout applied to every HTTP request.
    pub timeout: Duration,
}

impl Config {
    /// Configuration rooted at the platform data directory, creating it on
    /// first use. Falls back to `<user data dir>/porthole` on platforms where
    /// `directories` cannot name a project directory.
    pub fn discover() -> io::Result<Self> {
        let dir = directories::ProjectDirs::from("", "", "porthole")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .or_else(|| dirs::data_dir().map(|d| d.join("porthole")))
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "could not determine a data directory")
            })?;
        std::fs::create_dir_all(&dir)?;
        Ok(Self::with_data_dir(dir))
    }

    /// Configuration rooted at an explicit directory, with default URLs and
    /// timeout. The directory is created lazily by the first write.
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Path of the raw upstream manifest.
    pub fn upstream_path(&self) -> PathBuf {
        self.data_dir.join(UPSTREAM_FILE)
    }

    /// Path of the merged, user-editable mapping.
    pub fn edited_path(&self) -> PathBuf {
        self.data_dir.join(EDITED_FILE)
    }
}
