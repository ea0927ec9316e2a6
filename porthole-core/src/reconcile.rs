//! Merging the upstream manifest into the edited mapping.
//!
//! The upstream manifest owns the set of service names; the edited mapping
//! owns the URL of any name the user has corrected. One reconcile pass keeps
//! every override whose service still exists upstream, synthesizes a default
//! template for each new name, prunes names upstream no longer lists, and
//! rewrites the mapping pretty-printed.

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FetchError, ReconcileError};
use crate::fetch::Fetcher;
use crate::manifest::UpstreamManifest;
use crate::mapping::{ServiceEntry, ServiceMapping};

/// Counts reported by a reconcile run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Names new upstream, written with the default template.
    pub added: usize,
    /// Names already mapped; their entries were carried over unchanged.
    pub retained: usize,
    /// Names in the previous mapping that upstream no longer lists.
    pub dropped: usize,
}

impl ReconcileSummary {
    /// Number of services in the merged mapping.
    pub fn total(&self) -> usize {
        self.added + self.retained
    }
}

/// Drives fetch, merge and persist for one configuration.
pub struct Reconciler {
    config: Config,
    fetcher: Fetcher,
}

impl Reconciler {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let fetcher = Fetcher::new(config.timeout)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Reuse an existing fetcher instead of building a fresh client.
    pub fn with_fetcher(config: Config, fetcher: Fetcher) -> Self {
        Self { config, fetcher }
    }

    /// Run one reconcile pass. An existing upstream manifest on disk is
    /// reused; delete the file to force a refresh.
    pub async fn run(&self) -> Result<ReconcileSummary, ReconcileError> {
        let edited_path = self.config.edited_path();
        let existing = self.load_existing();

        let upstream_path = self.config.upstream_path();
        self.fetcher
            .fetch(&self.config.upstream_url, &upstream_path)
            .await?;
        let manifest = UpstreamManifest::load_from_path(&upstream_path)?;

        let mut merged = ServiceMapping::default();
        let mut summary = ReconcileSummary::default();
        for name in manifest.service_names() {
            let entry = match existing.services.get(name) {
                Some(entry) => {
                    summary.retained += 1;
                    entry.clone()
                }
                None => {
                    summary.added += 1;
                    ServiceEntry::default_for(name)
                }
            };
            merged.services.insert(name.to_string(), entry);
        }
        summary.dropped = existing.services.len() - summary.retained;

        merged
            .save_to_path(&edited_path)
            .map_err(|source| ReconcileError::Write {
                path: edited_path.clone(),
                source,
            })?;

        debug!(
            added = summary.added,
            retained = summary.retained,
            dropped = summary.dropped,
            path = %edited_path.display(),
            "service mapping reconciled"
        );
        Ok(summary)
    }

    // A mapping that cannot be read or decoded is treated as empty; the run
    // rewrites the file either way. Losing edits to a corrupted file is the
    // accepted cost.
    fn load_existing(&self) -> ServiceMapping {
        let path = self.config.edited_path();
        if !path.exists() {
            return ServiceMapping::default();
        }
        match ServiceMapping::load_from_path(&path) {
            Ok(mapping) => mapping,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unusable edited mapping");
                ServiceMapping::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn config_for(temp: &TempDir) -> Config {
        Config::with_data_dir(temp.path())
    }

    fn seed_upstream(config: &Config, names: &[&str]) {
        let services: Vec<String> = names.iter().map(|n| format!("\"{n}\": {{}}")).collect();
        let content = format!(
            "{{\"partitions\": [{{\"services\": {{{}}}}}]}}",
            services.join(", ")
        );
        std::fs::write(config.upstream_path(), content).unwrap();
    }

    #[tokio::test]
    async fn fresh_run_synthesizes_default_templates() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        seed_upstream(&config, &["athena", "ec2"]);

        let summary = Reconciler::new(config.clone()).unwrap().run().await.unwrap();
        assert_eq!(
            summary,
            ReconcileSummary {
                added: 2,
                retained: 0,
                dropped: 0
            }
        );

        let mapping = ServiceMapping::load_from_path(&config.edited_path()).unwrap();
        assert_eq!(
            mapping.services["ec2"].console,
            "https://us-west-1.console.aws.amazon.com/ec2/home?region=us-west-1#"
        );
        assert!(mapping.services.contains_key("athena"));
    }

    #[tokio::test]
    async fn edited_urls_survive_for_services_still_upstream() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        seed_upstream(&config, &["ec2", "s3"]);

        let mut existing = ServiceMapping::default();
        existing.services.insert(
            "ec2".to_string(),
            ServiceEntry {
                console: "https://us-west-1.console.aws.amazon.com/ec2/v2/home?region=us-west-1"
                    .to_string(),
            },
        );
        existing.save_to_path(&config.edited_path()).unwrap();

        let summary = Reconciler::new(config.clone()).unwrap().run().await.unwrap();
        assert_eq!(
            summary,
            ReconcileSummary {
                added: 1,
                retained: 1,
                dropped: 0
            }
        );

        let mapping = ServiceMapping::load_from_path(&config.edited_path()).unwrap();
        assert_eq!(
            mapping.services["ec2"].console,
            "https://us-west-1.console.aws.amazon.com/ec2/v2/home?region=us-west-1"
        );
        assert_eq!(
            mapping.services["s3"].console,
            "https://us-west-1.console.aws.amazon.com/s3/home?region=us-west-1#"
        );
    }

    #[tokio::test]
    async fn names_gone_upstream_are_pruned() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        seed_upstream(&config, &["ec2"]);

        let mut existing = ServiceMapping::default();
        for name in ["ec2", "simpledb"] {
            existing
                .services
                .insert(name.to_string(), ServiceEntry::default_for(name));
        }
        existing.save_to_path(&config.edited_path()).unwrap();

        let summary = Reconciler::new(config.clone()).unwrap().run().await.unwrap();
        assert_eq!(
            summary,
            ReconcileSummary {
                added: 0,
                retained: 1,
                dropped: 1
            }
        );

        let mapping = ServiceMapping::load_from_path(&config.edited_path()).unwrap();
        let names: Vec<&String> = mapping.services.keys().collect();
        assert_eq!(names, vec!["ec2"]);
    }

    #[tokio::test]
    async fn malformed_edited_mapping_is_treated_as_empty() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        seed_upstream(&config, &["ec2"]);
        std::fs::write(config.edited_path(), "{broken").unwrap();

        let summary = Reconciler::new(config.clone()).unwrap().run().await.unwrap();
        assert_eq!(summary.added, 1);
        assert_eq!(summary.retained, 0);

        let mapping = ServiceMapping::load_from_path(&config.edited_path()).unwrap();
        assert!(mapping.services.contains_key("ec2"));
    }

    #[tokio::test]
    async fn invalid_upstream_structure_leaves_the_mapping_untouched() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        std::fs::write(config.upstream_path(), "{\"partitions\": []}").unwrap();

        let mut existing = ServiceMapping::default();
        existing
            .services
            .insert("ec2".to_string(), ServiceEntry::default_for("ec2"));
        existing.save_to_path(&config.edited_path()).unwrap();
        let before = std::fs::read(config.edited_path()).unwrap();

        let err = Reconciler::new(config.clone()).unwrap().run().await.unwrap_err();
        assert!(matches!(err, ReconcileError::Manifest(_)), "got {err:?}");
        assert_eq!(std::fs::read(config.edited_path()).unwrap(), before);
    }

    #[tokio::test]
    async fn repeated_runs_are_byte_identical() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        seed_upstream(&config, &["ec2", "s3", "lambda"]);

        let reconciler = Reconciler::new(config.clone()).unwrap();
        reconciler.run().await.unwrap();
        let first = std::fs::read(config.edited_path()).unwrap();

        let summary = reconciler.run().await.unwrap();
        assert_eq!(summary.added, 0);
        assert_eq!(summary.retained, 3);
        assert_eq!(std::fs::read(config.edited_path()).unwrap(), first);
    }
}
