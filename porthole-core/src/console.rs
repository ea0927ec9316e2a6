//! The lookup facade.
//!
//! [`Console`] is the one handle the binaries drive: it reconciles on
//! request, loads the URL map once per instance, and resolves service names
//! to console URLs. A local mapping that fails to read or decode is replaced
//! by a fresh copy of the hosted mapping and loaded again, so a corrupted
//! file heals instead of wedging every lookup.

use tokio::sync::OnceCell;
use tracing::warn;

use crate::cache::UrlMap;
use crate::config::Config;
use crate::error::{FetchError, LoadError, ReconcileError};
use crate::fetch::Fetcher;
use crate::reconcile::{ReconcileSummary, Reconciler};

pub struct Console {
    config: Config,
    fetcher: Fetcher,
    map: OnceCell<UrlMap>,
}

impl Console {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let fetcher = Fetcher::new(config.timeout)?;
        Ok(Self {
            config,
            fetcher,
            map: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bring the edited mapping up to date with the upstream manifest.
    pub async fn sync(&self) -> Result<ReconcileSummary, ReconcileError> {
        Reconciler::with_fetcher(self.config.clone(), self.fetcher.clone())
            .run()
            .await
    }

    /// The loaded URL map. Loaded once per `Console`; later calls reuse the
    /// in-memory copy even if the file changes underneath.
    pub async fn url_map(&self) -> Result<&UrlMap, LoadError> {
        self.map.get_or_try_init(|| self.load_map()).await
    }

    /// Console URL template for `service`, if known.
    pub async fn resolve_url(&self, service: &str) -> Result<Option<String>, LoadError> {
        Ok(self
            .url_map()
            .await?
            .resolve(service)
            .map(str::to_string))
    }

    /// Console URL for `service` with the region token replaced by `region`.
    pub async fn resolve_url_in_region(
        &self,
        service: &str,
        region: &str,
    ) -> Result<Option<String>, LoadError> {
        Ok(self.url_map().await?.resolve_in_region(service, region))
    }

    /// All known service names, ascending.
    pub async fn services(&self) -> Result<Vec<String>, LoadError> {
        let map = self.url_map().await?;
        Ok(map.names().into_iter().map(str::to_string).collect())
    }

    async fn load_map(&self) -> Result<UrlMap, LoadError> {
        match UrlMap::load(&self.config, &self.fetcher).await {
            Ok(map) => Ok(map),
            Err(err @ LoadError::Fetch(_)) => Err(err),
            Err(err) => {
                warn!(error = %err, "local mapping unusable, refetching the hosted copy");
                let path = self.config.edited_path();
                self.fetcher
                    .refetch(&self.config.fallback_url, &path)
                    .await?;
                UrlMap::load(&self.config, &self.fetcher).await
            }
        }
    }
}
