//! Configuration service — the piece the application composition root owns.
//!
//! # Data Flow
//! ```text
//! startup:  disk cache ──┐
//!                        ├─→ loader → store (published snapshot)
//! runtime:  HTTP fetch ──┘              │
//!               │                       └─→ override sink
//!               └─→ disk cache (raw body, on success)
//! ```
//!
//! The service wires the fetcher, loader, store, and cache together behind
//! one handle that is cloned into whatever needs it. A fetch in flight never
//! changes what readers observe; only a fully validated document swaps the
//! snapshot and touches the disk.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cache::{CacheSource, CacheStore};
use crate::config::loader::{self, LoaderOptions};
use crate::config::model::HostPurpose;
use crate::config::overrides::OverrideSink;
use crate::fetch::url::PresetHost;
use crate::fetch::{self, FetchEvent, FetchOutcome};
use crate::observability::metrics;
use crate::store::ConfigStore;

/// Everything the service needs injected at construction time.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Product data directory holding the cached document.
    pub data_dir: PathBuf,
    /// Honor a `develop-myteam-config.json` override file on disk.
    pub develop_overrides: bool,
    /// Pinned config host, if the deployment ships one.
    pub preset: PresetHost,
    pub loader: LoaderOptions,
}

impl ServiceSettings {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            develop_overrides: cfg!(debug_assertions),
            preset: PresetHost::default(),
            loader: LoaderOptions::default(),
        }
    }
}

/// Remote-configuration resolver handle.
pub struct ConfigService {
    settings: ServiceSettings,
    store: ConfigStore,
    cache: CacheStore,
    client: reqwest::Client,
    /// Set when a developer-override file was loaded; remote documents are
    /// then persisted but neither validated nor published.
    develop_active: AtomicBool,
}

impl ConfigService {
    pub fn new(settings: ServiceSettings, overrides: Arc<dyn OverrideSink>) -> Arc<Self> {
        let cache = CacheStore::new(settings.data_dir.clone());
        Arc::new(Self {
            store: ConfigStore::new(overrides),
            cache,
            client: reqwest::Client::new(),
            develop_active: AtomicBool::new(false),
            settings,
        })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// True while a developer-override file governs the published config.
    pub fn develop_overrides_active(&self) -> bool {
        self.develop_active.load(Ordering::Relaxed)
    }

    pub fn is_valid(&self) -> bool {
        self.store.is_valid()
    }

    pub fn host(&self, purpose: HostPurpose) -> Option<String> {
        self.store.host(purpose)
    }

    pub fn vcs_rooms(&self) -> Vec<String> {
        self.store.vcs_rooms()
    }

    /// Effective fetch URL for `login_domain`, honoring the preset host.
    pub fn fetch_url(&self, login_domain: &str, host: Option<&str>) -> String {
        fetch::url::make_url_auto_preset(&self.settings.preset, login_domain, host)
    }

    /// Populate the store from disk, without a network round-trip.
    ///
    /// The developer-override file is probed first when enabled; a readable
    /// override file switches the service into developer-override mode for
    /// the rest of its lifetime. Whichever file is read, a document that
    /// fails JSON or field validation fails this call — there is no fallback
    /// to the other file.
    pub fn load_from_disk(&self) -> bool {
        let Some((bytes, source)) = self.cache.read(self.settings.develop_overrides) else {
            info!("no cached configuration on disk");
            return false;
        };

        if source == CacheSource::Develop {
            self.develop_active.store(true, Ordering::Relaxed);
            info!("developer configuration override active");
        }

        let doc: Value = match serde_json::from_slice(&bytes) {
            Ok(doc) => doc,
            Err(error) => {
                warn!(source = source.as_str(), %error, "cached configuration is not valid json");
                return false;
            }
        };

        let model = match loader::load_model(&doc, &self.settings.loader) {
            Ok(model) => model,
            Err(error) => {
                warn!(source = source.as_str(), %error, "cached configuration rejected");
                return false;
            }
        };

        self.store.replace(model);
        metrics::record_cache_load(source);
        info!(source = source.as_str(), "configuration loaded from disk");
        true
    }

    /// Fetch the document at `url` and resolve to a terminal outcome.
    ///
    /// On success the store is updated and the raw body cached before the
    /// future resolves. In developer-override mode the remote body is only
    /// persisted; the published snapshot stays under the override file's
    /// control.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let outcome = self.fetch_inner(url).await;
        metrics::record_fetch(outcome);
        match outcome {
            FetchOutcome::Ok => info!(url, "configuration fetch succeeded"),
            _ => warn!(url, outcome = outcome.as_str(), "configuration fetch failed"),
        }
        outcome
    }

    async fn fetch_inner(&self, url: &str) -> FetchOutcome {
        let body = match fetch::download(&self.client, url).await {
            Ok(body) => body,
            Err(outcome) => return outcome,
        };

        let doc: Value = match serde_json::from_slice(&body) {
            Ok(doc) => doc,
            Err(error) => {
                warn!(url, %error, "configuration response is not valid json");
                return FetchOutcome::AnswerParseError;
            }
        };

        if !self.develop_overrides_active() {
            let model = match loader::load_model(&doc, &self.settings.loader) {
                Ok(model) => model,
                Err(error) => {
                    warn!(url, %error, "configuration response rejected");
                    return FetchOutcome::AnswerNotEnoughFields;
                }
            };
            self.store.replace(model);
        }

        if let Err(error) = self.cache.write(&body) {
            warn!(%error, "failed to persist configuration cache");
        }

        FetchOutcome::Ok
    }

    /// Fire-and-forget fetch; the outcome lands on `events` exactly once.
    ///
    /// The caller drains `events` on its designated task, so completion
    /// handling never races the store swap or other callers' handling.
    pub fn spawn_fetch(self: &Arc<Self>, url: impl Into<String>, events: mpsc::UnboundedSender<FetchEvent>) {
        let service = Arc::clone(self);
        let url = url.into();
        tokio::spawn(async move {
            let outcome = service.fetch(&url).await;
            let _ = events.send(FetchEvent { outcome, url });
        });
    }

    /// Drop the published snapshot, revert overrides, delete the cache file.
    pub fn clear(&self) {
        self.store.clear();
        self.cache.remove();
        info!("configuration cleared");
    }
}
