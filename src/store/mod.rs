//! Published configuration snapshot.
//!
//! # Responsibilities
//! - Hold the current [`ConfigModel`], or none before the first load
//! - Serve host/room lookups from a stable snapshot
//! - Swap the snapshot atomically on update
//! - Push the new snapshot's overrides into the process-wide sink
//!
//! Readers grab an `Arc` to the snapshot and never block writers; a reader
//! racing a `replace` sees either the old or the new model in full, never a
//! mix. There is no observable "loading" state — an in-flight fetch changes
//! nothing until it succeeds.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::debug;

use crate::config::model::{ConfigModel, HostPurpose};
use crate::config::overrides::OverrideSink;
use crate::observability::metrics;

/// Holder of the currently published configuration.
pub struct ConfigStore {
    current: ArcSwapOption<ConfigModel>,
    overrides: Arc<dyn OverrideSink>,
}

impl ConfigStore {
    pub fn new(overrides: Arc<dyn OverrideSink>) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            overrides,
        }
    }

    /// True iff a model is currently published.
    pub fn is_valid(&self) -> bool {
        self.current.load().is_some()
    }

    /// Normalized host for `purpose` from the published model.
    pub fn host(&self, purpose: HostPurpose) -> Option<String> {
        let guard = self.current.load();
        guard.as_ref().and_then(|model| model.host(purpose)).map(str::to_string)
    }

    /// VCS room list from the published model; empty before the first load.
    pub fn vcs_rooms(&self) -> Vec<String> {
        let guard = self.current.load();
        guard
            .as_ref()
            .map(|model| model.vcs_rooms().to_vec())
            .unwrap_or_default()
    }

    /// Shared handle to the published model.
    pub fn snapshot(&self) -> Option<Arc<ConfigModel>> {
        self.current.load_full()
    }

    /// Publish `model`, replacing any previous snapshot.
    ///
    /// The model's overrides are pushed into the sink. A model that carries
    /// no overrides resets the sink to defaults — "document said nothing" and
    /// "document said empty" both mean the defaults apply, and neither leaves
    /// stale overrides from a previous document behind.
    pub fn replace(&self, model: ConfigModel) {
        let model = Arc::new(model);
        self.current.store(Some(Arc::clone(&model)));

        if model.has_overrides() {
            self.overrides
                .apply(model.feature_overrides(), model.value_overrides());
        } else {
            self.overrides.reset_to_defaults();
        }

        metrics::record_store_swap();
        debug!(
            hosts = model.hosts.len(),
            features = model.feature_overrides().len(),
            values = model.value_overrides().len(),
            "published configuration snapshot"
        );
    }

    /// Unpublish the current model and revert overrides to defaults.
    pub fn clear(&self) {
        self.current.store(None);
        self.overrides.reset_to_defaults();
        debug!("cleared configuration snapshot");
    }
}
