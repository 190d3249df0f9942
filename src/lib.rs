//! Remote host and feature-override configuration resolver.
//!
//! Downloads a per-environment JSON document describing service hosts, VCS
//! room URLs, and feature/value overrides; validates it; persists it to the
//! product data directory; and publishes it as an atomically swapped,
//! process-wide snapshot that consumers read without blocking updates.

pub mod cache;
pub mod config;
pub mod fetch;
pub mod observability;
pub mod service;
pub mod store;

pub use config::loader::{LoadError, LoaderOptions};
pub use config::model::{ConfigModel, HostPurpose};
pub use config::overrides::{FeatureFlag, InMemoryOverrides, OverrideSink, ValueKey};
pub use config::schema::Platform;
pub use fetch::url::PresetHost;
pub use fetch::{FetchEvent, FetchOutcome};
pub use service::{ConfigService, ServiceSettings};
pub use store::ConfigStore;
