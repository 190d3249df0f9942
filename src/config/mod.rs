//! Remote configuration document handling.
//!
//! # Data Flow
//! ```text
//! raw JSON body (network fetch or disk cache)
//!     → loader.rs (required/optional field policy, normalization)
//!     → ConfigModel (validated, immutable)
//!     → store (atomic snapshot swap, override push)
//!     → consumers (host lookups, feature queries)
//! ```
//!
//! A model is rebuilt from scratch on every successful parse; rejection
//! leaves the currently published snapshot untouched.

pub mod loader;
pub mod model;
pub mod overrides;
pub mod schema;

pub use loader::{LoadError, LoaderOptions};
pub use model::{ConfigModel, HostPurpose};
pub use overrides::{FeatureFlag, InMemoryOverrides, OverrideSink, ValueKey};
