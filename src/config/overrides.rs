//! Feature and value override identifiers and the sink they are pushed into.
//!
//! The identifiers here, together with the registration tables in
//! [`schema`](crate::config::schema), define every override the remote
//! document can carry. The sink is the process-wide override mechanism of the
//! host application; it is injected so the store stays testable and free of
//! globals.

use std::sync::RwLock;

use serde::Serialize;

/// Boolean feature switches the document may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    AvatarChangeAllowed,
    NameChangeAllowed,
    InfoChangeAllowed,
    ChatSnippets,
    VcsCallByLink,
    VcsWebinar,
    PhoneAttachment,
    SilentMessageDelete,
    SharedFederationStickerpacks,
    SmartReplyStickerSuggestions,
    SmartReplyTextSuggestions,
    /// Derived, never read from the document: set when both sticker and text
    /// smart-reply suggestions are enabled.
    SmartReplyQuoteSuggestions,
    RestrictedFiles,
    AntivirusCheck,
    Threads,
    TasksApp,
    TaskCreationInChat,
    OrganizationStructure,
    CalendarApp,
}

/// String values the document may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKey {
    StatusBannerEmoji,
}

/// Process-wide override mechanism.
///
/// `apply` replaces the active override set with the given lists; `reset`
/// reverts every flag and value to its built-in default. Replacing with an
/// explicitly empty set and resetting are distinct operations to the caller —
/// the store maps "document carried no overrides" to a reset.
pub trait OverrideSink: Send + Sync {
    fn apply(&self, features: &[(FeatureFlag, bool)], values: &[(ValueKey, String)]);
    fn reset_to_defaults(&self);
}

#[derive(Debug, Default)]
struct OverrideState {
    features: Vec<(FeatureFlag, bool)>,
    values: Vec<(ValueKey, String)>,
}

/// In-memory [`OverrideSink`] used by the CLI and by tests.
///
/// Lookup returns the first match, preserving document order.
#[derive(Debug, Default)]
pub struct InMemoryOverrides {
    state: RwLock<OverrideState>,
}

impl InMemoryOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current override for `flag`, or `None` when the flag is at its default.
    pub fn feature(&self, flag: FeatureFlag) -> Option<bool> {
        let state = self.state.read().expect("override state poisoned");
        state.features.iter().find(|(f, _)| *f == flag).map(|(_, enabled)| *enabled)
    }

    /// Current override for `key`, or `None` when the value is at its default.
    pub fn value(&self, key: ValueKey) -> Option<String> {
        let state = self.state.read().expect("override state poisoned");
        state.values.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone())
    }

    pub fn is_empty(&self) -> bool {
        let state = self.state.read().expect("override state poisoned");
        state.features.is_empty() && state.values.is_empty()
    }
}

impl OverrideSink for InMemoryOverrides {
    fn apply(&self, features: &[(FeatureFlag, bool)], values: &[(ValueKey, String)]) {
        let mut state = self.state.write().expect("override state poisoned");
        state.features = features.to_vec();
        state.values = values.to_vec();
    }

    fn reset_to_defaults(&self) {
        let mut state = self.state.write().expect("override state poisoned");
        state.features.clear();
        state.values.clear();
    }
}
