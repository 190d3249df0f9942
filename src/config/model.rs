//! Parsed configuration snapshot.
//!
//! A [`ConfigModel`] is built in one piece by the loader and never mutated
//! afterwards; the store shares it behind an `Arc` and replaces it wholesale
//! on update.

use serde::Serialize;

use crate::config::overrides::{FeatureFlag, ValueKey};

/// What a resolved hostname is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostPurpose {
    /// Main REST API.
    Api,
    /// Main binary (file transfer) API.
    BinaryApi,
    /// File-parsing preview templates.
    FileParsing,
    /// Sticker-pack sharing pages.
    StickerShare,
    /// Web profile pages.
    Profile,
    /// Design-system assets, light theme.
    DesignSystem,
    /// Design-system assets, dark theme.
    DesignSystemDark,
    Tasks,
    Calendar,
    MailAuth,
    MailRedirect,
    MailDesktop,
    MailRead,
    /// Platform-specific application update feed.
    AppUpdate,
}

impl HostPurpose {
    pub const fn as_str(self) -> &'static str {
        match self {
            HostPurpose::Api => "api",
            HostPurpose::BinaryApi => "binary-api",
            HostPurpose::FileParsing => "file-parsing",
            HostPurpose::StickerShare => "sticker-share",
            HostPurpose::Profile => "profile",
            HostPurpose::DesignSystem => "design-system",
            HostPurpose::DesignSystemDark => "design-system-dark",
            HostPurpose::Tasks => "tasks",
            HostPurpose::Calendar => "calendar",
            HostPurpose::MailAuth => "mail-auth",
            HostPurpose::MailRedirect => "mail-redirect",
            HostPurpose::MailDesktop => "mail-desktop",
            HostPurpose::MailRead => "mail-read",
            HostPurpose::AppUpdate => "app-update",
        }
    }
}

impl std::fmt::Display for HostPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of the remote configuration document.
///
/// Hosts are kept as an ordered list; the set is small and fixed, so lookups
/// stay linear. Override lists preserve document order — later entries do not
/// replace earlier ones, consumers take the first match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigModel {
    pub(crate) hosts: Vec<(HostPurpose, String)>,
    pub(crate) vcs_rooms: Vec<String>,
    pub(crate) feature_overrides: Vec<(FeatureFlag, bool)>,
    pub(crate) value_overrides: Vec<(ValueKey, String)>,
}

impl ConfigModel {
    /// Normalized hostname for `purpose`, if the document carried one.
    pub fn host(&self, purpose: HostPurpose) -> Option<&str> {
        self.hosts
            .iter()
            .find(|(p, _)| *p == purpose)
            .map(|(_, host)| host.as_str())
    }

    pub fn vcs_rooms(&self) -> &[String] {
        &self.vcs_rooms
    }

    pub fn feature_overrides(&self) -> &[(FeatureFlag, bool)] {
        &self.feature_overrides
    }

    pub fn value_overrides(&self) -> &[(ValueKey, String)] {
        &self.value_overrides
    }

    /// True if the document carried at least one feature or value override.
    pub fn has_overrides(&self) -> bool {
        !self.feature_overrides.is_empty() || !self.value_overrides.is_empty()
    }
}

/// Normalize a raw host field value.
///
/// Strips one trailing slash, drops everything up to and including `://`, and
/// trims ASCII whitespace from both ends. An empty result means the field is
/// treated as absent.
pub fn normalize_host(raw: &str) -> &str {
    let mut host = raw;
    if let Some(stripped) = host.strip_suffix('/') {
        host = stripped;
    }
    if let Some(idx) = host.find("://") {
        host = &host[idx + 3..];
    }
    host.trim_matches(|c: char| c.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_scheme_and_slash() {
        assert_eq!(normalize_host("https://api.example.com/"), "api.example.com");
        assert_eq!(normalize_host("http://api.example.com"), "api.example.com");
        assert_eq!(normalize_host("api.example.com"), "api.example.com");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_host("  https://api.example.com \t"), "api.example.com");
        assert_eq!(normalize_host("\napi.example.com\r"), "api.example.com");
    }

    #[test]
    fn test_normalize_strips_single_trailing_slash() {
        assert_eq!(normalize_host("files.example.com//"), "files.example.com/");
    }

    #[test]
    fn test_normalize_empty_inputs() {
        assert_eq!(normalize_host(""), "");
        assert_eq!(normalize_host("   "), "");
        assert_eq!(normalize_host("https://"), "");
    }

    #[test]
    fn test_host_lookup() {
        let model = ConfigModel {
            hosts: vec![
                (HostPurpose::Api, "api.example.com".to_string()),
                (HostPurpose::Profile, "profile.example.com".to_string()),
            ],
            ..Default::default()
        };

        assert_eq!(model.host(HostPurpose::Api), Some("api.example.com"));
        assert_eq!(model.host(HostPurpose::Profile), Some("profile.example.com"));
        assert_eq!(model.host(HostPurpose::Calendar), None);
    }
}
