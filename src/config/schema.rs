//! Document schema constants.
//!
//! Field names of the remote configuration document, the platform keys used
//! by the `apps` section, and the registration tables mapping override fields
//! to their strongly-typed identifiers. The tables are the single source of
//! truth for which overrides exist; the loader walks them instead of naming
//! fields inline.

use crate::config::overrides::{FeatureFlag, ValueKey};

/// Well-known name of the remote document and of the on-disk cache file.
pub const CONFIG_DOC_NAME: &str = "myteam-config.json";

/// Local developer-override copy of the document.
pub const DEVELOP_CONFIG_DOC_NAME: &str = "develop-myteam-config.json";

pub const API_URLS: &str = "api-urls";
pub const MAIN_API: &str = "main-api";
pub const MAIN_BINARY_API: &str = "main-binary-api";

pub const TEMPLATES_URLS: &str = "templates-urls";
pub const FILES_PARSING: &str = "files-parsing";
pub const STICKERPACK_SHARING: &str = "stickerpack-sharing";
pub const PROFILE: &str = "profile";
pub const DI: &str = "di";
pub const DI_DARK: &str = "di-dark";
pub const TASKS: &str = "tasks";
pub const CALENDAR: &str = "calendar";
pub const VCS_ROOM: &str = "vcs-room";

pub const MAIL_INTEROP: &str = "mail-interop";
pub const MAIL_AUTH: &str = "mail-auth";
pub const MAIL_REDIRECT: &str = "desktop-mail-redirect";
pub const MAIL_DESKTOP: &str = "desktop-mail";
pub const MAIL_READ: &str = "desktop-single-mail";

pub const APPS: &str = "apps";
pub const APP_URL: &str = "url";

pub const MINI_APPS: &str = "mini-apps";

/// Platform identifier used to select the `apps.{key}` update entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacX64,
    WinX32,
    LinuxX64,
    LinuxX32,
}

impl Platform {
    /// Key under the `apps` object for this platform.
    pub const fn key(self) -> &'static str {
        match self {
            Platform::MacX64 => "mac_x64",
            Platform::WinX32 => "win_x32",
            Platform::LinuxX64 => "linux_x64",
            Platform::LinuxX32 => "linux_x32",
        }
    }

    /// Platform of the running build.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacX64
        } else if cfg!(target_os = "windows") {
            Platform::WinX32
        } else if cfg!(target_pointer_width = "64") {
            Platform::LinuxX64
        } else {
            Platform::LinuxX32
        }
    }
}

/// Top-level boolean fields and the feature flags they override.
pub static FEATURE_FIELDS: &[(&str, FeatureFlag)] = &[
    ("allow-self-avatar-change", FeatureFlag::AvatarChangeAllowed),
    ("allow-self-name-change", FeatureFlag::NameChangeAllowed),
    ("allow-self-info-change", FeatureFlag::InfoChangeAllowed),
    ("snippets-enabled", FeatureFlag::ChatSnippets),
    ("allow-vcs-call-creation", FeatureFlag::VcsCallByLink),
    ("allow-vcs-webinar-creation", FeatureFlag::VcsWebinar),
    ("attach-phone-enabled", FeatureFlag::PhoneAttachment),
    ("silent-message-delete", FeatureFlag::SilentMessageDelete),
    (
        "support-shared-federation-stickerpacks",
        FeatureFlag::SharedFederationStickerpacks,
    ),
    ("smart-reply-stickers-enabled", FeatureFlag::SmartReplyStickerSuggestions),
    ("smart-reply-text-enabled", FeatureFlag::SmartReplyTextSuggestions),
    ("restricted-files-enabled", FeatureFlag::RestrictedFiles),
    ("antivirus-check-enabled", FeatureFlag::AntivirusCheck),
    ("threads-enabled", FeatureFlag::Threads),
];

/// Boolean fields inside the `mini-apps` object.
pub static MINI_APP_FEATURE_FIELDS: &[(&str, FeatureFlag)] = &[
    ("tasks-enabled", FeatureFlag::TasksApp),
    ("task-creation-in-chat-enabled", FeatureFlag::TaskCreationInChat),
    ("organization-structure-enabled", FeatureFlag::OrganizationStructure),
    ("calendar-enabled", FeatureFlag::CalendarApp),
];

/// Top-level string fields and the value keys they override.
pub static VALUE_FIELDS: &[(&str, ValueKey)] = &[("status-banner-emoji", ValueKey::StatusBannerEmoji)];
