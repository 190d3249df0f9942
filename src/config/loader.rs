//! Document loading.
//!
//! # Data Flow
//! ```text
//! serde_json::Value (syntactically valid document)
//!     → required host sections (api-urls, templates-urls)
//!     → optional host sections (mail-interop, apps, extra templates)
//!     → override tables (top level + mini-apps)
//!     → derived overrides
//!     → ConfigModel (complete) or LoadError (nothing published)
//! ```
//!
//! Field reads are shape-lenient: a field of the wrong JSON type reads the
//! same as an absent field. Required fields missing therefore surface as
//! [`LoadError`], never as a JSON parse error, and malformed optional
//! sections are skipped. The one exception is `mail-interop`: once the
//! section is present as an object, all four of its hosts are mandatory.

use serde_json::Value;
use thiserror::Error;

use crate::config::model::{normalize_host, ConfigModel, HostPurpose};
use crate::config::schema::{self, Platform};

/// Error type for document loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("missing or malformed `{0}` section")]
    MissingSection(&'static str),
    #[error("missing or empty `{section}.{field}` host")]
    MissingHost {
        section: &'static str,
        field: &'static str,
    },
}

/// Knobs that change which document fields the loader looks at.
///
/// The platform update entry is read only when the backing feature is on, so
/// the gate is passed in rather than hard-coded.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Read `apps.{platform}.url` into [`HostPurpose::AppUpdate`].
    pub backend_update: bool,
    /// Which `apps` entry belongs to this build.
    pub platform: Platform,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            backend_update: false,
            platform: Platform::current(),
        }
    }
}

/// Build a [`ConfigModel`] from a parsed document.
///
/// Returns a complete model or an error; partial state never escapes.
pub fn load_model(doc: &Value, options: &LoaderOptions) -> Result<ConfigModel, LoadError> {
    let mut model = ConfigModel::default();

    let api = get_object(doc, schema::API_URLS).ok_or(LoadError::MissingSection(schema::API_URLS))?;
    require_host(&mut model, api, schema::API_URLS, schema::MAIN_API, HostPurpose::Api)?;
    require_host(
        &mut model,
        api,
        schema::API_URLS,
        schema::MAIN_BINARY_API,
        HostPurpose::BinaryApi,
    )?;

    let templates =
        get_object(doc, schema::TEMPLATES_URLS).ok_or(LoadError::MissingSection(schema::TEMPLATES_URLS))?;
    require_host(
        &mut model,
        templates,
        schema::TEMPLATES_URLS,
        schema::FILES_PARSING,
        HostPurpose::FileParsing,
    )?;
    require_host(
        &mut model,
        templates,
        schema::TEMPLATES_URLS,
        schema::STICKERPACK_SHARING,
        HostPurpose::StickerShare,
    )?;
    require_host(
        &mut model,
        templates,
        schema::TEMPLATES_URLS,
        schema::PROFILE,
        HostPurpose::Profile,
    )?;

    optional_host(&mut model, templates, schema::DI, HostPurpose::DesignSystem);
    optional_host(&mut model, templates, schema::DI_DARK, HostPurpose::DesignSystemDark);
    optional_host(&mut model, templates, schema::TASKS, HostPurpose::Tasks);
    optional_host(&mut model, templates, schema::CALENDAR, HostPurpose::Calendar);

    if let Some(raw) = get_str(templates, schema::VCS_ROOM) {
        model.vcs_rooms = split_vcs_rooms(raw);
    }

    // Optional section, but all four hosts are required once it is present.
    if let Some(mail) = get_object(doc, schema::MAIL_INTEROP) {
        require_host(&mut model, mail, schema::MAIL_INTEROP, schema::MAIL_AUTH, HostPurpose::MailAuth)?;
        require_host(
            &mut model,
            mail,
            schema::MAIL_INTEROP,
            schema::MAIL_REDIRECT,
            HostPurpose::MailRedirect,
        )?;
        require_host(
            &mut model,
            mail,
            schema::MAIL_INTEROP,
            schema::MAIL_DESKTOP,
            HostPurpose::MailDesktop,
        )?;
        require_host(&mut model, mail, schema::MAIL_INTEROP, schema::MAIL_READ, HostPurpose::MailRead)?;
    }

    if options.backend_update {
        if let Some(platform_entry) =
            get_object(doc, schema::APPS).and_then(|apps| get_object(apps, options.platform.key()))
        {
            optional_host(&mut model, platform_entry, schema::APP_URL, HostPurpose::AppUpdate);
        }
    }

    for &(field, flag) in schema::FEATURE_FIELDS {
        if let Some(enabled) = get_bool(doc, field) {
            model.feature_overrides.push((flag, enabled));
        }
    }

    if let Some(mini_apps) = get_object(doc, schema::MINI_APPS) {
        for &(field, flag) in schema::MINI_APP_FEATURE_FIELDS {
            if let Some(enabled) = get_bool(mini_apps, field) {
                model.feature_overrides.push((flag, enabled));
            }
        }
    }

    for &(field, key) in schema::VALUE_FIELDS {
        if let Some(value) = get_str(doc, field) {
            model.value_overrides.push((key, value.to_string()));
        }
    }

    derive_overrides(&mut model);

    Ok(model)
}

/// Overrides implied by other overrides; runs after the tables are evaluated.
fn derive_overrides(model: &mut ConfigModel) {
    use crate::config::overrides::FeatureFlag;

    let enabled = |flag: FeatureFlag| {
        model
            .feature_overrides
            .iter()
            .any(|&(f, on)| f == flag && on)
    };

    if enabled(FeatureFlag::SmartReplyStickerSuggestions) && enabled(FeatureFlag::SmartReplyTextSuggestions) {
        model
            .feature_overrides
            .push((FeatureFlag::SmartReplyQuoteSuggestions, true));
    }
}

/// Split the semicolon-delimited `vcs-room` field.
///
/// Interior empty tokens are preserved; a single trailing empty token is
/// dropped, so `"a;b;"` parses the same as `"a;b"`.
fn split_vcs_rooms(raw: &str) -> Vec<String> {
    let mut rooms: Vec<String> = raw.split(';').map(str::to_string).collect();
    if rooms.last().map(String::is_empty).unwrap_or(false) {
        rooms.pop();
    }
    rooms
}

fn require_host(
    model: &mut ConfigModel,
    node: &Value,
    section: &'static str,
    field: &'static str,
    purpose: HostPurpose,
) -> Result<(), LoadError> {
    match read_host(node, field, purpose) {
        Some(host) => {
            model.hosts.push(host);
            Ok(())
        }
        None => Err(LoadError::MissingHost { section, field }),
    }
}

fn optional_host(model: &mut ConfigModel, node: &Value, field: &str, purpose: HostPurpose) {
    if let Some(host) = read_host(node, field, purpose) {
        model.hosts.push(host);
    }
}

fn read_host(node: &Value, field: &str, purpose: HostPurpose) -> Option<(HostPurpose, String)> {
    let host = normalize_host(get_str(node, field)?);
    if host.is_empty() {
        return None;
    }
    Some((purpose, host.to_string()))
}

fn get_object<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key).filter(|value| value.is_object())
}

fn get_str<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key).and_then(Value::as_str)
}

fn get_bool(node: &Value, key: &str) -> Option<bool> {
    node.get(key).and_then(Value::as_bool)
}
