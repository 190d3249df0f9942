//! Fetch URL construction.
//!
//! The document always lives at `https://{host}/myteam-config.json`; the
//! login domain rides along as a query parameter so the backend can serve
//! per-tenant documents. A deployment may pin a preset host that wins over
//! whatever the caller supplies.

use crate::config::schema;

/// Optional preset host a deployment may pin for config fetches.
#[derive(Debug, Clone, Default)]
pub struct PresetHost {
    pub host: Option<String>,
    /// The preset only applies while this toggle is on.
    pub enabled: bool,
}

/// `https://{domain}/myteam-config.json[?query]`.
pub fn make_url(domain: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => {
            format!("https://{domain}/{}?{query}", schema::CONFIG_DOC_NAME)
        }
        _ => format!("https://{domain}/{}", schema::CONFIG_DOC_NAME),
    }
}

/// Fetch URL against the preset host, if one is configured and enabled.
pub fn make_url_preset(preset: &PresetHost, login_domain: &str) -> Option<String> {
    if !preset.enabled {
        return None;
    }
    let host = preset.host.as_deref().filter(|host| !host.is_empty())?;
    Some(make_url(host, Some(&format!("domain={login_domain}"))))
}

/// Resolve the effective fetch URL: preset host first, then the explicit
/// host, then the login domain itself.
pub fn make_url_auto_preset(preset: &PresetHost, login_domain: &str, host: Option<&str>) -> String {
    if let Some(url) = make_url_preset(preset, login_domain) {
        return url;
    }

    let effective = host.filter(|host| !host.is_empty()).unwrap_or(login_domain);
    make_url(effective, Some(&format!("domain={login_domain}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_url() {
        assert_eq!(
            make_url("config.example.com", None),
            "https://config.example.com/myteam-config.json"
        );
        assert_eq!(
            make_url("config.example.com", Some("domain=corp.example.com")),
            "https://config.example.com/myteam-config.json?domain=corp.example.com"
        );
        assert_eq!(
            make_url("config.example.com", Some("")),
            "https://config.example.com/myteam-config.json"
        );
    }

    #[test]
    fn test_preset_requires_toggle_and_host() {
        let disabled = PresetHost {
            host: Some("preset.example.com".to_string()),
            enabled: false,
        };
        assert_eq!(make_url_preset(&disabled, "corp.example.com"), None);

        let hostless = PresetHost {
            host: None,
            enabled: true,
        };
        assert_eq!(make_url_preset(&hostless, "corp.example.com"), None);

        let preset = PresetHost {
            host: Some("preset.example.com".to_string()),
            enabled: true,
        };
        assert_eq!(
            make_url_preset(&preset, "corp.example.com"),
            Some("https://preset.example.com/myteam-config.json?domain=corp.example.com".to_string())
        );
    }

    #[test]
    fn test_auto_preset_fallback_chain() {
        let preset = PresetHost {
            host: Some("preset.example.com".to_string()),
            enabled: true,
        };
        assert_eq!(
            make_url_auto_preset(&preset, "corp.example.com", Some("explicit.example.com")),
            "https://preset.example.com/myteam-config.json?domain=corp.example.com"
        );

        let no_preset = PresetHost::default();
        assert_eq!(
            make_url_auto_preset(&no_preset, "corp.example.com", Some("explicit.example.com")),
            "https://explicit.example.com/myteam-config.json?domain=corp.example.com"
        );
        assert_eq!(
            make_url_auto_preset(&no_preset, "corp.example.com", None),
            "https://corp.example.com/myteam-config.json?domain=corp.example.com"
        );
        assert_eq!(
            make_url_auto_preset(&no_preset, "corp.example.com", Some("")),
            "https://corp.example.com/myteam-config.json?domain=corp.example.com"
        );
    }
}
