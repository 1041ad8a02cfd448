//! Client settings
//!
//! Loaded once from the environment. Only endpoints live here; credentials
//! belong to the authentication layer.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{BaseSpaceError, Result};

pub const DEFAULT_API_URL: &str = "https://api.basespace.illumina.com/";
pub const DEFAULT_API_VERSION: &str = "v1pre3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub api_url: String,
    pub version: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ClientSettings {
    /// Read `BASESPACE_API_URL` and `BASESPACE_API_VERSION`,
    /// falling back to the public endpoints.
    pub fn from_env() -> Result<Self> {
        let settings = Self {
            api_url: env_or("BASESPACE_API_URL", DEFAULT_API_URL),
            version: env_or("BASESPACE_API_VERSION", DEFAULT_API_VERSION),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        parse_base(&self.api_url, "api_url")?;
        let version = self.version.trim_matches('/');
        if version.trim().is_empty() || version.contains('/') {
            return Err(BaseSpaceError::Config(format!(
                "version '{}' must be a single path segment",
                self.version
            )));
        }
        Ok(())
    }

    /// Absolute URL for an href as the server sends it (`v1pre3/samples/1`).
    ///
    /// Hrefs that are already absolute are returned unchanged. A relative href
    /// without the version segment (`samples/1`) is placed under `version`.
    pub fn resolve_href(&self, href: &str) -> Result<Url> {
        if let Ok(absolute) = Url::parse(href) {
            return Ok(absolute);
        }
        let base = parse_base(&self.api_url, "api_url")?;
        let relative = href.trim_start_matches('/');
        let version = self.version.trim_matches('/');
        let path = if relative == version || relative.starts_with(&format!("{}/", version)) {
            relative.to_string()
        } else {
            format!("{}/{}", version, relative)
        };
        base.join(&path)
            .map_err(|e| BaseSpaceError::Config(format!("cannot resolve href '{}': {}", href, e)))
    }
}

/// Parse a base URL, making sure it ends with `/` so joins append rather than replace
fn parse_base(raw: &str, field: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized)
        .map_err(|e| BaseSpaceError::Config(format!("{} '{}' is not a valid URL: {}", field, raw, e)))
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(ClientSettings::default().validate().is_ok());
    }

    #[test]
    fn relative_href_joins_api_url() {
        let settings = ClientSettings {
            api_url: "https://api.example.org/base".into(),
            ..ClientSettings::default()
        };
        let url = settings
            .resolve_href("v1pre3/appsessions/1/properties/Input.Samples/items")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.org/base/v1pre3/appsessions/1/properties/Input.Samples/items"
        );

        let rooted = settings.resolve_href("/v1pre3/samples/2").unwrap();
        assert_eq!(rooted.as_str(), "https://api.example.org/base/v1pre3/samples/2");
    }

    #[test]
    fn unversioned_href_gets_version_segment() {
        let settings = ClientSettings::default();
        let url = settings.resolve_href("samples/2").unwrap();
        assert_eq!(url.as_str(), "https://api.basespace.illumina.com/v1pre3/samples/2");

        let custom = ClientSettings {
            version: "v2".into(),
            ..ClientSettings::default()
        };
        assert_eq!(
            custom.resolve_href("/v2/runs/9").unwrap().as_str(),
            "https://api.basespace.illumina.com/v2/runs/9"
        );
        assert_eq!(
            custom.resolve_href("runs/9").unwrap().as_str(),
            "https://api.basespace.illumina.com/v2/runs/9"
        );
    }

    #[test]
    fn absolute_href_passes_through() {
        let url = ClientSettings::default()
            .resolve_href("https://other.example.org/x")
            .unwrap();
        assert_eq!(url.as_str(), "https://other.example.org/x");
    }

    #[test]
    fn invalid_api_url_is_a_config_error() {
        let settings = ClientSettings {
            api_url: "not a url".into(),
            ..ClientSettings::default()
        };
        assert!(matches!(settings.validate(), Err(BaseSpaceError::Config(_))));
        assert!(settings.resolve_href("v1pre3/samples/1").is_err());
    }

    #[test]
    fn version_must_be_one_segment() {
        for version in [" ", "", "v1/extra"] {
            let settings = ClientSettings {
                version: version.into(),
                ..ClientSettings::default()
            };
            assert!(settings.validate().is_err(), "accepted {:?}", version);
        }
    }
}
