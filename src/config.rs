//! Start-up configuration.
//!
//! Values come from the environment (`SKYZEN_APP_NAME`, `SKYZEN_APP_VERSION`,
//! `SKYZEN_DEFAULT_CONTENT_TYPE`) or, with the `toml` feature, from a TOML document.
//! Every field has a default, so an empty source is a valid configuration.

use serde::Deserialize;
use skyzen_render_core::{content_type, ConfigError, ContentType};
use tracing::debug;

/// Environment variable holding the application name.
pub const APP_NAME_ENV: &str = "SKYZEN_APP_NAME";
/// Environment variable holding the application version.
pub const APP_VERSION_ENV: &str = "SKYZEN_APP_VERSION";
/// Environment variable holding the default content type (a short name or a MIME type).
pub const DEFAULT_CONTENT_TYPE_ENV: &str = "SKYZEN_DEFAULT_CONTENT_TYPE";

/// Settings applied when an [`Engine`](crate::Engine) is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reported in `X-App` and the `app` body field.
    pub app_name: String,
    /// Reported in `X-Version` and the `version` body field.
    pub app_version: String,
    /// Answer for requests without an `Accept` header: a short name such as `json` or
    /// `yaml`, or a literal MIME type.
    pub default_content_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            app_version: String::new(),
            default_content_type: "json".to_owned(),
        }
    }
}

impl Config {
    /// Read the configuration from the process environment. Unset variables keep their
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(name) = lookup(APP_NAME_ENV) {
            config.app_name = name;
        }
        if let Some(version) = lookup(APP_VERSION_ENV) {
            config.app_version = version;
        }
        if let Some(content_type) = lookup(DEFAULT_CONTENT_TYPE_ENV) {
            config.default_content_type = content_type;
        }
        debug!(?config, "configuration loaded from environment");
        config
    }

    /// Parse the configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] if the document is not valid TOML or has
    /// fields of the wrong type.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        ::toml::from_str(source).map_err(|error| ConfigError::InvalidConfig(error.to_string()))
    }

    /// Resolve [`Config::default_content_type`] to a content type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownContentTypeName`] if the value is neither a MIME type
    /// nor one of the well-known short names.
    pub fn resolve_default_content_type(&self) -> Result<ContentType, ConfigError> {
        resolve_name(&self.default_content_type)
    }
}

/// Map a short name (case-insensitive) or a literal MIME type to a content type.
pub(crate) fn resolve_name(name: &str) -> Result<ContentType, ConfigError> {
    let name = name.trim();
    if name.contains('/') {
        return Ok(ContentType::from(name.to_owned()));
    }
    let lowered = name.to_ascii_lowercase();
    content_type::WELL_KNOWN_NAMES
        .iter()
        .find(|(known, _)| *known == lowered)
        .map(|(_, content_type)| content_type.clone())
        .ok_or_else(|| ConfigError::UnknownContentTypeName {
            name: name.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use skyzen_render_core::content_type::{JSON, YAML};

    #[test]
    fn defaults_to_json() {
        let config = Config::default();
        assert_eq!(config.resolve_default_content_type().unwrap(), JSON);
    }

    #[test]
    fn reads_environment_lookup() {
        let env: HashMap<&str, &str> = [
            (APP_NAME_ENV, "myapp"),
            (DEFAULT_CONTENT_TYPE_ENV, "YAML"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| env.get(key).map(|value| (*value).to_owned()));

        assert_eq!(config.app_name, "myapp");
        assert_eq!(config.app_version, "");
        assert_eq!(config.resolve_default_content_type().unwrap(), YAML);
    }

    #[test]
    fn literal_mime_types_pass_through() {
        assert_eq!(
            resolve_name("application/vnd.api+json").unwrap(),
            "application/vnd.api+json"
        );
    }

    #[test]
    fn unknown_names_are_config_errors() {
        let error = resolve_name("klingon").unwrap_err();
        assert!(matches!(error, ConfigError::UnknownContentTypeName { .. }));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parses_toml() {
        let config = Config::from_toml_str(
            r#"
            app_name = "myapp"
            app_version = "0.3.0"
            "#,
        )
        .unwrap();
        assert_eq!(config.app_version, "0.3.0");
        assert_eq!(config.default_content_type, "json");

        assert!(Config::from_toml_str("app_name = 3").is_err());
    }
}
