//! Content type identifiers.

use std::borrow::Cow;
use core::fmt::{self, Display};
use core::str::FromStr;

use http::HeaderValue;
use serde::{Deserialize, Serialize};

/// A MIME type, optionally followed by parameters such as `charset`.
///
/// Two content types are equal only if their strings are equal: `application/json`
/// and `application/json; charset=utf-8` are different keys in a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(Cow<'static, str>);

/// JSON, with an explicit charset. The default representation.
pub const JSON: ContentType = ContentType::from_static("application/json; charset=utf-8");
/// JSON with every non-ASCII character escaped.
pub const JSON_ASCII: ContentType = ContentType::from_static("application/json");
/// JSON wrapped in a callback invocation.
pub const JSONP: ContentType = ContentType::from_static("application/javascript; charset=utf-8");
/// HTML.
pub const HTML: ContentType = ContentType::from_static("text/html; charset=utf-8");
/// Plain text.
pub const TEXT: ContentType = ContentType::from_static("text/plain; charset=utf-8");
/// Protocol buffers.
pub const PROTOBUF: ContentType = ContentType::from_static("application/x-protobuf");
/// Opaque bytes.
pub const BINARY: ContentType = ContentType::from_static("application/octet-stream");
/// YAML.
pub const YAML: ContentType = ContentType::from_static("application/x-yaml; charset=utf-8");
/// TOML.
pub const TOML: ContentType = ContentType::from_static("application/toml; charset=utf-8");
/// `MessagePack`.
pub const MSGPACK: ContentType = ContentType::from_static("application/msgpack; charset=utf-8");
/// XML.
pub const XML: ContentType = ContentType::from_static("application/xml; charset=utf-8");
/// XHTML.
pub const XHTML: ContentType = ContentType::from_static("application/xhtml+xml; charset=utf-8");

/// Short names the well-known content types are reachable under.
pub const WELL_KNOWN_NAMES: [(&str, ContentType); 13] = [
    ("", JSON),
    ("json", JSON),
    ("jsonascii", JSON_ASCII),
    ("jsonp", JSONP),
    ("html", HTML),
    ("text", TEXT),
    ("protobuf", PROTOBUF),
    ("binary", BINARY),
    ("yaml", YAML),
    ("toml", TOML),
    ("xml", XML),
    ("msgpack", MSGPACK),
    ("xhtml", XHTML),
];

impl ContentType {
    /// Wrap a static string without allocating.
    #[must_use]
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// The full string, parameters included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `type/subtype` part, trimmed and lower-cased.
    #[must_use]
    pub fn essence(&self) -> String {
        self.0
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// The `key=value` parameters after the essence, keys lower-cased.
    pub fn params(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.0.split(';').skip(1).filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            Some((
                key.trim().to_ascii_lowercase(),
                value.trim().trim_matches('"'),
            ))
        })
    }

    /// Whether the parameter `key` is present with `value` (both case-insensitive).
    #[must_use]
    pub fn has_param(&self, key: &str, value: &str) -> bool {
        self.params()
            .any(|(k, v)| k.eq_ignore_ascii_case(key) && v.eq_ignore_ascii_case(value))
    }

    /// The value of the `Content-Type` header for this content type.
    ///
    /// Falls back to `application/octet-stream` for strings that cannot be a header value.
    #[must_use]
    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&self.0)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ContentType {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl FromStr for ContentType {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Cow::Owned(s.to_owned())))
    }
}

impl PartialEq<str> for ContentType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ContentType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact() {
        assert_ne!(JSON, JSON_ASCII);
        assert_eq!(JSON, ContentType::from("application/json; charset=utf-8".to_owned()));
        assert_eq!(JSON, "application/json; charset=utf-8");
    }

    #[test]
    fn essence_and_params() {
        let ct = ContentType::from_static("Application/XML ; Charset=\"UTF-8\"");
        assert_eq!(ct.essence(), "application/xml");
        assert!(ct.has_param("charset", "utf-8"));
        assert!(!ct.has_param("level", "1"));
        assert_eq!(BINARY.params().count(), 0);
    }

    #[test]
    fn header_value_round_trips() {
        assert_eq!(JSON.header_value(), "application/json; charset=utf-8");
        assert_eq!(
            ContentType::from("bad\nvalue".to_owned()).header_value(),
            "application/octet-stream"
        );
    }
}
