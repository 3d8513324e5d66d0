//! The response model: business data plus error metadata, shaped per template.
//!
//! A [`Response`] knows its own status, headers and body. Build one with
//! [`Engine::new_response`](crate::Engine::new_response), which also applies the
//! transformer named by [`ResponseOptions::with_template`].

pub mod transform;
pub use transform::{transformer, DataOnly, NoTimestamp, Transformer};

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use skyzen_render_core::{MetaError, ResponseLike, StatusCode, TEMPLATE_HEADER};

use crate::AppInfo;

#[allow(clippy::declare_interior_mutable_const)]
/// `X-App` response header.
pub const X_APP: HeaderName = HeaderName::from_static("x-app");
#[allow(clippy::declare_interior_mutable_const)]
/// `X-Version` response header.
pub const X_VERSION: HeaderName = HeaderName::from_static("x-version");
#[allow(clippy::declare_interior_mutable_const)]
/// `X-Code` response header.
pub const X_CODE: HeaderName = HeaderName::from_static("x-code");
#[allow(clippy::declare_interior_mutable_const)]
/// `X-Message` response header.
pub const X_MESSAGE: HeaderName = HeaderName::from_static("x-message");
#[allow(clippy::declare_interior_mutable_const)]
/// `X-Detail` response header.
pub const X_DETAIL: HeaderName = HeaderName::from_static("x-detail");
#[allow(clippy::declare_interior_mutable_const)]
/// `X-Render-Template` response header.
pub const X_RENDER_TEMPLATE: HeaderName = HeaderName::from_static(TEMPLATE_HEADER);

/// Options applied while building a [`Response`].
///
/// Each setter returns the updated options, so a call site reads as one expression:
///
/// ```
/// # use skyzen_render::{MetaError, ResponseOptions};
/// let options = ResponseOptions::new()
///     .with_meta(MetaError::not_found())
///     .with_kv("trace_id", "abc")
///     .with_template("no_timestamp");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseOptions {
    meta: Option<MetaError>,
    extension: HashMap<String, Value>,
    template: String,
}

impl ResponseOptions {
    /// No error, no extension values, identity template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an error. A [`MetaError`] is kept as is; anything else becomes
    /// [`MetaError::unknown`] with the error preserved as its cause.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<eyre::Report>) -> Self {
        self.meta = Some(MetaError::from_error(error));
        self
    }

    /// Attach error metadata directly.
    #[must_use]
    pub fn with_meta(mut self, meta: MetaError) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Store an extension value. A later value for the same key replaces the earlier one.
    #[must_use]
    pub fn with_kv(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extension.insert(key.into(), value.into());
        self
    }

    /// Name the transformer to apply. Empty means identity.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// The template name these options ask for.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

/// Business data together with error metadata, extension values and a template name.
#[derive(Debug, Clone)]
pub struct Response {
    meta: MetaError,
    data: Value,
    extension: HashMap<String, Value>,
    template: String,
    app: Arc<AppInfo>,
    projection: OnceLock<Map<String, Value>>,
}

impl Response {
    /// Build an untransformed response. The metadata defaults to [`MetaError::ok`].
    pub fn new(data: impl Into<Value>, options: ResponseOptions, app: Arc<AppInfo>) -> Self {
        let ResponseOptions {
            meta,
            extension,
            template,
        } = options;
        Self {
            meta: meta.unwrap_or_default(),
            data: data.into(),
            extension,
            template,
            app,
            projection: OnceLock::new(),
        }
    }

    /// The error metadata.
    #[must_use]
    pub const fn meta(&self) -> &MetaError {
        &self.meta
    }

    /// The business payload.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// The extension values.
    #[must_use]
    pub const fn extension(&self) -> &HashMap<String, Value> {
        &self.extension
    }

    /// The template this response was built for.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The app attributes stamped on headers and body.
    #[must_use]
    pub const fn app(&self) -> &Arc<AppInfo> {
        &self.app
    }

    /// Look `key` up in the extension values, then in the metadata's key/value view.
    ///
    /// The metadata view is built on first use and cached.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extension.get(key).or_else(|| {
            self.projection
                .get_or_init(|| self.meta.to_map())
                .get(key)
        })
    }
}

impl ResponseLike for Response {
    fn status(&self) -> StatusCode {
        self.meta.status()
    }

    fn header(&self) -> HeaderMap {
        let mut header = HeaderMap::with_capacity(6);
        header.insert(X_APP, header_value(&self.app.name()));
        header.insert(X_VERSION, header_value(&self.app.version()));
        header.insert(X_CODE, header_value(&self.meta.code()));
        header.insert(X_MESSAGE, header_value(self.meta.message()));
        header.insert(X_DETAIL, header_value(&self.meta.to_string()));
        header.insert(X_RENDER_TEMPLATE, header_value(&self.template));
        header
    }

    fn body(&self) -> Value {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());

        let mut body = Map::with_capacity(7);
        body.insert("app".to_owned(), Value::from(self.app.name().as_str()));
        body.insert("version".to_owned(), Value::from(self.app.version().as_str()));
        body.insert("code".to_owned(), Value::from(self.meta.code()));
        body.insert("message".to_owned(), Value::from(self.meta.message()));
        body.insert("detail".to_owned(), Value::from(self.meta.to_string()));
        body.insert("timestamp".to_owned(), Value::from(timestamp));
        body.insert("data".to_owned(), self.data.clone());
        Value::Object(body)
    }
}

/// Header values cannot carry control characters; replace them with spaces.
fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| {
        let cleaned: String = value
            .chars()
            .map(|c| if c.is_control() && c != '\t' { ' ' } else { c })
            .collect();
        HeaderValue::from_str(&cleaned).unwrap_or_else(|_| HeaderValue::from_static(""))
    })
}
