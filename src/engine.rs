//! The [`Engine`]: every registry and the app attributes, built once at start-up.

use std::sync::Arc;

use http::{HeaderMap, Request};
use serde_json::Value;
use skyzen_render_core::{
    content_type, header::ACCEPT, BoxResponse, ConfigError, ContentType, NegotiationError,
    Registry, Render,
};
use tracing::{debug, error, warn};

use crate::config::{resolve_name, Config};
use crate::dispatch::ContentRenderer;
use crate::negotiation::{AcceptNegotiator, Negotiator, DEFAULT_NEGOTIATOR};
use crate::renderers::JsonRender;
use crate::response::{transform, Response, ResponseOptions, Transformer};
use crate::AppInfo;

/// Renderers keyed by the content type they produce.
pub type RenderRegistry = Registry<ContentType, Arc<dyn Render>>;
/// Negotiation strategies keyed by name.
pub type NegotiatorRegistry = Registry<String, Arc<dyn Negotiator>>;
/// Response transformers keyed by template name.
pub type TransformerRegistry = Registry<String, Transformer>;
/// Content types keyed by lower-case short name.
pub type ContentTypeRegistry = Registry<String, ContentType>;

/// Owns the renderer, negotiator, transformer and content type name registries together
/// with the app attributes.
///
/// Build one at start-up, register what the deployment needs, then share it by reference
/// or `Arc` with every request handler.
///
/// ```
/// # use skyzen_render::{content_type::JSON, Engine};
/// let engine = Engine::new();
/// assert_eq!(engine.negotiate::<()>(None).unwrap(), JSON);
/// ```
pub struct Engine {
    renders: RenderRegistry,
    negotiators: NegotiatorRegistry,
    transformers: TransformerRegistry,
    content_types: ContentTypeRegistry,
    app: Arc<AppInfo>,
    default_content_type: ContentType,
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("renders", &self.renders)
            .field("negotiators", &self.negotiators)
            .field("transformers", &self.transformers)
            .field("app", &self.app)
            .field("default_content_type", &self.default_content_type)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with the stock setup: JSON as the default content type and its only
    /// renderer, [`AcceptNegotiator`] as the default strategy, the identity transformer,
    /// and the well-known content type names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_default(content_type::JSON, Arc::new(AppInfo::default()))
    }

    /// An engine configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownContentTypeName`] if the default content type does
    /// not resolve.
    pub fn with_config(config: &Config) -> Result<Self, ConfigError> {
        let default = resolve_name(&config.default_content_type).inspect_err(|error| {
            error!(%error, "invalid default content type");
        })?;
        let app = AppInfo::new(config.app_name.as_str(), config.app_version.as_str());
        Ok(Self::with_default(default, Arc::new(app)))
    }

    fn with_default(default: ContentType, app: Arc<AppInfo>) -> Self {
        let engine = Self {
            renders: Registry::new("renders"),
            negotiators: Registry::new("negotiators"),
            transformers: Registry::new("transformers"),
            content_types: Registry::new("content types"),
            app,
            default_content_type: default.clone(),
        };

        engine
            .renders
            .set(content_type::JSON, Arc::new(JsonRender::default()));
        engine.negotiators.set(
            DEFAULT_NEGOTIATOR.to_owned(),
            Arc::new(AcceptNegotiator::new(default)),
        );
        engine
            .transformers
            .set(String::new(), transform::identity());
        for (name, known) in content_type::WELL_KNOWN_NAMES {
            engine.content_types.set(name.to_owned(), known);
        }
        engine
    }

    /// Renderers keyed by content type.
    #[must_use]
    pub const fn renders(&self) -> &RenderRegistry {
        &self.renders
    }

    /// Negotiation strategies keyed by name.
    #[must_use]
    pub const fn negotiators(&self) -> &NegotiatorRegistry {
        &self.negotiators
    }

    /// Response transformers keyed by template name.
    #[must_use]
    pub const fn transformers(&self) -> &TransformerRegistry {
        &self.transformers
    }

    /// Content types keyed by lower-case short name.
    #[must_use]
    pub const fn content_types(&self) -> &ContentTypeRegistry {
        &self.content_types
    }

    /// The app attributes. Updates are seen by every response, including ones already built.
    #[must_use]
    pub const fn app(&self) -> &Arc<AppInfo> {
        &self.app
    }

    /// The answer for requests that state no preference.
    #[must_use]
    pub const fn default_content_type(&self) -> &ContentType {
        &self.default_content_type
    }

    /// Bind `content_type` to this engine, producing a renderer that dispatches through
    /// the renderer registry.
    #[must_use]
    pub fn renderer(&self, content_type: impl Into<ContentType>) -> ContentRenderer<'_> {
        ContentRenderer::new(self, content_type.into())
    }

    /// Bind the content type registered under the short `name` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownContentTypeName`] if no content type has that name.
    pub fn by_name(&self, name: &str) -> Result<ContentRenderer<'_>, ConfigError> {
        let content_type = self
            .content_types
            .get(&name.trim().to_ascii_lowercase())
            .map_err(|_| ConfigError::UnknownContentTypeName {
                name: name.to_owned(),
            })?;
        Ok(self.renderer(content_type))
    }

    /// Pick the content type to answer `request` with, using the default strategy.
    ///
    /// # Errors
    ///
    /// See [`Engine::negotiate_with`].
    pub fn negotiate<B>(
        &self,
        request: Option<&Request<B>>,
    ) -> Result<ContentType, NegotiationError> {
        self.negotiate_headers(request.map(Request::headers))
    }

    /// Like [`Engine::negotiate`], for callers that only have the request headers.
    ///
    /// # Errors
    ///
    /// See [`Engine::negotiate_with`].
    pub fn negotiate_headers(
        &self,
        headers: Option<&HeaderMap>,
    ) -> Result<ContentType, NegotiationError> {
        self.negotiate_with(DEFAULT_NEGOTIATOR, headers)
    }

    /// Pick a content type with the negotiator registered under `strategy`.
    ///
    /// Without headers, or without a non-blank `Accept` value, the default content type is
    /// returned and no registry is consulted.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError::NegotiatorNotFound`] if `strategy` is not registered,
    /// [`NegotiationError::NotAcceptable`] if no registered content type is acceptable, and
    /// [`NegotiationError::Unregistered`] if the chosen renderer vanished meanwhile.
    pub fn negotiate_with(
        &self,
        strategy: &str,
        headers: Option<&HeaderMap>,
    ) -> Result<ContentType, NegotiationError> {
        let Some(accept) = headers.and_then(accept_value) else {
            return Ok(self.default_content_type.clone());
        };

        let negotiator = self
            .negotiators
            .get(&strategy.to_owned())
            .map_err(|source| {
                warn!(strategy, %source, "negotiator not found");
                NegotiationError::NegotiatorNotFound {
                    strategy: strategy.to_owned(),
                    source,
                }
            })?;

        let offered = self.renders.keys();
        let content_type = negotiator
            .negotiate(&accept, &offered)
            .inspect_err(|error| warn!(%accept, %error, "negotiation failed"))?;

        if !self.renders.has(&content_type) {
            warn!(%content_type, "negotiated content type lost its renderer");
            return Err(NegotiationError::Unregistered { content_type });
        }
        debug!(%accept, %content_type, "negotiated");
        Ok(content_type)
    }

    /// Build a response for `data`, shaped by the transformer named in `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransformerNotFound`] if the template is not registered.
    pub fn new_response(
        &self,
        data: impl Into<Value>,
        options: ResponseOptions,
    ) -> Result<BoxResponse, ConfigError> {
        let response = Response::new(data, options, Arc::clone(&self.app));
        if response.template().is_empty() {
            return Ok(Box::new(response));
        }

        let transformer = self
            .transformers
            .get(&response.template().to_owned())
            .map_err(|_| {
                error!(template = response.template(), "response transformer not found");
                ConfigError::TransformerNotFound {
                    template: response.template().to_owned(),
                }
            })?;
        Ok(transformer(response))
    }
}

/// Every `Accept` value joined with `", "`; `None` if they are all blank.
///
/// Non-UTF-8 bytes are decoded lossily so the value is still negotiated.
fn accept_value(headers: &HeaderMap) -> Option<String> {
    let values = headers
        .get_all(ACCEPT)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect::<Vec<_>>();
    let joined = values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then_some(joined)
}
