//! Error types shared across the crate.
//!
//! Errors fall into two camps. [`ConfigError`] means the process was wired up wrong
//! (a duplicate registration, a template nobody registered) and cannot be fixed while
//! serving; callers are expected to abort on it. Everything else is a per-request
//! failure the caller may recover from, e.g. by falling back to another representation.

use thiserror::Error as ThisError;

use crate::ContentType;

/// A specialized `Result` type for this crate, defaulting to the umbrella [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failure of a [`Registry`](crate::Registry) operation.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum RegistryError {
    /// `register` was called for a key that is already present.
    #[error("{registry}: `{key}` already exists")]
    AlreadyExists {
        /// Name of the registry.
        registry: &'static str,
        /// The offending key.
        key: String,
    },
    /// `get` was called for a key that is not present.
    #[error("{registry}: `{key}` not found")]
    NotFound {
        /// Name of the registry.
        registry: &'static str,
        /// The missing key.
        key: String,
    },
}

/// A deployment mistake. These are fatal: nothing at request time can repair them.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// A response asked for a template that no transformer is registered under.
    #[error("response transformer `{template}` not found")]
    TransformerNotFound {
        /// The requested template name.
        template: String,
    },
    /// A short content type name (`json`, `yaml`, ...) that is not registered.
    #[error("content type name `{name}` not found")]
    UnknownContentTypeName {
        /// The requested name.
        name: String,
    },
    /// A start-up registration clashed with an existing entry.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The configuration source could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Content negotiation could not pick a representation for a request.
#[derive(Debug, ThisError)]
pub enum NegotiationError {
    /// No negotiator is registered under the requested strategy name.
    #[error("negotiator `{strategy}` not found")]
    NegotiatorNotFound {
        /// The strategy name that was looked up.
        strategy: String,
        /// The registry lookup failure.
        #[source]
        source: RegistryError,
    },
    /// None of the offered content types is acceptable to the client.
    #[error("no acceptable content type for `{accept}`")]
    NotAcceptable {
        /// The raw `Accept` value.
        accept: String,
    },
    /// The negotiator answered with a content type that has no renderer.
    #[error("render not found for {content_type}")]
    Unregistered {
        /// The content type the negotiator picked.
        content_type: ContentType,
    },
}

/// Rendering a payload into a response failed.
#[derive(Debug, ThisError)]
pub enum RenderError {
    /// No renderer is registered for the content type.
    #[error("get render failed for {content_type}")]
    RendererNotFound {
        /// The content type that was looked up.
        content_type: ContentType,
        /// The registry lookup failure.
        #[source]
        source: RegistryError,
    },
    /// The concrete encoder rejected the value.
    #[error(transparent)]
    Encode(eyre::Report),
    /// Writing to the sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The response could not be built because of a configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RenderError {
    /// Wrap an encoder failure.
    pub fn encode(error: impl Into<eyre::Report>) -> Self {
        Self::Encode(error.into())
    }
}

/// Any error produced by this crate.
#[derive(Debug, ThisError)]
pub enum Error {
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// See [`NegotiationError`].
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),
    /// See [`RenderError`].
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl Error {
    /// Whether this error is a configuration mistake the process should abort on.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Render(RenderError::Config(_)))
    }
}
