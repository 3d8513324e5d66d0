//! Error and status metadata carried by every response.

use core::fmt::{self, Display};
use std::borrow::Cow;
use std::sync::Arc;

use http::StatusCode;
use serde_json::{Map, Value};

/// Error metadata: a stable code, a human message, an HTTP status, and optionally the
/// error that caused it.
///
/// # Examples
///
/// ```rust
/// # use skyzen_render_core::MetaError;
/// let error = MetaError::not_found();
/// assert_eq!(error.code(), "not_found(5)");
/// assert_eq!(error.status().as_u16(), 404);
/// assert_eq!(error.to_string(), "meta={source=errors;code=not_found(5)}:status={404}");
/// ```
#[derive(Debug, Clone)]
pub struct MetaError {
    source: Cow<'static, str>,
    name: Cow<'static, str>,
    number: u32,
    message: Cow<'static, str>,
    status: StatusCode,
    cause: Option<Arc<eyre::Report>>,
    attrs: Map<String, Value>,
}

meta_kinds! {
    /// Success. The default metadata of every response.
    ok => (0, "success", "success", StatusCode::OK);
    /// The operation was cancelled, typically by the caller.
    cancelled => (1, "cancelled", "cancelled", client_closed_request());
    /// An error that maps to no other kind.
    unknown => (2, "unknown", "unknown", StatusCode::INTERNAL_SERVER_ERROR);
    /// The client sent an invalid argument.
    invalid_argument => (3, "invalid_argument", "invalid argument", StatusCode::BAD_REQUEST);
    /// A deadline expired before the operation could complete.
    deadline_exceeded => (4, "deadline_exceeded", "deadline exceeded", StatusCode::GATEWAY_TIMEOUT);
    /// The requested entity was not found.
    not_found => (5, "not_found", "not found", StatusCode::NOT_FOUND);
    /// The entity the client tried to create already exists.
    already_exists => (6, "already_exists", "already exists", StatusCode::CONFLICT);
    /// The caller is not allowed to run the operation.
    permission_denied => (7, "permission_denied", "permission denied", StatusCode::FORBIDDEN);
    /// A quota or rate limit was hit.
    resource_exhausted => (8, "resource_exhausted", "resource exhausted", StatusCode::TOO_MANY_REQUESTS);
    /// The system is not in a state required for the operation.
    failed_precondition => (9, "failed_precondition", "failed precondition", StatusCode::BAD_REQUEST);
    /// The operation was aborted, typically because of a concurrency conflict.
    aborted => (10, "aborted", "aborted", StatusCode::CONFLICT);
    /// The operation was attempted past the valid range.
    out_of_range => (11, "out_of_range", "out of range", StatusCode::BAD_REQUEST);
    /// The operation is not implemented.
    unimplemented => (12, "unimplemented", "unimplemented", StatusCode::NOT_IMPLEMENTED);
    /// An internal invariant was broken.
    internal => (13, "internal", "internal", StatusCode::INTERNAL_SERVER_ERROR);
    /// The service is currently unavailable.
    unavailable => (14, "unavailable", "unavailable", StatusCode::SERVICE_UNAVAILABLE);
    /// Unrecoverable data loss or corruption.
    data_loss => (15, "data_loss", "data loss", StatusCode::INTERNAL_SERVER_ERROR);
    /// The request lacks valid authentication credentials.
    unauthenticated => (16, "unauthenticated", "unauthenticated", StatusCode::UNAUTHORIZED);
}

/// nginx's non-standard "client closed request".
fn client_closed_request() -> StatusCode {
    StatusCode::from_u16(499).unwrap_or(StatusCode::BAD_REQUEST)
}

impl MetaError {
    /// Create metadata for a custom kind, sourced from `errors`.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        number: u32,
        message: impl Into<Cow<'static, str>>,
        status: StatusCode,
    ) -> Self {
        Self {
            source: Cow::Borrowed("errors"),
            name: name.into(),
            number,
            message: message.into(),
            status,
            cause: None,
            attrs: Map::new(),
        }
    }

    /// Normalize any error into metadata.
    ///
    /// A [`MetaError`] (possibly behind an `eyre::Report`) is returned as is; anything
    /// else becomes [`MetaError::unknown`] with the error kept as its cause.
    pub fn from_error(error: impl Into<eyre::Report>) -> Self {
        match error.into().downcast::<Self>() {
            Ok(meta) => meta,
            Err(report) => Self::unknown().with_cause(report),
        }
    }

    /// Attach the error that caused this one.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<eyre::Report>) -> Self {
        self.cause = Some(Arc::new(cause.into()));
        self
    }

    /// Replace the source label (defaults to `errors`).
    #[must_use]
    pub fn with_source(mut self, source: impl Into<Cow<'static, str>>) -> Self {
        self.source = source.into();
        self
    }

    /// Replace the human readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Replace the HTTP status.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add an attribute to the key/value projection.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// The code string, `name(number)`.
    #[must_use]
    pub fn code(&self) -> String {
        format!("{}({})", self.name, self.number)
    }

    /// The bare code name, e.g. `not_found`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The numeric code.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// The human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status this metadata maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The error that caused this one, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&eyre::Report> {
        self.cause.as_deref()
    }

    /// Whether two values describe the same kind (source and code), ignoring causes.
    #[must_use]
    pub fn is(&self, other: &Self) -> bool {
        self.source == other.source && self.name == other.name && self.number == other.number
    }

    /// The key/value projection of this metadata.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("source".to_owned(), Value::from(&*self.source));
        map.insert("code".to_owned(), Value::from(self.code()));
        map.insert("message".to_owned(), Value::from(&*self.message));
        map.insert("status".to_owned(), Value::from(self.status.as_u16()));
        if let Some(cause) = &self.cause {
            map.insert("cause".to_owned(), Value::from(cause.to_string()));
        }
        for (key, value) in &self.attrs {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    fn fmt_meta(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "meta={{source={};code={}({})}}:status={{{}}}",
            self.source,
            self.name,
            self.number,
            self.status.as_u16()
        )
    }
}

impl Default for MetaError {
    fn default() -> Self {
        Self::ok()
    }
}

impl Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => {
                write!(f, "{cause}:error={{")?;
                self.fmt_meta(f)?;
                f.write_str("}")
            }
            None => self.fmt_meta(f),
        }
    }
}

impl std::error::Error for MetaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|report| &**report as &(dyn std::error::Error + 'static))
    }
}
