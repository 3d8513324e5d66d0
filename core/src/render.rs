use core::fmt::{self, Debug};
use std::borrow::Cow;

use http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::{RenderError, ResponseSink};

/// A value that knows its own status, headers and body.
///
/// `skyzen_render::Response` is the canonical implementation; transformers return other
/// shapes that wrap or reinterpret it.
pub trait ResponseLike {
    /// HTTP status of the response.
    fn status(&self) -> StatusCode;
    /// Headers to merge into the outgoing response.
    fn header(&self) -> HeaderMap;
    /// The value handed to the concrete encoder.
    fn body(&self) -> Value;
}

/// A boxed, thread-safe [`ResponseLike`].
pub type BoxResponse = Box<dyn ResponseLike + Send + Sync>;

impl<T: ResponseLike + ?Sized> ResponseLike for Box<T> {
    fn status(&self) -> StatusCode {
        (**self).status()
    }

    fn header(&self) -> HeaderMap {
        (**self).header()
    }

    fn body(&self) -> Value {
        (**self).body()
    }
}

/// What a renderer is asked to write.
#[derive(Clone, Copy)]
pub enum Payload<'a> {
    /// A response carrying its own status and headers.
    Structured(&'a dyn ResponseLike),
    /// A plain value.
    Raw(&'a Value),
}

impl Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured(response) => f
                .debug_tuple("Structured")
                .field(&response.status())
                .finish(),
            Self::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
        }
    }
}

impl<'a> Payload<'a> {
    /// The value to encode: the body of a structured payload, or the raw value itself.
    #[must_use]
    pub fn value(&self) -> Cow<'a, Value> {
        match *self {
            Self::Structured(response) => Cow::Owned(response.body()),
            Self::Raw(value) => Cow::Borrowed(value),
        }
    }
}

impl<'a> From<&'a Value> for Payload<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Raw(value)
    }
}

impl<'a, T: ResponseLike> From<&'a T> for Payload<'a> {
    fn from(response: &'a T) -> Self {
        Self::Structured(response)
    }
}

/// Per-call knobs for renderers. Renderers ignore the fields they do not understand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Callback name wrapped around JSONP output.
    pub callback: Option<String>,
    /// Indent JSON output.
    pub pretty: bool,
}

impl RenderOptions {
    /// Options with every knob at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JSONP callback.
    #[must_use]
    pub fn callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Toggle indented JSON.
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Write a payload into a response.
///
/// Implemented by every concrete encoder, by [`RenderFn`], and by content types bound
/// to an engine.
pub trait Render: Send + Sync {
    /// Write `payload` to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be encoded or the sink rejects the write.
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        options: &RenderOptions,
    ) -> Result<(), RenderError>;
}

/// A renderer backed by a plain function. Build one with [`render_fn`].
#[derive(Clone, Copy)]
pub struct RenderFn<F>(F);

impl<F> Debug for RenderFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderFn")
    }
}

/// Turn a function into a [`Render`].
///
/// ```rust
/// # use skyzen_render_core::{render_fn, Payload, Recorder, Render, RenderOptions, Value};
/// let upper = render_fn(|sink, payload, _options| {
///     let text = payload.value().to_string().to_uppercase();
///     sink.write(text.as_bytes())?;
///     Ok(())
/// });
///
/// let mut recorder = Recorder::new();
/// upper.render(&mut recorder, Payload::Raw(&Value::from("hi")), &RenderOptions::new()).unwrap();
/// assert_eq!(recorder.body(), br#""HI""#);
/// ```
pub const fn render_fn<F>(f: F) -> RenderFn<F>
where
    F: Fn(&mut dyn ResponseSink, Payload<'_>, &RenderOptions) -> Result<(), RenderError>
        + Send
        + Sync,
{
    RenderFn(f)
}

impl<F> Render for RenderFn<F>
where
    F: Fn(&mut dyn ResponseSink, Payload<'_>, &RenderOptions) -> Result<(), RenderError>
        + Send
        + Sync,
{
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        (self.0)(sink, payload, options)
    }
}

impl<T: Render + ?Sized> Render for std::sync::Arc<T> {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        (**self).render(sink, payload, options)
    }
}
