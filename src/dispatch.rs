//! A content type bound to an engine, rendering through whatever is registered for it.

use http::HeaderMap;
use serde_json::Value;
use skyzen_render_core::{
    ContentType, Payload, Render, RenderError, RenderOptions, ResponseSink, TEMPLATE_HEADER,
};
use tracing::{debug, warn};

use crate::{Engine, ResponseOptions};

/// Renders with the renderer registered for its content type.
///
/// Structured payloads get their headers and status written before the body is handed to
/// the concrete renderer; raw values go straight through. Obtain one with
/// [`Engine::renderer`] or [`Engine::by_name`].
#[derive(Debug, Clone)]
pub struct ContentRenderer<'e> {
    engine: &'e Engine,
    content_type: ContentType,
}

impl<'e> ContentRenderer<'e> {
    pub(crate) const fn new(engine: &'e Engine, content_type: ContentType) -> Self {
        Self {
            engine,
            content_type,
        }
    }

    /// The content type this renderer dispatches on.
    #[must_use]
    pub const fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Render `data` as a successful response.
    ///
    /// A raw value is first wrapped in a [`Response`](crate::Response) shaped by the
    /// template named in the request's `X-Render-Template` header. Structured payloads are
    /// rendered as they are.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Config`] if the requested template is not registered, and
    /// whatever [`Render::render`] returns otherwise.
    pub fn ok(
        &self,
        sink: &mut dyn ResponseSink,
        request_headers: Option<&HeaderMap>,
        data: Payload<'_>,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        match data {
            Payload::Structured(_) => self.render(sink, data, options),
            Payload::Raw(value) => {
                let response = self.engine.new_response(
                    value.clone(),
                    ResponseOptions::new().with_template(template(request_headers)),
                )?;
                self.render(sink, Payload::Structured(&response), options)
            }
        }
    }

    /// Render `error` as a response without data, shaped by the request's template.
    ///
    /// # Errors
    ///
    /// Same as [`ContentRenderer::ok`].
    pub fn err(
        &self,
        sink: &mut dyn ResponseSink,
        request_headers: Option<&HeaderMap>,
        error: impl Into<eyre::Report>,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        let response = self.engine.new_response(
            Value::Null,
            ResponseOptions::new()
                .with_error(error)
                .with_template(template(request_headers)),
        )?;
        self.render(sink, Payload::Structured(&response), options)
    }
}

impl Render for ContentRenderer<'_> {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        let render = self
            .engine
            .renders()
            .get(&self.content_type)
            .map_err(|source| {
                warn!(content_type = %self.content_type, "no renderer registered");
                RenderError::RendererNotFound {
                    content_type: self.content_type.clone(),
                    source,
                }
            })?;

        match payload {
            Payload::Structured(response) => {
                sink.ensure_content_type(&self.content_type);
                let headers = sink.headers_mut();
                for (name, value) in &response.header() {
                    headers.append(name, value.clone());
                }
                let status = response.status();
                sink.write_status(status);
                debug!(content_type = %self.content_type, %status, "rendering response");
                render.render(sink, Payload::Raw(&response.body()), options)
            }
            Payload::Raw(_) => render.render(sink, payload, options),
        }
    }
}

fn template(request_headers: Option<&HeaderMap>) -> String {
    request_headers
        .and_then(|headers| headers.get(TEMPLATE_HEADER))
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_owned())
        .unwrap_or_default()
}
