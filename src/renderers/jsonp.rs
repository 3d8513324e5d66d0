use skyzen_render_core::{content_type, Payload, Render, RenderError, RenderOptions, ResponseSink};

/// `application/javascript; charset=utf-8`: the JSON value wrapped in `callback(...);`.
///
/// Without [`RenderOptions::callback`] the bare JSON is written, still labelled as
/// JavaScript. Callback names are restricted to identifier characters, dots and brackets.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonpRender;

impl Render for JsonpRender {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        sink.ensure_content_type(&content_type::JSONP);
        let json = serde_json::to_vec(&*payload.value()).map_err(RenderError::encode)?;

        let Some(callback) = options.callback.as_deref().filter(|name| !name.is_empty()) else {
            sink.write(&json)?;
            return Ok(());
        };
        if !is_valid_callback(callback) {
            return Err(RenderError::encode(eyre::eyre!(
                "invalid JSONP callback `{callback}`"
            )));
        }

        let mut body = Vec::with_capacity(callback.len() + json.len() + 3);
        body.extend_from_slice(callback.as_bytes());
        body.push(b'(');
        body.extend_from_slice(&json);
        body.extend_from_slice(b");");
        sink.write(&body)?;
        Ok(())
    }
}

fn is_valid_callback(name: &str) -> bool {
    name.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'.' | b'[' | b']'))
}
