use serde_json::Value;
use skyzen_render_core::{content_type, Payload, Render, RenderError, RenderOptions, ResponseSink};

/// `application/octet-stream`.
///
/// Strings are written as their UTF-8 bytes and arrays of integers in `0..=255` as raw
/// bytes. Anything else falls back to compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryRender;

impl Render for BinaryRender {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        _options: &RenderOptions,
    ) -> Result<(), RenderError> {
        sink.ensure_content_type(&content_type::BINARY);
        let value = payload.value();
        if let Value::String(text) = &*value {
            sink.write(text.as_bytes())?;
        } else if let Some(bytes) = as_bytes(&value) {
            sink.write(&bytes)?;
        } else {
            sink.write(value.to_string().as_bytes())?;
        }
        Ok(())
    }
}

fn as_bytes(value: &Value) -> Option<Vec<u8>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}
