use serde_json::Value;
use skyzen_render_core::{content_type, Payload, Render, RenderError, RenderOptions, ResponseSink};

/// `text/plain; charset=utf-8`. Strings are written verbatim, anything else as compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRender;

impl Render for TextRender {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        _options: &RenderOptions,
    ) -> Result<(), RenderError> {
        sink.ensure_content_type(&content_type::TEXT);
        match &*payload.value() {
            Value::String(text) => sink.write(text.as_bytes())?,
            other => sink.write(other.to_string().as_bytes())?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use skyzen_render_core::Recorder;

    use super::*;

    fn render(value: &Value) -> String {
        let mut recorder = Recorder::new();
        TextRender
            .render(&mut recorder, Payload::Raw(value), &RenderOptions::new())
            .unwrap();
        recorder.body_string()
    }

    #[test]
    fn strings_are_unquoted() {
        assert_eq!(render(&json!("hello")), "hello");
    }

    #[test]
    fn other_values_are_json() {
        assert_eq!(render(&json!(42)), "42");
        assert_eq!(render(&json!({"a": true})), r#"{"a":true}"#);
    }
}
