use std::fmt::Write as _;

use skyzen_render_core::{content_type, Payload, Render, RenderError, RenderOptions, ResponseSink};

/// `application/json; charset=utf-8`.
///
/// Output is compact unless [`RenderOptions::pretty`] is set for the call or the renderer
/// was built with [`JsonRender::pretty`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRender {
    pretty: bool,
}

impl JsonRender {
    /// A renderer that always indents.
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Render for JsonRender {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        sink.ensure_content_type(&content_type::JSON);
        let value = payload.value();
        let bytes = if self.pretty || options.pretty {
            serde_json::to_vec_pretty(&*value)
        } else {
            serde_json::to_vec(&*value)
        }
        .map_err(RenderError::encode)?;
        sink.write(&bytes)?;
        Ok(())
    }
}

/// `application/json` with every non-ASCII character written as a `\uXXXX` escape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAsciiRender;

impl Render for JsonAsciiRender {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        _options: &RenderOptions,
    ) -> Result<(), RenderError> {
        sink.ensure_content_type(&content_type::JSON_ASCII);
        let json = serde_json::to_string(&*payload.value()).map_err(RenderError::encode)?;
        sink.write(escape_non_ascii(&json).as_bytes())?;
        Ok(())
    }
}

/// Non-ASCII only occurs inside JSON strings, so escaping it in place keeps the document valid.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            let mut units = [0; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(escaped, "\\u{unit:04x}");
            }
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_TYPE;
    use serde_json::{json, Value};
    use skyzen_render_core::Recorder;

    use super::*;

    #[test]
    fn compact_by_default() {
        let mut recorder = Recorder::new();
        JsonRender::default()
            .render(&mut recorder, Payload::Raw(&json!({"a": [1, 2]})), &RenderOptions::new())
            .unwrap();
        assert_eq!(recorder.body_string(), r#"{"a":[1,2]}"#);
        assert_eq!(recorder.headers()[CONTENT_TYPE], content_type::JSON.as_str());
    }

    #[test]
    fn pretty_on_request() {
        let value = json!({"a": 1});
        let mut per_call = Recorder::new();
        JsonRender::default()
            .render(&mut per_call, Payload::Raw(&value), &RenderOptions::new().pretty(true))
            .unwrap();
        let mut always = Recorder::new();
        JsonRender::pretty()
            .render(&mut always, Payload::Raw(&value), &RenderOptions::new())
            .unwrap();

        assert_eq!(per_call.body_string(), "{\n  \"a\": 1\n}");
        assert_eq!(per_call.body(), always.body());
    }

    #[test]
    fn ascii_escapes_non_ascii() {
        let mut recorder = Recorder::new();
        let value = json!({"greeting": "héllo 😀"});
        JsonAsciiRender
            .render(&mut recorder, Payload::Raw(&value), &RenderOptions::new())
            .unwrap();

        let body = recorder.body_string();
        assert!(body.is_ascii());
        assert_eq!(body, r#"{"greeting":"h\u00e9llo \ud83d\ude00"}"#);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), value);
        assert_eq!(recorder.headers()[CONTENT_TYPE], "application/json");
    }
}
