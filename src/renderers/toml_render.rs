use serde_json::Value;
use skyzen_render_core::{content_type, Payload, Render, RenderError, RenderOptions, ResponseSink};

/// `application/toml; charset=utf-8`.
///
/// TOML documents are tables, so the value must be a JSON object; anything else is an encode
/// error. TOML has no null: `null` table entries are left out, at any depth. A `null` array
/// element is still an encode error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlRender;

impl Render for TomlRender {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        _options: &RenderOptions,
    ) -> Result<(), RenderError> {
        sink.ensure_content_type(&content_type::TOML);
        let mut value = payload.value().into_owned();
        drop_nulls(&mut value);
        let document = toml::to_string(&value).map_err(RenderError::encode)?;
        sink.write(document.as_bytes())?;
        Ok(())
    }
}

fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            fields.retain(|_, field| !field.is_null());
            fields.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use skyzen_render_core::content_type::TOML;
    use skyzen_render_core::{MetaError, Recorder, StatusCode};

    use super::*;
    use crate::{renderers::register_builtins, Engine};

    #[test]
    fn renders_tables() {
        let mut recorder = Recorder::new();
        TomlRender
            .render(
                &mut recorder,
                Payload::Raw(&json!({"name": "skyzen", "port": 8080})),
                &RenderOptions::new(),
            )
            .unwrap();
        let body = recorder.body_string();
        assert!(body.contains("name = \"skyzen\""));
        assert!(body.contains("port = 8080"));
    }

    #[test]
    fn scalars_are_encode_errors() {
        let mut recorder = Recorder::new();
        let error = TomlRender
            .render(&mut recorder, Payload::Raw(&json!(3)), &RenderOptions::new())
            .unwrap_err();
        assert!(matches!(error, RenderError::Encode(_)));
    }

    #[test]
    fn null_entries_are_left_out() {
        let mut recorder = Recorder::new();
        TomlRender
            .render(
                &mut recorder,
                Payload::Raw(&json!({"data": null, "meta": {"cause": null, "code": 5}})),
                &RenderOptions::new(),
            )
            .unwrap();
        let body = recorder.body_string();
        assert!(!body.contains("data"));
        assert!(!body.contains("cause"));
        assert!(body.contains("code = 5"));
    }

    #[test]
    fn err_responses_render() {
        let engine = Engine::new();
        register_builtins(&engine).unwrap();
        let mut recorder = Recorder::new();
        engine
            .renderer(TOML)
            .err(&mut recorder, None, MetaError::not_found(), &RenderOptions::new())
            .unwrap();

        assert_eq!(recorder.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(recorder.headers().len(), 7);
        let body = recorder.body_string();
        assert!(body.contains("code = \"not_found(5)\""));
        assert!(!body.contains("data"));
    }
}
