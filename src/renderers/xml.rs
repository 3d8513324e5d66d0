use serde_json::{json, Value};
use skyzen_render_core::{content_type, Payload, Render, RenderError, RenderOptions, ResponseSink};

/// Name of the document element every XML body is wrapped in.
pub const XML_ROOT: &str = "response";

/// `application/xml; charset=utf-8`.
///
/// The value becomes the children of a `<response>` element: object fields as elements named
/// after their keys, arrays as repeated elements. A top-level array is written as repeated
/// `<item>` elements. Keys that are not valid XML names are an encode error.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRender;

impl Render for XmlRender {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        _options: &RenderOptions,
    ) -> Result<(), RenderError> {
        sink.ensure_content_type(&content_type::XML);
        let value = match payload.value().into_owned() {
            Value::Array(items) => json!({ "item": items }),
            value => value,
        };
        let document =
            quick_xml::se::to_string_with_root(XML_ROOT, &value).map_err(RenderError::encode)?;
        sink.write(document.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_TYPE;
    use skyzen_render_core::content_type::XML;
    use skyzen_render_core::{MetaError, Recorder, StatusCode};

    use super::*;
    use crate::{renderers::register_builtins, Engine};

    fn render(value: &Value) -> Result<Recorder, RenderError> {
        let mut recorder = Recorder::new();
        XmlRender.render(&mut recorder, Payload::Raw(value), &RenderOptions::new())?;
        Ok(recorder)
    }

    #[test]
    fn wraps_objects_in_the_root() {
        let recorder = render(&json!({"name": "skyzen", "port": 8080})).unwrap();
        assert_eq!(
            recorder.body_string(),
            "<response><name>skyzen</name><port>8080</port></response>"
        );
        assert_eq!(recorder.headers()[CONTENT_TYPE], XML.as_str());
    }

    #[test]
    fn top_level_arrays_become_items() {
        let recorder = render(&json!([1, 2])).unwrap();
        assert_eq!(
            recorder.body_string(),
            "<response><item>1</item><item>2</item></response>"
        );
    }

    #[test]
    fn invalid_names_are_encode_errors() {
        let error = render(&json!({"1": "one"})).unwrap_err();
        assert!(matches!(error, RenderError::Encode(_)));
    }

    #[test]
    fn renders_ok_and_err_responses() {
        let engine = Engine::new();
        engine.app().set_name("myapp");
        register_builtins(&engine).unwrap();

        let mut recorder = Recorder::new();
        engine
            .renderer(XML)
            .ok(&mut recorder, None, Payload::Raw(&json!({"one": 1})), &RenderOptions::new())
            .unwrap();
        let body = recorder.body_string();
        assert!(body.starts_with("<response>"));
        assert!(body.contains("<app>myapp</app>"));
        assert!(body.contains("<data><one>1</one></data>"));

        let mut recorder = Recorder::new();
        engine
            .renderer(XML)
            .err(&mut recorder, None, MetaError::not_found(), &RenderOptions::new())
            .unwrap();
        assert_eq!(recorder.status(), Some(StatusCode::NOT_FOUND));
        assert!(recorder.body_string().contains("<code>not_found(5)</code>"));
    }
}
