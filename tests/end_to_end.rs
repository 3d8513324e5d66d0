use std::sync::Arc;

use http::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{json, Value};
use skyzen_render::{
    content_type::{HTML, JSON, XHTML, XML},
    render_fn,
    response::{transformer, NoTimestamp},
    BoxResponse, Engine, HeaderMap, MetaError, Payload, Recorder, Render, RenderError,
    RenderOptions, Response, ResponseLike, ResponseOptions, ResponseSink, StatusCode,
    TEMPLATE_HEADER,
};

const BROWSER: &str = "text/html, application/xhtml+xml, application/xml;q=0.9, */*;q=0.8";

#[derive(Debug, thiserror::Error)]
#[error("xxx")]
struct Plain;

fn engine() -> Engine {
    let engine = Engine::new();
    engine.app().set_name("myapp");
    engine.app().set_version("0.3.0");
    engine
        .transformers()
        .register("no_timestamp".to_owned(), transformer(NoTimestamp))
        .unwrap();
    engine
}

fn data() -> Value {
    json!({"one": 1, "string": "string"})
}

fn json_body(recorder: &Recorder) -> Value {
    serde_json::from_slice(recorder.body()).unwrap()
}

fn render_raw(engine: &Engine, value: &Value) -> Recorder {
    let mut recorder = Recorder::new();
    engine
        .renderer(JSON)
        .render(&mut recorder, Payload::Raw(value), &RenderOptions::new())
        .unwrap();
    recorder
}

#[test]
fn raw_values_render_with_one_header() {
    let engine = engine();

    for (value, expected) in [(Value::Null, "null"), (json!(101), "101")] {
        let recorder = render_raw(&engine, &value);
        assert_eq!(recorder.status(), Some(StatusCode::OK));
        assert_eq!(recorder.headers().len(), 1);
        assert_eq!(recorder.body_string(), expected);
    }

    let recorder = render_raw(&engine, &data());
    assert_eq!(recorder.headers().len(), 1);
    assert_eq!(json_body(&recorder), data());
}

#[test]
fn not_found_without_timestamp() {
    let engine = engine();

    let content_type = engine.negotiate::<()>(None).unwrap();
    assert_eq!(content_type, JSON);

    let response = engine
        .new_response(
            data(),
            ResponseOptions::new()
                .with_error(MetaError::not_found())
                .with_template("no_timestamp"),
        )
        .unwrap();
    let mut recorder = Recorder::new();
    engine
        .renderer(content_type)
        .render(&mut recorder, Payload::Structured(&response), &RenderOptions::new())
        .unwrap();

    let response = http::Response::from(recorder);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let headers = response.headers();
    assert_eq!(headers.len(), 7);
    assert_eq!(headers[CONTENT_TYPE], JSON.as_str());
    assert_eq!(headers["x-app"], "myapp");
    assert_eq!(headers["x-version"], "0.3.0");
    assert_eq!(headers["x-code"], "not_found(5)");
    assert_eq!(headers["x-message"], "not found");
    assert_eq!(
        headers["x-detail"],
        "meta={source=errors;code=not_found(5)}:status={404}"
    );
    assert_eq!(headers["x-render-template"], "no_timestamp");

    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(
        body,
        json!({
            "app": "myapp",
            "code": "not_found(5)",
            "data": {"one": 1, "string": "string"},
            "detail": "meta={source=errors;code=not_found(5)}:status={404}",
            "message": "not found",
            "version": "0.3.0"
        })
    );
}

#[test]
fn unregistered_content_type_fails() {
    let engine = engine();
    let mut recorder = Recorder::new();
    let error = engine
        .renderer(XML)
        .render(&mut recorder, Payload::Raw(&Value::Null), &RenderOptions::new())
        .unwrap_err();
    assert!(matches!(error, RenderError::RendererNotFound { .. }));
}

#[test]
fn ok_by_name_with_request_template() {
    let engine = engine();
    let request = http::Request::builder()
        .header(TEMPLATE_HEADER, "no_timestamp")
        .body(())
        .unwrap();

    let mut recorder = Recorder::new();
    engine
        .by_name("json")
        .unwrap()
        .ok(
            &mut recorder,
            Some(request.headers()),
            Payload::Raw(&data()),
            &RenderOptions::new(),
        )
        .unwrap();

    assert_eq!(recorder.status(), Some(StatusCode::OK));
    assert_eq!(recorder.headers()["x-code"], "success(0)");
    assert_eq!(
        json_body(&recorder),
        json!({
            "app": "myapp",
            "code": "success(0)",
            "data": {"one": 1, "string": "string"},
            "detail": "meta={source=errors;code=success(0)}:status={200}",
            "message": "success",
            "version": "0.3.0"
        })
    );
}

#[test]
fn err_through_negotiation() {
    let engine = engine();
    let request = http::Request::builder()
        .header(TEMPLATE_HEADER, "no_timestamp")
        .header(
            ACCEPT,
            "application/json, text/html, application/xhtml+xml, application/xml;q=0.9, */*;q=0.8",
        )
        .body(())
        .unwrap();

    let content_type = engine.negotiate(Some(&request)).unwrap();
    let mut recorder = Recorder::new();
    engine
        .renderer(content_type)
        .err(
            &mut recorder,
            Some(request.headers()),
            MetaError::already_exists().with_cause(Plain),
            &RenderOptions::new(),
        )
        .unwrap();

    let detail = "xxx:error={meta={source=errors;code=already_exists(6)}:status={409}}";
    assert_eq!(recorder.status(), Some(StatusCode::CONFLICT));
    assert_eq!(recorder.headers()[CONTENT_TYPE], JSON.as_str());
    assert_eq!(recorder.headers()["x-code"], "already_exists(6)");
    assert_eq!(recorder.headers()["x-message"], "already exists");
    assert_eq!(recorder.headers()["x-detail"], detail);
    assert_eq!(
        json_body(&recorder),
        json!({
            "app": "myapp",
            "code": "already_exists(6)",
            "data": null,
            "detail": detail,
            "message": "already exists",
            "version": "0.3.0"
        })
    );
}

#[test]
fn negotiation_follows_registered_renderers() {
    let engine = engine();
    let request = http::Request::builder()
        .header(ACCEPT, BROWSER)
        .body(())
        .unwrap();
    let noop = || Arc::new(render_fn(|_, _, _| Ok(()))) as Arc<dyn Render>;

    assert_eq!(engine.negotiate(Some(&request)).unwrap(), JSON);
    for (content_type, expected) in [(XML, XML), (XHTML, XHTML), (HTML, HTML)] {
        engine.renders().register(content_type, noop()).unwrap();
        assert_eq!(engine.negotiate(Some(&request)).unwrap(), expected);
    }
}

#[test]
fn builtins_answer_browsers_with_xml() {
    let engine = engine();
    skyzen_render::renderers::register_builtins(&engine).unwrap();
    let request = http::Request::builder()
        .header(ACCEPT, BROWSER)
        .header(TEMPLATE_HEADER, "no_timestamp")
        .body(())
        .unwrap();

    let content_type = engine.negotiate(Some(&request)).unwrap();
    assert_eq!(content_type, XML);

    let mut recorder = Recorder::new();
    engine
        .renderer(content_type)
        .err(
            &mut recorder,
            Some(request.headers()),
            MetaError::not_found(),
            &RenderOptions::new(),
        )
        .unwrap();
    assert_eq!(recorder.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(recorder.headers()[CONTENT_TYPE], XML.as_str());
    let body = recorder.body_string();
    assert!(body.starts_with("<response>"));
    assert!(body.contains("<app>myapp</app>"));
    assert!(!body.contains("timestamp"));
}

/// Reinterprets a response completely.
struct Reexport;

impl ResponseLike for Reexport {
    fn status(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    fn header(&self) -> HeaderMap {
        HeaderMap::new()
    }

    fn body(&self) -> Value {
        Value::Null
    }
}

/// Keeps the base shape but overrides status and adds a header.
struct Embed(Response);

impl ResponseLike for Embed {
    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn header(&self) -> HeaderMap {
        let mut header = self.0.header();
        header.insert("embed", http::HeaderValue::from_static("true"));
        header
    }

    fn body(&self) -> Value {
        self.0.body()
    }
}

#[test]
fn custom_transformers() {
    let engine = engine();
    engine
        .transformers()
        .register(
            "reexport".to_owned(),
            Arc::new(|_: Response| Box::new(Reexport) as BoxResponse),
        )
        .unwrap();
    engine
        .transformers()
        .register("embed".to_owned(), transformer(Embed))
        .unwrap();

    let response = engine.new_response(data(), ResponseOptions::new()).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.header().len(), 6);
    assert_eq!(response.body().as_object().unwrap().len(), 7);

    let response = engine
        .new_response(data(), ResponseOptions::new().with_template("reexport"))
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.header().is_empty());
    assert_eq!(response.body(), Value::Null);

    let response = engine
        .new_response(data(), ResponseOptions::new().with_template("embed"))
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.header().len(), 7);
    assert_eq!(response.body().as_object().unwrap().len(), 7);
}
