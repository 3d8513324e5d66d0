//! Negotiates a handful of `Accept` headers against every built-in renderer and prints
//! what would go over the wire. Run with `cargo run --example negotiate`.

use skyzen_render::{
    logging::init_logging,
    renderers::register_builtins,
    response::{transformer, NoTimestamp},
    Config, Engine, MetaError, Payload, Recorder, Render, RenderOptions, ResponseOptions,
};

fn main() -> color_eyre::Result<()> {
    init_logging();

    let engine = Engine::with_config(&Config::from_env())?;
    if engine.app().name().is_empty() {
        engine.app().set_name("negotiate-demo");
    }
    register_builtins(&engine)?;
    engine
        .transformers()
        .register("no_timestamp".to_owned(), transformer(NoTimestamp))?;

    let accepts = [
        None,
        Some("text/html, application/xhtml+xml, application/xml;q=0.9, */*;q=0.8"),
        Some("application/x-yaml"),
        Some("application/toml, application/json;q=0.5"),
        Some("text/*"),
        Some("image/png"),
    ];

    for accept in accepts {
        let mut builder = http::Request::builder().header("x-render-template", "no_timestamp");
        if let Some(accept) = accept {
            builder = builder.header("accept", accept);
        }
        let request = builder.body(())?;

        let content_type = match engine.negotiate(Some(&request)) {
            Ok(content_type) => content_type,
            Err(error) => {
                println!("Accept: {accept:?}\n  -> {error}\n");
                continue;
            }
        };

        let response = engine.new_response(
            serde_json::json!({"id": 7, "name": "skyzen"}),
            ResponseOptions::new()
                .with_meta(MetaError::ok())
                .with_template("no_timestamp"),
        )?;
        let mut sink = Recorder::new();
        engine.renderer(content_type.clone()).render(
            &mut sink,
            Payload::Structured(&response),
            &RenderOptions::new(),
        )?;

        let (status, _, body) = sink.into_parts();
        println!(
            "Accept: {accept:?}\n  -> {content_type} ({status}, {} bytes)\n{}\n",
            body.len(),
            String::from_utf8_lossy(&body)
        );
    }

    Ok(())
}
