#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

//! Content negotiation, a renderer registry and response shaping for HTTP services.
//!
//! An [`Engine`] owns every lookup table. Per request, ask it which content type to answer
//! with, build a response, and render it through the bound content type:
//!
//! ```
//! use skyzen_render::{Engine, Payload, Recorder, Render, RenderOptions, ResponseOptions};
//!
//! let engine = Engine::new();
//! skyzen_render::renderers::register_builtins(&engine).unwrap();
//!
//! let request = http::Request::builder()
//!     .header("accept", "application/x-yaml, */*;q=0.1")
//!     .body(())
//!     .unwrap();
//! let content_type = engine.negotiate(Some(&request)).unwrap();
//!
//! let response = engine
//!     .new_response(serde_json::json!({"id": 7}), ResponseOptions::new())
//!     .unwrap();
//! let mut sink = Recorder::new();
//! engine
//!     .renderer(content_type)
//!     .render(&mut sink, Payload::Structured(&response), &RenderOptions::new())
//!     .unwrap();
//! assert!(sink.body_string().contains("id: 7"));
//! ```

#[macro_use]
mod macros;

mod app;
pub use app::AppInfo;

pub mod config;
pub use config::Config;

mod dispatch;
pub use dispatch::ContentRenderer;

mod engine;
pub use engine::{
    ContentTypeRegistry, Engine, NegotiatorRegistry, RenderRegistry, TransformerRegistry,
};

pub mod logging;

pub mod negotiation;
pub use negotiation::{AcceptNegotiator, FixedNegotiator, Negotiator};

pub mod renderers;

pub mod response;
pub use response::{Response, ResponseOptions, Transformer};

#[doc(inline)]
pub use skyzen_render_core::{
    content_type, header, render_fn, BoxResponse, ConfigError, ContentType, Error, HeaderMap,
    HeaderValue, MetaError, NegotiationError, Payload, Recorder, Registry, RegistryError, Render,
    RenderError, RenderFn, RenderOptions, ResponseLike, ResponseSink, Result, StatusCode, Value,
    ACCEPT_HEADER, TEMPLATE_HEADER,
};
