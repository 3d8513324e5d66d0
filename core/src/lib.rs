#![deny(unsafe_code)]
//! Base types and traits for content-negotiated rendering.
//!
//! This crate holds the pieces every format module and strategy needs to agree on:
//! the [`Registry`] used for every lookup table, the [`ContentType`] identifier,
//! the [`Render`] contract with its [`Payload`] shapes, the [`ResponseSink`] written
//! to, the [`ResponseLike`] contract of structured responses, and [`MetaError`].

#[macro_use]
mod macros;

pub mod content_type;
pub use content_type::ContentType;

pub mod error;
pub use error::{ConfigError, Error, NegotiationError, RegistryError, RenderError, Result};

pub mod meta;
pub use meta::MetaError;

pub mod registry;
pub use registry::Registry;

mod render;
pub use render::{render_fn, BoxResponse, Payload, Render, RenderFn, RenderOptions, ResponseLike};

pub mod sink;
pub use sink::{Recorder, ResponseSink};

pub use http::{header, HeaderMap, HeaderValue, StatusCode};
pub use serde_json::Value;

/// Name of the request header carrying the client's preferred representations.
pub const ACCEPT_HEADER: &str = "accept";

/// Name of the header naming the transformer that produced (or should produce) a response.
pub const TEMPLATE_HEADER: &str = "x-render-template";
