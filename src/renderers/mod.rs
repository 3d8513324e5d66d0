//! Concrete encoders.
//!
//! Each renderer sets its own `Content-Type` when nothing set one before it, then encodes
//! the payload value. Formats other than JSON sit behind cargo features of the same name.

mod json;
pub use json::{JsonAsciiRender, JsonRender};

#[cfg(feature = "jsonp")]
mod jsonp;
#[cfg(feature = "jsonp")]
pub use jsonp::JsonpRender;

#[cfg(feature = "text")]
mod text;
#[cfg(feature = "text")]
pub use text::TextRender;

#[cfg(feature = "binary")]
mod binary;
#[cfg(feature = "binary")]
pub use binary::BinaryRender;

#[cfg(feature = "yaml")]
mod yaml;
#[cfg(feature = "yaml")]
pub use yaml::YamlRender;

#[cfg(feature = "toml")]
mod toml_render;
#[cfg(feature = "toml")]
pub use toml_render::TomlRender;

#[cfg(feature = "msgpack")]
mod msgpack;
#[cfg(feature = "msgpack")]
pub use msgpack::MsgpackRender;

#[cfg(feature = "xml")]
mod xml;
#[cfg(feature = "xml")]
pub use xml::{XmlRender, XML_ROOT};

use std::sync::Arc;

use skyzen_render_core::{content_type, ConfigError};

use crate::Engine;

/// Register every encoder compiled into this build.
///
/// JSON is always present on a fresh engine and is overwritten rather than registered.
///
/// # Errors
///
/// Returns [`ConfigError::Registry`] if one of the other content types already has a
/// renderer.
pub fn register_builtins(engine: &Engine) -> Result<(), ConfigError> {
    let renders = engine.renders();
    renders.set(content_type::JSON, Arc::new(JsonRender::default()));
    renders.register(content_type::JSON_ASCII, Arc::new(JsonAsciiRender))?;

    #[cfg(feature = "jsonp")]
    renders.register(content_type::JSONP, Arc::new(JsonpRender))?;
    #[cfg(feature = "text")]
    renders.register(content_type::TEXT, Arc::new(TextRender))?;
    #[cfg(feature = "binary")]
    renders.register(content_type::BINARY, Arc::new(BinaryRender))?;
    #[cfg(feature = "yaml")]
    renders.register(content_type::YAML, Arc::new(YamlRender))?;
    #[cfg(feature = "toml")]
    renders.register(content_type::TOML, Arc::new(TomlRender))?;
    #[cfg(feature = "msgpack")]
    renders.register(content_type::MSGPACK, Arc::new(MsgpackRender))?;
    #[cfg(feature = "xml")]
    renders.register(content_type::XML, Arc::new(XmlRender))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_once() {
        let engine = Engine::new();
        register_builtins(&engine).unwrap();
        assert!(engine.renders().has(&content_type::JSON_ASCII));
        #[cfg(feature = "yaml")]
        assert!(engine.renders().has(&content_type::YAML));
        #[cfg(feature = "xml")]
        assert!(engine.renders().has(&content_type::XML));

        assert!(matches!(
            register_builtins(&engine),
            Err(ConfigError::Registry(_))
        ));
    }
}
