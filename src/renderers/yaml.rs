use skyzen_render_core::{content_type, Payload, Render, RenderError, RenderOptions, ResponseSink};

/// `application/x-yaml; charset=utf-8`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRender;

impl Render for YamlRender {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        _options: &RenderOptions,
    ) -> Result<(), RenderError> {
        sink.ensure_content_type(&content_type::YAML);
        let yaml = serde_yaml::to_string(&*payload.value()).map_err(RenderError::encode)?;
        sink.write(yaml.as_bytes())?;
        Ok(())
    }
}
