use skyzen_render_core::{content_type, Payload, Render, RenderError, RenderOptions, ResponseSink};

/// `application/msgpack; charset=utf-8`. Maps keep their field names.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgpackRender;

impl Render for MsgpackRender {
    fn render(
        &self,
        sink: &mut dyn ResponseSink,
        payload: Payload<'_>,
        _options: &RenderOptions,
    ) -> Result<(), RenderError> {
        sink.ensure_content_type(&content_type::MSGPACK);
        let bytes = rmp_serde::to_vec_named(&*payload.value()).map_err(RenderError::encode)?;
        sink.write(&bytes)?;
        Ok(())
    }
}
