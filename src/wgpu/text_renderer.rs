use wgpu::RenderPass;
use wgpu_text::glyph_brush::ab_glyph::FontRef;
use wgpu_text::{BrushBuilder, TextBrush};

use crate::error::HeartError;
use crate::wgpu::text_state::TextState;
use crate::wgpu::Wgpu;

pub struct TextRenderer {
    brush: TextBrush<FontRef<'static>>,
}

impl TextRenderer {
    pub fn new(wgpu: &Wgpu) -> Result<Self, HeartError> {
        let (width, height) = wgpu.size();
        let brush = BrushBuilder::using_font_bytes(include_bytes!("../../assets/DejaVuSans.ttf"))
            .map_err(|err| HeartError::Graphics(format!("label font: {err}")))?
            .with_depth_stencil(Some(crate::wgpu::default_depth_stencil_state()))
            .build(
                &wgpu.device,
                width,
                height,
                wgpu.surface_configuration.format,
            );
        Ok(TextRenderer { brush })
    }

    pub fn resize(&mut self, wgpu: &Wgpu) {
        let (width, height) = wgpu.size();
        self.brush
            .resize_view(width as f32, height as f32, &wgpu.queue);
    }

    /// Queue the label, before the render pass begins
    pub fn prepare(&mut self, wgpu: &Wgpu, text_state: &TextState) -> Result<(), HeartError> {
        self.brush
            .queue(&wgpu.device, &wgpu.queue, vec![text_state.section()])
            .map_err(|err| HeartError::Graphics(format!("label: {err:?}")))
    }

    pub fn draw<'a>(&'a self, render_pass: &mut RenderPass<'a>) {
        self.brush.draw(render_pass);
    }
}
