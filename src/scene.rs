use glam::Vec3;
use winit::event::WindowEvent;

use crate::actor::Actor;
use crate::animator::{Animator, RedrawSurface, TickOutcome};
use crate::camera::Camera;
use crate::config::HeartConfig;
use crate::error::HeartError;
use crate::mesh::bounds::Bounds;
use crate::wgpu::mesh_renderer::MeshRenderer;
use crate::wgpu::text_renderer::TextRenderer;
use crate::wgpu::text_state::TextState;
use crate::wgpu::{SceneUniform, Wgpu};

/// The heart, its light and its phase label on a wgpu surface
pub struct Scene {
    wgpu: Wgpu,
    camera: Camera,
    actors: Vec<Actor>,
    model_radius: f32,
    background: wgpu::Color,
    light_position: Vec3,
    light_intensity: f32,
    mesh_renderer: MeshRenderer,
    text_renderer: TextRenderer,
    text_state: TextState,
}

impl Scene {
    pub fn new(
        wgpu: Wgpu,
        actors: Vec<Actor>,
        model_bounds: &Bounds,
        config: &HeartConfig,
    ) -> Result<Self, HeartError> {
        let (width, height) = wgpu.size();
        let mut camera = Camera::new(wgpu.aspect());
        let model_radius = model_bounds.radius() * config.base_scale;
        camera.reset(model_radius);
        let mesh_renderer = MeshRenderer::new(&wgpu, &actors);
        let text_renderer = TextRenderer::new(&wgpu)?;
        let text_state = TextState::new(config, width, height);
        let [r, g, b] = config.background.map(f64::from);
        Ok(Self {
            wgpu,
            camera,
            actors,
            model_radius,
            background: wgpu::Color { r, g, b, a: 1.0 },
            light_position: Vec3::from(config.light_position),
            light_intensity: config.light_intensity,
            mesh_renderer,
            text_renderer,
            text_state,
        })
    }

    /// Let the animator write this frame's scale and label
    pub fn animate(&mut self, animator: &mut Animator, surface: &impl RedrawSurface) -> TickOutcome {
        animator.tick(self.actors.as_mut_slice(), &mut self.text_state, surface)
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset(self.model_radius);
    }

    pub fn window_event(&mut self, event: &WindowEvent) {
        self.camera.window_event(event);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.wgpu.resize((width, height));
        let (width, height) = self.wgpu.size();
        self.camera.set_aspect(self.wgpu.aspect());
        self.text_state.resize(width, height);
        self.text_renderer.resize(&self.wgpu);
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn render(&mut self) -> Result<(), HeartError> {
        self.wgpu.update_scene_uniform(SceneUniform::new(
            self.camera.view_projection(),
            self.light_position,
            self.light_intensity,
        ));
        self.mesh_renderer.update(&self.wgpu, &self.actors);
        self.text_renderer.prepare(&self.wgpu, &self.text_state)?;
        let surface_texture = match self.wgpu.get_surface_texture() {
            Ok(surface_texture) => surface_texture,
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(HeartError::Graphics("surface out of memory".into()));
            }
            Err(err) => {
                log::warn!("Reconfiguring surface: {err}");
                self.wgpu.reconfigure();
                return Ok(());
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = self.wgpu.create_depth_view();
        let mut encoder = self.wgpu.create_encoder();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            self.mesh_renderer.render(&mut render_pass, &self.wgpu);
            self.text_renderer.draw(&mut render_pass);
        }
        self.wgpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
