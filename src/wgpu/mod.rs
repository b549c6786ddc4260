use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use bytemuck::{cast_slice, Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use wgpu::MemoryHints::Performance;
use wgpu::{DepthStencilState, ShaderModule};
use winit::window::Window;

use crate::error::HeartError;
use crate::{HeartEvent, Radio};

pub mod mesh_renderer;
pub mod text_renderer;
pub mod text_state;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub const DEFAULT_PRIMITIVE_STATE: wgpu::PrimitiveState = wgpu::PrimitiveState {
    topology: wgpu::PrimitiveTopology::TriangleList,
    strip_index_format: None,
    front_face: wgpu::FrontFace::Ccw,
    // imported models disagree about winding
    cull_mode: None,
    polygon_mode: wgpu::PolygonMode::Fill,
    unclipped_depth: false,
    conservative: false,
};

const AMBIENT: f32 = 0.15;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniform {
    view_projection: [[f32; 4]; 4],
    light_position: [f32; 4],
    lighting: [f32; 4],
}

impl SceneUniform {
    pub fn new(view_projection: Mat4, light_position: Vec3, light_intensity: f32) -> Self {
        Self {
            view_projection: view_projection.to_cols_array_2d(),
            light_position: light_position.extend(1.0).to_array(),
            lighting: [light_intensity, AMBIENT, 0.0, 0.0],
        }
    }
}

pub struct Wgpu {
    surface: wgpu::Surface<'static>,
    pub surface_configuration: wgpu::SurfaceConfiguration,
    scene_buffer: wgpu::Buffer,
    pub shader: ShaderModule,
    pub queue: wgpu::Queue,
    pub device: wgpu::Device,
    pub scene_bind_group_layout: wgpu::BindGroupLayout,
    pub scene_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::Texture,
}

impl Debug for Wgpu {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wgpu")
    }
}

pub fn uniform_layout_entry(visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub fn default_depth_stencil_state() -> DepthStencilState {
    DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    configuration: &wgpu::SurfaceConfiguration,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: configuration.width,
            height: configuration.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    })
}

impl Wgpu {
    pub async fn new_async(window: Arc<Window>) -> Result<Wgpu, HeartError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(Arc::clone(&window))
            .map_err(|err| HeartError::Graphics(err.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                // Request an adapter which can render to our surface
                compatible_surface: Some(&surface),
            })
            .await
            .map_err(|err| HeartError::Graphics(err.to_string()))?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Heart Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                memory_hints: Performance,
                ..Default::default()
            })
            .await
            .map_err(|err| HeartError::Graphics(err.to_string()))?;
        let size = window.inner_size();
        let surface_configuration = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or_else(|| HeartError::Graphics("surface not supported by adapter".into()))?;
        surface.configure(&device, &surface_configuration);
        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform"),
            contents: cast_slice(&[SceneUniform::new(Mat4::IDENTITY, Vec3::ZERO, 0.0)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let scene_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Bind Group Layout"),
                entries: &[uniform_layout_entry(
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
            label: Some("Scene Bind Group"),
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });
        let depth_texture = create_depth_texture(&device, &surface_configuration);
        Ok(Self {
            surface,
            surface_configuration,
            device,
            queue,
            scene_bind_group_layout,
            scene_buffer,
            scene_bind_group,
            shader,
            depth_texture,
        })
    }

    pub fn create_and_send(window: Arc<Window>, radio: Radio) {
        let wgpu = futures::executor::block_on(Self::new_async(window));
        HeartEvent::ContextCreated(wgpu).send(&radio);
    }

    pub fn resize(&mut self, new_size: (u32, u32)) {
        let (width, height) = new_size;
        self.surface_configuration.width = width.max(1);
        self.surface_configuration.height = height.max(1);
        self.reconfigure();
    }

    pub fn reconfigure(&mut self) {
        self.surface
            .configure(&self.device, &self.surface_configuration);
        self.depth_texture = create_depth_texture(&self.device, &self.surface_configuration);
    }

    pub fn size(&self) -> (u32, u32) {
        (
            self.surface_configuration.width,
            self.surface_configuration.height,
        )
    }

    pub fn aspect(&self) -> f32 {
        let (width, height) = self.size();
        width as f32 / height as f32
    }

    pub fn get_surface_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            })
    }

    pub fn create_depth_view(&self) -> wgpu::TextureView {
        self.depth_texture
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn update_scene_uniform(&self, uniform: SceneUniform) {
        self.queue
            .write_buffer(&self.scene_buffer, 0, cast_slice(&[uniform]));
    }
}
