use bytemuck::{cast_slice, Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::RenderPass;

use crate::actor::Actor;
use crate::mesh::MeshVertex;
use crate::wgpu::{default_depth_stencil_state, uniform_layout_entry, Wgpu, DEFAULT_PRIMITIVE_STATE};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ActorUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl From<&Actor> for ActorUniform {
    fn from(actor: &Actor) -> Self {
        Self {
            model: actor.model_matrix().to_cols_array_2d(),
            color: actor.color(),
        }
    }
}

struct ActorDrawing {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws every actor with its own model matrix and color
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    drawings: Vec<ActorDrawing>,
}

impl MeshRenderer {
    pub fn new(wgpu: &Wgpu, actors: &[Actor]) -> Self {
        let actor_bind_group_layout =
            wgpu.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Actor Bind Group Layout"),
                    entries: &[uniform_layout_entry(
                        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    )],
                });
        let pipeline_layout =
            wgpu.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Mesh Pipeline Layout"),
                    bind_group_layouts: &[&wgpu.scene_bind_group_layout, &actor_bind_group_layout],
                    immediate_size: 0,
                });
        let pipeline = wgpu
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Mesh Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &wgpu.shader,
                    entry_point: Some("mesh_vertex"),
                    compilation_options: Default::default(),
                    buffers: &[MeshVertex::desc()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &wgpu.shader,
                    entry_point: Some("mesh_fragment"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: wgpu.surface_configuration.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: DEFAULT_PRIMITIVE_STATE,
                depth_stencil: Some(default_depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });
        let drawings = actors
            .iter()
            .map(|actor| {
                let vertex_buffer =
                    wgpu.device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("Mesh Vertex Buffer"),
                            contents: cast_slice(&actor.mesh.vertices),
                            usage: wgpu::BufferUsages::VERTEX,
                        });
                let index_buffer =
                    wgpu.device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("Mesh Index Buffer"),
                            contents: cast_slice(&actor.mesh.indices),
                            usage: wgpu::BufferUsages::INDEX,
                        });
                let uniform_buffer =
                    wgpu.device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("Actor Uniform"),
                            contents: cast_slice(&[ActorUniform::from(actor)]),
                            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                        });
                let bind_group = wgpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &actor_bind_group_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                    label: Some("Actor Bind Group"),
                });
                ActorDrawing {
                    vertex_buffer,
                    index_buffer,
                    index_count: actor.mesh.indices.len() as u32,
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect();
        Self { pipeline, drawings }
    }

    /// Push the current scale of every actor to its uniform
    pub fn update(&self, wgpu: &Wgpu, actors: &[Actor]) {
        for (drawing, actor) in self.drawings.iter().zip(actors) {
            wgpu.queue.write_buffer(
                &drawing.uniform_buffer,
                0,
                cast_slice(&[ActorUniform::from(actor)]),
            );
        }
    }

    pub fn render<'a>(&'a self, render_pass: &mut RenderPass<'a>, wgpu: &'a Wgpu) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &wgpu.scene_bind_group, &[]);
        for drawing in &self.drawings {
            render_pass.set_bind_group(1, &drawing.bind_group, &[]);
            render_pass.set_vertex_buffer(0, drawing.vertex_buffer.slice(..));
            render_pass.set_index_buffer(drawing.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..drawing.index_count, 0, 0..1);
        }
    }
}
