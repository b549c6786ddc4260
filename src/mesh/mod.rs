use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::mesh::bounds::Bounds;

pub mod bounds;
pub mod obj;

pub use obj::load_model;

/// Used when a group has no material, or the material library is missing
pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.15, 0.15, 1.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0=>Float32x3, 1=>Float32x3];

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One triangulated material group of the model
#[derive(Debug, Clone)]
pub struct Mesh {
    pub material: Option<String>,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub color: [f32; 4],
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices.iter().map(|vertex| Vec3::from(vertex.position)))
    }
}

/// Bounds around all of the meshes together
pub fn model_bounds(meshes: &[Mesh]) -> Option<Bounds> {
    meshes
        .iter()
        .filter_map(Mesh::bounds)
        .reduce(|total, bounds| total.union(&bounds))
}
