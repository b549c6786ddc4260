use glam::{Mat4, Vec3};

use crate::animator::ScaleTarget;
use crate::mesh::bounds::Bounds;
use crate::mesh::Mesh;

/// A mesh placed in the scene
#[derive(Debug, Clone)]
pub struct Actor {
    pub mesh: Mesh,
    pub position: Vec3,
    pub scale: Vec3,
    /// Point of the mesh that sits at `position`, the middle of the whole model
    pub pivot: Vec3,
}

impl Actor {
    pub fn new(mesh: Mesh, pivot: Vec3, base_scale: f32) -> Self {
        Self {
            mesh,
            position: Vec3::ZERO,
            scale: Vec3::splat(base_scale),
            pivot,
        }
    }

    /// Center every mesh of the model on the origin at the base scale
    pub fn centered(meshes: Vec<Mesh>, model_bounds: &Bounds, base_scale: f32) -> Vec<Actor> {
        let pivot = model_bounds.center();
        meshes
            .into_iter()
            .map(|mesh| Actor::new(mesh, pivot, base_scale))
            .collect()
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(self.scale)
            * Mat4::from_translation(-self.pivot)
    }

    pub fn color(&self) -> [f32; 4] {
        self.mesh.color
    }
}

impl ScaleTarget for Actor {
    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }
}
