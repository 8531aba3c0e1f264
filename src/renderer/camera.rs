//! Orthographic camera over the arena

use glam::{Mat4, Vec2, Vec3};

/// Uniform block layout for a view-projection matrix
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Camera looking at a `width` x `height` world rectangle with the origin at
/// the bottom-left corner and y pointing up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2d {
    pub width: f32,
    pub height: f32,
}

impl Camera2d {
    pub fn ortho(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn view_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, 0.0, self.height, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }

    /// World position to normalized device coordinates
    pub fn project(&self, world: Vec2) -> Vec2 {
        self.view_proj().project_point3(Vec3::new(world.x, world.y, 0.0)).truncate()
    }
}
