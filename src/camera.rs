//! View-projection sources for the textured pass.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Anything that can produce a view-projection matrix.
pub trait Camera {
    fn view_proj(&self) -> Mat4;
}

/// Uniform-block mirror of the camera matrix.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: Mat4,
}

impl CameraUniform {
    /// Snapshot the camera's current matrix.
    pub fn from_camera(camera: &impl Camera) -> Self {
        Self {
            view_proj: camera.view_proj(),
        }
    }
}

/// Orthographic camera over a pixel-space rectangle, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
}

impl OrthoCamera {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Track a resized target, keeping the origin edges fixed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.right = width as f32;
        self.bottom = height as f32;
    }
}

impl Camera for OrthoCamera {
    fn view_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, 0.0, 1.0)
    }
}
