// Fixed logical canvas mapped onto the window

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Orthographic camera over a fixed-size canvas with a top-left origin.
///
/// The game always draws in canvas units. When the window's aspect ratio
/// differs from the canvas, the canvas is letterboxed to keep it undistorted.
#[derive(Debug, Clone)]
pub struct Camera {
    logical_size: Vec2,
    viewport: Viewport,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(logical_size: Vec2, window_width: f32, window_height: f32) -> Self {
        Self {
            logical_size,
            viewport: Viewport::letterbox(logical_size, window_width, window_height),
            // y grows downward, matching window and map coordinates
            view_proj: Mat4::orthographic_rh(
                0.0,
                logical_size.x,
                logical_size.y,
                0.0,
                -100.0,
                100.0,
            ),
        }
    }

    /// Recompute the letterbox for a new window size
    pub fn resize(&mut self, window_width: f32, window_height: f32) {
        self.viewport = Viewport::letterbox(self.logical_size, window_width, window_height);
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Window-pixel area the canvas occupies
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn logical_size(&self) -> Vec2 {
        self.logical_size
    }
}

/// Window-pixel rectangle passed to `set_viewport`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Largest centred rectangle with the canvas aspect ratio
    pub fn letterbox(logical_size: Vec2, window_width: f32, window_height: f32) -> Self {
        let window_width = window_width.max(1.0);
        let window_height = window_height.max(1.0);
        let scale = (window_width / logical_size.x).min(window_height / logical_size.y);
        let width = logical_size.x * scale;
        let height = logical_size.y * scale;

        Self {
            x: (window_width - width) / 2.0,
            y: (window_height - height) / 2.0,
            width,
            height,
        }
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
