//! Court vertex format and palette
//!
//! Positions are canvas pixels until `RenderState` maps them to clip space.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Position plus straight RGBA; no texture coordinates, everything is flat
/// shaded or fanned into a gradient.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    #[inline]
    pub fn at(point: Vec2, color: [f32; 4]) -> Self {
        Self::new(point.x, point.y, color)
    }

    /// Buffer layout matching `shader.wgsl` locations 0 and 1
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Court palette, linear RGBA
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.008, 0.012, 0.03, 1.0];
    pub const FLOOR: [f32; 4] = [1.0, 1.0, 1.0, 0.05];
    pub const BACKBOARD_FILL: [f32; 4] = [1.0, 1.0, 1.0, 0.08];
    pub const BACKBOARD_EDGE: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
    pub const NET: [f32; 4] = [1.0, 1.0, 1.0, 0.25];
    /// #ef4444
    pub const RIM: [f32; 4] = [0.863, 0.058, 0.058, 1.0];
    pub const GUIDE: [f32; 4] = [1.0, 1.0, 1.0, 0.15];
}
