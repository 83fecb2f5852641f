//! Vertex buffer layouts for the text mesh vertex types.
//!
//! The matching WGSL attribute locations are 0 = position, 1 = uv,
//! 2 = normal for curve wedges and 0 = position for fill.

use tessera_assets::{InnerVertex, OuterVertex};

/// Vertex types that know their own GPU buffer layout.
pub trait VertexLayout: bytemuck::Pod {
    fn layout<'a>() -> wgpu::VertexBufferLayout<'a>;
}

const OUTER_ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
    // @location(0) position
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    // @location(1) uv
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 12,
        shader_location: 1,
    },
    // @location(2) normal
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 20,
        shader_location: 2,
    },
];

const INNER_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: 0,
}];

impl VertexLayout for OuterVertex {
    fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OuterVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &OUTER_ATTRIBUTES,
        }
    }
}

impl VertexLayout for InnerVertex {
    fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InnerVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &INNER_ATTRIBUTES,
        }
    }
}
