use std::sync::Arc;

/// A GPU mesh: a pair of vertex/index buffers plus the index count. Binding
/// is left to whichever pipeline draws it.
///
/// Cloning shares the underlying `Arc`-wrapped buffers; the GPU memory is
/// released when the last handle drops.
#[derive(Clone, Debug)]
pub struct GpuMesh {
    pub vertex_buffer: Arc<wgpu::Buffer>,
    pub index_buffer: Arc<wgpu::Buffer>,
    pub index_count: u32,
    /// Index format used when binding this mesh.
    pub index_format: wgpu::IndexFormat,
}
