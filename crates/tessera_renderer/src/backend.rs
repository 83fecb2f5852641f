use tessera_assets::MeshData;

use crate::mesh::GpuMesh;
use crate::resources::{create_index, create_vertex};
use crate::vertex::VertexLayout;

/// Turns CPU mesh data into something drawable.
///
/// `wgpu::Device` implements this by creating GPU buffers; tests use a fake
/// that only records what was created.
pub trait MeshBackend {
    type Mesh;

    fn create_mesh<V: VertexLayout>(&self, label: &str, data: &MeshData<V>) -> Self::Mesh;
}

impl MeshBackend for wgpu::Device {
    type Mesh = GpuMesh;

    fn create_mesh<V: VertexLayout>(&self, label: &str, data: &MeshData<V>) -> GpuMesh {
        let vertex_buffer = create_vertex(self, &format!("{label} Vertex Buffer"), &data.vertices);
        let (index_buffer, index_format) =
            create_index(self, &format!("{label} Index Buffer"), &data.indices);
        log::debug!(
            "created mesh '{label}': {} vertices, {} indices ({index_format:?})",
            data.vertices.len(),
            data.indices.len()
        );
        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            index_format,
        }
    }
}
