/// `tessera_renderer`: GPU side of text rendering.
///
/// # Module layout
///
/// | Module      | Responsibility                                     |
/// |-------------|----------------------------------------------------|
/// | `resources` | Vertex / index buffer creation                     |
/// | `vertex`    | `VertexLayout` for the text vertex types           |
/// | `mesh`      | `GpuMesh`: buffers + index count                   |
/// | `backend`   | `MeshBackend` seam between CPU meshes and the GPU  |
/// | `text`      | `TextLabel`: rebuilds meshes when its string changes |
pub mod backend;
pub mod mesh;
pub mod resources;
pub mod text;
pub mod vertex;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use backend::MeshBackend;
pub use mesh::GpuMesh;
pub use text::TextLabel;
pub use vertex::VertexLayout;

pub use tessera_assets::{InnerVertex, OuterVertex};
