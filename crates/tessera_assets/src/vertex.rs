//! CPU-side vertex formats for text meshes.
//!
//! Both types are `#[repr(C)]` and `Pod` so they can be uploaded to the GPU
//! with `bytemuck::cast_slice`.

/// Vertex of a curve wedge triangle.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OuterVertex {
    pub position: [f32; 3],
    /// `(0,0)`, `(0.5,0)`, `(1,1)` across each wedge; the curve is the
    /// zero set of `u² - v`.
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

/// Vertex of a fill triangle.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InnerVertex {
    pub position: [f32; 3],
}

pub const WEDGE_UVS: [[f32; 2]; 3] = [[0.0, 0.0], [0.5, 0.0], [1.0, 1.0]];

/// Text faces the viewer.
pub const FORWARD: [f32; 3] = [0.0, 0.0, 1.0];

/// Vertices plus a triangle list indexing into them.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V> Default for MeshData<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }
}

impl<V> MeshData<V> {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<OuterVertex>(), 32);
        assert_eq!(std::mem::size_of::<InnerVertex>(), 12);

        let v = OuterVertex {
            position: [1.0, 2.0, 3.0],
            uv: WEDGE_UVS[1],
            normal: FORWARD,
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.5, 0.0, 0.0, 0.0, 1.0]);
    }
}
