use tessera_assets::{Face, FontError, TextMesh};

use crate::backend::MeshBackend;

/// A string displayed with one curve mesh and one fill mesh.
///
/// Changing the value rebuilds both meshes; the previous ones are dropped,
/// which releases their buffers.
pub struct TextLabel<B: MeshBackend> {
    value: String,
    outer: Option<B::Mesh>,
    inner: Option<B::Mesh>,
    width: f32,
    triangles: (usize, usize),
}

impl<B: MeshBackend> TextLabel<B> {
    pub fn new(backend: &B, face: &Face, value: &str) -> Result<Self, FontError> {
        let mut label = Self {
            value: String::new(),
            outer: None,
            inner: None,
            width: 0.0,
            triangles: (0, 0),
        };
        label.set_value(backend, face, value)?;
        Ok(label)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the displayed string. On error the label keeps its previous
    /// value and meshes.
    pub fn set_value(&mut self, backend: &B, face: &Face, value: &str) -> Result<(), FontError> {
        let mesh = face.text_mesh(value)?;
        self.upload(backend, &mesh);
        self.value = value.to_owned();
        Ok(())
    }

    fn upload(&mut self, backend: &B, mesh: &TextMesh) {
        // release the old buffers before allocating new ones
        self.outer = None;
        self.inner = None;

        if !mesh.outer.is_empty() {
            self.outer = Some(backend.create_mesh("Text Outer", &mesh.outer));
        }
        if !mesh.inner.is_empty() {
            self.inner = Some(backend.create_mesh("Text Inner", &mesh.inner));
        }
        self.width = mesh.width;
        self.triangles = mesh.triangle_counts();
    }

    /// Curve wedge mesh; `None` when the string has no outlines.
    pub fn outer(&self) -> Option<&B::Mesh> {
        self.outer.as_ref()
    }

    /// Fill mesh; `None` when nothing could be filled.
    pub fn inner(&self) -> Option<&B::Mesh> {
        self.inner.as_ref()
    }

    /// Width of the laid out string in em units.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn triangle_counts(&self) -> (usize, usize) {
        self.triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use tessera_assets::test_font::{square, FontBuilder, TestGlyph};
    use tessera_assets::MeshData;

    use crate::vertex::VertexLayout;

    /// Counts meshes alive at any moment.
    #[derive(Default)]
    struct CountingBackend {
        live: Rc<Cell<usize>>,
        created: Cell<usize>,
    }

    struct FakeMesh {
        index_count: usize,
        live: Rc<Cell<usize>>,
    }

    impl Drop for FakeMesh {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    impl MeshBackend for CountingBackend {
        type Mesh = FakeMesh;

        fn create_mesh<V: VertexLayout>(&self, _label: &str, data: &MeshData<V>) -> FakeMesh {
            self.live.set(self.live.get() + 1);
            self.created.set(self.created.get() + 1);
            FakeMesh {
                index_count: data.indices.len(),
                live: self.live.clone(),
            }
        }
    }

    /// One square glyph for 'a', ' ' mapped to the empty `.notdef`.
    fn face() -> Face {
        let font = FontBuilder::new()
            .group(0x20, 0x20, 0)
            .glyph('a', TestGlyph::Simple(vec![square(0, 100)]), 600)
            .build();
        Face::from_bytes(&font).unwrap()
    }

    #[test]
    fn creates_both_meshes() {
        let backend = CountingBackend::default();
        let face = face();
        let label = TextLabel::new(&backend, &face, "aa").unwrap();
        assert_eq!(label.value(), "aa");
        assert_eq!(backend.live.get(), 2);
        assert_eq!(label.outer().unwrap().index_count, 24);
        assert_eq!(label.inner().unwrap().index_count, 12);
        assert_eq!(label.triangle_counts(), (8, 4));
        assert!((label.width() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn changing_the_value_replaces_meshes() {
        let backend = CountingBackend::default();
        let face = face();
        let mut label = TextLabel::new(&backend, &face, "a").unwrap();
        label.set_value(&backend, &face, "a a").unwrap();
        assert_eq!(backend.created.get(), 4);
        // old meshes were released
        assert_eq!(backend.live.get(), 2);
        assert_eq!(label.outer().unwrap().index_count, 24);
    }

    #[test]
    fn blank_text_has_no_meshes() {
        let backend = CountingBackend::default();
        let face = face();
        let mut label = TextLabel::new(&backend, &face, "a").unwrap();
        label.set_value(&backend, &face, " ").unwrap();
        assert!(label.outer().is_none());
        assert!(label.inner().is_none());
        assert_eq!(backend.live.get(), 0);
        assert!((label.width() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn failed_update_keeps_previous_state() {
        let backend = CountingBackend::default();
        let face = face();
        let mut label = TextLabel::new(&backend, &face, "a").unwrap();
        let err = label.set_value(&backend, &face, "ab").unwrap_err();
        assert!(matches!(err, FontError::UnmappedCodepoint('b')));
        assert_eq!(label.value(), "a");
        assert_eq!(backend.live.get(), 2);
        assert_eq!(backend.created.get(), 2);
    }

    #[test]
    fn dropping_the_label_releases_meshes() {
        let backend = CountingBackend::default();
        let face = face();
        let label = TextLabel::new(&backend, &face, "a").unwrap();
        assert_eq!(backend.live.get(), 2);
        drop(label);
        assert_eq!(backend.live.get(), 0);
    }
}
