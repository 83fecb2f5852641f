use thiserror::Error;

/// Failure modes of [`crate::triangulate`].
///
/// `TooFewPoints` means the input itself is malformed; the other two are
/// geometric dead ends reached while clipping an otherwise well-formed ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriangulateError {
    #[error("polygon must have at least 3 points, got {points}")]
    TooFewPoints { points: usize },
    #[error("could not find a visible bridge vertex for hole {hole}")]
    NoBridge { hole: usize },
    #[error("no ear found with {remaining} vertices remaining")]
    NoEar { remaining: usize },
}

impl TriangulateError {
    /// `true` for errors caused by malformed input rather than geometry.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::TooFewPoints { .. })
    }
}
