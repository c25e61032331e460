//! Errors reported by the local matrix kernels.
use crate::geometry::Triangle2d;
use nalgebra::Scalar;
use std::error::Error;
use std::fmt;

/// A local edge index outside of `{0, 1, 2}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct InvalidEdgeIndex {
    pub index: usize,
}

impl fmt::Display for InvalidEdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid local edge index {} (expected 0, 1 or 2)", self.index)
    }
}

impl Error for InvalidEdgeIndex {}

/// Failure to compute a local matrix or an edge coupling.
///
/// Every variant carries the vertex coordinates of the offending triangle(s), so that the
/// caller can report the problematic part of the mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError<T: Scalar> {
    /// The triangle has (relatively) vanishing area, or its field transform is not invertible.
    DegenerateGeometry {
        triangle: Triangle2d<T>,
        /// The determinant `det(F) = 2 * signed area` that failed the test.
        determinant: T,
    },
    /// A local edge index outside of `{0, 1, 2}` was requested for `triangle`.
    InvalidEdgeIndex { triangle: Triangle2d<T>, index: usize },
    /// Fewer than two vertices of `first` coincide with vertices of `second`.
    NoSharedEdge {
        first: Triangle2d<T>,
        second: Triangle2d<T>,
        shared_vertices: usize,
    },
    /// All three vertices coincide, so the shared edge is not unique.
    AmbiguousEdge {
        first: Triangle2d<T>,
        second: Triangle2d<T>,
    },
}

impl<T: Scalar> KernelError<T> {
    /// Attaches the triangle the edge index was requested for.
    pub fn invalid_edge(triangle: &Triangle2d<T>, error: InvalidEdgeIndex) -> Self {
        Self::InvalidEdgeIndex {
            triangle: triangle.clone(),
            index: error.index,
        }
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for KernelError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DegenerateGeometry { triangle, determinant } => {
                write!(f, "degenerate triangle {triangle} (field transform determinant {determinant})")
            }
            Self::InvalidEdgeIndex { triangle, index } => {
                write!(f, "{} of triangle {triangle}", InvalidEdgeIndex { index: *index })
            }
            Self::NoSharedEdge {
                first,
                second,
                shared_vertices,
            } => write!(
                f,
                "triangles {first} and {second} share {shared_vertices} vertices, expected exactly two"
            ),
            Self::AmbiguousEdge { first, second } => {
                write!(f, "triangles {first} and {second} coincide, the shared edge is ambiguous")
            }
        }
    }
}

impl<T: Scalar + fmt::Display> Error for KernelError<T> {}
