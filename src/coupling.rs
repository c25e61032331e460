//! Detection of the edge shared by two adjacent triangles.
use crate::config::Tolerances;
use crate::error::KernelError;
use crate::geometry::Triangle2d;
use crate::reference::LocalEdge;
use crate::Real;
use itertools::Itertools;
use log::{debug, trace};
use std::ops::Neg;

/// How two adjacent triangles see their common edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EdgeCoupling {
    first_edge: LocalEdge,
    second_edge: LocalEdge,
    orientation_matches: bool,
}

impl EdgeCoupling {
    pub fn new(first_edge: LocalEdge, second_edge: LocalEdge, orientation_matches: bool) -> Self {
        Self {
            first_edge,
            second_edge,
            orientation_matches,
        }
    }

    /// The local index of the shared edge in the first triangle.
    pub fn first_edge(&self) -> LocalEdge {
        self.first_edge
    }

    /// The local index of the shared edge in the second triangle.
    pub fn second_edge(&self) -> LocalEdge {
        self.second_edge
    }

    /// Whether both triangles traverse the shared edge in the same direction.
    ///
    /// Local edge `k` runs from vertex `k` to vertex `(k + 1) mod 3`. Two triangles with the same
    /// winding order always traverse a shared edge in opposite directions.
    pub fn orientation_matches(&self) -> bool {
        self.orientation_matches
    }

    /// `1` if the orientations match, `-1` otherwise.
    pub fn orientation_sign<T: Real>(&self) -> T {
        if self.orientation_matches {
            T::one()
        } else {
            -T::one()
        }
    }

    /// Applies the orientation sign to an edge contribution computed for the second triangle,
    /// so that it is expressed with respect to the edge direction of the first triangle.
    pub fn orient<M: Neg<Output = M>>(&self, contribution: M) -> M {
        if self.orientation_matches {
            contribution
        } else {
            -contribution
        }
    }

    /// The same coupling, seen from the second triangle.
    pub fn reversed(&self) -> Self {
        Self {
            first_edge: self.second_edge,
            second_edge: self.first_edge,
            orientation_matches: self.orientation_matches,
        }
    }
}

/// Locates the edge shared by `first` and `second`, with the default vertex tolerance.
pub fn resolve_edge_coupling<T: Real>(
    first: &Triangle2d<T>,
    second: &Triangle2d<T>,
) -> Result<EdgeCoupling, KernelError<T>> {
    resolve_edge_coupling_with_tolerance(first, second, Tolerances::<T>::default().vertex_distance)
}

/// Locates the edge shared by `first` and `second`.
///
/// Vertices coincide if each of their coordinates differs by at most `tol`. Exactly two vertices
/// must coincide: fewer gives [`KernelError::NoSharedEdge`], and three gives
/// [`KernelError::AmbiguousEdge`].
pub fn resolve_edge_coupling_with_tolerance<T: Real>(
    first: &Triangle2d<T>,
    second: &Triangle2d<T>,
    tol: T,
) -> Result<EdgeCoupling, KernelError<T>> {
    // Pairs (i, j) of coinciding vertices, ordered by the local index in the first triangle
    let shared: Vec<(usize, usize)> = first
        .vertices()
        .iter()
        .enumerate()
        .filter_map(|(i, vertex)| second.find_vertex(vertex, tol).map(|j| (i, j)))
        .collect();

    let no_shared_edge = |shared_vertices| KernelError::NoSharedEdge {
        first: *first,
        second: *second,
        shared_vertices,
    };

    let result = match shared.as_slice() {
        [(i0, j0), (i1, j1)] => {
            let first_edge = LocalEdge::joining(*i0, *i1);
            let second_edge = LocalEdge::joining(*j0, *j1);
            match (first_edge, second_edge) {
                (Some(first_edge), Some(second_edge)) => {
                    // The vertex of `second` where the traversal of the first triangle starts
                    let start_in_second = if first_edge.start() == *i0 { *j0 } else { *j1 };
                    Ok(EdgeCoupling {
                        first_edge,
                        second_edge,
                        orientation_matches: second_edge.start() == start_in_second,
                    })
                }
                // Two vertices of the first triangle collapse onto the same vertex of the second
                _ => Err(no_shared_edge(1)),
            }
        }
        [_, _, _] => {
            let distinct = shared.iter().map(|(_, j)| j).unique().count();
            if distinct == 3 {
                Err(KernelError::AmbiguousEdge {
                    first: *first,
                    second: *second,
                })
            } else {
                Err(no_shared_edge(distinct))
            }
        }
        _ => Err(no_shared_edge(shared.len())),
    };

    match &result {
        Ok(coupling) => trace!(
            "Resolved coupling {} -> {} (orientation matches: {}) between {} and {}",
            coupling.first_edge,
            coupling.second_edge,
            coupling.orientation_matches,
            first,
            second
        ),
        Err(err) => debug!("Failed to resolve coupling: {}", err),
    }
    result
}
