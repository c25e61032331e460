use crate::{points_coincide, Orientation, Real};
use itertools::Itertools;
use nalgebra::{distance, Point2, Scalar, Vector2};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A triangle in two dimensions, consisting of three vertices `(p0, p1, p2)`.
///
/// Local edge `k` runs from vertex `k` to vertex `(k + 1) mod 3`:
///
/// | edge | from | to   | reference image       |
/// |------|------|------|-----------------------|
/// | 0    | `p0` | `p1` | `(0, 0) -> (1, 0)`    |
/// | 1    | `p1` | `p2` | `(1, 0) -> (0, 1)`    |
/// | 2    | `p2` | `p0` | `(0, 1) -> (0, 0)`    |
///
/// No winding order is imposed, although a counter-clockwise triangle has all of its
/// edges traversed with the interior on the left.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle2d<T: Scalar>(pub [Point2<T>; 3]);

impl<T: Scalar> Triangle2d<T> {
    pub fn from_vertices(vertices: [Point2<T>; 3]) -> Self {
        Self(vertices)
    }

    pub fn vertices(&self) -> &[Point2<T>; 3] {
        &self.0
    }

    pub fn swap_vertices(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    /// Returns the triangle `(p1, p2, p0)`.
    ///
    /// The rotated triangle describes the same geometry with the same winding order,
    /// but vertex `i` of the rotated triangle is vertex `(i + 1) mod 3` of `self`.
    pub fn rotated(&self) -> Self {
        let mut vertices = self.0.clone();
        vertices.rotate_left(1);
        Self(vertices)
    }

    /// The start and end vertex of local edge `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k > 2`. Edge indices coming from user input should be validated first, which is
    /// what the local matrix builders in `trimix` do, reporting an error instead.
    pub fn edge_vertices(&self, k: usize) -> [Point2<T>; 2] {
        assert!(k < 3, "Triangle edge index must be 0, 1 or 2");
        [self.0[k].clone(), self.0[(k + 1) % 3].clone()]
    }

    /// All three directed edges, in local edge order.
    pub fn inner_edges(&self) -> [[Point2<T>; 2]; 3] {
        [self.edge_vertices(0), self.edge_vertices(1), self.edge_vertices(2)]
    }

    /// The vertex not touched by local edge `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k > 2`.
    pub fn opposite_vertex(&self, k: usize) -> Point2<T> {
        assert!(k < 3, "Triangle edge index must be 0, 1 or 2");
        self.0[(k + 2) % 3].clone()
    }
}

impl<T: Real> Triangle2d<T> {
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
    pub fn signed_area(&self) -> T {
        let [a, b, c] = &self.0;
        let ab = b - a;
        let ac = c - a;
        0.5 * ab.perp(&ac)
    }

    pub fn area(&self) -> T {
        self.signed_area().abs()
    }

    /// Winding order of the vertices. Degenerate triangles report [`Orientation::Clockwise`].
    pub fn orientation(&self) -> Orientation {
        if self.signed_area() > T::zero() {
            Orientation::Counterclockwise
        } else {
            Orientation::Clockwise
        }
    }

    /// Length of the longest edge.
    pub fn diameter(&self) -> T {
        self.0
            .iter()
            .tuple_combinations()
            .map(|(x, y)| distance(x, y))
            .fold(T::zero(), |a, b| a.max(b))
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
    pub fn centroid(&self) -> Point2<T> {
        let [a, b, c] = &self.0;
        Point2::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Returns an array of vectors corresponding to the three sides of the triangle,
    /// in local edge order.
    pub fn sides(&self) -> [Vector2<T>; 3] {
        let [a, b, c] = &self.0;
        [b - a, c - b, a - c]
    }

    /// Local index of the vertex coinciding with `point` up to the per-coordinate tolerance `tol`.
    pub fn find_vertex(&self, point: &Point2<T>, tol: T) -> Option<usize> {
        self.0
            .iter()
            .position(|vertex| points_coincide(vertex, point, tol))
    }

    /// Local index of the directed edge `from -> to`, if the triangle traverses it in that order.
    pub fn edge_index(&self, from: &Point2<T>, to: &Point2<T>, tol: T) -> Option<usize> {
        (0..3).find(|&k| {
            let [start, end] = self.edge_vertices(k);
            points_coincide(&start, from, tol) && points_coincide(&end, to, tol)
        })
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for Triangle2d<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.0;
        write!(f, "({}, {}) ({}, {}) ({}, {})", a.x, a.y, b.x, b.y, c.x, c.y)
    }
}
