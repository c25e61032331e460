//! Closed-form integrals over the reference triangle `(0, 0), (1, 0), (0, 1)`.
//!
//! Integrals are expressed with respect to the homogeneous reference coordinates `(1, ξ, η)`.
//! For the edges, the integrals are taken along the edge parametrization, which for the left
//! edge runs from `(0, 1)` down to `(0, 0)`. This reversed direction is the reason for the
//! negative signs in the tables of that edge.
use crate::error::InvalidEdgeIndex;
use crate::Real;
use nalgebra::{Matrix2x3, Matrix3, Matrix3x2, Vector2, Vector3};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three edges of a triangle, numbered after its start vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocalEdge {
    /// Edge 0, from vertex 0 to vertex 1. On the reference triangle: `(0, 0) -> (1, 0)`.
    Bottom,
    /// Edge 1, from vertex 1 to vertex 2. On the reference triangle: `(1, 0) -> (0, 1)`.
    Diagonal,
    /// Edge 2, from vertex 2 to vertex 0. On the reference triangle: `(0, 1) -> (0, 0)`.
    Left,
}

impl LocalEdge {
    pub const ALL: [LocalEdge; 3] = [LocalEdge::Bottom, LocalEdge::Diagonal, LocalEdge::Left];

    pub fn index(&self) -> usize {
        match self {
            Self::Bottom => 0,
            Self::Diagonal => 1,
            Self::Left => 2,
        }
    }

    /// Local index of the vertex the edge starts at.
    pub fn start(&self) -> usize {
        self.index()
    }

    /// Local index of the vertex the edge ends at.
    pub fn end(&self) -> usize {
        (self.index() + 1) % 3
    }

    /// The edge connecting the two given local vertices, regardless of their order.
    pub fn joining(a: usize, b: usize) -> Option<Self> {
        match (a.min(b), a.max(b)) {
            (0, 1) => Some(Self::Bottom),
            (1, 2) => Some(Self::Diagonal),
            (0, 2) => Some(Self::Left),
            _ => None,
        }
    }
}

impl TryFrom<usize> for LocalEdge {
    type Error = InvalidEdgeIndex;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(InvalidEdgeIndex { index })
    }
}

impl From<LocalEdge> for usize {
    fn from(edge: LocalEdge) -> Self {
        edge.index()
    }
}

impl fmt::Display for LocalEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The fixed table of reference element integrals.
///
/// For each local edge `n` with reference parametrization `s -> (ξ(s), η(s))`:
///
/// - `trace(n) = ∫ (1, ξ, η) ds`,
/// - `product(n) = ∫ (1, ξ, η)ᵀ (1, ξ, η) ds`,
/// - `normal(n)` is the outward unit normal of the reference edge,
/// - `gradient(n) = G normal(n)` with `G = [[0, 0], [1, 0], [0, 1]]`, the normal embedded in the
///   homogeneous coordinates.
///
/// In addition, the table holds the reference P1 mass matrix `∫ φᵢ φⱼ` and the (constant)
/// reference gradients of the P1 basis functions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReferenceIntegralTable<T: Real> {
    trace: [Vector3<T>; 3],
    product: [Matrix3<T>; 3],
    normal: [Vector2<T>; 3],
    mass: Matrix3<T>,
    basis_gradients: Matrix2x3<T>,
}

impl<T: Real> Default for ReferenceIntegralTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> ReferenceIntegralTable<T> {
    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
    pub fn new() -> Self {
        let sqrt_2 = T::sqrt(2.0);
        let trace = [
            Vector3::new(1.0, 0.5, 0.0),
            Vector3::new(1.0, 0.5, 0.5) * sqrt_2,
            Vector3::new(-1.0, 0.0, -0.5),
        ];
        let product = [
            Matrix3::new(
                1.0, 0.5, 0.0,
                0.5, 1.0 / 3.0, 0.0,
                0.0, 0.0, 0.0),
            Matrix3::new(
                1.0, 0.5, 0.5,
                0.5, 1.0 / 3.0, 1.0 / 6.0,
                0.5, 1.0 / 6.0, 1.0 / 3.0) * sqrt_2,
            -Matrix3::new(
                1.0, 0.0, 0.5,
                0.0, 0.0, 0.0,
                0.5, 0.0, 1.0 / 3.0),
        ];
        let normal = [
            Vector2::new(0.0, -1.0),
            Vector2::new(1.0, 1.0) / sqrt_2,
            Vector2::new(-1.0, 0.0),
        ];
        let mass = Matrix3::new(
            2.0, 1.0, 1.0,
            1.0, 2.0, 1.0,
            1.0, 1.0, 2.0) / 24.0;
        let basis_gradients = Matrix2x3::new(
            -1.0, 1.0, 0.0,
            -1.0, 0.0, 1.0);

        Self {
            trace,
            product,
            normal,
            mass,
            basis_gradients,
        }
    }

    /// `∫ (1, ξ, η) ds` along the reference edge.
    pub fn trace(&self, edge: LocalEdge) -> &Vector3<T> {
        &self.trace[edge.index()]
    }

    /// `∫ (1, ξ, η)ᵀ (1, ξ, η) ds` along the reference edge.
    pub fn product(&self, edge: LocalEdge) -> &Matrix3<T> {
        &self.product[edge.index()]
    }

    pub fn normal(&self, edge: LocalEdge) -> &Vector2<T> {
        &self.normal[edge.index()]
    }

    /// The reference normal embedded in homogeneous coordinates, `G ν(n)`.
    pub fn gradient(&self, edge: LocalEdge) -> Vector3<T> {
        gradient_embedding() * self.normal(edge)
    }

    /// `∫ φᵢ φⱼ` over the reference triangle.
    pub fn mass(&self) -> &Matrix3<T> {
        &self.mass
    }

    /// Column `i` holds the reference gradient of the P1 basis function `φᵢ`.
    pub fn basis_gradients(&self) -> &Matrix2x3<T> {
        &self.basis_gradients
    }
}

/// The embedding `G = [[0, 0], [1, 0], [0, 1]]` of 2D vectors into homogeneous coordinates.
#[rustfmt::skip]
pub fn gradient_embedding<T: Real>() -> Matrix3x2<T> {
    Matrix3x2::new(
        T::zero(), T::zero(),
        T::one(), T::zero(),
        T::zero(), T::one(),
    )
}
