use crate::Real;
use nalgebra::{Matrix3, Vector3};

/// The two blocks of a penalized jump across an interior edge.
///
/// `diagonal = σ N(A, A, n)` couples the element with itself, and `off_diagonal = -σ N(A, B, n)`
/// couples it with the neighbor. Applied to the nodal values of an affine field that is
/// continuous across the edge, the two blocks cancel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InterfacePenalty<T: Real> {
    pub diagonal: Matrix3<T>,
    pub off_diagonal: Matrix3<T>,
}

impl<T: Real> InterfacePenalty<T> {
    pub fn from_constraints(self_constraint: &Matrix3<T>, neighbor_constraint: &Matrix3<T>, penalty: T) -> Self {
        Self {
            diagonal: self_constraint * penalty,
            off_diagonal: -(neighbor_constraint * penalty),
        }
    }

    /// The jump residual `diagonal * element_values + off_diagonal * neighbor_values`.
    pub fn apply(&self, element_values: &Vector3<T>, neighbor_values: &Vector3<T>) -> Vector3<T> {
        self.diagonal * element_values + self.off_diagonal * neighbor_values
    }
}
