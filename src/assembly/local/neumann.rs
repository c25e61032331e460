use crate::affine::{base_transform, AffineMap};
use crate::reference::{LocalEdge, ReferenceIntegralTable};
use crate::Real;
use nalgebra::Matrix3;

/// The Neumann constraint matrix `B C(A) P(n) C(A)ᵀ F(B)⁻ᵀ`.
///
/// The left half `B C(A) P(n)` pairs the P1 test functions of `element` with the homogeneous
/// coordinates along its edge `n`, and the right half `C(A)ᵀ F(B)⁻ᵀ` evaluates the affine field
/// given by the nodal values of `neighbor` in the reference frame of `element`. The trace of the
/// neighbor field is thereby integrated against the test functions of the element, which is what
/// the constraint needs when the traces of the two triangles do not agree.
pub fn compute_neumann_constraint_matrix<T: Real>(
    element: &AffineMap<T>,
    neighbor: &AffineMap<T>,
    table: &ReferenceIntegralTable<T>,
    edge: LocalEdge,
) -> Matrix3<T> {
    let c = element.coordinate_transform();
    base_transform::<T>() * c * table.product(edge) * c.transpose() * neighbor.inverse_transposed_field_transform()
}
