use crate::affine::AffineMap;
use crate::reference::ReferenceIntegralTable;
use crate::Real;
use nalgebra::{Matrix2, Matrix3};
use numeric_literals::replace_float_literals;

/// The P1 stiffness matrix `∫ ∇φᵢ · ∇φⱼ dx` of the triangle.
///
/// Physical gradients are constant, `∇φᵢ = J⁻ᵀ ∇̂φᵢ`, so the integral is the gradient Gram
/// matrix times the area `|det J| / 2`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
pub fn compute_element_stiffness_matrix<T: Real>(
    map: &AffineMap<T>,
    table: &ReferenceIntegralTable<T>,
) -> Matrix3<T> {
    let j = map.jacobian();
    let det = map.determinant();
    // The affine map is validated, so det != 0
    let j_inv_t = Matrix2::new(j[(1, 1)], -j[(1, 0)], -j[(0, 1)], j[(0, 0)]) / det;
    let gradients = j_inv_t * table.basis_gradients();
    gradients.transpose() * gradients * (0.5 * det.abs())
}
