use crate::affine::AffineMap;
use crate::reference::ReferenceIntegralTable;
use crate::Real;
use nalgebra::Matrix3;

/// The P1 mass matrix `∫ φᵢ φⱼ dx` of the triangle.
///
/// The integrand is a polynomial, so the result is the reference mass matrix scaled by the
/// area change `|det J|`, i.e. `area / 12 * [[2, 1, 1], [1, 2, 1], [1, 1, 2]]`.
pub fn compute_element_mass_matrix<T: Real>(map: &AffineMap<T>, table: &ReferenceIntegralTable<T>) -> Matrix3<T> {
    table.mass() * map.determinant().abs()
}
