use crate::affine::{base_transform, AffineMap};
use crate::reference::{LocalEdge, ReferenceIntegralTable};
use crate::Real;
use nalgebra::Matrix3;
use numeric_literals::replace_float_literals;

/// The boundary trace matrix `B C g(n) v(n)ᵀ Cᵀ F⁻ᵀ` of a triangle edge.
///
/// Applied to the nodal values of the triangle, the right factor `v(n)ᵀ Cᵀ F⁻ᵀ` integrates the
/// trace of the field along the reference edge, while the left factor `B C g(n)` distributes the
/// result onto the nodal test functions along the (unnormalized) physical edge normal.
pub fn compute_boundary_matrix<T: Real>(
    map: &AffineMap<T>,
    table: &ReferenceIntegralTable<T>,
    edge: LocalEdge,
) -> Matrix3<T> {
    compute_boundary_coupling_matrix(map, map, table, edge)
}

/// The boundary trace of `element` driven by the nodal values of `neighbor`,
/// `B C(element) g(n) v(n)ᵀ C(element)ᵀ F(neighbor)⁻ᵀ`.
///
/// The trace is evaluated with the neighbor's field expressed in the reference frame of the
/// element, so for an affine field the result agrees with [`compute_boundary_matrix`] applied to
/// the element's own nodal values.
pub fn compute_boundary_coupling_matrix<T: Real>(
    element: &AffineMap<T>,
    neighbor: &AffineMap<T>,
    table: &ReferenceIntegralTable<T>,
    edge: LocalEdge,
) -> Matrix3<T> {
    let c = element.coordinate_transform();
    let normal_side = base_transform::<T>() * c * table.gradient(edge);
    let trace_side = table.trace(edge).transpose() * c.transpose() * neighbor.inverse_transposed_field_transform();
    normal_side * trace_side
}

/// The artificial flux across an interior edge, `½ B C(element) g(n) v(n)ᵀ C(element)ᵀ F(neighbor)⁻ᵀ`.
///
/// Each side of the edge contributes half of the averaged trace, once against its own nodal values
/// and once against those of the neighbor.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
pub fn compute_artificial_flux_matrix<T: Real>(
    element: &AffineMap<T>,
    neighbor: &AffineMap<T>,
    table: &ReferenceIntegralTable<T>,
    edge: LocalEdge,
) -> Matrix3<T> {
    compute_boundary_coupling_matrix(element, neighbor, table, edge) * 0.5
}
