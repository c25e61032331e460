use crate::affine::{base_transform, AffineMap};
use crate::reference::{LocalEdge, ReferenceIntegralTable};
use crate::Real;
use nalgebra::{Matrix1x3, Matrix3, Matrix3x1, Vector3};
use numeric_literals::replace_float_literals;
use std::ops::Neg;

/// The rank-one coupling between the nodal values of two triangles through a shared edge.
///
/// The matrix is kept in factored form:
///
/// - `trace` (3x1) integrates the P1 test functions of the element along the edge, i.e. it maps
///   the scalar flux across the edge onto the nodal equations of the element,
/// - `gradient` (1x3) maps the nodal values of the neighbor to the normal derivative across the
///   edge, measured in the reference frame of the element.
///
/// The full 3x3 block is the outer product [`FluxMatrix::to_matrix`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FluxMatrix<T: Real> {
    trace: Matrix3x1<T>,
    gradient: Matrix1x3<T>,
}

impl<T: Real> FluxMatrix<T> {
    pub fn from_factors(trace: Matrix3x1<T>, gradient: Matrix1x3<T>) -> Self {
        Self { trace, gradient }
    }

    pub fn trace(&self) -> &Matrix3x1<T> {
        &self.trace
    }

    pub fn gradient(&self) -> &Matrix1x3<T> {
        &self.gradient
    }

    pub fn to_matrix(&self) -> Matrix3<T> {
        self.trace * self.gradient
    }

    /// The share of one side when the flux across an interior edge is averaged over both
    /// adjacent triangles.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
    pub fn averaged(&self) -> Self {
        Self {
            trace: self.trace * 0.5,
            gradient: self.gradient,
        }
    }

    pub fn scaled(&self, factor: T) -> Self {
        Self {
            trace: self.trace * factor,
            gradient: self.gradient,
        }
    }

    /// Computes `trace * (gradient * values)` without forming the 3x3 matrix.
    pub fn apply(&self, values: &Vector3<T>) -> Vector3<T> {
        self.trace * (self.gradient * values)[0]
    }
}

impl<T: Real> Neg for FluxMatrix<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            trace: -self.trace,
            gradient: self.gradient,
        }
    }
}

/// The flux coupling of `element` with `neighbor` across local edge `edge` of `element`.
///
/// `trace = B C(element) v(n)` and `gradient = g(n)ᵀ C(element)ᵀ F(neighbor)⁻ᵀ`. If both maps
/// describe the same triangle, the gradient reduces to `(B g(n))ᵀ`.
pub fn compute_flux_matrix<T: Real>(
    element: &AffineMap<T>,
    neighbor: &AffineMap<T>,
    table: &ReferenceIntegralTable<T>,
    edge: LocalEdge,
) -> FluxMatrix<T> {
    let c = element.coordinate_transform();
    let trace = base_transform::<T>() * c * table.trace(edge);
    let gradient = table.gradient(edge).transpose() * c.transpose() * neighbor.inverse_transposed_field_transform();
    FluxMatrix { trace, gradient }
}
