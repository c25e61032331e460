//! Affine maps between the reference triangle and physical triangles.
//!
//! A triangle `(p0, p1, p2)` is the image of the reference triangle `(0, 0), (1, 0), (0, 1)`
//! under `x(ξ) = p0 + J ξ`, with `J = [p1 - p0, p2 - p0]`. Two 3x3 matrices describe this map
//! in the homogeneous form used by the local matrices:
//!
//! - the *coordinate transform* `C = [[1, 0, 0], [p0, p1 - p0, p2 - p0]]`, mapping the
//!   homogeneous reference coordinates `(1, ξ, η)` to `(1, x, y)`,
//! - the *field transform* `F = [[1, 1, 1], [p0, p1, p2]]`. The nodal values of the affine field
//!   `a + b x + c y` are `u = Fᵀ (a, b, c)`, so `F⁻ᵀ` recovers the coefficients from `u`.
//!
//! The vertex coordinates form the lower two rows of both matrices. `det(F) = det(J)` is twice
//! the signed area of the triangle. Degeneracy tests and inverses only involve `J`, never the
//! absolute coordinates.
use crate::config::Tolerances;
use crate::error::KernelError;
use crate::geometry::Triangle2d;
use crate::Real;
use nalgebra::{Matrix2, Matrix3, Point2};
use numeric_literals::replace_float_literals;

#[rustfmt::skip]
pub fn coordinate_transform<T: Real>(triangle: &Triangle2d<T>) -> Matrix3<T> {
    let [p0, p1, p2] = triangle.vertices();
    let (t1, t2) = (p1 - p0, p2 - p0);
    Matrix3::new(
        T::one(), T::zero(), T::zero(),
        p0.x, t1.x, t2.x,
        p0.y, t1.y, t2.y,
    )
}

#[rustfmt::skip]
pub fn field_transform<T: Real>(triangle: &Triangle2d<T>) -> Matrix3<T> {
    let [p0, p1, p2] = triangle.vertices();
    Matrix3::new(
        T::one(), T::one(), T::one(),
        p0.x, p1.x, p2.x,
        p0.y, p1.y, p2.y,
    )
}

/// The basis change `B = [[1, -1, -1], [0, 1, 0], [0, 0, 1]]`.
///
/// `B` maps coefficients with respect to the homogeneous reference coordinates `(1, ξ, η)` to
/// coefficients with respect to the reference P1 basis `(1 - ξ - η, ξ, η)`. For every triangle,
/// `Cᵀ F⁻ᵀ = Bᵀ`.
#[rustfmt::skip]
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
pub fn base_transform<T: Real>() -> Matrix3<T> {
    Matrix3::new(
        1.0, -1.0, -1.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
    )
}

/// The Jacobian `J = [p1 - p0, p2 - p0]` of the map from the reference triangle.
#[rustfmt::skip]
pub fn jacobian<T: Real>(triangle: &Triangle2d<T>) -> Matrix2<T> {
    let [p0, p1, p2] = triangle.vertices();
    let (t1, t2) = (p1 - p0, p2 - p0);
    Matrix2::new(
        t1.x, t2.x,
        t1.y, t2.y,
    )
}

/// `½ det(J)`. Since `det(F) = det(J)`, this is also half the determinant of the field transform.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
pub fn signed_area<T: Real>(triangle: &Triangle2d<T>) -> T {
    0.5 * determinant_2x2(&jacobian(triangle))
}

/// Determinant of a 3x3 matrix by cofactor expansion along the first row.
pub fn determinant_3x3<T: Real>(m: &Matrix3<T>) -> T {
    let cofactors = first_row_cofactors(m);
    m[(0, 0)] * cofactors[0] + m[(0, 1)] * cofactors[1] + m[(0, 2)] * cofactors[2]
}

fn first_row_cofactors<T: Real>(m: &Matrix3<T>) -> [T; 3] {
    [
        m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)],
        m[(1, 2)] * m[(2, 0)] - m[(1, 0)] * m[(2, 2)],
        m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)],
    ]
}

/// Inverts a general 3x3 matrix with the explicit adjugate formula.
///
/// Returns `None` if `|det(m)| <= relative_tolerance * prod_i |row_i(m)|`. The right-hand side is
/// Hadamard's bound on `|det(m)|`, so the test is invariant to scaling individual rows. Field
/// transforms should go through [`AffineMap`] instead, whose test ignores the translation part.
pub fn try_invert_3x3<T: Real>(m: &Matrix3<T>, relative_tolerance: T) -> Option<Matrix3<T>> {
    let [c00, c01, c02] = first_row_cofactors(m);
    let det = m[(0, 0)] * c00 + m[(0, 1)] * c01 + m[(0, 2)] * c02;
    let hadamard_bound = m.row(0).norm() * m.row(1).norm() * m.row(2).norm();
    if det.abs() <= relative_tolerance * hadamard_bound {
        return None;
    }

    let c10 = m[(0, 2)] * m[(2, 1)] - m[(0, 1)] * m[(2, 2)];
    let c11 = m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)];
    let c12 = m[(0, 1)] * m[(2, 0)] - m[(0, 0)] * m[(2, 1)];
    let c20 = m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)];
    let c21 = m[(0, 2)] * m[(1, 0)] - m[(0, 0)] * m[(1, 2)];
    let c22 = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];

    // The inverse is the transposed cofactor matrix divided by the determinant
    #[rustfmt::skip]
    let adjugate = Matrix3::new(
        c00, c10, c20,
        c01, c11, c21,
        c02, c12, c22,
    );
    Some(adjugate / det)
}

pub fn determinant_2x2<T: Real>(m: &Matrix2<T>) -> T {
    m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]
}

/// Inverts a 2x2 matrix with the explicit adjugate formula.
///
/// Returns `None` if `|det(m)| <= relative_tolerance * prod_j |col_j(m)|`. The right-hand side is
/// Hadamard's bound on `|det(m)|`, so the test is invariant to scaling individual columns.
pub fn try_invert_2x2<T: Real>(m: &Matrix2<T>, relative_tolerance: T) -> Option<Matrix2<T>> {
    let det = determinant_2x2(m);
    let hadamard_bound = m.column(0).norm() * m.column(1).norm();
    if det.abs() <= relative_tolerance * hadamard_bound {
        return None;
    }

    #[rustfmt::skip]
    let adjugate = Matrix2::new(
        m[(1, 1)], -m[(0, 1)],
        -m[(1, 0)], m[(0, 0)],
    );
    Some(adjugate / det)
}

/// `F⁻¹` of the triangle with first vertex `p0` and inverse Jacobian `J⁻¹`.
///
/// `F = C B⁻¹`, so `F⁻¹ = B C⁻¹` with `C⁻¹ = [[1, 0], [-J⁻¹ p0, J⁻¹]]`. Only `J⁻¹` is inverted,
/// which keeps the result independent of where the triangle sits in the plane.
fn inverse_field_transform<T: Real>(p0: &Point2<T>, inverse_jacobian: &Matrix2<T>) -> Matrix3<T> {
    let shift = -(inverse_jacobian * p0.coords);
    let mut inverse_coordinate_transform = Matrix3::identity();
    inverse_coordinate_transform
        .fixed_view_mut::<2, 1>(1, 0)
        .copy_from(&shift);
    inverse_coordinate_transform
        .fixed_view_mut::<2, 2>(1, 1)
        .copy_from(inverse_jacobian);
    base_transform::<T>() * inverse_coordinate_transform
}

/// The affine map of a validated, non-degenerate triangle.
///
/// Constructing an `AffineMap` is the only place where degeneracy is checked, so every local
/// matrix routine that accepts an `AffineMap` may assume that `F` is invertible.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AffineMap<T: Real> {
    triangle: Triangle2d<T>,
    coordinate_transform: Matrix3<T>,
    field_transform: Matrix3<T>,
    inverse_field_transform: Matrix3<T>,
    determinant: T,
}

impl<T: Real> AffineMap<T> {
    /// Builds the affine map of the triangle, rejecting degenerate geometry.
    ///
    /// The triangle is degenerate if `|det(J)| <= relative_area * diameter^2`, or if the Jacobian
    /// fails the relative determinant test of [`try_invert_2x2`]. Both tests only see the edge
    /// vectors, so translating a triangle never changes the outcome.
    pub fn from_triangle(triangle: &Triangle2d<T>, tolerances: &Tolerances<T>) -> Result<Self, KernelError<T>> {
        let jacobian = jacobian(triangle);
        let determinant = determinant_2x2(&jacobian);
        let degenerate = || KernelError::DegenerateGeometry {
            triangle: *triangle,
            determinant,
        };

        let diameter = triangle.diameter();
        if determinant.abs() <= tolerances.relative_area * diameter * diameter {
            return Err(degenerate());
        }

        let inverse_jacobian = try_invert_2x2(&jacobian, tolerances.relative_determinant).ok_or_else(degenerate)?;

        Ok(Self {
            triangle: *triangle,
            coordinate_transform: coordinate_transform(triangle),
            field_transform: field_transform(triangle),
            inverse_field_transform: inverse_field_transform(&triangle.vertices()[0], &inverse_jacobian),
            determinant,
        })
    }

    pub fn triangle(&self) -> &Triangle2d<T> {
        &self.triangle
    }

    /// The coordinate transform `C`.
    pub fn coordinate_transform(&self) -> &Matrix3<T> {
        &self.coordinate_transform
    }

    /// The field transform `F`.
    pub fn field_transform(&self) -> &Matrix3<T> {
        &self.field_transform
    }

    pub fn inverse_field_transform(&self) -> &Matrix3<T> {
        &self.inverse_field_transform
    }

    /// `F⁻ᵀ`, the factor that turns physical nodal values into homogeneous coefficients.
    pub fn inverse_transposed_field_transform(&self) -> Matrix3<T> {
        self.inverse_field_transform.transpose()
    }

    /// The Jacobian `J = [p1 - p0, p2 - p0]` of the map from the reference triangle.
    pub fn jacobian(&self) -> Matrix2<T> {
        self.coordinate_transform.fixed_view::<2, 2>(1, 1).into_owned()
    }

    /// `det(J) = det(F)`, twice the signed area of the triangle.
    pub fn determinant(&self) -> T {
        self.determinant
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
    pub fn signed_area(&self) -> T {
        0.5 * self.determinant
    }
}
