//! Numerical tolerances used to reject degenerate input.
use crate::Real;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Tolerances for degeneracy and vertex coincidence tests.
///
/// All tests are formulated so that they are unaffected by translating the mesh, and the
/// relative ones also by uniformly scaling it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tolerances<T> {
    /// A triangle is degenerate if `|2 * signed area| <= relative_area * diameter^2`.
    pub relative_area: T,
    /// The Jacobian `J` is singular if `|det J| <= relative_determinant * |J e1| * |J e2|`.
    pub relative_determinant: T,
    /// Two vertices coincide if every coordinate differs by at most this amount.
    pub vertex_distance: T,
}

impl<T: Real> Default for Tolerances<T> {
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T."))]
    fn default() -> Self {
        Self {
            relative_area: 1e-12,
            relative_determinant: 1e-12,
            vertex_distance: 1e-12,
        }
    }
}

impl<T> Tolerances<T> {
    pub fn with_relative_area(self, relative_area: T) -> Self {
        Self { relative_area, ..self }
    }

    pub fn with_relative_determinant(self, relative_determinant: T) -> Self {
        Self {
            relative_determinant,
            ..self
        }
    }

    pub fn with_vertex_distance(self, vertex_distance: T) -> Self {
        Self {
            vertex_distance,
            ..self
        }
    }
}
