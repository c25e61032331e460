//! Parallel evaluation of local matrices over many triangles.
use crate::assembly::local::{LocalMatrix, LocalMatrixBuilder};
use crate::error::KernelError;
use crate::geometry::Triangle2d;
use crate::Real;
use eyre::WrapErr;
use log::trace;
use nalgebra::Matrix3;
use rayon::prelude::*;

/// Evaluates `compute` for every triangle in parallel.
///
/// The output preserves the order of `triangles`. If any evaluation fails, an error is returned
/// that names the index of a failing element.
pub fn par_compute_local<T, M, F>(triangles: &[Triangle2d<T>], compute: F) -> eyre::Result<Vec<M>>
where
    T: Real,
    M: Send,
    F: Fn(&Triangle2d<T>) -> Result<M, KernelError<T>> + Sync,
{
    trace!("Computing local quantities for {} triangles", triangles.len());
    triangles
        .par_iter()
        .enumerate()
        .map(|(element_index, triangle)| {
            compute(triangle).wrap_err_with(|| format!("Failed to compute local matrix for element {element_index}"))
        })
        .collect()
}

/// The mass matrices of all triangles.
pub fn par_mass_matrices<T: Real>(
    builder: &LocalMatrixBuilder<T>,
    triangles: &[Triangle2d<T>],
) -> eyre::Result<Vec<Matrix3<T>>> {
    par_compute_local(triangles, |triangle| builder.mass(triangle).map(LocalMatrix::into_matrix))
}

/// The stiffness matrices of all triangles.
pub fn par_stiffness_matrices<T: Real>(
    builder: &LocalMatrixBuilder<T>,
    triangles: &[Triangle2d<T>],
) -> eyre::Result<Vec<Matrix3<T>>> {
    par_compute_local(triangles, |triangle| builder.stiffness(triangle).map(LocalMatrix::into_matrix))
}
