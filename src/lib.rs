//! Closed-form local matrices for lowest-order mixed finite elements on triangles.
//!
//! Every local matrix is composed from three ingredients: the affine map of a triangle
//! ([`affine`]), a fixed table of integrals over the reference triangle ([`reference`]) and, for
//! terms that couple two triangles, the orientation of their shared edge ([`coupling`]).
//! [`assembly::local::LocalMatrixBuilder`] combines them into the matrices a global assembler
//! scatters into its system.
pub mod affine;
pub mod assembly;
pub mod config;
pub mod coupling;
pub mod error;
pub mod reference;

pub mod geometry {
    pub use trimix_geometry::*;
}

#[cfg(feature = "proptest-support")]
pub mod proptest {
    pub use trimix_geometry::proptest::*;
}

pub extern crate nalgebra;

pub use assembly::local::{
    artificial_flux_matrix, boundary_matrix, flux_matrix, mass_matrix, neumann_constraint_matrix, stiffness_matrix,
    FluxMatrix, LocalMatrixBuilder,
};
pub use config::Tolerances;
pub use coupling::{resolve_edge_coupling, EdgeCoupling};
pub use error::KernelError;
pub use trimix_geometry::Real;
