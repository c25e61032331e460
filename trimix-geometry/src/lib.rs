//! Geometric primitives used by `trimix`.
//!
//! The crate is deliberately small: it knows about points and triangles in the plane,
//! their orientation and the topology of their edges, but nothing about finite elements.
use nalgebra::{Point2, RealField};

mod triangle;
pub use triangle::*;

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub use nalgebra;

/// Scalar type used throughout `trimix`.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    Counterclockwise,
}

/// Returns `true` if the two points agree in every coordinate up to the absolute tolerance `tol`.
pub fn points_coincide<T: Real>(a: &Point2<T>, b: &Point2<T>, tol: T) -> bool {
    (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
}
