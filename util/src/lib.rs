//! Test helpers shared by the crates in the workspace.
use nalgebra::{Matrix3, Point2, Vector3};

/// Poor man's approx assertion for matrices
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

/// Same as [`assert_approx_matrix_eq`], but returns a proptest failure instead of panicking.
#[macro_export]
macro_rules! prop_assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;
        let max_absdiff = diff.abs().max();
        ::proptest::prop_assert!(
            max_absdiff <= $tol,
            "matrices differ by {:e} (abstol {:e})\nleft: {}\nright: {}",
            max_absdiff,
            $tol,
            $x,
            $y
        );
    }};
}

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// Samples the affine function `u(x, y) = a + b x + c y` at the three given vertices.
pub fn sample_affine_field(coefficients: [f64; 3], vertices: &[Point2<f64>; 3]) -> Vector3<f64> {
    let [a, b, c] = coefficients;
    Vector3::from_fn(|i, _| a + b * vertices[i].x + c * vertices[i].y)
}

/// The permutation matrix `S` with `(S u)_i = u_{(i + shift) mod 3}`.
pub fn cyclic_shift_matrix(shift: usize) -> Matrix3<f64> {
    Matrix3::from_fn(|i, j| if j == (i + shift) % 3 { 1.0 } else { 0.0 })
}
