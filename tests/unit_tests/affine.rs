use crate::reference_triangle;
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use nalgebra::{point, Matrix2, Matrix3};
use proptest::prelude::*;
use trimix::affine::{
    base_transform, coordinate_transform, determinant_2x2, determinant_3x3, field_transform, jacobian, signed_area,
    try_invert_2x2, try_invert_3x3, AffineMap,
};
use trimix::geometry::Triangle2d;
use trimix::proptest::{clockwise_triangle2d_strategy_f64, collinear_triangle2d_strategy_f64};
use trimix::{KernelError, Tolerances};
use util::prop_assert_approx_matrix_eq;

#[test]
fn transforms_of_reference_triangle() {
    let triangle = reference_triangle();
    assert_matrix_eq!(coordinate_transform(&triangle), Matrix3::<f64>::identity());

    #[rustfmt::skip]
    let expected_field = Matrix3::new(
        1.0, 1.0, 1.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0);
    assert_matrix_eq!(field_transform(&triangle), expected_field);

    let map = AffineMap::from_triangle(&triangle, &Tolerances::default()).unwrap();
    assert_scalar_eq!(map.determinant(), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(map.signed_area(), 0.5, comp = abs, tol = 1e-14);
    assert_matrix_eq!(map.jacobian(), Matrix2::<f64>::identity(), comp = abs, tol = 1e-14);
    assert_matrix_eq!(
        map.inverse_transposed_field_transform(),
        base_transform::<f64>().transpose(),
        comp = abs,
        tol = 1e-14
    );
}

#[test]
fn transforms_of_translated_triangle() {
    let triangle = Triangle2d([point![2.0, 1.0], point![5.0, 1.0], point![3.0, 4.0]]);

    #[rustfmt::skip]
    let expected_coordinate = Matrix3::new(
        1.0, 0.0, 0.0,
        2.0, 3.0, 1.0,
        1.0, 0.0, 3.0);
    assert_matrix_eq!(coordinate_transform(&triangle), expected_coordinate);

    let map = AffineMap::from_triangle(&triangle, &Tolerances::default()).unwrap();
    assert_scalar_eq!(map.determinant(), 9.0, comp = abs, tol = 1e-12);
    assert_scalar_eq!(signed_area(&triangle), 4.5, comp = abs, tol = 1e-12);
    assert_matrix_eq!(map.jacobian(), Matrix2::new(3.0, 1.0, 0.0, 3.0), comp = abs, tol = 1e-14);
}

#[test]
fn cofactor_inverse_of_general_matrix() {
    #[rustfmt::skip]
    let m = Matrix3::new(
        2.0, -1.0, 0.0,
        -1.0, 2.0, -1.0,
        0.0, -1.0, 2.0);
    assert_scalar_eq!(determinant_3x3(&m), 4.0, comp = abs, tol = 1e-14);

    let inverse = try_invert_3x3(&m, 1e-12).unwrap();
    #[rustfmt::skip]
    let expected = Matrix3::new(
        3.0, 2.0, 1.0,
        2.0, 4.0, 2.0,
        1.0, 2.0, 3.0) / 4.0;
    assert_matrix_eq!(inverse, expected, comp = abs, tol = 1e-14);

    #[rustfmt::skip]
    let rank_two = Matrix3::new(
        1.0, 2.0, 3.0,
        4.0, 5.0, 6.0,
        7.0, 8.0, 9.0);
    assert!(try_invert_3x3(&rank_two, 1e-12).is_none());
}

#[test]
fn adjugate_inverse_of_general_matrix() {
    let m = Matrix2::new(2.0, -1.0, 1.0, 3.0);
    assert_scalar_eq!(determinant_2x2(&m), 7.0, comp = abs, tol = 1e-14);

    let inverse = try_invert_2x2(&m, 1e-12).unwrap();
    assert_matrix_eq!(inverse, Matrix2::new(3.0, 1.0, -1.0, 2.0) / 7.0, comp = abs, tol = 1e-14);
    assert_matrix_eq!(m * inverse, Matrix2::<f64>::identity(), comp = abs, tol = 1e-14);
}

#[test]
fn adjugate_inverse_rejects_singular_matrices() {
    let rank_one = Matrix2::new(1.0, 2.0, 2.0, 4.0);
    assert!(try_invert_2x2(&rank_one, 1e-12).is_none());
    assert!(try_invert_2x2(&Matrix2::<f64>::zeros(), 1e-12).is_none());

    // The test is relative to the magnitude of the columns
    let tiny = Matrix2::<f64>::identity() * 1e-100;
    assert!(try_invert_2x2(&tiny, 1e-12).is_some());
}

#[test]
fn far_away_triangles_are_not_degenerate() {
    let offset = 1e6;
    let triangle = Triangle2d([
        point![offset, offset],
        point![offset + 1.0, offset],
        point![offset, offset + 1.0],
    ]);
    let map = AffineMap::from_triangle(&triangle, &Tolerances::default()).unwrap();
    assert_scalar_eq!(map.determinant(), 1.0, comp = abs, tol = 1e-14);
    assert_matrix_eq!(map.jacobian(), Matrix2::<f64>::identity(), comp = abs, tol = 1e-14);

    // The row-based test on F itself would reject the triangle
    let f = field_transform(&triangle);
    assert!(try_invert_3x3(&f, 1e-12).is_none());
    assert_matrix_eq!(f * map.inverse_field_transform(), Matrix3::<f64>::identity(), comp = abs, tol = 1e-8);
    assert_matrix_eq!(
        map.coordinate_transform().transpose() * map.inverse_transposed_field_transform(),
        base_transform::<f64>().transpose(),
        comp = abs,
        tol = 1e-8
    );
}

#[test]
fn small_triangles_are_not_degenerate() {
    let triangle = Triangle2d([point![0.0, 0.0], point![1e-8, 0.0], point![0.0, 1e-8]]);
    let map = AffineMap::from_triangle(&triangle, &Tolerances::default()).unwrap();
    assert_scalar_eq!(map.determinant(), 1e-16, comp = abs, tol = 1e-28);
}

#[test]
fn coincident_vertices_are_degenerate() {
    let p = point![1.0, 2.0];
    let triangle = Triangle2d([p, p, p]);
    let result = AffineMap::from_triangle(&triangle, &Tolerances::default());
    assert!(matches!(
        result,
        Err(KernelError::DegenerateGeometry { determinant, .. }) if determinant == 0.0
    ));
}

proptest! {
    #[test]
    fn coordinate_and_field_transforms_reduce_to_base_transform(triangle in any::<Triangle2d<f64>>()) {
        // Cᵀ F⁻ᵀ = Bᵀ holds for every non-degenerate triangle
        let map = AffineMap::from_triangle(&triangle, &Tolerances::default()).unwrap();
        let product = map.coordinate_transform().transpose() * map.inverse_transposed_field_transform();
        prop_assert_approx_matrix_eq!(product, base_transform::<f64>().transpose(), abstol = 1e-9);
    }

    #[test]
    fn inverse_field_transform_is_inverse(triangle in any::<Triangle2d<f64>>()) {
        let map = AffineMap::from_triangle(&triangle, &Tolerances::default()).unwrap();
        let product = field_transform(&triangle) * map.inverse_field_transform();
        prop_assert_approx_matrix_eq!(product, Matrix3::<f64>::identity(), abstol = 1e-9);
        prop_assert_approx_matrix_eq!(jacobian(&triangle), map.jacobian(), abstol = 1e-14);

        // Near the origin, the general cofactor inverse agrees with the closed form
        let cofactor_inverse = try_invert_3x3(&field_transform(&triangle), 1e-12).unwrap();
        let tol = 1e-8 * (1.0 + cofactor_inverse.amax());
        prop_assert_approx_matrix_eq!(cofactor_inverse, *map.inverse_field_transform(), abstol = tol);
    }

    #[test]
    fn degeneracy_is_translation_invariant(triangle in any::<Triangle2d<f64>>(), offset in -1e7..1e7f64) {
        let shift = nalgebra::Vector2::new(offset, -0.5 * offset);
        let translated = Triangle2d(triangle.0.map(|p| p + shift));
        let map = AffineMap::from_triangle(&translated, &Tolerances::default()).unwrap();
        prop_assert!((map.determinant() - 2.0 * triangle.signed_area()).abs() <= 1e-6);
    }

    #[test]
    fn determinant_is_twice_signed_area(triangle in clockwise_triangle2d_strategy_f64()) {
        let map = AffineMap::from_triangle(&triangle, &Tolerances::default()).unwrap();
        prop_assert!(map.determinant() < 0.0);
        prop_assert!((map.determinant() - 2.0 * triangle.signed_area()).abs() <= 1e-10 * map.determinant().abs());
        prop_assert!((map.jacobian().determinant() - map.determinant()).abs() <= 1e-10 * map.determinant().abs());
    }

    #[test]
    fn collinear_triangles_are_degenerate(triangle in collinear_triangle2d_strategy_f64()) {
        let result = AffineMap::from_triangle(&triangle, &Tolerances::default());
        prop_assert!(
            matches!(result, Err(KernelError::DegenerateGeometry { .. })),
            "expected DegenerateGeometry, got {:?}",
            result
        );
    }
}
