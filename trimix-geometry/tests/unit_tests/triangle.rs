use crate::unit_tests::slices_are_equal_shift_invariant;
use matrixcompare::assert_scalar_eq;
use nalgebra::{point, vector, Point2};
use proptest::prelude::*;
use trimix_geometry::proptest::{
    clockwise_triangle2d_strategy_f64, nondegenerate_triangle2d_strategy_f64, Triangle2dParams,
};
use trimix_geometry::{Orientation, Triangle2d};
use util::assert_panics;

fn unit_square_vertices() -> [Point2<f64>; 4] {
    [point![0.0, 0.0], point![1.0, 0.0], point![1.0, 1.0], point![0.0, 1.0]]
}

#[test]
fn reference_triangle_area_and_orientation() {
    let triangle = Triangle2d([point![0.0, 0.0], point![1.0, 0.0], point![0.0, 1.0]]);
    assert_scalar_eq!(triangle.signed_area(), 0.5, comp = float);
    assert_eq!(triangle.orientation(), Orientation::Counterclockwise);

    let mut flipped = triangle;
    flipped.swap_vertices(1, 2);
    assert_scalar_eq!(flipped.signed_area(), -0.5, comp = float);
    assert_scalar_eq!(flipped.area(), 0.5, comp = float);
    assert_eq!(flipped.orientation(), Orientation::Clockwise);
}

#[test]
fn diameter_is_longest_edge() {
    let triangle = Triangle2d([point![0.0, 0.0], point![3.0, 0.0], point![0.0, 4.0]]);
    assert_scalar_eq!(triangle.diameter(), 5.0, comp = float);
}

#[test]
fn edges_run_from_vertex_k_to_vertex_k_plus_one() {
    let [a, b, _, d] = unit_square_vertices();
    let triangle = Triangle2d([a, b, d]);

    assert_eq!(triangle.edge_vertices(0), [a, b]);
    assert_eq!(triangle.edge_vertices(1), [b, d]);
    assert_eq!(triangle.edge_vertices(2), [d, a]);
    assert_eq!(triangle.inner_edges(), [[a, b], [b, d], [d, a]]);

    assert_eq!(triangle.opposite_vertex(0), d);
    assert_eq!(triangle.opposite_vertex(1), a);
    assert_eq!(triangle.opposite_vertex(2), b);
}

#[test]
fn edge_index_respects_direction() {
    let [a, b, _, d] = unit_square_vertices();
    let triangle = Triangle2d([a, b, d]);
    let tol = 1e-14;

    assert_eq!(triangle.edge_index(&a, &b, tol), Some(0));
    assert_eq!(triangle.edge_index(&b, &d, tol), Some(1));
    assert_eq!(triangle.edge_index(&d, &a, tol), Some(2));
    assert_eq!(triangle.edge_index(&b, &a, tol), None);
    assert_eq!(triangle.edge_index(&a, &point![1.0, 1.0], tol), None);
}

#[test]
fn find_vertex_uses_per_coordinate_tolerance() {
    let [a, b, c, _] = unit_square_vertices();
    let triangle = Triangle2d([a, b, c]);

    assert_eq!(triangle.find_vertex(&point![1.0 + 1e-15, 1.0], 1e-14), Some(2));
    assert_eq!(triangle.find_vertex(&point![1.0 + 1e-10, 1.0], 1e-14), None);
    assert_eq!(triangle.find_vertex(&point![0.5, 0.5], 1e-14), None);
}

#[test]
fn edge_queries_panic_for_invalid_edge() {
    let [a, b, c, _] = unit_square_vertices();
    let triangle = Triangle2d([a, b, c]);
    assert_panics!(triangle.edge_vertices(3));
    assert_panics!(triangle.opposite_vertex(3));
}

#[test]
fn sides_and_centroid() {
    let [a, b, c, _] = unit_square_vertices();
    let triangle = Triangle2d::from_vertices([a, b, c]);
    assert_eq!(triangle, Triangle2d([a, b, c]));

    let sides = triangle.sides();
    assert_eq!(sides, [vector![1.0, 0.0], vector![0.0, 1.0], vector![-1.0, -1.0]]);
    for (k, side) in sides.iter().enumerate() {
        let [start, end] = triangle.edge_vertices(k);
        assert_eq!(*side, end - start);
    }

    let centroid = triangle.centroid();
    assert_scalar_eq!(centroid.x, 2.0 / 3.0, comp = float);
    assert_scalar_eq!(centroid.y, 1.0 / 3.0, comp = float);
}

#[test]
fn display_lists_all_coordinates() {
    let triangle = Triangle2d([point![0.0, 0.5], point![1.0, 0.0], point![2.0, 3.0]]);
    assert_eq!(format!("{}", triangle), "(0, 0.5) (1, 0) (2, 3)");
}

proptest! {
    #[test]
    fn nondegenerate_strategy_is_counterclockwise(triangle in nondegenerate_triangle2d_strategy_f64()) {
        prop_assert_eq!(triangle.orientation(), Orientation::Counterclockwise);
        prop_assert!(triangle.area() > 1e-3 * triangle.diameter().powi(2));
    }

    #[test]
    fn clockwise_strategy_is_clockwise(triangle in clockwise_triangle2d_strategy_f64()) {
        prop_assert_eq!(triangle.orientation(), Orientation::Clockwise);
    }

    #[test]
    fn arbitrary_triangles_have_requested_orientation(
        triangle in any_with::<Triangle2d<f64>>(Triangle2dParams::default().with_orientation(Orientation::Clockwise))
    ) {
        prop_assert_eq!(triangle.orientation(), Orientation::Clockwise);
    }

    #[test]
    fn rotation_preserves_geometry(triangle in nondegenerate_triangle2d_strategy_f64()) {
        let rotated = triangle.rotated();
        prop_assert!((rotated.signed_area() - triangle.signed_area()).abs() <= 1e-12 * triangle.area().max(1.0));
        prop_assert!(slices_are_equal_shift_invariant(triangle.vertices(), rotated.vertices(), |a, b| a == b));
        prop_assert_eq!(rotated.vertices()[0], triangle.vertices()[1]);
    }
}
