use crate::{Orientation, Triangle2d};
use nalgebra::{Point2, Vector2};
use proptest::prelude::*;

fn point2() -> impl Strategy<Value = Point2<f64>> {
    // Pick a reasonably small range to pick coordinates from,
    // otherwise we can easily get floating point numbers that are
    // so ridiculously large as to break anything we might want to do with them
    let range = -10.0..10.0;
    [range.clone(), range].prop_map(|[x, y]| Point2::new(x, y))
}

#[derive(Debug, Clone)]
pub struct Triangle2dParams {
    orientation: Orientation,
}

impl Triangle2dParams {
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self { orientation, ..self }
    }
}

impl Default for Triangle2dParams {
    fn default() -> Self {
        Self {
            orientation: Orientation::Counterclockwise,
        }
    }
}

impl Arbitrary for Triangle2d<f64> {
    type Parameters = Triangle2dParams;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        nondegenerate_triangle2d_strategy_f64()
            .prop_map(move |mut triangle| {
                if triangle.orientation() != args.orientation {
                    triangle.swap_vertices(0, 1);
                }
                triangle
            })
            .boxed()
    }
}

/// A strategy for counter-clockwise triangles that are far from degenerate.
///
/// The third vertex is placed at a positive, bounded-below distance from the line through the
/// first two, so the ratio between area and squared diameter stays well above any sensible
/// degeneracy tolerance.
pub fn nondegenerate_triangle2d_strategy_f64() -> impl Strategy<Value = Triangle2d<f64>> {
    let direction = (0.5..5.0, 0.0..std::f64::consts::TAU)
        .prop_map(|(length, angle): (f64, f64)| Vector2::new(length * angle.cos(), length * angle.sin()));
    (point2(), direction, -1.0..2.0, 0.2..2.0).prop_map(|(a, ab, t1, t2)| {
        let b = a + ab;
        let n = Vector2::new(-ab.y, ab.x);
        let c = a + ab * t1 + n * t2;
        Triangle2d([a, b, c])
    })
}

pub fn clockwise_triangle2d_strategy_f64() -> impl Strategy<Value = Triangle2d<f64>> {
    nondegenerate_triangle2d_strategy_f64().prop_map(|mut triangle| {
        triangle.swap_vertices(0, 2);
        triangle
    })
}

/// Three distinct points on a common line.
pub fn collinear_triangle2d_strategy_f64() -> impl Strategy<Value = Triangle2d<f64>> {
    (point2(), point2(), -3.0..3.0).prop_map(|(a, b, t)| {
        let c = a + (b - a) * t;
        Triangle2d([a, b, c])
    })
}
