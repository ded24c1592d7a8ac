use geompreds::{
    circle_position, incircle, incircle_exact, initialize, orient2d, orient2d_exact, orientation,
    AdaptiveKernel, CirclePosition, Orientation, Point2, PredicateKernel,
};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SEED: &[u8; 32] = b"Vf3qzX8KpLw1NcRt7YhBd0GmJs5Ue2Ao";

/// Coordinates are `integer * SCALE`, which keeps every input exactly representable.
const SCALE: f64 = 1.0 / (1u64 << 30) as f64;

fn scaled(x: i64, y: i64) -> Point2<f64> {
    Point2::new(x as f64 * SCALE, y as f64 * SCALE)
}

fn orient2d_i128(a: [i64; 2], b: [i64; 2], c: [i64; 2]) -> i128 {
    let acx = (a[0] - c[0]) as i128;
    let acy = (a[1] - c[1]) as i128;
    let bcx = (b[0] - c[0]) as i128;
    let bcy = (b[1] - c[1]) as i128;
    acx * bcy - acy * bcx
}

fn incircle_i128(a: [i64; 2], b: [i64; 2], c: [i64; 2], d: [i64; 2]) -> i128 {
    let adx = (a[0] - d[0]) as i128;
    let ady = (a[1] - d[1]) as i128;
    let bdx = (b[0] - d[0]) as i128;
    let bdy = (b[1] - d[1]) as i128;
    let cdx = (c[0] - d[0]) as i128;
    let cdy = (c[1] - d[1]) as i128;

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    alift * (bdx * cdy - cdx * bdy) + blift * (cdx * ady - adx * cdy) + clift * (adx * bdy - bdx * ady)
}

fn sign(value: f64) -> i128 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Integer points close to the line through the origin with direction `(3, 7)`.
fn nearly_collinear_integers(rng: &mut StdRng) -> [i64; 2] {
    let along = Uniform::new_inclusive(-(1i64 << 20), 1i64 << 20);
    let off = Uniform::new_inclusive(-1i64, 1);
    let k = along.sample(rng);
    [3 * k + off.sample(rng), 7 * k + off.sample(rng)]
}

#[test]
fn test_orient2d_matches_integer_reference() {
    let mut rng = StdRng::from_seed(*SEED);
    for _ in 0..2000 {
        let [a, b, c] = [(); 3].map(|_| nearly_collinear_integers(&mut rng));
        let expected = orient2d_i128(a, b, c).signum();
        let (pa, pb, pc) = (scaled(a[0], a[1]), scaled(b[0], b[1]), scaled(c[0], c[1]));
        assert_eq!(sign(orient2d(pa, pb, pc)), expected);
        assert_eq!(sign(orient2d_exact(pa, pb, pc)), expected);
    }
}

#[test]
fn test_incircle_matches_integer_reference() {
    let mut rng = StdRng::from_seed(*SEED);
    let coordinate = Uniform::new_inclusive(-(1i64 << 20), 1i64 << 20);
    for _ in 0..2000 {
        let [a, b, c] = [(); 3].map(|_| [coordinate.sample(&mut rng), coordinate.sample(&mut rng)]);
        // Reusing a corner makes d cocircular, a unit step off a corner lands next to the circle.
        let d = match coordinate.sample(&mut rng).rem_euclid(3) {
            0 => b,
            1 => [a[0] + 1, a[1] - 1],
            _ => [coordinate.sample(&mut rng), coordinate.sample(&mut rng)],
        };
        let expected = incircle_i128(a, b, c, d).signum();
        let points = [a, b, c, d].map(|p| scaled(p[0], p[1]));
        assert_eq!(
            sign(incircle(points[0], points[1], points[2], points[3])),
            expected
        );
        assert_eq!(
            sign(incircle_exact(points[0], points[1], points[2], points[3])),
            expected
        );
    }
}

#[test]
fn test_collinear_and_cocircular_are_exactly_zero() {
    initialize(false);
    assert_eq!(
        orientation(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0)
        ),
        Orientation::Collinear
    );
    assert_eq!(
        circle_position(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
            Point2::new(0.0, -1.0)
        ),
        CirclePosition::OnCircle
    );
}

#[test]
fn test_one_ulp_off_the_diagonal() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 1.0);
    let above = Point2::new(1.0, 1.0 + f64::EPSILON);
    assert_eq!(orientation(a, b, above), Orientation::CounterClockwise);
    assert_eq!(orientation(b, a, above), Orientation::Clockwise);
}

#[test]
fn test_default_kernel() {
    let kernel = AdaptiveKernel::default();
    let a = Point2::new(0.0f32, 0.0);
    let b = Point2::new(10.0, 0.0);
    let c = Point2::new(0.0, 10.0);
    assert!(kernel.is_ordered_ccw(a, b, c));
    assert!(kernel.contained_in_circumference(a, b, c, Point2::new(1.0, 1.0)));
    assert!(!kernel.contained_in_circumference(a, b, c, Point2::new(10.0, 10.0)));
}
