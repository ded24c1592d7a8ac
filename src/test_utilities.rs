#![allow(missing_docs)]
use crate::Point2;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;

pub const SEED: &[u8; 32] = b"wPYxAkIiHcEmSBAxQFoXFrpYToCe1B71";
pub const SEED2: &[u8; 32] = b"14LzG37Y9EHTcmLW8vBDqWwtYsCeVVyF";

pub fn random_points_in_range(range: f64, size: usize, seed: &[u8; 32]) -> Vec<Point2<f64>> {
    let mut rng = rand::rngs::StdRng::from_seed(*seed);
    let range = Uniform::new(-range, range);
    let mut points = Vec::with_capacity(size);
    for _ in 0..size {
        let x = range.sample(&mut rng);
        let y = range.sample(&mut rng);
        points.push(Point2::new(x, y));
    }
    points
}

/// Points on a `size x size` grid of neighboring floats, starting at `origin`.
pub fn near_collinear_grid(origin: Point2<f64>, size: usize) -> impl Iterator<Item = Point2<f64>> {
    let ulp_x = ulp(origin.x);
    let ulp_y = ulp(origin.y);
    (0..size).flat_map(move |i| {
        (0..size).map(move |j| {
            Point2::new(
                origin.x + i as f64 * ulp_x,
                origin.y + j as f64 * ulp_y,
            )
        })
    })
}

fn ulp(value: f64) -> f64 {
    f64::from_bits(value.abs().to_bits() + 1) - value.abs()
}

pub fn sign(value: f64) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn rational(value: f64) -> BigRational {
    BigRational::from_float(value).unwrap()
}

fn rational_sign(value: &BigRational) -> i32 {
    if value.is_zero() {
        0
    } else if value.is_positive() {
        1
    } else {
        -1
    }
}

/// Sign of the exact orientation determinant.
pub fn rational_orient2d(pa: Point2<f64>, pb: Point2<f64>, pc: Point2<f64>) -> i32 {
    let acx = rational(pa.x) - rational(pc.x);
    let acy = rational(pa.y) - rational(pc.y);
    let bcx = rational(pb.x) - rational(pc.x);
    let bcy = rational(pb.y) - rational(pc.y);
    rational_sign(&(acx * bcy - acy * bcx))
}

/// Sign of the exact incircle determinant.
pub fn rational_incircle(
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
    pd: Point2<f64>,
) -> i32 {
    let adx = rational(pa.x) - rational(pd.x);
    let ady = rational(pa.y) - rational(pd.y);
    let bdx = rational(pb.x) - rational(pd.x);
    let bdy = rational(pb.y) - rational(pd.y);
    let cdx = rational(pc.x) - rational(pd.x);
    let cdy = rational(pc.y) - rational(pd.y);

    let alift = &adx * &adx + &ady * &ady;
    let blift = &bdx * &bdx + &bdy * &bdy;
    let clift = &cdx * &cdx + &cdy * &cdy;

    let det = &alift * (&bdx * &cdy - &cdx * &bdy)
        + &blift * (&cdx * &ady - &adx * &cdy)
        + &clift * (&adx * &bdy - &bdx * &ady);
    rational_sign(&det)
}
