//! The orientation predicate.
//!
//! `orient2d(a, b, c)` evaluates `(a - c) x (b - c)`, twice the signed area of the triangle
//! `a, b, c`. The adaptive evaluation escalates through four stages, each one only run if
//! the error bound of the previous stage cannot certify the sign:
//!
//! 1. A floating point estimate, checked against `ccw_err_bound_a`.
//! 2. The exact determinant of the *rounded* differences, estimated as a single float.
//! 3. The previous estimate corrected by the first order terms of the subtraction
//!    roundoff ("tails").
//! 4. The exact determinant including all tail products.

use crate::bounds::{bounds, ErrorBounds};
use crate::expansion::Expansion;
use crate::{CoordNum, Orientation, Point2};

use crate::arithmetic::two_diff_tail;

/// The stage of an adaptive predicate that certified the returned sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Stage {
    /// Plain floating point evaluation.
    Filter,
    /// Exact evaluation of the rounded differences.
    ExpansionEstimate,
    /// First order correction of the subtraction roundoff.
    TailCorrection,
    /// Fully exact evaluation.
    Exact,
}

/// Returns a positive value if `pa`, `pb` and `pc` are ordered counterclockwise, a negative
/// value if they are ordered clockwise and zero if they are collinear.
///
/// The sign of the result is always exact, the magnitude approximates twice the signed area
/// of the triangle.
///
/// # Example
/// ```
/// use geompreds::{orient2d, Point2};
///
/// let a = Point2::new(0.0, 0.0);
/// let b = Point2::new(10.0, 0.0);
///
/// assert!(orient2d(a, b, Point2::new(10.0, 10.0)) > 0.0);
/// assert!(orient2d(a, b, Point2::new(10.0, -10.0)) < 0.0);
/// assert_eq!(orient2d(a, b, Point2::new(20.0, 0.0)), 0.0);
/// ```
#[inline]
pub fn orient2d<S: CoordNum>(pa: Point2<S>, pb: Point2<S>, pc: Point2<S>) -> f64 {
    orient2d_adaptive(bounds(), pa.to_f64(), pb.to_f64(), pc.to_f64()).0
}

/// Classifies the orientation of `pa`, `pb` and `pc`. See [orient2d].
#[inline]
pub fn orientation<S: CoordNum>(pa: Point2<S>, pb: Point2<S>, pc: Point2<S>) -> Orientation {
    Orientation::from_determinant(orient2d(pa, pb, pc))
}

/// Evaluates the orientation determinant with plain floating point arithmetic.
///
/// This is fast, but the sign may be wrong for nearly collinear points.
#[inline]
pub fn orient2d_fast<S: CoordNum>(pa: Point2<S>, pb: Point2<S>, pc: Point2<S>) -> f64 {
    orient2d_estimate(pa.to_f64(), pb.to_f64(), pc.to_f64())
}

/// Evaluates the orientation determinant exactly, without trying any cheaper stage first.
///
/// The sign always matches [orient2d]. Mostly useful as a reference.
pub fn orient2d_exact<S: CoordNum>(pa: Point2<S>, pb: Point2<S>, pc: Point2<S>) -> f64 {
    orient2d_exact_with(bounds(), pa.to_f64(), pb.to_f64(), pc.to_f64())
}

#[inline]
pub(crate) fn orient2d_estimate(pa: Point2<f64>, pb: Point2<f64>, pc: Point2<f64>) -> f64 {
    let acx = pa.x - pc.x;
    let bcx = pb.x - pc.x;
    let acy = pa.y - pc.y;
    let bcy = pb.y - pc.y;
    acx * bcy - acy * bcx
}

pub(crate) fn orient2d_adaptive(
    bounds: &ErrorBounds,
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
) -> (f64, Stage) {
    let detleft = (pa.x - pc.x) * (pb.y - pc.y);
    let detright = (pa.y - pc.y) * (pb.x - pc.x);
    let det = detleft - detright;

    // Terms of opposite sign cannot cancel.
    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return (det, Stage::Filter);
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return (det, Stage::Filter);
        }
        -detleft - detright
    } else {
        return (det, Stage::Filter);
    };

    let errbound = bounds.ccw_err_bound_a * detsum;
    if det >= errbound || -det >= errbound {
        return (det, Stage::Filter);
    }

    orient2d_tails(bounds, pa, pb, pc, detsum)
}

fn orient2d_tails(
    bounds: &ErrorBounds,
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
    detsum: f64,
) -> (f64, Stage) {
    let splitter = bounds.splitter;

    let acx = pa.x - pc.x;
    let bcx = pb.x - pc.x;
    let acy = pa.y - pc.y;
    let bcy = pb.y - pc.y;

    let b: Expansion<4> = Expansion::difference_of_products(acx, bcy, acy, bcx, splitter);
    let mut det = b.estimate();
    let errbound = bounds.ccw_err_bound_b * detsum;
    if det >= errbound || -det >= errbound {
        return (det, Stage::ExpansionEstimate);
    }

    let acxtail = two_diff_tail(pa.x, pc.x, acx);
    let bcxtail = two_diff_tail(pb.x, pc.x, bcx);
    let acytail = two_diff_tail(pa.y, pc.y, acy);
    let bcytail = two_diff_tail(pb.y, pc.y, bcy);

    // Exact differences, `b` is the exact determinant.
    if acxtail == 0.0 && acytail == 0.0 && bcxtail == 0.0 && bcytail == 0.0 {
        return (det, Stage::ExpansionEstimate);
    }

    let errbound = bounds.ccw_err_bound_c * detsum + bounds.result_err_bound * det.abs();
    det += (acx * bcytail + bcy * acxtail) - (acy * bcxtail + bcx * acytail);
    if det >= errbound || -det >= errbound {
        return (det, Stage::TailCorrection);
    }

    let u: Expansion<4> = Expansion::difference_of_products(acxtail, bcy, acytail, bcx, splitter);
    let c1: Expansion<8> = b.sum(&u);

    let u: Expansion<4> = Expansion::difference_of_products(acx, bcytail, acy, bcxtail, splitter);
    let c2: Expansion<12> = c1.sum(&u);

    let u: Expansion<4> =
        Expansion::difference_of_products(acxtail, bcytail, acytail, bcxtail, splitter);
    let d: Expansion<16> = c2.sum(&u);

    (d.most_significant(), Stage::Exact)
}

/// Sums `ax*by - ax*cy + bx*cy - bx*ay + cx*ay - cx*by` on the raw coordinates.
pub(crate) fn orient2d_exact_with(
    bounds: &ErrorBounds,
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
) -> f64 {
    let splitter = bounds.splitter;

    let a_terms: Expansion<4> = Expansion::difference_of_products(pa.x, pb.y, pa.x, pc.y, splitter);
    let b_terms: Expansion<4> = Expansion::difference_of_products(pb.x, pc.y, pb.x, pa.y, splitter);
    let c_terms: Expansion<4> = Expansion::difference_of_products(pc.x, pa.y, pc.x, pb.y, splitter);

    let v: Expansion<8> = a_terms.sum(&b_terms);
    let w: Expansion<12> = v.sum(&c_terms);
    w.most_significant()
}
