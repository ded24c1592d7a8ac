//! The incircle predicate.
//!
//! `incircle(a, b, c, d)` evaluates the determinant
//!
//! ```text
//! | adx  ady  adx² + ady² |
//! | bdx  bdy  bdx² + bdy² |
//! | cdx  cdy  cdx² + cdy² |
//! ```
//!
//! with `adx = a.x - d.x` and so on. It is positive if `d` lies inside the circle through
//! `a`, `b` and `c` (which must be ordered counterclockwise), negative if it lies outside
//! and zero if all four points are cocircular. The sign flips for clockwise ordered
//! triangles.
//!
//! Evaluation escalates through the same stages as [orient2d](crate::orient2d()).

use crate::arithmetic::two_diff_tail;
use crate::bounds::{bounds, ErrorBounds};
use crate::expansion::Expansion;
use crate::orient::Stage;
use crate::{CirclePosition, CoordNum, Point2};

/// Inline capacity of the exact stage's accumulator.
const FIN_CAPACITY: usize = 1152;

/// Returns a positive value if `pd` lies inside the circle passing through `pa`, `pb` and
/// `pc`, a negative value if it lies outside and zero if the four points are cocircular.
///
/// `pa`, `pb` and `pc` must be ordered counterclockwise, otherwise the sign of the result
/// is reversed. The sign of the result is always exact.
///
/// # Example
/// ```
/// use geompreds::{incircle, Point2};
///
/// let a = Point2::new(0.0, 0.0);
/// let b = Point2::new(10.0, 0.0);
/// let c = Point2::new(0.0, 10.0);
///
/// assert!(incircle(a, b, c, Point2::new(1.0, 1.0)) > 0.0);
/// assert!(incircle(a, b, c, Point2::new(-100.0, -100.0)) < 0.0);
/// assert_eq!(incircle(a, b, c, Point2::new(10.0, 10.0)), 0.0);
/// ```
#[inline]
pub fn incircle<S: CoordNum>(pa: Point2<S>, pb: Point2<S>, pc: Point2<S>, pd: Point2<S>) -> f64 {
    incircle_adaptive(bounds(), pa.to_f64(), pb.to_f64(), pc.to_f64(), pd.to_f64()).0
}

/// Classifies the position of `pd` relative to the circle through the counterclockwise
/// ordered points `pa`, `pb` and `pc`. See [incircle].
#[inline]
pub fn circle_position<S: CoordNum>(
    pa: Point2<S>,
    pb: Point2<S>,
    pc: Point2<S>,
    pd: Point2<S>,
) -> CirclePosition {
    CirclePosition::from_determinant(incircle(pa, pb, pc, pd))
}

/// Evaluates the incircle determinant with plain floating point arithmetic.
///
/// This is fast, but the sign may be wrong for nearly cocircular points.
#[inline]
pub fn incircle_fast<S: CoordNum>(
    pa: Point2<S>,
    pb: Point2<S>,
    pc: Point2<S>,
    pd: Point2<S>,
) -> f64 {
    incircle_estimate(pa.to_f64(), pb.to_f64(), pc.to_f64(), pd.to_f64())
}

/// Evaluates the incircle determinant exactly, without trying any cheaper stage first.
///
/// The sign always matches [incircle]. This is considerably slower than the adaptive
/// version, even for nearly degenerate input.
pub fn incircle_exact<S: CoordNum>(
    pa: Point2<S>,
    pb: Point2<S>,
    pc: Point2<S>,
    pd: Point2<S>,
) -> f64 {
    incircle_exact_with(bounds(), pa.to_f64(), pb.to_f64(), pc.to_f64(), pd.to_f64())
}

pub(crate) fn incircle_estimate(
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
    pd: Point2<f64>,
) -> f64 {
    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    alift * (bdx * cdy - cdx * bdy)
        + blift * (cdx * ady - adx * cdy)
        + clift * (adx * bdy - bdx * ady)
}

pub(crate) fn incircle_adaptive(
    bounds: &ErrorBounds,
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
    pd: Point2<f64>,
) -> (f64, Stage) {
    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);

    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;
    let errbound = bounds.icc_err_bound_a * permanent;
    if det > errbound || -det > errbound {
        return (det, Stage::Filter);
    }

    incircle_tails(bounds, pa, pb, pc, pd, permanent)
}

/// Scales `minor` by `dx² + dy²`.
fn lift(minor: &Expansion<4>, dx: f64, dy: f64, splitter: f64) -> Expansion<32> {
    let x: Expansion<8> = minor.scale(dx, splitter);
    let xx: Expansion<16> = x.scale(dx, splitter);
    let y: Expansion<8> = minor.scale(dy, splitter);
    let yy: Expansion<16> = y.scale(dy, splitter);
    xx.sum(&yy)
}

/// The running sum of the exact stage.
struct Accumulator {
    splitter: f64,
    fin: Expansion<FIN_CAPACITY>,
}

impl Accumulator {
    fn add<const M: usize>(&mut self, term: &Expansion<M>) {
        self.fin = self.fin.sum(term);
    }

    /// Adds `minor * tail * twice + first.0 * tail * first.1 + second.0 * tail * second.1`
    /// and returns `minor * tail`.
    fn add_tail_terms(
        &mut self,
        minor: &Expansion<4>,
        tail: f64,
        twice: f64,
        first: (&Expansion<4>, f64),
        second: (&Expansion<4>, f64),
    ) -> Expansion<8> {
        let splitter = self.splitter;
        let scaled_minor: Expansion<8> = minor.scale(tail, splitter);
        let temp16a: Expansion<16> = scaled_minor.scale(twice, splitter);

        let scaled: Expansion<8> = first.0.scale(tail, splitter);
        let temp16b: Expansion<16> = scaled.scale(first.1, splitter);

        let scaled: Expansion<8> = second.0.scale(tail, splitter);
        let temp16c: Expansion<16> = scaled.scale(second.1, splitter);

        let temp32a: Expansion<32> = temp16a.sum(&temp16b);
        let temp48: Expansion<48> = temp16c.sum(&temp32a);
        self.add(&temp48);
        scaled_minor
    }

    /// Adds the products of `tail` with the second order terms `t` and `tt`.
    ///
    /// `scaled_minor` is the value returned by [Accumulator::add_tail_terms] for the same
    /// tail.
    fn add_tail_products(
        &mut self,
        scaled_minor: &Expansion<8>,
        tail: f64,
        twice: f64,
        t: &Expansion<8>,
        tt: &Expansion<4>,
    ) {
        let splitter = self.splitter;
        let temp16a: Expansion<16> = scaled_minor.scale(tail, splitter);
        let scaled_t: Expansion<16> = t.scale(tail, splitter);
        let temp32a: Expansion<32> = scaled_t.scale(twice, splitter);
        let temp48: Expansion<48> = temp16a.sum(&temp32a);
        self.add(&temp48);

        let temp32a: Expansion<32> = scaled_t.scale(tail, splitter);
        let scaled_tt: Expansion<8> = tt.scale(tail, splitter);
        let temp16a: Expansion<16> = scaled_tt.scale(twice, splitter);
        let temp16b: Expansion<16> = scaled_tt.scale(tail, splitter);
        let temp32b: Expansion<32> = temp16a.sum(&temp16b);
        let temp64: Expansion<64> = temp32a.sum(&temp32b);
        self.add(&temp64);
    }

    /// Adds `lift * a * b`.
    fn add_cross_term(&mut self, lift: &Expansion<4>, a: f64, b: f64) {
        let temp8: Expansion<8> = lift.scale(a, self.splitter);
        let temp16: Expansion<16> = temp8.scale(b, self.splitter);
        self.add(&temp16);
    }
}

/// Computes `(x_tail * y + x * y_tail) - (z_tail * w + z * w_tail)` and
/// `x_tail * y_tail - z_tail * w_tail`, the cross terms of a minor's tails.
fn minor_tails(
    splitter: f64,
    (x, x_tail): (f64, f64),
    (y, y_tail): (f64, f64),
    (z, z_tail): (f64, f64),
    (w, w_tail): (f64, f64),
) -> (Expansion<8>, Expansion<4>) {
    let u: Expansion<4> = Expansion::sum_of_products(x_tail, y, x, y_tail, splitter);
    let v: Expansion<4> = Expansion::sum_of_products(z_tail, -w, z, -w_tail, splitter);
    let t = u.sum(&v);
    let tt = Expansion::difference_of_products(x_tail, y_tail, z_tail, w_tail, splitter);
    (t, tt)
}

fn incircle_tails(
    bounds: &ErrorBounds,
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
    pd: Point2<f64>,
    permanent: f64,
) -> (f64, Stage) {
    let splitter = bounds.splitter;

    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;

    let bc: Expansion<4> = Expansion::difference_of_products(bdx, cdy, cdx, bdy, splitter);
    let ca: Expansion<4> = Expansion::difference_of_products(cdx, ady, adx, cdy, splitter);
    let ab: Expansion<4> = Expansion::difference_of_products(adx, bdy, bdx, ady, splitter);

    let adet = lift(&bc, adx, ady, splitter);
    let bdet = lift(&ca, bdx, bdy, splitter);
    let cdet = lift(&ab, cdx, cdy, splitter);
    let abdet: Expansion<64> = adet.sum(&bdet);
    let fin: Expansion<96> = abdet.sum(&cdet);

    let mut det = fin.estimate();
    let errbound = bounds.icc_err_bound_b * permanent;
    if det >= errbound || -det >= errbound {
        return (det, Stage::ExpansionEstimate);
    }

    let adxtail = two_diff_tail(pa.x, pd.x, adx);
    let adytail = two_diff_tail(pa.y, pd.y, ady);
    let bdxtail = two_diff_tail(pb.x, pd.x, bdx);
    let bdytail = two_diff_tail(pb.y, pd.y, bdy);
    let cdxtail = two_diff_tail(pc.x, pd.x, cdx);
    let cdytail = two_diff_tail(pc.y, pd.y, cdy);

    // Exact differences, `fin` is the exact determinant.
    if adxtail == 0.0
        && bdxtail == 0.0
        && cdxtail == 0.0
        && adytail == 0.0
        && bdytail == 0.0
        && cdytail == 0.0
    {
        return (det, Stage::ExpansionEstimate);
    }

    let errbound = bounds.icc_err_bound_c * permanent + bounds.result_err_bound * det.abs();
    det += ((adx * adx + ady * ady)
        * ((bdx * cdytail + cdy * bdxtail) - (bdy * cdxtail + cdx * bdytail))
        + 2.0 * (adx * adxtail + ady * adytail) * (bdx * cdy - bdy * cdx))
        + ((bdx * bdx + bdy * bdy)
            * ((cdx * adytail + ady * cdxtail) - (cdy * adxtail + adx * cdytail))
            + 2.0 * (bdx * bdxtail + bdy * bdytail) * (cdx * ady - cdy * adx))
        + ((cdx * cdx + cdy * cdy)
            * ((adx * bdytail + bdy * adxtail) - (ady * bdxtail + bdx * adytail))
            + 2.0 * (cdx * cdxtail + cdy * cdytail) * (adx * bdy - ady * bdx));
    if det >= errbound || -det >= errbound {
        return (det, Stage::TailCorrection);
    }

    let a_tails = adxtail != 0.0 || adytail != 0.0;
    let b_tails = bdxtail != 0.0 || bdytail != 0.0;
    let c_tails = cdxtail != 0.0 || cdytail != 0.0;

    let squares = |dx: f64, dy: f64, needed: bool| -> Expansion<4> {
        if needed {
            Expansion::sum_of_squares(dx, dy, splitter)
        } else {
            Expansion::zero()
        }
    };
    let aa = squares(adx, ady, b_tails || c_tails);
    let bb = squares(bdx, bdy, c_tails || a_tails);
    let cc = squares(cdx, cdy, a_tails || b_tails);

    let mut acc = Accumulator {
        splitter,
        fin: fin.resize(),
    };

    let mut axtbc = Expansion::zero();
    let mut aytbc = Expansion::zero();
    let mut bxtca = Expansion::zero();
    let mut bytca = Expansion::zero();
    let mut cxtab = Expansion::zero();
    let mut cytab = Expansion::zero();

    if adxtail != 0.0 {
        axtbc = acc.add_tail_terms(&bc, adxtail, 2.0 * adx, (&cc, bdy), (&bb, -cdy));
    }
    if adytail != 0.0 {
        aytbc = acc.add_tail_terms(&bc, adytail, 2.0 * ady, (&bb, cdx), (&cc, -bdx));
    }
    if bdxtail != 0.0 {
        bxtca = acc.add_tail_terms(&ca, bdxtail, 2.0 * bdx, (&aa, cdy), (&cc, -ady));
    }
    if bdytail != 0.0 {
        bytca = acc.add_tail_terms(&ca, bdytail, 2.0 * bdy, (&cc, adx), (&aa, -cdx));
    }
    if cdxtail != 0.0 {
        cxtab = acc.add_tail_terms(&ab, cdxtail, 2.0 * cdx, (&bb, ady), (&aa, -bdy));
    }
    if cdytail != 0.0 {
        cytab = acc.add_tail_terms(&ab, cdytail, 2.0 * cdy, (&aa, bdx), (&bb, -adx));
    }

    if a_tails {
        let (bct, bctt) = if b_tails || c_tails {
            minor_tails(
                splitter,
                (bdx, bdxtail),
                (cdy, cdytail),
                (cdx, cdxtail),
                (bdy, bdytail),
            )
        } else {
            (Expansion::zero(), Expansion::zero())
        };

        if adxtail != 0.0 {
            acc.add_tail_products(&axtbc, adxtail, 2.0 * adx, &bct, &bctt);
            if bdytail != 0.0 {
                acc.add_cross_term(&cc, adxtail, bdytail);
            }
            if cdytail != 0.0 {
                acc.add_cross_term(&bb, -adxtail, cdytail);
            }
        }
        if adytail != 0.0 {
            acc.add_tail_products(&aytbc, adytail, 2.0 * ady, &bct, &bctt);
        }
    }

    if b_tails {
        let (cat, catt) = if c_tails || a_tails {
            minor_tails(
                splitter,
                (cdx, cdxtail),
                (ady, adytail),
                (adx, adxtail),
                (cdy, cdytail),
            )
        } else {
            (Expansion::zero(), Expansion::zero())
        };

        if bdxtail != 0.0 {
            acc.add_tail_products(&bxtca, bdxtail, 2.0 * bdx, &cat, &catt);
            if cdytail != 0.0 {
                acc.add_cross_term(&aa, bdxtail, cdytail);
            }
            if adytail != 0.0 {
                acc.add_cross_term(&cc, -bdxtail, adytail);
            }
        }
        if bdytail != 0.0 {
            acc.add_tail_products(&bytca, bdytail, 2.0 * bdy, &cat, &catt);
        }
    }

    if c_tails {
        let (abt, abtt) = if a_tails || b_tails {
            minor_tails(
                splitter,
                (adx, adxtail),
                (bdy, bdytail),
                (bdx, bdxtail),
                (ady, adytail),
            )
        } else {
            (Expansion::zero(), Expansion::zero())
        };

        if cdxtail != 0.0 {
            acc.add_tail_products(&cxtab, cdxtail, 2.0 * cdx, &abt, &abtt);
            if adytail != 0.0 {
                acc.add_cross_term(&bb, cdxtail, adytail);
            }
            if bdytail != 0.0 {
                acc.add_cross_term(&aa, -cdxtail, bdytail);
            }
        }
        if cdytail != 0.0 {
            acc.add_tail_products(&cytab, cdytail, 2.0 * cdy, &abt, &abtt);
        }
    }

    (acc.fin.most_significant(), Stage::Exact)
}

/// Computes `x * x * minor + y * y * minor`, one column of the lifted 4x4 determinant.
fn lifted_column(minor: &Expansion<12>, x: f64, y: f64, splitter: f64) -> Expansion<96> {
    let temp24: Expansion<24> = minor.scale(x, splitter);
    let xx: Expansion<48> = temp24.scale(x, splitter);
    let temp24: Expansion<24> = minor.scale(y, splitter);
    let yy: Expansion<48> = temp24.scale(y, splitter);
    xx.sum(&yy)
}

/// Expands the lifted 4x4 determinant along its last column, using the raw coordinates.
pub(crate) fn incircle_exact_with(
    bounds: &ErrorBounds,
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
    pd: Point2<f64>,
) -> f64 {
    let splitter = bounds.splitter;
    let minor = |p: Point2<f64>, q: Point2<f64>| -> Expansion<4> {
        Expansion::difference_of_products(p.x, q.y, q.x, p.y, splitter)
    };

    let ab = minor(pa, pb);
    let bc = minor(pb, pc);
    let cd = minor(pc, pd);
    let da = minor(pd, pa);
    let ac = minor(pa, pc);
    let bd = minor(pb, pd);

    let temp8: Expansion<8> = cd.sum(&da);
    let cda: Expansion<12> = temp8.sum(&ac);
    let temp8: Expansion<8> = da.sum(&ab);
    let dab: Expansion<12> = temp8.sum(&bd);
    let temp8: Expansion<8> = ab.sum(&bc);
    let abc: Expansion<12> = temp8.sum(&ac.negate());
    let temp8: Expansion<8> = bc.sum(&cd);
    let bcd: Expansion<12> = temp8.sum(&bd.negate());

    let adet = lifted_column(&bcd, pa.x, pa.y, splitter);
    let bdet = lifted_column(&cda, pb.x, pb.y, splitter).negate();
    let cdet = lifted_column(&dab, pc.x, pc.y, splitter);
    let ddet = lifted_column(&abc, pd.x, pd.y, splitter).negate();

    let abdet: Expansion<192> = adet.sum(&bdet);
    let cddet: Expansion<192> = cdet.sum(&ddet);
    let deter: Expansion<384> = abdet.sum(&cddet);
    deter.most_significant()
}
