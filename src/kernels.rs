use crate::bounds::{bounds, ErrorBounds};
use crate::incircle::{incircle_adaptive, incircle_estimate, incircle_exact_with};
use crate::orient::{orient2d_adaptive, orient2d_estimate, orient2d_exact_with};
use crate::{CirclePosition, CoordNum, Orientation, Point2};

/// Determines how the two basic geometric queries are evaluated.
///
/// Orientation tests (on which side of a line lies a point?) and in-circle tests (is a
/// point contained in the circumference of a triangle?) can be answered *approximately*
/// or *precisely*. Since each application has different needs, code that is generic over
/// a `PredicateKernel` lets the caller decide. It is recommended to use one of the
/// predefined kernels:
///
///  - [NaiveKernel]: plain floating point evaluation, fastest but not robust.
///  - [AdaptiveKernel]: exact signs at nearly the speed of the naive kernel.
///  - [ExactKernel]: always evaluates exactly, mostly useful for testing.
pub trait PredicateKernel {
    /// Evaluates the orientation determinant of `pa`, `pb` and `pc`.
    ///
    /// Positive for counterclockwise, negative for clockwise and zero for collinear points.
    fn orient2d(&self, pa: Point2<f64>, pb: Point2<f64>, pc: Point2<f64>) -> f64;

    /// Evaluates the incircle determinant of `pa`, `pb`, `pc` and `pd`.
    ///
    /// Positive if `pd` lies inside the circle through the counterclockwise ordered points
    /// `pa`, `pb` and `pc`.
    fn incircle(&self, pa: Point2<f64>, pb: Point2<f64>, pc: Point2<f64>, pd: Point2<f64>)
        -> f64;

    /// Classifies the orientation of three points.
    fn orientation<S: CoordNum>(&self, pa: Point2<S>, pb: Point2<S>, pc: Point2<S>) -> Orientation {
        Orientation::from_determinant(self.orient2d(pa.to_f64(), pb.to_f64(), pc.to_f64()))
    }

    /// Classifies the position of `pd` relative to the circle through the counterclockwise
    /// ordered points `pa`, `pb` and `pc`.
    fn circle_position<S: CoordNum>(
        &self,
        pa: Point2<S>,
        pb: Point2<S>,
        pc: Point2<S>,
        pd: Point2<S>,
    ) -> CirclePosition {
        CirclePosition::from_determinant(self.incircle(
            pa.to_f64(),
            pb.to_f64(),
            pc.to_f64(),
            pd.to_f64(),
        ))
    }

    /// Returns `true` if `v0`, `v1` and `v2` are ordered counterclockwise or are collinear.
    fn is_ordered_ccw<S: CoordNum>(&self, v0: Point2<S>, v1: Point2<S>, v2: Point2<S>) -> bool {
        !self.orientation(v0, v1, v2).is_cw()
    }

    /// Returns `true` if `pd` lies strictly inside the circumference of the triangle `pa`,
    /// `pb`, `pc`. The triangle has to be ordered counterclockwise.
    fn contained_in_circumference<S: CoordNum>(
        &self,
        pa: Point2<S>,
        pb: Point2<S>,
        pc: Point2<S>,
        pd: Point2<S>,
    ) -> bool {
        self.circle_position(pa, pb, pc, pd).is_inside()
    }
}

/// Offers fast, possibly inaccurate geometric calculations.
///
/// Use this kernel if you are working with small integral coordinates or if you can afford
/// wrong answers for nearly degenerate input.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveKernel;

impl PredicateKernel for NaiveKernel {
    fn orient2d(&self, pa: Point2<f64>, pb: Point2<f64>, pc: Point2<f64>) -> f64 {
        orient2d_estimate(pa, pb, pc)
    }

    fn incircle(
        &self,
        pa: Point2<f64>,
        pb: Point2<f64>,
        pc: Point2<f64>,
        pd: Point2<f64>,
    ) -> f64 {
        incircle_estimate(pa, pb, pc, pd)
    }
}

/// Offers fast, precise geometric calculations working with adaptive precision.
///
/// If a floating point evaluation is inaccurate, the precision is increased until the
/// result's sign is certain. Since most calculations are accurate enough in their simplest
/// form, usually only the overhead of checking the error bound is encountered.
///
/// The default kernel uses the process wide error bound table, see [crate::bounds].
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveKernel<'a> {
    bounds: &'a ErrorBounds,
}

impl<'a> AdaptiveKernel<'a> {
    /// Creates a kernel using the given error bounds.
    pub fn new(bounds: &'a ErrorBounds) -> Self {
        AdaptiveKernel { bounds }
    }

    /// Returns the error bounds used by this kernel.
    pub fn bounds(&self) -> &'a ErrorBounds {
        self.bounds
    }
}

impl Default for AdaptiveKernel<'static> {
    fn default() -> Self {
        AdaptiveKernel::new(bounds())
    }
}

impl PredicateKernel for AdaptiveKernel<'_> {
    fn orient2d(&self, pa: Point2<f64>, pb: Point2<f64>, pc: Point2<f64>) -> f64 {
        orient2d_adaptive(self.bounds, pa, pb, pc).0
    }

    fn incircle(
        &self,
        pa: Point2<f64>,
        pb: Point2<f64>,
        pc: Point2<f64>,
        pd: Point2<f64>,
    ) -> f64 {
        incircle_adaptive(self.bounds, pa, pb, pc, pd).0
    }
}

/// Evaluates every query exactly, skipping the adaptive stages.
///
/// Returns the same signs as [AdaptiveKernel] while being considerably slower.
#[derive(Debug, Clone, Copy)]
pub struct ExactKernel<'a> {
    bounds: &'a ErrorBounds,
}

impl<'a> ExactKernel<'a> {
    /// Creates a kernel using the splitter of the given error bounds.
    pub fn new(bounds: &'a ErrorBounds) -> Self {
        ExactKernel { bounds }
    }
}

impl Default for ExactKernel<'static> {
    fn default() -> Self {
        ExactKernel::new(bounds())
    }
}

impl PredicateKernel for ExactKernel<'_> {
    fn orient2d(&self, pa: Point2<f64>, pb: Point2<f64>, pc: Point2<f64>) -> f64 {
        orient2d_exact_with(self.bounds, pa, pb, pc)
    }

    fn incircle(
        &self,
        pa: Point2<f64>,
        pb: Point2<f64>,
        pc: Point2<f64>,
        pd: Point2<f64>,
    ) -> f64 {
        incircle_exact_with(self.bounds, pa, pb, pc, pd)
    }
}
