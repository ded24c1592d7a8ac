use std::{error::Error, fmt::Display};

use crate::{incircle, orient2d, CoordNum, Point2};

/// The error type returned by the checked predicates.
///
/// Errors can only originate from coordinates outside of the range in which the predicates
/// are guaranteed to neither overflow nor underflow. Points can be checked up front with
/// [crate::validate_point].
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum InputError {
    /// A coordinate value was too small.
    ///
    /// The absolute value of any coordinate must either be zero or greater than or equal to
    /// [crate::MIN_ALLOWED_VALUE].
    TooSmall,

    /// A coordinate value was too large.
    ///
    /// The absolute value of any coordinate must be less than or equal to
    /// [crate::MAX_ALLOWED_VALUE].
    TooLarge,

    /// A coordinate value was NaN.
    NaN,
}

impl Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl Error for InputError {}

/// The smallest coordinate value greater than zero for which the predicates are guaranteed to
/// be exact. This value is equal to 2<sup>-142</sup>.
///
/// Smaller non-zero values may underflow the `f64` exponent while the exact stages evaluate
/// their products, which can result in a wrong sign.
///
/// *See also [validate_coordinate], [validate_point], [MAX_ALLOWED_VALUE],
/// [mitigate_underflow]*
pub const MIN_ALLOWED_VALUE: f64 = 1.793662034335766e-43; // 1.0 * 2^-142

/// The largest coordinate value for which the predicates are guaranteed not to overflow.
/// This value is equal to 2<sup>201</sup>.
///
/// *See also [validate_coordinate], [validate_point], [MIN_ALLOWED_VALUE]*
pub const MAX_ALLOWED_VALUE: f64 = 3.2138760885179806e60; // 1.0 * 2^201

/// Checks if a coordinate value lies in the range supported by the predicates.
///
/// Will return an error if and only if
///  - The absolute value of the coordinate is too small (See [MIN_ALLOWED_VALUE])
///  - The absolute value of the coordinate is too large (See [MAX_ALLOWED_VALUE])
///  - The coordinate is NaN (not a number)
///
/// Passing in any non-finite floating point number (e.g. `f32::NEG_INFINITY`) will
/// result in `Err(InputError::TooLarge)`.
///
/// Note that any non-nan, finite, **normal** `f32` coordinate will always be valid.
pub fn validate_coordinate<S: CoordNum>(value: S) -> Result<(), InputError> {
    let as_f64: f64 = value.into();
    if as_f64.is_nan() {
        Err(InputError::NaN)
    } else if as_f64.abs() < MIN_ALLOWED_VALUE && as_f64 != 0.0 {
        Err(InputError::TooSmall)
    } else if as_f64.abs() > MAX_ALLOWED_VALUE {
        Err(InputError::TooLarge)
    } else {
        Ok(())
    }
}

/// Checks if both coordinates of a point are valid. See [validate_coordinate].
pub fn validate_point<S: CoordNum>(point: Point2<S>) -> Result<(), InputError> {
    for coordinate in point.coordinates() {
        validate_coordinate(coordinate)?;
    }
    Ok(())
}

/// Prevents underflow issues of a position by setting any coordinate that is too small to zero.
///
/// A point returned by this function will never cause [InputError::TooSmall]. Note that this
/// method will _always_ round towards zero, even if rounding to ±[MIN_ALLOWED_VALUE] would
/// result in a smaller rounding error.
///
/// There is no `mitigate_overflow` counterpart as clamping a coordinate to
/// ±[MAX_ALLOWED_VALUE] could result in an arbitrarily large error.
///
/// # Example
/// ```
/// use geompreds::{mitigate_underflow, try_orient2d, InputError, Point2};
///
/// let origin = Point2::new(0.0, 0.0);
/// let east = Point2::new(1.0, 0.0);
/// let invalid_position = Point2::new(42.0, 1.0e-44);
///
/// assert_eq!(
///     try_orient2d(origin, east, invalid_position),
///     Err(InputError::TooSmall)
/// );
///
/// let valid_position = mitigate_underflow(invalid_position);
/// assert_eq!(valid_position, Point2::new(42.0, 0.0));
/// assert_eq!(try_orient2d(origin, east, valid_position), Ok(0.0));
/// ```
pub fn mitigate_underflow(position: Point2<f64>) -> Point2<f64> {
    Point2::new(
        mitigate_underflow_for_coordinate(position.x),
        mitigate_underflow_for_coordinate(position.y),
    )
}

fn mitigate_underflow_for_coordinate(coordinate: f64) -> f64 {
    if coordinate != 0.0 && coordinate.abs() < MIN_ALLOWED_VALUE {
        0.0
    } else {
        coordinate
    }
}

/// Validates all points and evaluates [orient2d](crate::orient2d()).
pub fn try_orient2d<S: CoordNum>(
    pa: Point2<S>,
    pb: Point2<S>,
    pc: Point2<S>,
) -> Result<f64, InputError> {
    validate_point(pa)?;
    validate_point(pb)?;
    validate_point(pc)?;
    Ok(orient2d(pa, pb, pc))
}

/// Validates all points and evaluates [incircle](crate::incircle()).
pub fn try_incircle<S: CoordNum>(
    pa: Point2<S>,
    pb: Point2<S>,
    pc: Point2<S>,
    pd: Point2<S>,
) -> Result<f64, InputError> {
    for point in [pa, pb, pc, pd] {
        validate_point(point)?;
    }
    Ok(incircle(pa, pb, pc, pd))
}
