//! # geompreds
//! Adaptive precision floating point arithmetic and fast robust predicates for 2D geometry.
//!
//! # Features
//! * [orient2d]: on which side of the line through `a` and `b` lies `c`?
//! * [incircle]: does `d` lie inside the circle through `a`, `b` and `c`?
//!
//! Both predicates return a floating point value whose *sign* is always exact, regardless of
//! how close the input is to being degenerate. Most queries are answered by a plain floating
//! point evaluation whose error is bounded a-priori. Only if that bound cannot certify the
//! sign, increasingly precise (and expensive) stages are evaluated, the last one being an
//! exact computation with floating point expansions (see [Expansion]).
//!
//! Coordinates can be any type implementing [CoordNum], e.g. `f64`, `f32` or `i32`.
//!
//! # Example
//! ```
//! use geompreds::{incircle, orient2d, Point2};
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(10.0, 0.0);
//! let c = Point2::new(0.0, 10.0);
//!
//! assert_eq!(orient2d(a, b, c), 100.0);
//! assert_eq!(incircle(a, b, c, Point2::new(1.0, 1.0)), 1800.0);
//! ```
//!
//! # Initialization
//! The predicates depend on machine constants (see [ErrorBounds]) which are measured once
//! per process, lazily on first use. [initialize] can be called to measure them up front and
//! to log them.
//!
//! # Input range
//! The predicates are guaranteed to be exact if all coordinates are either zero or have an
//! absolute value between [MIN_ALLOWED_VALUE] and [MAX_ALLOWED_VALUE]. [try_orient2d] and
//! [try_incircle] check this before evaluating.

#![warn(missing_docs)]

pub mod arithmetic;
mod bounds;
mod expansion;
mod incircle;
mod kernels;
mod orient;
mod orientation;
mod point;
mod validation;

#[cfg(test)]
mod test_utilities;

pub use bounds::{bounds, initialize, ErrorBounds};
pub use expansion::Expansion;
pub use incircle::{circle_position, incircle, incircle_exact, incircle_fast};
pub use kernels::{AdaptiveKernel, ExactKernel, NaiveKernel, PredicateKernel};
pub use orient::{orient2d, orient2d_exact, orient2d_fast, orientation};
pub use orientation::{CirclePosition, Orientation};
pub use point::{CoordNum, Point2};
pub use validation::{
    mitigate_underflow, try_incircle, try_orient2d, validate_coordinate, validate_point,
    InputError, MAX_ALLOWED_VALUE, MIN_ALLOWED_VALUE,
};
