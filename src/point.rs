use num_traits::Num;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate type that can be passed to the predicates.
///
/// All predicates are evaluated after converting the coordinates into `f64`. The conversion
/// must be lossless, which is why only types implementing `Into<f64>` qualify (e.g. `f64`,
/// `f32`, `i32` or `u16`, but not `i64`).
pub trait CoordNum: Num + PartialOrd + Into<f64> + Copy + std::fmt::Debug {}

impl<T> CoordNum for T where T: Num + PartialOrd + Into<f64> + Copy + std::fmt::Debug {}

/// A two dimensional point.
///
/// This is the input type of every predicate.
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Point2<S> {
    /// The point's x coordinate
    pub x: S,
    /// The point's y coordinate
    pub y: S,
}

impl<S> Point2<S> {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Point2 { x, y }
    }
}

impl<S: CoordNum> Point2<S> {
    /// Converts this point into a point with `f64` coordinates.
    ///
    /// The conversion is exact for every [CoordNum].
    #[inline]
    pub fn to_f64(self) -> Point2<f64> {
        Point2::new(self.x.into(), self.y.into())
    }

    pub(crate) fn coordinates(&self) -> [S; 2] {
        [self.x, self.y]
    }
}

impl<S: CoordNum> From<Point2<S>> for [S; 2] {
    #[inline]
    fn from(point: Point2<S>) -> Self {
        [point.x, point.y]
    }
}

impl<S: CoordNum> From<Point2<S>> for (S, S) {
    #[inline]
    fn from(point: Point2<S>) -> (S, S) {
        (point.x, point.y)
    }
}

impl<S: CoordNum> From<[S; 2]> for Point2<S> {
    #[inline]
    fn from(source: [S; 2]) -> Self {
        Self::new(source[0], source[1])
    }
}

impl<S: CoordNum> From<(S, S)> for Point2<S> {
    #[inline]
    fn from(source: (S, S)) -> Self {
        Self::new(source.0, source.1)
    }
}
