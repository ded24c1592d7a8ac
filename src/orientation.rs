#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes how three points are oriented relative to each other.
///
/// Created by [orientation](crate::orientation()) and
/// [PredicateKernel::orientation](crate::PredicateKernel::orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub enum Orientation {
    /// The points make a left turn, the third point lies left of the line through the first two.
    CounterClockwise,
    /// The points make a right turn.
    Clockwise,
    /// All points lie on a common line.
    Collinear,
}

impl Orientation {
    /// Classifies the sign of an orientation determinant.
    ///
    /// Only meaningful for determinants with an exact sign, such as the ones returned by
    /// [orient2d](crate::orient2d()).
    #[inline]
    pub fn from_determinant(determinant: f64) -> Orientation {
        if determinant > 0.0 {
            Orientation::CounterClockwise
        } else if determinant < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    /// Returns `true` for counterclockwise (left turn) orientations.
    pub fn is_ccw(self) -> bool {
        self == Orientation::CounterClockwise
    }

    /// Returns `true` for clockwise (right turn) orientations.
    pub fn is_cw(self) -> bool {
        self == Orientation::Clockwise
    }

    /// Returns `true` if the points are collinear.
    pub fn is_collinear(self) -> bool {
        self == Orientation::Collinear
    }

    /// Returns the orientation of the same points traversed in opposite order.
    pub fn reversed(self) -> Orientation {
        match self {
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
        }
    }
}

/// Describes the position of a point relative to the circle through three other points.
///
/// Created by [circle_position](crate::circle_position()) and
/// [PredicateKernel::circle_position](crate::PredicateKernel::circle_position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub enum CirclePosition {
    /// The point lies strictly inside the circle.
    Inside,
    /// All four points lie on a common circle (or line).
    OnCircle,
    /// The point lies strictly outside the circle.
    Outside,
}

impl CirclePosition {
    /// Classifies the sign of an incircle determinant.
    ///
    /// The circle's points are expected to be ordered counterclockwise.
    #[inline]
    pub fn from_determinant(determinant: f64) -> CirclePosition {
        if determinant > 0.0 {
            CirclePosition::Inside
        } else if determinant < 0.0 {
            CirclePosition::Outside
        } else {
            CirclePosition::OnCircle
        }
    }

    /// Returns `true` if the point lies strictly inside the circle.
    pub fn is_inside(self) -> bool {
        self == CirclePosition::Inside
    }

    /// Returns `true` if the point lies strictly outside the circle.
    pub fn is_outside(self) -> bool {
        self == CirclePosition::Outside
    }

    /// Returns `true` if the point lies exactly on the circle.
    pub fn is_on_circle(self) -> bool {
        self == CirclePosition::OnCircle
    }
}
