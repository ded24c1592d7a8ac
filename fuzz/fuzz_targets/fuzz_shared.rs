use geompreds::Point2;

#[derive(Clone, Copy, arbitrary::Arbitrary)]
pub struct FuzzPoint {
    pub x: f64,
    pub y: f64,
}

impl FuzzPoint {
    /// Returns the position if both coordinates are in the supported range.
    pub fn validated(&self) -> Option<Point2<f64>> {
        let position = Point2::new(self.x, self.y);
        geompreds::validate_point(position).ok().map(|_| position)
    }
}

impl core::fmt::Debug for FuzzPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("Point2::new({:?}, {:?})", self.x, self.y))
    }
}

pub fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
