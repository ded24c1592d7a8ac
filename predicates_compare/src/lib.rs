pub mod geometry_predicates_crate;
pub mod geompreds_crate;
pub mod robust_crate;

/// Abstraction over different crates implementing robust geometric predicates
pub trait PredicateCrate: Default {
    fn init(&mut self, vertices: impl Iterator<Item = [f64; 2]>);

    /// Evaluates `orient2d` on consecutive triples of the vertices, returns the sum of all
    /// signs.
    fn run_orient2d(&self) -> i64;

    /// Evaluates `incircle` on consecutive quadruples of the vertices, returns the sum of all
    /// signs.
    fn run_incircle(&self) -> i64;
}

pub(crate) fn sign(value: f64) -> i64 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod test {
    use super::geometry_predicates_crate::GeometryPredicatesCrate;
    use super::geompreds_crate::GeompredsCrate;
    use super::robust_crate::RobustCrate;
    use super::PredicateCrate;

    fn nearly_collinear() -> impl Iterator<Item = [f64; 2]> {
        (0..300u64).map(|i| {
            let scale = (1 + i % 3) as f64;
            let x = 0.5 + (i % 17) as f64 * f64::EPSILON / 2.0;
            let y = 0.5 + (i % 13) as f64 * f64::EPSILON / 2.0;
            [x * scale, y * scale]
        })
    }

    fn run<Crate: PredicateCrate>() -> (i64, i64) {
        let mut predicates = Crate::default();
        predicates.init(nearly_collinear());
        (predicates.run_orient2d(), predicates.run_incircle())
    }

    #[test]
    fn test_crates_agree() {
        let expected = run::<GeompredsCrate>();
        assert_eq!(run::<RobustCrate>(), expected);
        assert_eq!(run::<GeometryPredicatesCrate>(), expected);
    }
}
