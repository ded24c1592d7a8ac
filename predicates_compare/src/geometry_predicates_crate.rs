#[derive(Default)]
pub struct GeometryPredicatesCrate {
    vertices: Vec<[f64; 2]>,
}

impl crate::PredicateCrate for GeometryPredicatesCrate {
    fn init(&mut self, vertices: impl Iterator<Item = [f64; 2]>) {
        self.vertices = vertices.collect()
    }

    fn run_orient2d(&self) -> i64 {
        self.vertices
            .chunks_exact(3)
            .map(|chunk| {
                crate::sign(geometry_predicates::orient2d(chunk[0], chunk[1], chunk[2]))
            })
            .sum()
    }

    fn run_incircle(&self) -> i64 {
        self.vertices
            .chunks_exact(4)
            .map(|chunk| {
                crate::sign(geometry_predicates::incircle(
                    chunk[0], chunk[1], chunk[2], chunk[3],
                ))
            })
            .sum()
    }
}
