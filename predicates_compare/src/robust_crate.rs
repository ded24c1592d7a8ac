type RobustPoint = robust::Coord<f64>;

#[derive(Default)]
pub struct RobustCrate {
    vertices: Vec<RobustPoint>,
}

impl crate::PredicateCrate for RobustCrate {
    fn init(&mut self, vertices: impl Iterator<Item = [f64; 2]>) {
        self.vertices = vertices
            .map(|[x, y]| RobustPoint { x, y })
            .collect()
    }

    fn run_orient2d(&self) -> i64 {
        self.vertices
            .chunks_exact(3)
            .map(|chunk| crate::sign(robust::orient2d(chunk[0], chunk[1], chunk[2])))
            .sum()
    }

    fn run_incircle(&self) -> i64 {
        self.vertices
            .chunks_exact(4)
            .map(|chunk| crate::sign(robust::incircle(chunk[0], chunk[1], chunk[2], chunk[3])))
            .sum()
    }
}
