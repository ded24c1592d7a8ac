use geompreds::Point2;

#[derive(Default)]
pub struct GeompredsCrate {
    vertices: Vec<Point2<f64>>,
}

impl crate::PredicateCrate for GeompredsCrate {
    fn init(&mut self, vertices: impl Iterator<Item = [f64; 2]>) {
        self.vertices = vertices.map(|vertex| vertex.into()).collect()
    }

    fn run_orient2d(&self) -> i64 {
        self.vertices
            .chunks_exact(3)
            .map(|chunk| crate::sign(geompreds::orient2d(chunk[0], chunk[1], chunk[2])))
            .sum()
    }

    fn run_incircle(&self) -> i64 {
        self.vertices
            .chunks_exact(4)
            .map(|chunk| {
                crate::sign(geompreds::incircle(chunk[0], chunk[1], chunk[2], chunk[3]))
            })
            .sum()
    }
}
