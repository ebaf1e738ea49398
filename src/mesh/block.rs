/// `(x, y)` coordinate pair
pub type Point = [f64; 2];

/// A single quadrilateral cell of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub corners: [Point; 4],
}

impl Block {
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// span of the corners along `x`
    pub fn width(&self) -> f64 {
        self.x_max() - self.x_min()
    }

    /// span of the corners along `y`
    pub fn height(&self) -> f64 {
        self.y_max() - self.y_min()
    }

    pub fn center(&self) -> Point {
        let (sx, sy) = self
            .corners
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        [sx / 4.0, sy / 4.0]
    }

    pub fn x_min(&self) -> f64 {
        self.axis(0).fold(f64::INFINITY, f64::min)
    }

    pub fn x_max(&self) -> f64 {
        self.axis(0).fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn y_min(&self) -> f64 {
        self.axis(1).fold(f64::INFINITY, f64::min)
    }

    pub fn y_max(&self) -> f64 {
        self.axis(1).fold(f64::NEG_INFINITY, f64::max)
    }

    fn axis(&self, dim: usize) -> impl Iterator<Item = f64> + '_ {
        self.corners.iter().map(move |p| p[dim])
    }
}
