use crate::mesh::{Mesh, Point};

#[derive(Debug, Default, Clone, PartialEq)]
/// Container pairing a mesh with per-block data.
///
/// `ModelData` holds the block geometry in `mesh`, the block centers when the source
/// provided them, and some data `D` (most often one resistivity per block).
/// [`read_blocks`](`crate::parse::read_blocks`) produces a `ModelData<Vec<f64>>` and
/// [`write_blocks`](`crate::write_blocks`) writes one back out.
pub struct ModelData<D> {
    pub mesh: Mesh,
    pub centers: Option<Vec<Point>>,
    pub data: D,
}

impl<D> ModelData<D> {
    /// Construct a model without explicit block centers
    pub fn new(mesh: Mesh, data: D) -> ModelData<D> {
        ModelData {
            mesh,
            centers: None,
            data,
        }
    }

    /// attach explicit block centers
    pub fn with_centers(mut self, centers: Vec<Point>) -> Self {
        self.centers = Some(centers);
        self
    }

    /// change the data stored in this container while leaving the
    /// geometry constant
    pub fn new_data<T>(self, new_data: T) -> ModelData<T> {
        ModelData {
            mesh: self.mesh,
            centers: self.centers,
            data: new_data,
        }
    }

    /// the explicit block centers, or the mean of each block's corners
    pub fn block_centers(&self) -> Vec<Point> {
        match &self.centers {
            Some(centers) => centers.clone(),
            None => self.mesh.centers(),
        }
    }
}
