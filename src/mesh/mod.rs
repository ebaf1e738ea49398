//! # Mesh geometry
//!
//! A [`Mesh`] is an ordered list of quadrilateral [`Block`]s. Meshes built from a pair of
//! width sequences with [`Mesh::from_widths`] are structured: blocks are stored row-major
//! (outer loop over rows, inner loop over columns), with rows stacked along `y` and columns
//! laid out along `x`, both starting from the origin.
//!
//! Every block stores its corners in the same order:
//!
//! ```text
//!   1 (x0, y1) ---- 2 (x1, y1)
//!       |               |
//!   0 (x0, y0) ---- 3 (x1, y0)
//! ```
//!
//! Meshes read from block-export files keep whatever corner order the file used, which is
//! why widths and heights are always recovered as coordinate *spans* rather than from fixed
//! corner pairs.

mod block;

pub use block::{Block, Point};

use crate::utils;
use derive_more::{Deref, From, Into};
use ndarray::Array3;

const STRUCTURE_EPSILON: f64 = 1e-9;

/// Ordered collection of blocks
#[derive(Debug, Clone, Default, PartialEq, Deref, From, Into)]
pub struct Mesh(Vec<Block>);

/// Axis-aligned extent of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl Mesh {
    /// Build the blocks of a structured grid.
    ///
    /// `rows` are the cell heights along `y` and `columns` the cell widths along `x`.
    /// The result holds `rows.len() * columns.len()` blocks in row-major order.
    pub fn from_widths(rows: &[f64], columns: &[f64]) -> Self {
        let row_edges = utils::cumsum(rows);
        let col_edges = utils::cumsum(columns);

        let mut blocks = Vec::with_capacity(rows.len() * columns.len());

        // the lower / left edge of a cell is the previous cell's upper / right edge, so
        // neighbouring blocks share coordinates exactly
        for (r, &top) in row_edges.iter().enumerate() {
            let bottom = if r == 0 { 0.0 } else { row_edges[r - 1] };
            for (c, &right) in col_edges.iter().enumerate() {
                let left = if c == 0 { 0.0 } else { col_edges[c - 1] };
                blocks.push(Block::new([
                    [left, bottom],
                    [left, top],
                    [right, top],
                    [right, bottom],
                ]));
            }
        }

        Self(blocks)
    }

    /// Recover the `(columns, rows)` width sequences of a structured mesh.
    ///
    /// The number of columns is the length of the leading run of blocks sharing the first
    /// block's lower edge. Returns `None` for an empty mesh or one whose block count is not a
    /// multiple of that run.
    pub fn dims(&self) -> Option<(Vec<f64>, Vec<f64>)> {
        let first = self.0.first()?;
        let base = first.y_min();

        let n_cols = self
            .0
            .iter()
            .take_while(|block| (block.y_min() - base).abs() <= STRUCTURE_EPSILON * base.abs().max(1.0))
            .count();

        if self.0.len() % n_cols != 0 {
            return None;
        }

        let columns = self.0[..n_cols].iter().map(Block::width).collect();
        let rows = self.0.iter().step_by(n_cols).map(Block::height).collect();

        Some((columns, rows))
    }

    /// `(width, height)` of every block, in mesh order
    pub fn block_spans(&self) -> (Vec<f64>, Vec<f64>) {
        self.0.iter().map(|block| (block.width(), block.height())).unzip()
    }

    /// mean of the corners of every block
    pub fn centers(&self) -> Vec<Point> {
        self.0.iter().map(Block::center).collect()
    }

    /// extent of all the corners in the mesh. `None` if the mesh is empty
    pub fn bounds(&self) -> Option<Bounds> {
        let xs: Vec<f64> = self.corners().map(|p| p[0]).collect();
        let ys: Vec<f64> = self.corners().map(|p| p[1]).collect();

        let (x_min, x_max) = utils::min_max(&xs)?;
        let (y_min, y_max) = utils::min_max(&ys)?;

        Some(Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// corner coordinates as an `(n_blocks, 4, 2)` array
    pub fn to_array(&self) -> Array3<f64> {
        let mut arr = Array3::zeros((self.0.len(), 4, 2));

        for (i, block) in self.0.iter().enumerate() {
            for (j, corner) in block.corners.iter().enumerate() {
                arr[[i, j, 0]] = corner[0];
                arr[[i, j, 1]] = corner[1];
            }
        }

        arr
    }

    pub fn into_inner(self) -> Vec<Block> {
        self.0
    }

    fn corners(&self) -> impl Iterator<Item = &Point> + '_ {
        self.0.iter().flat_map(|block| block.corners.iter())
    }
}
