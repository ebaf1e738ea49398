//! # Reading result files
//!
//! Inversion software exports its results as plain whitespace (or tab) separated numeric
//! tables. [`read_table`] reads any such table into an [`Array2`]. [`read_blocks`] interprets a
//! table in the block-export layout, one block per line:
//!
//! ```text
//! id  x1 z1  x2 z2  x3 z3  x4 z4  [xc zc]  resistivity
//! ```
//!
//! The block center columns are optional; the last column is always the value.

mod error;

pub use error::{MalformedNumber, ParseError, RaggedRow, UnexpectedColumns};

use crate::data::ModelData;
use crate::mesh::{Block, Mesh};

use log::debug;
use ndarray::Array2;
use std::io::BufRead;
use std::path::Path;

/// columns of a block line without centers: id, 8 corner coordinates, value
pub const BLOCK_COLUMNS: usize = 10;
/// columns of a block line carrying the block center
pub const BLOCK_COLUMNS_WITH_CENTER: usize = 12;

/// Read a whitespace delimited numeric table.
///
/// The first `header` lines are skipped, as are blank lines. Every remaining line must hold the
/// same number of columns.
pub fn read_table<R: BufRead>(reader: R, header: usize) -> Result<Array2<f64>, ParseError> {
    let mut values = Vec::new();
    let mut columns = None;
    let mut rows = 0;

    for (idx, line) in reader.lines().enumerate().skip(header) {
        let line = line?;
        let line_number = idx + 1;

        if line.trim().is_empty() {
            continue;
        }

        let start = values.len();
        for token in line.split_whitespace() {
            let value: f64 = token
                .parse()
                .map_err(|_| MalformedNumber::new(line_number, token.to_string()))?;
            values.push(value);
        }

        let found = values.len() - start;
        match columns {
            None => columns = Some(found),
            Some(expected) if expected != found => {
                return Err(RaggedRow::new(line_number, expected, found).into());
            }
            Some(_) => (),
        }

        rows += 1;
    }

    let columns = columns.unwrap_or(0);
    debug!("read table of {rows} rows and {columns} columns");

    // the shape always matches: every row pushed exactly `columns` values
    Ok(Array2::from_shape_vec((rows, columns), values).unwrap_or_else(|_| Array2::zeros((0, 0))))
}

/// Read a table from a file on disk
pub fn read_table_file<P: AsRef<Path>>(path: P, header: usize) -> Result<Array2<f64>, ParseError> {
    let file = std::fs::File::open(path)?;
    read_table(std::io::BufReader::new(file), header)
}

/// Read a block-export table into a mesh with one value per block.
pub fn read_blocks<R: BufRead>(reader: R) -> Result<ModelData<Vec<f64>>, ParseError> {
    let table = read_table(reader, 0)?;
    let (n_rows, n_cols) = table.dim();

    if n_rows == 0 {
        return Ok(ModelData::new(Mesh::default(), Vec::new()));
    }

    if n_cols != BLOCK_COLUMNS && n_cols != BLOCK_COLUMNS_WITH_CENTER {
        return Err(UnexpectedColumns::new(n_cols).into());
    }

    let mut blocks = Vec::with_capacity(n_rows);
    let mut values = Vec::with_capacity(n_rows);

    for row in table.rows() {
        let corner = |k: usize| [row[1 + 2 * k], row[2 + 2 * k]];
        blocks.push(Block::new([corner(0), corner(1), corner(2), corner(3)]));
        values.push(row[n_cols - 1]);
    }

    let model = ModelData::new(Mesh::from(blocks), values);

    if n_cols == BLOCK_COLUMNS_WITH_CENTER {
        let centers = table.rows().into_iter().map(|row| [row[9], row[10]]).collect();
        Ok(model.with_centers(centers))
    } else {
        Ok(model)
    }
}

/// Read a block-export file from disk
pub fn read_blocks_file<P: AsRef<Path>>(path: P) -> Result<ModelData<Vec<f64>>, ParseError> {
    let file = std::fs::File::open(path)?;
    read_blocks(std::io::BufReader::new(file))
}
