#![doc = include_str!("../README.md")]

pub mod axis;
mod data;
pub mod doi;
pub mod mesh;
pub mod parse;
pub mod prelude;
pub mod quantize;
pub mod render;
mod traits;
mod utils;
mod write;

pub use traits::Renderer;

pub use data::ModelData;

pub use axis::{refine_axis, RefineError, RefinementRequest, Widths};
pub use mesh::{Block, Bounds, Mesh, Point};

pub use quantize::{quantize, Colormap, CoolWarm, LevelSet, Legend, QuantizeOptions, Quantized, Rgba};
pub use render::{load_config, model_map, model_map_with, ModelMap, RenderConfig};

pub use doi::{doi, doi_from_models};
pub use parse::{read_blocks, read_blocks_file, read_table, ParseError};
pub use utils::linspace;
pub use write::{write_blocks, write_blocks_file};

pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Error while reading a result file: {0}")]
    Parse(#[from] ParseError),
    #[error("Could not refine axis: {0}")]
    Refine(#[from] RefineError),
    #[error("Could not quantize values: {0}")]
    Quantize(#[from] quantize::QuantizeError),
    #[error("Could not compute the degree of investigation: {0}")]
    Doi(#[from] doi::DoiError),
    #[error("Could not read configuration: `{0}`")]
    Config(#[from] serde_json::Error),
    #[error("mesh has {blocks} blocks but {values} values were given")]
    ValueCountMismatch { blocks: usize, values: usize },
    #[error("mesh has {blocks} blocks but {centers} centers were given")]
    CenterCountMismatch { blocks: usize, centers: usize },
    #[error("mesh has no blocks")]
    EmptyMesh,
}
