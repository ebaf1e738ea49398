//! Common traits and types that are useful for working with `tomomesh`

pub use crate::axis::{refine_axis, RefinementRequest, Widths};
pub use crate::data::ModelData;
pub use crate::mesh::{Block, Mesh};
pub use crate::quantize::{quantize, Colormap, LevelSet, QuantizeOptions, UpperBin};
pub use crate::render::{model_map, ModelMap, RenderConfig};
pub use crate::traits::Renderer;
pub use crate::Error;
