//! # Traits
//!
//! Drawing is left to whatever plotting backend the caller uses. A backend implements
//! [`Renderer`] and receives a fully prepared [`ModelMap`]: block geometry, one face color
//! per block, the legend, and the view window. It also receives the [`RenderConfig`] that
//! controls figure level styling, so no plotting state is shared between calls.
//!
//! ```
//! use tomomesh::{Mesh, ModelMap, RenderConfig, Renderer};
//!
//! #[derive(Default)]
//! struct CountingRenderer {
//!     blocks: usize,
//! }
//!
//! impl Renderer for CountingRenderer {
//!     type Error = std::convert::Infallible;
//!
//!     fn render(&mut self, map: &ModelMap, _config: &RenderConfig) -> Result<(), Self::Error> {
//!         self.blocks += map.mesh.len();
//!         Ok(())
//!     }
//! }
//!
//! let config = RenderConfig::default();
//! let mesh = Mesh::from_widths(&[5., 5.], &[5., 5.]);
//! let map = tomomesh::model_map(&mesh, &[1., 10., 100., 1000.], None, &config).unwrap();
//!
//! let mut renderer = CountingRenderer::default();
//! renderer.render(&map, &config).unwrap();
//! assert_eq!(renderer.blocks, 4);
//! ```

use crate::render::{ModelMap, RenderConfig};

/// A plotting backend able to draw a colored mesh
pub trait Renderer {
    type Error;

    /// Draw `map`. Any figure or context the backend acquires must be released before
    /// returning, on success and on error.
    fn render(&mut self, map: &ModelMap, config: &RenderConfig) -> Result<(), Self::Error>;
}
