//! Preparation of a colored mesh for a plotting backend

use crate::mesh::{Bounds, Mesh, Point};
use crate::quantize::{self, Colormap, CoolWarm, LevelSet, QuantizeOptions, Quantized, Rgba};
use crate::Error;

use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Figure level styling, passed explicitly to every render call
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// y / x aspect ratio of the plot
    pub aspect: f64,
    /// vertical position of the horizontal colorbar, between 0 and 1
    pub colorbar_position: f64,
    pub dpi: u32,
    /// draw the x tick labels above the plot instead of below
    pub ticks_on_top: bool,
    /// width of the block outlines
    pub line_width: f64,
    pub uncolored_face: Rgba,
    pub uncolored_edge: Rgba,
    /// padding around the mesh as a fraction of its width / height
    pub pad_x: f64,
    pub pad_y: f64,
    /// the x extent is split into roughly this many tick intervals
    pub tick_divisions: f64,
    /// resolution of the color ramp of a continuous legend
    pub legend_steps: usize,
    pub quantize: QuantizeOptions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            aspect: 1.0 / 1.3,
            colorbar_position: 0.1,
            dpi: 300,
            ticks_on_top: true,
            line_width: 0.2,
            uncolored_face: Rgba::WHITE,
            uncolored_edge: Rgba::GRAY,
            pad_x: 0.02,
            pad_y: 0.07,
            tick_divisions: 15.0,
            legend_steps: 256,
            quantize: QuantizeOptions::default(),
        }
    }
}

/// Load a [`RenderConfig`] from a json file. Missing keys take their default value.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, Error> {
    let contents = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

/// How the blocks are filled
#[derive(Debug, Clone, PartialEq)]
pub enum Faces {
    /// one color per block, in mesh order
    Colored(Vec<Rgba>),
    /// no values were given: every block gets the same face and a visible outline
    Uncolored { face: Rgba, edge: Rgba },
}

/// Visible window and axis ticks
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub x_lim: (f64, f64),
    pub y_lim: (f64, f64),
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
}

impl View {
    fn new(bounds: Bounds, config: &RenderConfig) -> Self {
        let pad_x = bounds.width() * config.pad_x;
        let pad_y = bounds.height() * config.pad_y;

        let raw_step = bounds.width() / config.tick_divisions;
        let step = if raw_step.round() > 0.0 {
            raw_step.round()
        } else {
            raw_step
        };

        Self {
            x_lim: (bounds.x_min - pad_x, bounds.x_max + pad_x),
            y_lim: (bounds.y_min - pad_y, bounds.y_max + pad_y),
            x_ticks: arange(bounds.x_min.round(), bounds.x_max.round() + step, step),
            y_ticks: arange(bounds.y_min.round(), bounds.y_max.round() + step, step),
        }
    }
}

/// Everything a [`Renderer`](`crate::Renderer`) needs to draw a model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMap {
    pub mesh: Mesh,
    pub faces: Faces,
    /// color positions and legend, absent for an uncolored mesh
    pub quantized: Option<Quantized>,
    /// colors of the legend entries (or of the continuous ramp)
    pub legend_colors: Vec<Rgba>,
    pub view: View,
    /// polylines drawn on top of the blocks, e.g. a DOI cut-off contour
    pub contours: Vec<Vec<Point>>,
}

impl ModelMap {
    /// Overlay precomputed contour polylines. Contours are not extracted here; they are
    /// passed through to the renderer untouched.
    pub fn with_contours(mut self, contours: Vec<Vec<Point>>) -> Self {
        self.contours = contours;
        self
    }
}

/// Prepare `mesh` colored by `values` with the default diverging colormap.
///
/// `values` holds one value per block, or nothing for an uncolored mesh. When `levels` is
/// given the colors are discrete, one per level.
pub fn model_map(
    mesh: &Mesh,
    values: &[f64],
    levels: Option<&LevelSet>,
    config: &RenderConfig,
) -> Result<ModelMap, Error> {
    model_map_with(mesh, values, levels, config, &CoolWarm)
}

/// [`model_map`] with a custom colormap
pub fn model_map_with<C: Colormap>(
    mesh: &Mesh,
    values: &[f64],
    levels: Option<&LevelSet>,
    config: &RenderConfig,
    cmap: &C,
) -> Result<ModelMap, Error> {
    let bounds = mesh.bounds().ok_or(Error::EmptyMesh)?;

    if !values.is_empty() && values.len() != mesh.len() {
        return Err(Error::ValueCountMismatch {
            blocks: mesh.len(),
            values: values.len(),
        });
    }

    let quantized = quantize::quantize(values, levels, &config.quantize)?;

    let (faces, legend_colors) = match &quantized {
        Some(q) => (
            Faces::Colored(q.colors(cmap)),
            q.legend.colors(cmap, config.legend_steps),
        ),
        None => (
            Faces::Uncolored {
                face: config.uncolored_face,
                edge: config.uncolored_edge,
            },
            Vec::new(),
        ),
    };

    debug!(
        "prepared map of {} blocks ({} legend colors)",
        mesh.len(),
        legend_colors.len()
    );

    Ok(ModelMap {
        mesh: mesh.clone(),
        faces,
        quantized,
        legend_colors,
        view: View::new(bounds, config),
        contours: Vec::new(),
    })
}

/// values from `start` (inclusive) to `stop` (exclusive) spaced by `step`
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(stop > start) {
        return Vec::new();
    }

    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::Legend;

    #[test]
    fn arange_excludes_stop() {
        assert_eq!(arange(0., 10., 5.), vec![0., 5.]);
        assert_eq!(arange(0., 11., 5.), vec![0., 5., 10.]);
        assert!(arange(0., 10., 0.).is_empty());
    }

    #[test]
    fn view_window() {
        let mesh = Mesh::from_widths(&[10.], &[75., 75.]);
        let map = model_map(&mesh, &[], None, &RenderConfig::default()).unwrap();

        assert!((map.view.x_lim.0 + 3.).abs() < 1e-12);
        assert!((map.view.x_lim.1 - 153.).abs() < 1e-12);
        assert!((map.view.y_lim.0 + 0.7).abs() < 1e-12);
        assert!((map.view.y_lim.1 - 10.7).abs() < 1e-12);
        // 150 / 15 = 10
        assert_eq!(map.view.x_ticks.len(), 16);
        assert_eq!(map.view.x_ticks[15], 150.);
        assert_eq!(map.view.y_ticks, vec![0., 10.]);
    }

    #[test]
    fn small_meshes_still_get_ticks() {
        let mesh = Mesh::from_widths(&[1.], &[1., 1.]);
        let map = model_map(&mesh, &[], None, &RenderConfig::default()).unwrap();
        assert!(!map.view.x_ticks.is_empty());
    }

    #[test]
    fn uncolored_without_values() {
        let mesh = Mesh::from_widths(&[1.], &[1.]);
        let config = RenderConfig::default();
        let map = model_map(&mesh, &[], None, &config).unwrap();

        assert_eq!(
            map.faces,
            Faces::Uncolored {
                face: Rgba::WHITE,
                edge: Rgba::GRAY
            }
        );
        assert!(map.quantized.is_none());
        assert!(map.legend_colors.is_empty());
    }

    #[test]
    fn discrete_colors_follow_levels() {
        let mesh = Mesh::from_widths(&[5., 5.], &[5., 5.]);
        let levels = LevelSet::new(vec![1., 10., 100.]).unwrap();
        let map = model_map(&mesh, &[1., 5., 10., 50.], Some(&levels), &RenderConfig::default())
            .unwrap();

        match &map.faces {
            Faces::Colored(colors) => {
                assert_eq!(colors[0], colors[1]);
                assert_eq!(colors[2], colors[3]);
                assert_eq!(colors[0], CoolWarm.color(0.));
                assert_eq!(colors[3], CoolWarm.color(1.));
            }
            other => panic!("expected colored faces, got {other:?}"),
        }

        assert_eq!(map.legend_colors.len(), 2);
        let legend = &map.quantized.as_ref().unwrap().legend;
        assert!(matches!(legend, Legend::Discrete { .. }));
    }

    #[test]
    fn value_count_must_match() {
        let mesh = Mesh::from_widths(&[1.], &[1., 1.]);
        let err = model_map(&mesh, &[1.], None, &RenderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::ValueCountMismatch {
                blocks: 2,
                values: 1
            }
        ));

        assert!(matches!(
            model_map(&Mesh::default(), &[], None, &RenderConfig::default()),
            Err(Error::EmptyMesh)
        ));
    }

    #[test]
    fn quantization_errors_surface() {
        let mesh = Mesh::from_widths(&[1.], &[1., 1.]);
        let err = model_map(&mesh, &[1., -1.], None, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Quantize(_)));
    }

    #[test]
    fn contours_pass_through() {
        let mesh = Mesh::from_widths(&[1.], &[1., 1.]);
        let map = model_map(&mesh, &[], None, &RenderConfig::default()).unwrap();
        assert!(map.contours.is_empty());

        let line = vec![[0., 0.5], [1., 0.75], [2., 0.5]];
        let map = map.with_contours(vec![line.clone()]);
        assert_eq!(map.contours, vec![line]);
    }

    #[test]
    fn config_from_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"dpi": 150, "quantize": {"log": false}}"#).unwrap();

        assert_eq!(config.dpi, 150);
        assert!(!config.quantize.log);
        assert_eq!(config.aspect, 1.0 / 1.3);
    }
}
