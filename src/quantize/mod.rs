//! # Quantization and color levels
//!
//! Turns one scalar per mesh block into a color position in `[0, 1]` plus the legend metadata
//! a renderer needs. Two modes exist:
//!
//! * **continuous**, when no [`LevelSet`] is given: values are normalized linearly (or on a
//!   log10 scale) between their minimum and maximum, and evenly spaced ticks are produced for
//!   the legend (7 ticks on a log scale, 12 on a linear one).
//! * **discrete**, when a [`LevelSet`] is given: values are first [`bucket`]ed onto the left
//!   edge of their bin, then mapped by rank with [`find_norm`] so every distinct level is the
//!   same color distance from its neighbours.
//!
//! ```
//! use tomomesh::quantize::{quantize, LevelSet, QuantizeOptions};
//!
//! let levels = LevelSet::new(vec![1., 10., 100.]).unwrap();
//! let out = quantize(&[1., 5., 10., 50.], Some(&levels), &QuantizeOptions::default())
//!     .unwrap()
//!     .expect("values were given");
//!
//! assert_eq!(out.positions, vec![0., 0., 1., 1.]);
//! ```

mod colormap;
mod levels;

pub use colormap::{Colormap, CoolWarm, Rgba};
pub use levels::{bucket, find_norm, LevelSet};

use crate::utils;
use log::debug;
use serde::Deserialize;

const LOG_TICKS: usize = 7;
const LINEAR_TICKS: usize = 12;
const TICK_DECIMALS: i32 = 2;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QuantizeError {
    #[error("log scale requested but value {value} at index {index} is not positive")]
    NonPositiveLogInput { index: usize, value: f64 },
    #[error("malformed level set: {reason}")]
    MalformedLevelSet { reason: String },
    #[error("value at index {index} is not finite ({value})")]
    NonFiniteValue { index: usize, value: f64 },
}

/// What happens to values at or above the highest level boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpperBin {
    /// the value is left as is, forming an open ended top bin
    #[default]
    Unbounded,
    /// the value is snapped to the last boundary
    Clamp,
}

/// Options shared by both quantization modes
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuantizeOptions {
    /// normalize on a log10 scale in continuous mode
    pub log: bool,
    pub upper_bin: UpperBin,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            log: true,
            upper_bin: UpperBin::default(),
        }
    }
}

impl QuantizeOptions {
    pub fn linear() -> Self {
        Self {
            log: false,
            ..Self::default()
        }
    }
}

/// Legend description handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Legend {
    Continuous {
        /// smallest and largest value of the scale
        range: (f64, f64),
        log: bool,
        /// evenly spaced tick values, rounded to two decimals
        ticks: Vec<f64>,
    },
    Discrete {
        /// bin boundaries
        boundaries: Vec<f64>,
        /// boundaries rounded to two decimals
        ticks: Vec<f64>,
        /// distinct normalized positions, ascending. One swatch per entry
        swatches: Vec<f64>,
    },
}

impl Legend {
    pub fn ticks(&self) -> &[f64] {
        match self {
            Self::Continuous { ticks, .. } => ticks,
            Self::Discrete { ticks, .. } => ticks,
        }
    }

    pub fn is_log(&self) -> bool {
        matches!(self, Self::Continuous { log: true, .. })
    }

    /// colors of the legend: the swatches of a discrete legend, or an `n` step ramp of a
    /// continuous one
    pub fn colors<C: Colormap>(&self, cmap: &C, steps: usize) -> Vec<Rgba> {
        match self {
            Self::Continuous { .. } => utils::linspace(0.0, 1.0, steps)
                .into_iter()
                .map(|t| cmap.color(t))
                .collect(),
            Self::Discrete { swatches, .. } => swatches.iter().map(|t| cmap.color(*t)).collect(),
        }
    }
}

/// Output of [`quantize`]
#[derive(Debug, Clone, PartialEq)]
pub struct Quantized {
    /// one color position in `[0, 1]` per input value
    pub positions: Vec<f64>,
    pub legend: Legend,
}

impl Quantized {
    pub fn colors<C: Colormap>(&self, cmap: &C) -> Vec<Rgba> {
        self.positions.iter().map(|t| cmap.color(*t)).collect()
    }
}

/// Quantize `values` for display.
///
/// Returns `Ok(None)` when `values` is empty: such a mesh is drawn uncolored.
///
/// ## Errors
///
/// * [`QuantizeError::NonFiniteValue`] if any value is NaN or infinite
/// * [`QuantizeError::NonPositiveLogInput`] in continuous mode with `options.log` set, if any
///   value is zero or negative
pub fn quantize(
    values: &[f64],
    levels: Option<&LevelSet>,
    options: &QuantizeOptions,
) -> Result<Option<Quantized>, QuantizeError> {
    if values.is_empty() {
        return Ok(None);
    }

    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(QuantizeError::NonFiniteValue {
            index,
            value: values[index],
        });
    }

    let out = match levels {
        Some(levels) => discrete(values, levels, options.upper_bin),
        None if options.log => continuous_log(values)?,
        None => continuous_linear(values),
    };

    Ok(Some(out))
}

fn continuous_linear(values: &[f64]) -> Quantized {
    let (lo, hi) = extremes(values);
    debug!("linear scale over [{lo}, {hi}]");

    let positions = values.iter().map(|&v| normalize(v, lo, hi)).collect();
    let ticks = utils::linspace(lo, hi, LINEAR_TICKS)
        .into_iter()
        .map(|t| utils::round_to(t, TICK_DECIMALS))
        .collect();

    Quantized {
        positions,
        legend: Legend::Continuous {
            range: (lo, hi),
            log: false,
            ticks,
        },
    }
}

fn continuous_log(values: &[f64]) -> Result<Quantized, QuantizeError> {
    if let Some(index) = values.iter().position(|v| *v <= 0.0) {
        return Err(QuantizeError::NonPositiveLogInput {
            index,
            value: values[index],
        });
    }

    let (lo, hi) = extremes(values);
    let (log_lo, log_hi) = (lo.log10(), hi.log10());
    debug!("log scale over [{lo}, {hi}]");

    let positions = values
        .iter()
        .map(|&v| normalize(v.log10(), log_lo, log_hi))
        .collect();
    let ticks = utils::linspace(log_lo, log_hi, LOG_TICKS)
        .into_iter()
        .map(|t| utils::round_to(10f64.powf(t), TICK_DECIMALS))
        .collect();

    Ok(Quantized {
        positions,
        legend: Legend::Continuous {
            range: (lo, hi),
            log: true,
            ticks,
        },
    })
}

fn discrete(values: &[f64], levels: &LevelSet, upper: UpperBin) -> Quantized {
    let bucketed = bucket(values, levels, upper);
    let positions = find_norm(&bucketed);

    let mut swatches = positions.clone();
    swatches.sort_by(|a, b| a.total_cmp(b));
    swatches.dedup();

    debug!(
        "{} values bucketed over {} boundaries into {} levels",
        values.len(),
        levels.len(),
        swatches.len()
    );

    let boundaries = levels.to_vec();
    let ticks = boundaries
        .iter()
        .map(|b| utils::round_to(*b, TICK_DECIMALS))
        .collect();

    Quantized {
        positions,
        legend: Legend::Discrete {
            boundaries,
            ticks,
            swatches,
        },
    }
}

fn extremes(values: &[f64]) -> (f64, f64) {
    utils::min_max(values).unwrap_or((0.0, 0.0))
}

/// position of `v` between `lo` and `hi`; a collapsed range maps everything to zero
fn normalize(v: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        (v - lo) / (hi - lo)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn empty_values_are_uncolored() {
        let out = quantize(&[], None, &QuantizeOptions::default()).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn linear_positions_and_ticks() {
        let out = quantize(&[0., 5., 11.], None, &QuantizeOptions::linear())
            .unwrap()
            .unwrap();

        assert_close(out.positions[0], 0.);
        assert_close(out.positions[1], 5. / 11.);
        assert_close(out.positions[2], 1.);

        let ticks = out.legend.ticks();
        assert_eq!(ticks.len(), LINEAR_TICKS);
        assert_eq!(ticks[0], 0.);
        assert_eq!(ticks[1], 1.);
        assert_eq!(ticks[11], 11.);
        assert!(!out.legend.is_log());
    }

    #[test]
    fn log_positions_and_ticks() {
        let out = quantize(&[1., 10., 1000.], None, &QuantizeOptions::default())
            .unwrap()
            .unwrap();

        assert_close(out.positions[0], 0.);
        assert_close(out.positions[1], 1. / 3.);
        assert_close(out.positions[2], 1.);

        let ticks = out.legend.ticks();
        assert_eq!(ticks.len(), LOG_TICKS);
        assert_eq!(ticks[0], 1.);
        assert_eq!(ticks[2], 10.);
        assert_eq!(ticks[6], 1000.);
        assert!(out.legend.is_log());
    }

    #[test]
    fn log_rejects_non_positive() {
        let err = quantize(&[3., 0., 5.], None, &QuantizeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            QuantizeError::NonPositiveLogInput {
                index: 1,
                value: 0.
            }
        );

        assert!(quantize(&[-3., -1.], None, &QuantizeOptions::default()).is_err());
        // the linear scale is fine with them
        assert!(quantize(&[-3., -1.], None, &QuantizeOptions::linear()).is_ok());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = quantize(&[1., f64::NAN], None, &QuantizeOptions::linear()).unwrap_err();
        assert!(matches!(err, QuantizeError::NonFiniteValue { index: 1, .. }));
    }

    #[test]
    fn constant_values_sit_at_zero() {
        let out = quantize(&[4., 4.], None, &QuantizeOptions::linear())
            .unwrap()
            .unwrap();
        assert_eq!(out.positions, vec![0., 0.]);
    }

    #[test]
    fn discrete_legend() {
        let levels = LevelSet::new(vec![1., 10.556, 100.]).unwrap();
        let out = quantize(&[1., 5., 10.6, 50., 500.], Some(&levels), &QuantizeOptions::default())
            .unwrap()
            .unwrap();

        // 500 stays in the open top bin
        assert_eq!(out.positions, vec![0., 0., 0.5, 0.5, 1.]);

        match out.legend {
            Legend::Discrete {
                boundaries,
                ticks,
                swatches,
            } => {
                assert_eq!(boundaries, vec![1., 10.556, 100.]);
                assert_eq!(ticks, vec![1., 10.56, 100.]);
                assert_eq!(swatches, vec![0., 0.5, 1.]);
            }
            other => panic!("expected a discrete legend, got {other:?}"),
        }
    }

    #[test]
    fn discrete_clamped_top_bin() {
        let levels = LevelSet::new(vec![1., 10., 100.]).unwrap();
        let options = QuantizeOptions {
            upper_bin: UpperBin::Clamp,
            ..QuantizeOptions::default()
        };
        let out = quantize(&[5., 150., 500.], Some(&levels), &options)
            .unwrap()
            .unwrap();

        assert_eq!(out.positions, vec![0., 1., 1.]);
    }

    #[test]
    fn options_from_json() {
        let options: QuantizeOptions = serde_json::from_str(r#"{"upper_bin": "clamp"}"#).unwrap();
        assert!(options.log);
        assert_eq!(options.upper_bin, UpperBin::Clamp);
    }
}
