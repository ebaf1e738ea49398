//! # Axis refinement
//!
//! A structured grid is described along each axis by a [`Widths`] sequence: the extent of
//! every consecutive cell. [`refine_axis`] replaces the cells around a point of interest with
//! uniform cells of a finer size while keeping the total extent of the axis fixed.
//!
//! The refinement zone is every cell whose *right edge* falls in
//! `(point - extent, point + extent]`. If the zone extent divides evenly by the target size the
//! zone is simply subdivided. Otherwise the zone receives the nearest whole number of target
//! cells, and the resulting length deficit is absorbed by the cells outside the zone that are
//! still close to the default cell size (see [`split_deficit`]).
//!
//! ```
//! use tomomesh::axis::{refine_axis, RefinementRequest};
//!
//! let widths = vec![10.0; 5];
//! let request = RefinementRequest::new(25.0, 5.0, 2.0, 10.0, 50.0);
//! let refined = refine_axis(&widths, &request).unwrap();
//!
//! assert_eq!(refined.len(), 9);
//! assert!((refined.total() - 50.0).abs() < 1e-9);
//! ```

mod distribute;

pub use distribute::split_deficit;

use crate::utils;
use derive_more::{Deref, From, Into};
use log::{debug, warn};

/// How far (in axis units) a cell may stray from the default cell size and still be
/// considered untouched, and therefore adjustable.
pub const DEFAULT_ADJUST_TOLERANCE: f64 = 5.0;

/// relative tolerance under which a zone counts as an exact multiple of the target size
const REMAINDER_EPSILON: f64 = 1e-9;

/// relative tolerance for the incoming widths summing to the axis limit
const EXTENT_EPSILON: f64 = 1e-6;

/// upper bound on the number of cells a single zone may be split into
const MAX_ZONE_CELLS: f64 = u32::MAX as f64;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RefineError {
    #[error("refinement zone outside grid: no cell edge falls in ({lower}, {upper}]")]
    EmptyRefinementZone { lower: f64, upper: f64 },
    #[error("no adjustable cells to absorb deficit")]
    NoAdjustableCells,
    #[error("cell width at index {index} must be positive and finite, got {width}")]
    InvalidWidth { index: usize, width: f64 },
    #[error("refinement parameter `{name}` must be positive and finite, got {value}")]
    InvalidRequest { name: &'static str, value: f64 },
    #[error("widths sum to {actual} but the axis limit is {expected}")]
    ExtentMismatch { expected: f64, actual: f64 },
    #[error("absorbing the deficit leaves cell {index} with width {width}")]
    NonPositiveAdjustedWidth { index: usize, width: f64 },
}

/// Ordered cell widths along one grid axis
#[derive(Debug, Clone, Default, PartialEq, Deref, From, Into)]
pub struct Widths(Vec<f64>);

impl Widths {
    /// total extent of the axis
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// right edge of every cell
    pub fn edges(&self) -> Vec<f64> {
        utils::cumsum(&self.0)
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<&[f64]> for Widths {
    fn from(x: &[f64]) -> Self {
        Self(x.to_vec())
    }
}

/// Where and how finely to refine one axis
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct RefinementRequest {
    /// position of the point of interest along the axis
    pub point: f64,
    /// half width of the refinement window around `point`
    pub extent: f64,
    /// width of the new cells inside the window
    pub target_size: f64,
    /// nominal cell width, used to find cells that can absorb a length deficit
    pub default_size: f64,
    /// fixed total extent of the axis
    pub axis_limit: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_ADJUST_TOLERANCE
}

impl RefinementRequest {
    pub fn new(point: f64, extent: f64, target_size: f64, default_size: f64, axis_limit: f64) -> Self {
        Self {
            point,
            extent,
            target_size,
            default_size,
            axis_limit,
            tolerance: DEFAULT_ADJUST_TOLERANCE,
        }
    }

    /// change how close to `default_size` a cell must be to absorb a deficit
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// the half-open window `(lower, upper]` tested against cell right edges
    pub fn window(&self) -> (f64, f64) {
        (self.point - self.extent, self.point + self.extent)
    }

    fn validate(&self) -> Result<(), RefineError> {
        let positive = [
            ("extent", self.extent),
            ("target_size", self.target_size),
            ("default_size", self.default_size),
            ("axis_limit", self.axis_limit),
        ];

        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(RefineError::InvalidRequest { name, value });
            }
        }

        if !self.point.is_finite() {
            return Err(RefineError::InvalidRequest {
                name: "point",
                value: self.point,
            });
        }

        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(RefineError::InvalidRequest {
                name: "tolerance",
                value: self.tolerance,
            });
        }

        Ok(())
    }
}

/// Refine the cells of `widths` around `request.point`, keeping the total extent equal to
/// `request.axis_limit`.
///
/// ## Errors
///
/// * [`RefineError::EmptyRefinementZone`] if no cell edge falls inside the window
/// * [`RefineError::NoAdjustableCells`] if the zone cannot be subdivided exactly and no cell
///   outside of it is within `request.tolerance` of the default size
/// * [`RefineError::NonPositiveAdjustedWidth`] if the deficit shrinks an adjustable cell to
///   zero or below
/// * [`RefineError::InvalidWidth`], [`RefineError::InvalidRequest`] and
///   [`RefineError::ExtentMismatch`] for malformed input. A `target_size` so small that the
///   zone would hold more than `u32::MAX` cells is reported as an invalid request.
pub fn refine_axis(widths: &[f64], request: &RefinementRequest) -> Result<Widths, RefineError> {
    request.validate()?;

    for (index, &width) in widths.iter().enumerate() {
        if !(width.is_finite() && width > 0.0) {
            return Err(RefineError::InvalidWidth { index, width });
        }
    }

    let actual: f64 = widths.iter().sum();
    if (actual - request.axis_limit).abs() > EXTENT_EPSILON * request.axis_limit.max(1.0) {
        return Err(RefineError::ExtentMismatch {
            expected: request.axis_limit,
            actual,
        });
    }

    let (first, last) = refinement_zone(widths, request)?;

    let zone_extent: f64 = widths[first..=last].iter().sum();
    let target = request.target_size;
    let ratio = zone_extent / target;
    let remainder = zone_extent % target;

    if ratio > MAX_ZONE_CELLS {
        return Err(RefineError::InvalidRequest {
            name: "target_size",
            value: target,
        });
    }

    debug!(
        "refining cells {first}..={last} (extent {zone_extent}) into cells of {target}: ratio {ratio}, remainder {remainder}"
    );

    if remainder.min(target - remainder) <= REMAINDER_EPSILON * target {
        let count = ratio.round() as usize;
        debug!("zone divides exactly into {count} cells");
        return Ok(splice(widths, first, last, count, target).into());
    }

    let count = ratio.round_ties_even() as usize;
    if count == 0 {
        warn!("refinement zone of extent {zone_extent} is narrower than half a target cell ({target}) and is removed");
    }

    let mut refined = splice(widths, first, last, count, target);
    let deficit = request.axis_limit - refined.iter().sum::<f64>();

    let adjustable = |w: &f64| (w - request.default_size).abs() <= request.tolerance;
    let left: Vec<usize> = (0..first).filter(|&i| adjustable(&refined[i])).collect();
    let right: Vec<usize> = (first + count..refined.len())
        .filter(|&i| adjustable(&refined[i]))
        .collect();

    let (share_left, share_right) = split_deficit(deficit, left.len(), right.len())?;

    debug!(
        "absorbing deficit {deficit}: {share_left} over {} cells left, {share_right} over {} cells right",
        left.len(),
        right.len()
    );

    spread(&mut refined, &left, share_left);
    spread(&mut refined, &right, share_right);

    if let Some(&index) = left
        .iter()
        .chain(&right)
        .find(|&&i| !(refined[i].is_finite() && refined[i] > 0.0))
    {
        return Err(RefineError::NonPositiveAdjustedWidth {
            index,
            width: refined[index],
        });
    }

    Ok(refined.into())
}

/// first and last index of the cells whose right edge lies inside the request window
fn refinement_zone(widths: &[f64], request: &RefinementRequest) -> Result<(usize, usize), RefineError> {
    let (lower, upper) = request.window();

    let mut zone = utils::cumsum(widths)
        .into_iter()
        .enumerate()
        .filter(|(_, edge)| lower < *edge && *edge <= upper)
        .map(|(idx, _)| idx);

    let first = zone
        .next()
        .ok_or(RefineError::EmptyRefinementZone { lower, upper })?;
    let last = zone.last().unwrap_or(first);

    Ok((first, last))
}

/// replace `widths[first..=last]` with `count` cells of `size`
fn splice(widths: &[f64], first: usize, last: usize, count: usize, size: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(widths.len() - (last - first + 1) + count);
    out.extend_from_slice(&widths[..first]);
    out.extend(std::iter::repeat(size).take(count));
    out.extend_from_slice(&widths[last + 1..]);
    out
}

fn spread(widths: &mut [f64], indices: &[usize], share: f64) {
    if indices.is_empty() {
        return;
    }

    let per_cell = share / indices.len() as f64;
    for &idx in indices {
        widths[idx] += per_cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn zone_uses_right_edges() {
        let widths = [10., 10., 10., 10., 10.];
        let request = RefinementRequest::new(25., 5., 2., 10., 50.);
        assert_eq!(refinement_zone(&widths, &request).unwrap(), (2, 2));

        // the lower bound is exclusive, the upper inclusive
        let request = RefinementRequest::new(20., 10., 2., 10., 50.);
        assert_eq!(refinement_zone(&widths, &request).unwrap(), (1, 2));
    }

    #[test]
    fn zone_outside_grid() {
        let widths = [10., 10.];
        let request = RefinementRequest::new(100., 5., 2., 10., 20.);
        assert_eq!(
            refine_axis(&widths, &request),
            Err(RefineError::EmptyRefinementZone {
                lower: 95.,
                upper: 105.
            })
        );
    }

    #[test]
    fn splice_keeps_order() {
        let out = splice(&[1., 2., 3., 4.], 1, 2, 3, 0.5);
        assert_eq!(out, vec![1., 0.5, 0.5, 0.5, 4.]);
    }

    #[test]
    fn exact_division_subdivides_zone() {
        let widths = [10., 10., 10., 10., 10.];
        let request = RefinementRequest::new(25., 5., 2., 10., 50.);
        let refined = refine_axis(&widths, &request).unwrap();

        assert_eq!(
            refined.as_slice(),
            &[10., 10., 2., 2., 2., 2., 2., 10., 10.]
        );
    }

    #[test]
    fn exact_division_tolerates_float_remainder() {
        // 0.3 % 0.1 is 0.0999.. in floating point
        let widths = [1., 0.1, 0.1, 0.1, 1.];
        let request = RefinementRequest::new(1.2, 0.15, 0.1, 1.0, 2.3);
        let refined = refine_axis(&widths, &request).unwrap();

        assert_eq!(refined.len(), 5);
        assert_close(refined.total(), 2.3);
        refined[1..4].iter().for_each(|w| assert_close(*w, 0.1));
    }

    #[test]
    fn inexact_division_spreads_deficit() {
        let widths = [10., 10., 10., 10., 10.];
        let request = RefinementRequest::new(25., 5., 3., 10., 50.);
        let refined = refine_axis(&widths, &request).unwrap();

        // 10 / 3 rounds to 3 cells, the missing unit is split evenly 2 by 2
        assert_eq!(refined.len(), 7);
        refined[2..5].iter().for_each(|w| assert_eq!(*w, 3.));
        for idx in [0, 1, 5, 6] {
            assert_close(refined[idx], 10.25);
        }
        assert_close(refined.total(), 50.);
    }

    #[test]
    fn inexact_division_without_default_cells() {
        let widths = [30., 10., 30.];
        let request = RefinementRequest::new(35., 5., 3., 10., 70.);
        assert_eq!(
            refine_axis(&widths, &request),
            Err(RefineError::NoAdjustableCells)
        );
    }

    #[test]
    fn malformed_inputs() {
        let request = RefinementRequest::new(5., 5., 2., 10., 20.);
        assert!(matches!(
            refine_axis(&[10., -10.], &request),
            Err(RefineError::InvalidWidth { index: 1, .. })
        ));

        let request = RefinementRequest::new(5., 5., 0., 10., 20.);
        assert!(matches!(
            refine_axis(&[10., 10.], &request),
            Err(RefineError::InvalidRequest {
                name: "target_size",
                ..
            })
        ));

        let request = RefinementRequest::new(5., 5., 2., 10., 25.);
        assert!(matches!(
            refine_axis(&[10., 10.], &request),
            Err(RefineError::ExtentMismatch { .. })
        ));
    }

    #[test]
    fn deficit_cannot_collapse_a_cell() {
        // 20 / 7.5 rounds to 3 cells, 2.5 too long for the single small cell on the left
        let request = RefinementRequest::new(22., 0.5, 7.5, 6., 22.);
        let err = refine_axis(&[2., 20.], &request).unwrap_err();

        match err {
            RefineError::NonPositiveAdjustedWidth { index, width } => {
                assert_eq!(index, 0);
                assert_close(width, -0.5);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn tiny_target_size_is_rejected() {
        let request = RefinementRequest::new(20., 1., 1e-300, 10., 30.);
        assert_eq!(
            refine_axis(&[10., 10., 10.], &request),
            Err(RefineError::InvalidRequest {
                name: "target_size",
                value: 1e-300
            })
        );
    }

    #[test]
    fn request_from_json() {
        let request: RefinementRequest = serde_json::from_str(
            r#"{"point": 25, "extent": 5, "target_size": 2, "default_size": 10, "axis_limit": 50}"#,
        )
        .unwrap();
        assert_eq!(request, RefinementRequest::new(25., 5., 2., 10., 50.));
    }
}
