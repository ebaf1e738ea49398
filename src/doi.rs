//! # Degree of investigation
//!
//! Two inversions of the same data run with different reference resistivities agree where the
//! data constrain the model and drift towards their references where it does not. The DOI
//! index measures that drift per block:
//!
//! ```text
//! doi = | (log10 r2 - log10 r1) / (log10 ref1 - log10 ref2) |
//! ```
//!
//! and is then rescaled to `[0, 1]` over the whole model.

use crate::data::ModelData;
use crate::utils;
use log::debug;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DoiError {
    #[error("the two models hold {first} and {second} blocks")]
    LengthMismatch { first: usize, second: usize },
    #[error("resistivity {value} at index {index} is not positive, its logarithm is undefined")]
    NonPositiveLogInput { index: usize, value: f64 },
    #[error("reference resistivity {0} is not positive")]
    NonPositiveReference(f64),
    #[error("both reference resistivities are {0}")]
    EqualReferences(f64),
    #[error("the DOI is constant over the model and cannot be normalized")]
    Degenerate,
}

/// Normalized degree of investigation of two resistivity models built on the same mesh.
///
/// `ref1` and `ref2` are the reference resistivities (ohm m) used to produce `res1` and
/// `res2` respectively.
pub fn doi(res1: &[f64], res2: &[f64], ref1: f64, ref2: f64) -> Result<Vec<f64>, DoiError> {
    if res1.len() != res2.len() {
        return Err(DoiError::LengthMismatch {
            first: res1.len(),
            second: res2.len(),
        });
    }

    for reference in [ref1, ref2] {
        if !(reference > 0.0) {
            return Err(DoiError::NonPositiveReference(reference));
        }
    }

    let denominator = ref1.log10() - ref2.log10();
    if denominator == 0.0 {
        return Err(DoiError::EqualReferences(ref1));
    }

    let log1 = log10_all(res1)?;
    let log2 = log10_all(res2)?;

    let raw: Vec<f64> = log1
        .iter()
        .zip(&log2)
        .map(|(a, b)| ((b - a) / denominator).abs())
        .collect();

    let (lo, hi) = utils::min_max(&raw).ok_or(DoiError::Degenerate)?;
    if !(hi > lo) {
        return Err(DoiError::Degenerate);
    }

    debug!("raw DOI over {} blocks spans [{lo}, {hi}]", raw.len());

    Ok(raw.into_iter().map(|d| (d - lo) / (hi - lo)).collect())
}

/// DOI of two models read from block-export files. The result keeps the geometry of `first`.
pub fn doi_from_models(
    first: ModelData<Vec<f64>>,
    second: &ModelData<Vec<f64>>,
    ref1: f64,
    ref2: f64,
) -> Result<ModelData<Vec<f64>>, DoiError> {
    let values = doi(&first.data, &second.data, ref1, ref2)?;
    Ok(first.new_data(values))
}

fn log10_all(values: &[f64]) -> Result<Vec<f64>, DoiError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value > 0.0 && value.is_finite() {
                Ok(value.log10())
            } else {
                Err(DoiError::NonPositiveLogInput { index, value })
            }
        })
        .collect()
}
