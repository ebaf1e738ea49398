use super::{QuantizeError, UpperBin};
use derive_more::Deref;

/// Strictly ascending boundaries of discrete color bins
#[derive(Debug, Clone, PartialEq, Deref)]
pub struct LevelSet(Vec<f64>);

impl LevelSet {
    /// Validate a set of bin boundaries.
    ///
    /// The boundaries must be finite, non-empty and strictly ascending.
    pub fn new(boundaries: Vec<f64>) -> Result<Self, QuantizeError> {
        if boundaries.is_empty() {
            return Err(QuantizeError::MalformedLevelSet {
                reason: "no boundaries given".into(),
            });
        }

        if let Some(idx) = boundaries.iter().position(|b| !b.is_finite()) {
            return Err(QuantizeError::MalformedLevelSet {
                reason: format!("boundary {idx} is not finite"),
            });
        }

        if let Some(idx) = boundaries.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(QuantizeError::MalformedLevelSet {
                reason: format!(
                    "boundaries must be strictly ascending, {} is followed by {}",
                    boundaries[idx],
                    boundaries[idx + 1]
                ),
            });
        }

        Ok(Self(boundaries))
    }

    /// Left edge of the bin holding `value`.
    ///
    /// Scans the boundaries from the second one upwards and stops at the first boundary
    /// strictly greater than `value`; the boundary before it is the bin edge. Values under the
    /// first boundary therefore land in the first bin. Values at or above the last boundary
    /// are resolved by `upper`, as is every value of a single boundary set.
    pub fn bin_of(&self, value: f64, upper: UpperBin) -> f64 {
        for i in 1..self.0.len() {
            if value < self.0[i] {
                return self.0[i - 1];
            }
        }

        match upper {
            UpperBin::Unbounded => value,
            UpperBin::Clamp => self.0[self.0.len() - 1],
        }
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl TryFrom<Vec<f64>> for LevelSet {
    type Error = QuantizeError;

    fn try_from(x: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(x)
    }
}

impl TryFrom<&[f64]> for LevelSet {
    type Error = QuantizeError;

    fn try_from(x: &[f64]) -> Result<Self, Self::Error> {
        Self::new(x.to_vec())
    }
}

/// Replace every value with the left edge of its bin.
pub fn bucket(values: &[f64], levels: &LevelSet, upper: UpperBin) -> Vec<f64> {
    values.iter().map(|&v| levels.bin_of(v, upper)).collect()
}

/// Rank based normalization.
///
/// The distinct values are sorted and mapped onto evenly spaced positions over `[0, 1]`;
/// every value takes the position of the first distinct value that is not smaller than it.
/// Equal gaps between levels therefore get equal color distance, whatever their numeric
/// spacing. Values must not be NaN.
pub fn find_norm(values: &[f64]) -> Vec<f64> {
    let mut unique = values.to_vec();
    unique.sort_by(|a, b| a.total_cmp(b));
    unique.dedup();

    let targets = crate::utils::linspace(0.0, 1.0, unique.len());

    values
        .iter()
        .map(|&v| {
            let mut position = None;
            for (j, &u) in unique.iter().enumerate() {
                if v <= u {
                    position = Some(targets[j]);
                    break;
                }
            }
            // every value is one of the unique values, so a match always exists
            position.unwrap_or(1.0)
        })
        .collect()
}
