use num_traits::Float;

/// running sum of a width sequence: the right edge of every cell
pub(crate) fn cumsum(widths: &[f64]) -> Vec<f64> {
    widths
        .iter()
        .scan(0.0, |acc, w| {
            *acc += w;
            Some(*acc)
        })
        .collect()
}

/// `n` evenly spaced samples over the closed interval `[start, stop]`.
///
/// The last sample is pinned to `stop` so accumulated rounding never
/// overshoots the interval. A single sample is just `start`.
pub fn linspace<F: Float>(start: F, stop: F, n: usize) -> Vec<F> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let steps = F::from(n - 1).unwrap_or_else(F::one);
            let step = (stop - start) / steps;
            let mut out: Vec<F> = (0..n)
                .map(|i| start + F::from(i).unwrap_or_else(F::zero) * step)
                .collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// round to a fixed number of decimals, the way legend ticks are labelled
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}
