use super::RefineError;

/// Split a length `deficit` between the adjustable cells left and right of a
/// refinement zone. Returns `(share_left, share_right)`, which always sum to
/// `deficit`.
///
/// The split is weighted by the number of adjustable cells on each side, then
/// the side holding more cells picks up part of the other side's proportional
/// share (scaled by `fewer / more`). The remainder lands on the side with fewer
/// cells. When a side has no adjustable cells its share is zero.
pub fn split_deficit(deficit: f64, n_left: usize, n_right: usize) -> Result<(f64, f64), RefineError> {
    if n_left == 0 && n_right == 0 {
        return Err(RefineError::NoAdjustableCells);
    }

    let nl = n_left as f64;
    let nr = n_right as f64;
    let total = nl + nr;

    let (left, right) = if n_left > n_right {
        let base = deficit * nl / total;
        let left = base + (deficit - base) * nr / nl;
        (left, deficit - left)
    } else if n_right > n_left {
        let base = deficit * nr / total;
        let right = base + (deficit - base) * nl / nr;
        (deficit - right, right)
    } else {
        let left = deficit * nl / total;
        (left, deficit - left)
    };

    Ok((left, right))
}
