//! Weighted random choice
//!
//! Weights are normalized by their total and a single uniform draw `r` in
//! `[0, 1)` is mapped through the cumulative distribution. Candidates are
//! walked in the order given, so a stable input order plus a seeded random
//! source gives reproducible picks.

use tracing::trace;

use crate::engine::random::RandomSource;
use crate::errors::{Result, RotatorError};

/// Turns raw weights into probabilities that sum to 1
///
/// Fails with `InvalidWeights` on an empty input, on any negative or
/// non-finite weight, and when the total is zero.
pub fn normalize<T>(candidates: &[(T, f64)]) -> Result<Vec<f64>> {
    if candidates.is_empty() {
        return Err(RotatorError::invalid_weights("no candidates to pick from"));
    }

    let mut total = 0.0_f64;
    for (idx, (_, weight)) in candidates.iter().enumerate() {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(RotatorError::invalid_weights(format!(
                "candidate #{} has invalid weight {}",
                idx, weight
            )));
        }
        total += weight;
    }

    if total <= 0.0 || !total.is_finite() {
        return Err(RotatorError::invalid_weights(format!(
            "total weight of {} candidates is {}",
            candidates.len(),
            total
        )));
    }

    Ok(candidates.iter().map(|(_, w)| w / total).collect())
}

/// Index chosen by `r` over a normalized distribution
///
/// Uses a strict `r < cumulative` test so zero-probability entries are never
/// returned. Rounding can leave the final cumulative sum a hair under 1.0; a
/// draw that falls past it lands on the last positive entry.
fn draw_index(distribution: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    let mut last_positive = 0;

    for (idx, probability) in distribution.iter().enumerate() {
        if *probability <= 0.0 {
            continue;
        }
        cumulative += probability;
        last_positive = idx;
        if r < cumulative {
            return idx;
        }
    }

    last_positive
}

/// Picks one item from `(item, weight)` pairs
pub fn pick<'a, T>(candidates: &'a [(T, f64)], random: &dyn RandomSource) -> Result<&'a T> {
    let distribution = normalize(candidates)?;
    let r = random.next_unit();
    let idx = draw_index(&distribution, r);
    trace!(
        "WeightedPicker: r={:.6} -> #{} of {} (p={:.4})",
        r,
        idx,
        candidates.len(),
        distribution[idx]
    );
    Ok(&candidates[idx].0)
}
