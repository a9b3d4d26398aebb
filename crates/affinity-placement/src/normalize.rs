//! Linear score normalization.
//!
//! Maps the lowest raw score in a vector to the range minimum and the
//! highest to the range maximum, with integer truncation in between. A
//! vector with no spread collapses to the range minimum.

use affinity_core::{NodeScore, ScoreRange};

/// Rewrite every entry of `scores` in place into `range`.
///
/// Length and order are preserved. An empty slice is left untouched.
pub fn normalize_scores(scores: &mut [NodeScore], range: ScoreRange) {
    let Some((lowest, highest)) = bounds(scores.iter().map(|s| s.score)) else {
        return;
    };
    for entry in scores.iter_mut() {
        entry.score = rescale(entry.score, lowest, highest, range);
    }
}

/// Same as [`normalize_scores`] over bare values.
pub fn normalize_values(values: &mut [i64], range: ScoreRange) {
    let Some((lowest, highest)) = bounds(values.iter().copied()) else {
        return;
    };
    for value in values.iter_mut() {
        *value = rescale(*value, lowest, highest, range);
    }
}

fn bounds(values: impl Iterator<Item = i64>) -> Option<(i64, i64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// `(value - lowest) * span / (highest - lowest) + range.min`.
///
/// Both factors are non-negative and below 2^64, so the product is taken
/// in u128 and cannot overflow. Truncation is floor division here.
fn rescale(value: i64, lowest: i64, highest: i64, range: ScoreRange) -> i64 {
    let old_span = (i128::from(highest) - i128::from(lowest)) as u128;
    if old_span == 0 {
        return range.min;
    }
    let delta = (i128::from(value) - i128::from(lowest)) as u128;
    let span = range.span().max(0) as u128;
    let offset = delta * span / old_span;
    // offset lies in 0..=span, so the sum lies in range.min..=range.max.
    (offset as i128 + i128::from(range.min)) as i64
}
