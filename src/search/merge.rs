//! Cross-type result merging

use super::models::RawResult;

/// Merge per-type hit lists into one ranked list of at most `limit` items.
///
/// Concatenates the groups in the order given, stable-sorts by score
/// descending, and truncates. Ties keep the concatenation order, so with
/// the fixed Track, Artist, Playlist dispatch order equal-score output is
/// reproducible across runs.
///
/// Scores from different collections are compared as-is; no cross-index
/// normalization is applied, so ranking fidelity depends on the indices
/// scoring on comparable scales.
pub fn merge(groups: Vec<Vec<RawResult>>, limit: usize) -> Vec<RawResult> {
    let mut all: Vec<RawResult> = groups.into_iter().flatten().collect();
    all.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    all.truncate(limit);
    all
}
