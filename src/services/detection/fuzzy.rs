//! Fuzzy match strategy.
//!
//! Scores an import row against every existing record with
//! [`row_similarity`] and selects the best candidate at or above the
//! threshold. Ties break toward the first-encountered record, which is
//! what makes detection deterministic for fixed inputs.

use crate::models::Record;
use crate::services::similarity::row_similarity;

/// A fuzzy-match candidate: the index of the existing record and its
/// similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyCandidate {
    /// Index into the existing record set.
    pub existing_index: usize,
    /// Row similarity in `[0, 1]`, guaranteed `>= threshold`.
    pub score: f64,
}

/// Finds the highest-scoring existing record with row similarity at or
/// above `threshold` over the given field list.
///
/// A candidate scoring exactly the threshold is accepted. Ties on the
/// score keep the lowest existing-record index: the fold only replaces
/// the best candidate on a strictly greater score.
#[must_use]
pub fn find_fuzzy_match(
    row: &Record,
    existing: &[Record],
    fields: &[&str],
    threshold: f64,
    ignore_case: bool,
) -> Option<FuzzyCandidate> {
    existing
        .iter()
        .enumerate()
        .map(|(existing_index, candidate)| FuzzyCandidate {
            existing_index,
            score: row_similarity(row, candidate, fields, ignore_case),
        })
        .filter(|candidate| candidate.score >= threshold)
        .fold(None, |best: Option<FuzzyCandidate>, candidate| {
            match best {
                Some(current) if candidate.score > current.score => Some(candidate),
                Some(current) => Some(current),
                None => Some(candidate),
            }
        })
}
