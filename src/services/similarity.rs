//! Field and row similarity scoring.
//!
//! Compares field values of matching type and aggregates per-field
//! scores into a whole-row similarity used by fuzzy matching:
//!
//! - strings: normalized Levenshtein ratio (`strsim`)
//! - numbers: relative distance
//! - lists: Jaccard similarity by value membership
//! - mismatched types: 0.0
//!
//! Scores are always in `[0, 1]`. Heterogeneous data never fails
//! comparison, it only deprioritizes uncertain matches.

use strsim::levenshtein;

use crate::models::{FieldValue, Record};

/// Normalizes a string for comparison: trims surrounding whitespace and
/// lowercases when `ignore_case` is set.
#[must_use]
pub fn normalize(s: &str, ignore_case: bool) -> String {
    let trimmed = s.trim();
    if ignore_case {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// Compares two field values for normalized equality.
///
/// Values are compared through their string forms (trimmed, lowercased
/// when `ignore_case`), so a numeric `40` and a text `"40"` from a CSV
/// cell compare equal. Used by natural-key matching and conflict-field
/// analysis, not by fuzzy scoring.
#[must_use]
pub fn normalized_equal(a: &FieldValue, b: &FieldValue, ignore_case: bool) -> bool {
    normalize(&a.to_string(), ignore_case) == normalize(&b.to_string(), ignore_case)
}

/// Computes normalized edit-distance similarity between two strings.
///
/// Exact match after normalization scores 1.0; otherwise
/// `(max_len - levenshtein) / max_len` over the normalized character
/// counts. Symmetric, and always in `[0, 1]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn string_similarity(a: &str, b: &str, ignore_case: bool) -> f64 {
    let a = normalize(a, ignore_case);
    let b = normalize(b, ignore_case);

    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    // a != b, so at least one string is non-empty
    let distance = levenshtein(&a, &b);
    (max_len - distance) as f64 / max_len as f64
}

/// Computes relative-distance similarity between two numbers.
///
/// Exact equality scores 1.0; otherwise `1 - |a-b| / max(|a|,|b|)`,
/// clamped at 0. A non-finite input scores 0.0, so the result is
/// always in `[0, 1]`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn number_similarity(a: f64, b: f64) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        return 1.0;
    }
    (1.0 - (a - b).abs() / scale).max(0.0)
}

/// Computes Jaccard similarity between two lists, by value membership.
///
/// Position is ignored and repeated values count once. Two empty lists
/// score 1.0; one empty list scores 0.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn list_similarity(a: &[FieldValue], b: &[FieldValue]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    // FieldValue is not hashable (f64), so build the distinct sets by scan
    let mut distinct_a: Vec<&FieldValue> = Vec::new();
    for value in a {
        if !distinct_a.contains(&value) {
            distinct_a.push(value);
        }
    }

    let mut union_len = distinct_a.len();
    let mut intersection = 0usize;
    let mut seen_b: Vec<&FieldValue> = Vec::new();
    for value in b {
        if seen_b.contains(&value) {
            continue;
        }
        seen_b.push(value);
        if distinct_a.contains(&value) {
            intersection += 1;
        } else {
            union_len += 1;
        }
    }

    intersection as f64 / union_len as f64
}

/// Compares two field values of matching type, returning a score in
/// `[0, 1]`. Mismatched types (including list vs. scalar) score 0.0.
#[must_use]
pub fn field_similarity(a: &FieldValue, b: &FieldValue, ignore_case: bool) -> f64 {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => string_similarity(x, y, ignore_case),
        (FieldValue::Number(x), FieldValue::Number(y)) => number_similarity(*x, *y),
        (FieldValue::List(x), FieldValue::List(y)) => list_similarity(x, y),
        _ => 0.0,
    }
}

/// Scores two whole records over a configured field subset.
///
/// Fields where either side is null or absent are excluded from the
/// average entirely. Returns the arithmetic mean of the per-field
/// scores, or 0.0 when no field was comparable.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn row_similarity(a: &Record, b: &Record, fields: &[&str], ignore_case: bool) -> f64 {
    let mut total = 0.0;
    let mut compared = 0usize;

    for field in fields {
        if let (Some(x), Some(y)) = (a.get(field), b.get(field)) {
            total += field_similarity(x, y, ignore_case);
            compared += 1;
        }
    }

    if compared == 0 {
        0.0
    } else {
        total / compared as f64
    }
}
