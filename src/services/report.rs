//! Plain-text detection reports.
//!
//! Renders a deterministic human-readable summary of a
//! [`DetectionResult`] for review and logging. Row numbers are 1-based
//! in the text for human readability; confidences are percentages with
//! one decimal place.

use std::fmt::Write;

use crate::models::DetectionResult;

/// Renders a plain-text summary of a detection result.
///
/// Always emits the counts section; the match-type breakdown and the
/// per-duplicate listing follow only when duplicates were found.
///
/// # Example
///
/// ```rust
/// use vrpdedup::{DetectionResult, generate_report};
///
/// let report = generate_report(&DetectionResult::default());
/// assert!(report.contains("Total rows:      0"));
/// ```
#[must_use]
pub fn generate_report(result: &DetectionResult) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail; ignore the fmt::Result plumbing.
    let _ = writeln!(out, "Duplicate Detection Report");
    let _ = writeln!(out, "==========================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Total rows:      {}", result.stats.total_rows);
    let _ = writeln!(out, "Unique rows:     {}", result.stats.unique_rows);
    let _ = writeln!(out, "Duplicate rows:  {}", result.stats.duplicate_rows);

    if result.duplicates.is_empty() {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "By match type:");
    let _ = writeln!(out, "  id:           {}", result.stats.id_matches);
    let _ = writeln!(out, "  natural-key:  {}", result.stats.natural_key_matches);
    let _ = writeln!(out, "  fuzzy:        {}", result.stats.fuzzy_matches);

    let _ = writeln!(out);
    let _ = writeln!(out, "Duplicates:");
    for duplicate in &result.duplicates {
        let _ = write!(
            out,
            "  Row {}: {} match, {:.1}% confidence",
            duplicate.import_row_index + 1,
            duplicate.match_type,
            duplicate.confidence * 100.0,
        );
        match &duplicate.existing_record_id {
            Some(id) => {
                let _ = writeln!(out, " (matched {id})");
            },
            None => {
                let _ = writeln!(out, " (matched record #{})", duplicate.existing_record_index + 1);
            },
        }
        if !duplicate.conflicting_fields.is_empty() {
            let _ = writeln!(
                out,
                "    conflicting fields: {}",
                duplicate.conflicting_fields.join(", ")
            );
        }
    }

    out
}
