//! Identity match strategy.
//!
//! Matches an import row to an existing record by exact primary-key
//! equality. No normalization is applied: ids are opaque.

use crate::models::{ID_FIELDS, Record};

/// Finds the first existing record whose `_id` or `id` equals the import
/// row's primary key exactly.
///
/// Returns the index of the matched record, or `None` when the row has
/// no primary key or nothing matches.
#[must_use]
pub fn find_identity_match(row: &Record, existing: &[Record]) -> Option<usize> {
    let import_id = row.id()?;

    existing.iter().position(|candidate| {
        ID_FIELDS
            .iter()
            .filter_map(|field| candidate.get(field))
            .any(|value| value == import_id)
    })
}
