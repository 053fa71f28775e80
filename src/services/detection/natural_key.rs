//! Natural-key match strategy.
//!
//! Matches an import row to an existing record when every configured
//! natural-key field is present on both sides and equal after
//! normalization (trim, lowercase when case-insensitive).

use crate::models::Record;
use crate::services::similarity::normalized_equal;

/// Finds the first existing record where every natural-key field is
/// non-null on both sides and equal after normalization.
///
/// Returns `None` when the key field list is empty (the strategy is
/// disabled) or nothing matches.
#[must_use]
pub fn find_natural_key_match(
    row: &Record,
    existing: &[Record],
    key_fields: &[&str],
    ignore_case: bool,
) -> Option<usize> {
    if key_fields.is_empty() {
        return None;
    }

    existing.iter().position(|candidate| {
        key_fields.iter().all(|field| {
            match (row.get(field), candidate.get(field)) {
                (Some(a), Some(b)) => normalized_equal(a, b, ignore_case),
                _ => false,
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key_case_insensitive() {
        let row = Record::new().with_field("name", "Warehouse");
        let existing = vec![Record::new().with_field("name", "warehouse")];

        assert_eq!(find_natural_key_match(&row, &existing, &["name"], true), Some(0));
        assert_eq!(find_natural_key_match(&row, &existing, &["name"], false), None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let row = Record::new().with_field("name", "  Depot ");
        let existing = vec![Record::new().with_field("name", "Depot")];

        assert_eq!(find_natural_key_match(&row, &existing, &["name"], false), Some(0));
    }

    #[test]
    fn test_all_key_fields_must_match() {
        let row = Record::new()
            .with_field("description", "Delivery 12")
            .with_field("locationLat", 52.52)
            .with_field("locationLon", 13.4);
        let existing = vec![
            Record::new()
                .with_field("description", "Delivery 12")
                .with_field("locationLat", 52.52)
                .with_field("locationLon", 99.0),
            Record::new()
                .with_field("description", "delivery 12")
                .with_field("locationLat", 52.52)
                .with_field("locationLon", 13.4),
        ];

        let keys = ["description", "locationLat", "locationLon"];
        assert_eq!(find_natural_key_match(&row, &existing, &keys, true), Some(1));
    }

    #[test]
    fn test_missing_key_field_never_matches() {
        let row = Record::new().with_field("description", "Delivery 12");
        let existing = vec![Record::new().with_field("description", "Delivery 12")];

        // locationLat absent on both sides: the predicate requires non-null values
        let keys = ["description", "locationLat"];
        assert_eq!(find_natural_key_match(&row, &existing, &keys, true), None);
    }

    #[test]
    fn test_empty_key_list_disables_strategy() {
        let row = Record::new().with_field("name", "Depot");
        let existing = vec![Record::new().with_field("name", "Depot")];

        assert_eq!(find_natural_key_match(&row, &existing, &[], true), None);
    }

    #[test]
    fn test_numeric_key_coerces_to_text_form() {
        // A CSV-sourced "52.52" against a JSON-sourced 52.52
        let row = Record::new().with_field("locationLat", "52.52");
        let existing = vec![Record::new().with_field("locationLat", 52.52)];

        assert_eq!(
            find_natural_key_match(&row, &existing, &["locationLat"], true),
            Some(0)
        );
    }
}
