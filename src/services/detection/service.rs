//! Duplicate detection orchestrator.
//!
//! Coordinates the three match strategies over an import batch:
//! 1. **Identity match**: exact `_id`/`id` equality
//! 2. **Natural key**: per-entity-type key fields equal after normalization
//! 3. **Fuzzy match**: row similarity above the configured threshold
//!
//! Strategies run in strict precedence order per row, first success
//! wins. Each row is compared only against the existing record set,
//! never against other import rows, so classification is
//! order-independent across the batch.

use tracing::instrument;

use crate::models::{
    DetectionResult, DetectionStats, DuplicateMatch, EntityType, ID_FIELDS, MatchType, Record,
};
use crate::services::similarity::normalized_equal;

use super::config::DetectionConfig;
use super::fuzzy::find_fuzzy_match;
use super::identity::find_identity_match;
use super::natural_key::find_natural_key_match;

/// Classifies every row of an import batch as unique or as a duplicate
/// of an existing record.
///
/// The detector is stateless: every invocation is a pure computation
/// over its inputs, safe to run concurrently from independent calls.
///
/// # Example
///
/// ```rust
/// use vrpdedup::{DetectionConfig, DuplicateDetector, EntityType, MatchType, Record};
///
/// let import = vec![Record::new()
///     .with_field("_id", "v1")
///     .with_field("description", "Truck A")];
/// let existing = vec![Record::new()
///     .with_field("_id", "v1")
///     .with_field("description", "Truck A Updated")];
///
/// let result = DuplicateDetector::new().detect(
///     &import,
///     &existing,
///     EntityType::Vehicles,
///     &DetectionConfig::default(),
/// );
///
/// assert_eq!(result.duplicates.len(), 1);
/// assert_eq!(result.duplicates[0].match_type, MatchType::Id);
/// assert_eq!(result.duplicates[0].conflicting_fields, ["description"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Creates a detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classifies an import batch against an existing record set.
    ///
    /// Every import row lands exactly once in either the duplicate list
    /// or the unique list, both in input order. Inputs are never
    /// mutated; the result is deterministic for fixed inputs.
    #[instrument(
        skip_all,
        fields(
            operation = "detect_duplicates",
            entity_type = %entity_type.as_str(),
            batch_size = import_batch.len(),
            existing_size = existing.len(),
        )
    )]
    pub fn detect(
        &self,
        import_batch: &[Record],
        existing: &[Record],
        entity_type: EntityType,
        config: &DetectionConfig,
    ) -> DetectionResult {
        let natural_keys = config.natural_keys(entity_type);
        let fuzzy_fields = entity_type.fuzzy_match_fields();

        let mut duplicates = Vec::new();
        let mut unique_rows = Vec::new();

        for (row_index, row) in import_batch.iter().enumerate() {
            match Self::classify_row(row, row_index, existing, &natural_keys, fuzzy_fields, config)
            {
                Some(found) => {
                    tracing::debug!(
                        row_index,
                        match_type = %found.match_type,
                        confidence = found.confidence,
                        existing_index = found.existing_record_index,
                        "Duplicate found"
                    );
                    duplicates.push(found);
                },
                None => {
                    tracing::debug!(row_index, "Row is unique");
                    unique_rows.push(row.clone());
                },
            }
        }

        let stats = Self::tally(import_batch.len(), &duplicates, &unique_rows);
        tracing::info!(
            total = stats.total_rows,
            unique = stats.unique_rows,
            duplicates = stats.duplicate_rows,
            "Detection complete"
        );

        DetectionResult {
            duplicates,
            unique_rows,
            stats,
        }
    }

    /// Applies the strategies to one row in strict precedence order.
    fn classify_row(
        row: &Record,
        row_index: usize,
        existing: &[Record],
        natural_keys: &[&str],
        fuzzy_fields: &[&str],
        config: &DetectionConfig,
    ) -> Option<DuplicateMatch> {
        // 1. Identity match (exact, no normalization)
        if let Some(existing_index) = find_identity_match(row, existing) {
            let matched = &existing[existing_index];
            return Some(DuplicateMatch::id_match(
                row_index,
                row.clone(),
                existing_index,
                matched.id().cloned(),
                conflicting_fields(row, matched),
            ));
        }

        // 2. Natural-key match
        if let Some(existing_index) =
            find_natural_key_match(row, existing, natural_keys, config.ignore_case)
        {
            let matched = &existing[existing_index];
            return Some(DuplicateMatch::natural_key_match(
                row_index,
                row.clone(),
                existing_index,
                matched.id().cloned(),
                conflicting_fields(row, matched),
            ));
        }

        // 3. Fuzzy match
        if config.fuzzy_enabled {
            if let Some(candidate) = find_fuzzy_match(
                row,
                existing,
                fuzzy_fields,
                config.fuzzy_threshold,
                config.ignore_case,
            ) {
                let matched = &existing[candidate.existing_index];
                return Some(DuplicateMatch::fuzzy_match(
                    row_index,
                    row.clone(),
                    candidate.existing_index,
                    matched.id().cloned(),
                    candidate.score,
                    conflicting_fields(row, matched),
                ));
            }
        }

        None
    }

    /// Derives the aggregate counts from the classified rows.
    fn tally(
        total_rows: usize,
        duplicates: &[DuplicateMatch],
        unique_rows: &[Record],
    ) -> DetectionStats {
        let count_of = |match_type: MatchType| {
            duplicates
                .iter()
                .filter(|d| d.match_type == match_type)
                .count()
        };

        DetectionStats {
            total_rows,
            unique_rows: unique_rows.len(),
            duplicate_rows: duplicates.len(),
            id_matches: count_of(MatchType::Id),
            natural_key_matches: count_of(MatchType::NaturalKey),
            fuzzy_matches: count_of(MatchType::Fuzzy),
        }
    }
}

/// Lists the fields of the import row that conflict with the matched
/// existing record: present and non-null on both sides, with values that
/// differ after trim+lowercase normalization.
///
/// Primary-key fields are excluded. Normalization here is always
/// case-insensitive, independent of the matching configuration: this is
/// a diagnostic listing, not a matching decision.
#[must_use]
pub fn conflicting_fields(import_row: &Record, existing: &Record) -> Vec<String> {
    import_row
        .iter()
        .filter(|(name, _)| !ID_FIELDS.contains(name))
        .filter_map(|(name, import_value)| {
            let existing_value = existing.get(name)?;
            if import_value.is_null() || normalized_equal(import_value, existing_value, true) {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

/// Classifies an import batch against an existing record set.
///
/// Convenience wrapper around [`DuplicateDetector::detect`].
#[must_use]
pub fn detect_duplicates(
    import_batch: &[Record],
    existing: &[Record],
    entity_type: EntityType,
    config: &DetectionConfig,
) -> DetectionResult {
    DuplicateDetector::new().detect(import_batch, existing, entity_type, config)
}
