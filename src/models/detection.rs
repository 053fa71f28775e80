//! Detection result types.
//!
//! This module defines the result types returned by duplicate detection:
//! per-row matches, aggregate statistics, and the resolution actions a
//! caller can assign to each match.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

use super::record::{FieldValue, Record};

/// The strategy that declared a row a duplicate.
///
/// # Variants
///
/// - `Id`: primary key (`_id`/`id`) matched an existing record exactly
/// - `NaturalKey`: every per-entity-type key field matched after
///   normalization
/// - `Fuzzy`: row similarity met the configured threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    /// Exact primary-key match.
    Id,
    /// Natural-key field equality.
    NaturalKey,
    /// Similarity score above threshold.
    Fuzzy,
}

impl MatchType {
    /// Returns the string form of the match type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::NaturalKey => "natural-key",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The action to take for one detected duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Overwrite the matched existing record with the import row.
    Replace,
    /// Insert the import row as a new record despite the match.
    Create,
    /// Discard the import row.
    Skip,
}

impl Resolution {
    /// Returns the string form of the resolution.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Create => "create",
            Self::Skip => "skip",
        }
    }

    /// Parses a resolution strategy from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for unrecognized strategies. An
    /// unknown strategy string indicates a caller bug, not a data issue,
    /// so it fails fast instead of degrading.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "replace" | "overwrite" => Ok(Self::Replace),
            "create" | "insert" => Ok(Self::Create),
            "skip" | "discard" => Ok(Self::Skip),
            other => Err(Error::InvalidInput(format!(
                "unknown resolution strategy '{other}' (expected replace, create, or skip)"
            ))),
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One import row matched against one existing record.
///
/// # Example
///
/// ```rust
/// use vrpdedup::models::{DuplicateMatch, FieldValue, MatchType, Record};
///
/// let row = Record::new().with_field("description", "Truck A");
/// let m = DuplicateMatch::id_match(3, row, 0, Some(FieldValue::from("v1")), vec![]);
///
/// assert_eq!(m.match_type, MatchType::Id);
/// assert!((m.confidence - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// Position of the row in the import batch (0-based). Immutable once
    /// assigned.
    pub import_row_index: usize,
    /// The import row itself, carried so the resolution planner and the
    /// caller can commit it without re-indexing the batch.
    pub import_row: Record,
    /// Position of the matched record in the existing set (0-based).
    pub existing_record_index: usize,
    /// Primary key of the matched existing record, when it has one.
    /// Always present for id matches; natural-key and fuzzy matches can
    /// hit records that lack an id.
    pub existing_record_id: Option<FieldValue>,
    /// The strategy that produced this match.
    pub match_type: MatchType,
    /// Match confidence in `[0, 1]`. Fixed at 1.0 for id matches and
    /// 0.95 for natural-key matches; the computed similarity score for
    /// fuzzy matches.
    pub confidence: f64,
    /// Fields present in both rows whose normalized values differ,
    /// sorted by name. Primary-key fields are excluded.
    pub conflicting_fields: Vec<String>,
    /// Per-row resolution override, settable after detection. When
    /// `None`, the planner applies its strategy-level default.
    pub resolution: Option<Resolution>,
}

impl DuplicateMatch {
    /// Confidence assigned to primary-key matches.
    pub const ID_CONFIDENCE: f64 = 1.0;
    /// Confidence assigned to natural-key matches. Fixed by design, not
    /// computed.
    pub const NATURAL_KEY_CONFIDENCE: f64 = 0.95;

    /// Creates an exact primary-key match.
    #[must_use]
    pub const fn id_match(
        import_row_index: usize,
        import_row: Record,
        existing_record_index: usize,
        existing_record_id: Option<FieldValue>,
        conflicting_fields: Vec<String>,
    ) -> Self {
        Self {
            import_row_index,
            import_row,
            existing_record_index,
            existing_record_id,
            match_type: MatchType::Id,
            confidence: Self::ID_CONFIDENCE,
            conflicting_fields,
            resolution: None,
        }
    }

    /// Creates a natural-key match.
    #[must_use]
    pub const fn natural_key_match(
        import_row_index: usize,
        import_row: Record,
        existing_record_index: usize,
        existing_record_id: Option<FieldValue>,
        conflicting_fields: Vec<String>,
    ) -> Self {
        Self {
            import_row_index,
            import_row,
            existing_record_index,
            existing_record_id,
            match_type: MatchType::NaturalKey,
            confidence: Self::NATURAL_KEY_CONFIDENCE,
            conflicting_fields,
            resolution: None,
        }
    }

    /// Creates a fuzzy match with the computed similarity score.
    #[must_use]
    pub const fn fuzzy_match(
        import_row_index: usize,
        import_row: Record,
        existing_record_index: usize,
        existing_record_id: Option<FieldValue>,
        confidence: f64,
        conflicting_fields: Vec<String>,
    ) -> Self {
        Self {
            import_row_index,
            import_row,
            existing_record_index,
            existing_record_id,
            match_type: MatchType::Fuzzy,
            confidence,
            conflicting_fields,
            resolution: None,
        }
    }

    /// Builder method to set the per-row resolution override.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }
}

/// Aggregate counts for one detection run. Purely derived from the
/// classified rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetectionStats {
    /// Rows in the import batch.
    pub total_rows: usize,
    /// Rows with no match against the existing set.
    pub unique_rows: usize,
    /// Rows matched to an existing record.
    pub duplicate_rows: usize,
    /// Duplicates found by primary-key match.
    pub id_matches: usize,
    /// Duplicates found by natural-key match.
    pub natural_key_matches: usize,
    /// Duplicates found by fuzzy match.
    pub fuzzy_matches: usize,
}

/// The outcome of classifying one import batch.
///
/// Every import row appears exactly once: either as a [`DuplicateMatch`]
/// or in `unique_rows`, both in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Matched rows, in input order.
    pub duplicates: Vec<DuplicateMatch>,
    /// Unmatched rows, in input order.
    pub unique_rows: Vec<Record>,
    /// Aggregate counts.
    pub stats: DetectionStats,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_match_type_display() {
        assert_eq!(MatchType::Id.to_string(), "id");
        assert_eq!(MatchType::NaturalKey.to_string(), "natural-key");
        assert_eq!(MatchType::Fuzzy.to_string(), "fuzzy");
    }

    #[test]
    fn test_resolution_parse() {
        assert_eq!(Resolution::parse("replace").unwrap(), Resolution::Replace);
        assert_eq!(Resolution::parse("CREATE").unwrap(), Resolution::Create);
        assert_eq!(Resolution::parse("skip").unwrap(), Resolution::Skip);
    }

    #[test]
    fn test_resolution_parse_rejects_unknown() {
        let err = Resolution::parse("merge").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInput(_)));
        assert!(err.to_string().contains("merge"));
    }

    #[test]
    fn test_fixed_confidences() {
        let row = Record::new().with_field("description", "Truck A");

        let id = DuplicateMatch::id_match(0, row.clone(), 0, None, vec![]);
        assert_eq!(id.confidence, 1.0);
        assert_eq!(id.match_type, MatchType::Id);

        let nk = DuplicateMatch::natural_key_match(1, row.clone(), 0, None, vec![]);
        assert_eq!(nk.confidence, 0.95);

        let fuzzy = DuplicateMatch::fuzzy_match(2, row, 0, None, 0.87, vec![]);
        assert_eq!(fuzzy.confidence, 0.87);
    }

    #[test]
    fn test_with_resolution() {
        let row = Record::new();
        let m = DuplicateMatch::id_match(0, row, 0, None, vec![]).with_resolution(Resolution::Skip);
        assert_eq!(m.resolution, Some(Resolution::Skip));
    }

    #[test]
    fn test_match_type_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&MatchType::NaturalKey).unwrap(),
            "\"natural-key\""
        );
        let back: MatchType = serde_json::from_str("\"natural-key\"").unwrap();
        assert_eq!(back, MatchType::NaturalKey);
    }
}
