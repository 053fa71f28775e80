//! Resolution planning for detected duplicates.
//!
//! Partitions a duplicate list into replace/create/skip buckets before
//! any collaborator commits writes. Pure computation: the planner never
//! touches persistence itself.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::models::{DuplicateMatch, Resolution};

/// The partition of detected duplicates into action buckets.
///
/// Together the buckets contain every input duplicate exactly once, in
/// input order within each bucket.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResolutionPlan {
    /// Duplicates whose import row overwrites the matched record.
    pub to_replace: Vec<DuplicateMatch>,
    /// Duplicates whose import row is inserted as a new record.
    pub to_create: Vec<DuplicateMatch>,
    /// Duplicates whose import row is discarded.
    pub to_skip: Vec<DuplicateMatch>,
}

impl ResolutionPlan {
    /// Total number of duplicates across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_replace.len() + self.to_create.len() + self.to_skip.len()
    }

    /// Returns `true` when every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions duplicates into replace/create/skip buckets.
///
/// `strategy` is the default action; a per-row [`resolution`] override
/// set after detection (by a reviewing UI or caller) wins over it.
///
/// [`resolution`]: DuplicateMatch::resolution
#[must_use]
#[instrument(skip_all, fields(operation = "resolve_duplicates", strategy = %strategy, count = duplicates.len()))]
pub fn resolve_duplicates(duplicates: Vec<DuplicateMatch>, strategy: Resolution) -> ResolutionPlan {
    let mut plan = ResolutionPlan::default();

    for duplicate in duplicates {
        let action = duplicate.resolution.unwrap_or(strategy);
        match action {
            Resolution::Replace => plan.to_replace.push(duplicate),
            Resolution::Create => plan.to_create.push(duplicate),
            Resolution::Skip => plan.to_skip.push(duplicate),
        }
    }

    tracing::debug!(
        replace = plan.to_replace.len(),
        create = plan.to_create.len(),
        skip = plan.to_skip.len(),
        "Resolution plan built"
    );

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn sample(index: usize) -> DuplicateMatch {
        DuplicateMatch::id_match(
            index,
            Record::new().with_field("_id", format!("v{index}")),
            index,
            None,
            vec![],
        )
    }

    #[test]
    fn test_global_strategy_applies_to_all() {
        let duplicates = vec![sample(0), sample(1), sample(2)];
        let plan = resolve_duplicates(duplicates, Resolution::Replace);

        assert_eq!(plan.to_replace.len(), 3);
        assert!(plan.to_create.is_empty());
        assert!(plan.to_skip.is_empty());
    }

    #[test]
    fn test_per_row_override_wins() {
        let duplicates = vec![
            sample(0),
            sample(1).with_resolution(Resolution::Create),
            sample(2).with_resolution(Resolution::Replace),
        ];
        let plan = resolve_duplicates(duplicates, Resolution::Skip);

        assert_eq!(plan.to_skip.len(), 1);
        assert_eq!(plan.to_create.len(), 1);
        assert_eq!(plan.to_replace.len(), 1);
        assert_eq!(plan.to_skip[0].import_row_index, 0);
        assert_eq!(plan.to_create[0].import_row_index, 1);
        assert_eq!(plan.to_replace[0].import_row_index, 2);
    }

    #[test]
    fn test_partition_is_lossless_and_ordered() {
        let duplicates: Vec<DuplicateMatch> = (0..10)
            .map(|i| {
                let d = sample(i);
                match i % 3 {
                    0 => d.with_resolution(Resolution::Replace),
                    1 => d.with_resolution(Resolution::Create),
                    _ => d,
                }
            })
            .collect();

        let plan = resolve_duplicates(duplicates, Resolution::Skip);

        assert_eq!(plan.len(), 10);
        for bucket in [&plan.to_replace, &plan.to_create, &plan.to_skip] {
            let indices: Vec<usize> = bucket.iter().map(|d| d.import_row_index).collect();
            let mut sorted = indices.clone();
            sorted.sort_unstable();
            assert_eq!(indices, sorted, "order preserved within bucket");
        }

        let mut all: Vec<usize> = plan
            .to_replace
            .iter()
            .chain(&plan.to_create)
            .chain(&plan.to_skip)
            .map(|d| d.import_row_index)
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input() {
        let plan = resolve_duplicates(vec![], Resolution::Replace);
        assert!(plan.is_empty());
    }
}
