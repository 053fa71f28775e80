//! # vrpdedup
//!
//! Bulk-import duplicate detection and resolution for vehicle routing
//! datasets.
//!
//! When a CSV batch of vehicles, jobs, locations, or routes is imported
//! into an existing dataset, vrpdedup classifies every incoming row as
//! unique or as a duplicate of an existing record, using three match
//! strategies in strict precedence order:
//!
//! 1. **Identity match** - exact `_id`/`id` equality
//! 2. **Natural-key match** - per-entity-type key fields equal after
//!    normalization
//! 3. **Fuzzy match** - row similarity (Levenshtein, numeric distance,
//!    Jaccard) above a configurable threshold
//!
//! Detected duplicates are then partitioned into replace/create/skip
//! buckets by the resolution planner before any write is committed.
//! The whole pipeline is pure computation: no I/O, no clocks, no shared
//! state, deterministic for fixed inputs.
//!
//! ## Example
//!
//! ```rust
//! use vrpdedup::{DetectionConfig, DuplicateDetector, EntityType, Record};
//!
//! let import = vec![Record::from_pairs([("description", "Truck A")])];
//! let existing = vec![Record::from_pairs([("_id", "v1"), ("description", "Truck A")])];
//!
//! let detector = DuplicateDetector::new();
//! let result = detector.detect(
//!     &import,
//!     &existing,
//!     EntityType::Vehicles,
//!     &DetectionConfig::default(),
//! );
//!
//! assert_eq!(result.stats.duplicate_rows, 1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod io;
pub mod models;
pub mod services;

// Re-exports for convenience
pub use models::{
    DetectionResult, DetectionStats, DuplicateMatch, EntityType, FieldValue, MatchType, Record,
    Resolution,
};
pub use services::detection::{DetectionConfig, DuplicateDetector, detect_duplicates};
pub use services::report::generate_report;
pub use services::resolution::{ResolutionPlan, resolve_duplicates};

/// Error type for vrpdedup operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// Detection itself never fails on data-quality issues (heterogeneous
/// field types, missing values, unknown entity types all degrade
/// gracefully); errors only surface at the boundaries of the crate.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Unknown resolution/entity-type strings, CSV missing headers, malformed JSON |
/// | `OperationFailed` | Filesystem I/O errors in the import/export adapters |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - An unknown resolution strategy string is parsed
    /// - A CSV file has no header row
    /// - A JSON import file is not an array of objects
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur while reading or writing batches
    /// - The CSV reader or writer reports a malformed record
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for vrpdedup operations.
pub type Result<T> = std::result::Result<T, Error>;
