//! Duplicate detection over import batches.
//!
//! Submodules:
//! - [`config`]: detection configuration and per-entity key resolution
//! - [`identity`], [`natural_key`], [`fuzzy`]: the three match strategies
//! - [`service`]: the orchestrator applying strategies in precedence order

pub mod config;
pub mod fuzzy;
pub mod identity;
pub mod natural_key;
pub mod service;

pub use config::DetectionConfig;
pub use fuzzy::FuzzyCandidate;
pub use service::{DuplicateDetector, conflicting_fields, detect_duplicates};
