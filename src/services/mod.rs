//! Business logic services.
//!
//! All services here are pure computation: no I/O, no clocks, no shared
//! mutable state between invocations.

pub mod detection;
pub mod report;
pub mod resolution;
pub mod similarity;

pub use detection::{DetectionConfig, DuplicateDetector, detect_duplicates};
pub use report::generate_report;
pub use resolution::{ResolutionPlan, resolve_duplicates};
