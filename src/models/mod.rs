//! Data models for vrpdedup.
//!
//! This module contains the core data structures used throughout the
//! detection pipeline.

mod detection;
mod entity;
mod record;

pub use detection::{DetectionResult, DetectionStats, DuplicateMatch, MatchType, Resolution};
pub use entity::EntityType;
pub use record::{FieldValue, ID_FIELDS, Record};
