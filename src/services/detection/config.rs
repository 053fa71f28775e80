//! Detection configuration.
//!
//! This module defines configuration for duplicate detection: the fuzzy
//! similarity threshold, case handling, and the optional natural-key
//! field override.

use crate::models::EntityType;

/// Configuration for duplicate detection.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `VRPDEDUP_FUZZY_THRESHOLD` | f64 | `0.85` | Minimum similarity for a fuzzy duplicate |
/// | `VRPDEDUP_FUZZY_ENABLED` | bool | `true` | Whether fuzzy matching runs at all |
/// | `VRPDEDUP_IGNORE_CASE` | bool | `true` | Case-insensitive string comparison |
///
/// # Example
///
/// ```rust
/// use vrpdedup::DetectionConfig;
///
/// let config = DetectionConfig::default();
/// assert!(config.fuzzy_enabled);
/// assert!((config.fuzzy_threshold - 0.85).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Minimum row similarity to declare a fuzzy duplicate. A candidate
    /// scoring exactly the threshold is accepted.
    pub fuzzy_threshold: f64,

    /// Enable/disable the fuzzy match strategy entirely.
    pub fuzzy_enabled: bool,

    /// Case-insensitive string comparison for natural-key and fuzzy
    /// matching. Conflict-field analysis is always case-insensitive,
    /// independent of this setting.
    pub ignore_case: bool,

    /// Natural-key fields to use instead of the per-entity-type
    /// defaults. `None` keeps the fixed defaults; an empty list disables
    /// natural-key matching.
    pub natural_key_fields: Option<Vec<String>>,
}

impl DetectionConfig {
    /// Default minimum similarity for a fuzzy duplicate.
    pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.85;

    /// Creates a new configuration from environment variables.
    ///
    /// Falls back to defaults for any unset variables.
    #[must_use]
    pub fn from_env() -> Self {
        let fuzzy_threshold = std::env::var("VRPDEDUP_FUZZY_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::DEFAULT_FUZZY_THRESHOLD);

        let fuzzy_enabled = std::env::var("VRPDEDUP_FUZZY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let ignore_case = std::env::var("VRPDEDUP_IGNORE_CASE")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Self {
            fuzzy_threshold,
            fuzzy_enabled,
            ignore_case,
            natural_key_fields: None,
        }
    }

    /// Resolves the natural-key field list for an entity type: the
    /// caller-supplied override when set, otherwise the fixed per-type
    /// defaults.
    #[must_use]
    pub fn natural_keys(&self, entity_type: EntityType) -> Vec<&str> {
        self.natural_key_fields.as_ref().map_or_else(
            || entity_type.natural_key_fields().to_vec(),
            |fields| fields.iter().map(String::as_str).collect(),
        )
    }

    /// Builder method to set the fuzzy threshold.
    #[must_use]
    pub const fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Builder method to enable or disable fuzzy matching.
    #[must_use]
    pub const fn with_fuzzy_enabled(mut self, enabled: bool) -> Self {
        self.fuzzy_enabled = enabled;
        self
    }

    /// Builder method to set case sensitivity.
    #[must_use]
    pub const fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Builder method to override the natural-key field list.
    #[must_use]
    pub fn with_natural_key_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.natural_key_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: Self::DEFAULT_FUZZY_THRESHOLD,
            fuzzy_enabled: true,
            ignore_case: true,
            natural_key_fields: None,
        }
    }
}
