//! Entity types for VRP datasets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of dataset a batch of records belongs to.
///
/// The entity type selects which natural-key fields and fuzzy-match
/// fields apply during duplicate detection. The per-type field lists are
/// fixed constants; callers can override the natural-key list through
/// [`DetectionConfig`](crate::DetectionConfig) without changing the
/// defaults.
///
/// Unrecognized type strings parse to [`EntityType::Unknown`], which
/// carries empty field lists: natural-key and fuzzy matching disable
/// themselves for forward-compatible entity types instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Fleet vehicles with capacity, profile, and start/end coordinates.
    #[default]
    Vehicles,
    /// Delivery/pickup jobs with a service location.
    Jobs,
    /// Named locations (depots, customer sites).
    Locations,
    /// Computed routes assigning jobs to vehicles.
    Routes,
    /// Any entity type this crate does not recognize.
    #[serde(other)]
    Unknown,
}

impl EntityType {
    /// Returns all recognized entity types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Vehicles, Self::Jobs, Self::Locations, Self::Routes]
    }

    /// Returns the string form of the entity type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::Jobs => "jobs",
            Self::Locations => "locations",
            Self::Routes => "routes",
            Self::Unknown => "unknown",
        }
    }

    /// Parses an entity type from a string, case-insensitively.
    ///
    /// Unrecognized strings yield [`Self::Unknown`] rather than an error,
    /// so detection stays available for entity types added later.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "vehicles" | "vehicle" => Self::Vehicles,
            "jobs" | "job" => Self::Jobs,
            "locations" | "location" => Self::Locations,
            "routes" | "route" => Self::Routes,
            _ => Self::Unknown,
        }
    }

    /// Returns the natural-key fields for this entity type.
    ///
    /// Exact equality of every listed field (after normalization) is
    /// treated as strong evidence that two records are the same
    /// real-world entity.
    #[must_use]
    pub const fn natural_key_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Vehicles => &["description"],
            Self::Jobs => &["description", "locationLat", "locationLon"],
            Self::Locations => &["name"],
            Self::Routes => &["vehicleId"],
            Self::Unknown => &[],
        }
    }

    /// Returns the fields compared during fuzzy matching.
    #[must_use]
    pub const fn fuzzy_match_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Vehicles => &["description", "profile", "startLat", "startLon"],
            Self::Jobs => &["description", "locationLat", "locationLon", "priority"],
            Self::Locations => &["name", "address", "locationLat", "locationLon"],
            Self::Routes => &["vehicleId", "cost", "distance", "duration"],
            Self::Unknown => &[],
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
