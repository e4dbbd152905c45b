//! Address records
//!
//! `Address` is the stored row; `AddressInput` is what callers submit to
//! create or overwrite one.

use crate::coord::{Coordinates, Located};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A stored address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    /// Identity assigned by the database
    pub id: i64,
    /// Optional display name
    pub name: Option<String>,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl Address {
    /// Position of this address
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

impl Located for Address {
    fn coordinates(&self) -> Coordinates {
        self.coords()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.name.as_deref().unwrap_or("(unnamed)");
        write!(f, "#{} {} ({:.6}, {:.6})", self.id, name, self.lat, self.lon)
    }
}

/// Fields submitted when creating or updating an address
///
/// `loc_lat` and `loc_lon` are accepted as aliases of `lat` and `lon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(alias = "loc_lat")]
    pub lat: f64,
    #[serde(alias = "loc_lon")]
    pub lon: f64,
}

impl AddressInput {
    /// Create a new input
    pub fn new(name: Option<String>, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    /// Position being submitted
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    /// Reject coordinates outside the valid latitude/longitude ranges
    pub fn validate(&self) -> Result<()> {
        self.coords().validate()
    }
}
