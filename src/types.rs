//! Core types for citynav

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::Coordinate;

/// Place identifier (URL-safe slug)
pub type PlaceId = String;

/// Point-of-interest category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Temple,
    Museum,
    Park,
    University,
    Transit,
    Market,
    Landmark,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Temple => "temple",
            Category::Museum => "museum",
            Category::Park => "park",
            Category::University => "university",
            Category::Transit => "transit",
            Category::Market => "market",
            Category::Landmark => "landmark",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub category: Category,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
}

/// How a route is travelled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Cycling,
    #[default]
    Driving,
}
