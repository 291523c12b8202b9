//! Immutable registry of points of interest
//!
//! The catalog is built once at startup and shared read-only between
//! request handlers behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::geo::Coordinate;
use crate::types::{Category, Place};
use crate::{Error, Result};

mod builtin;

/// Search criteria for [`PlaceCatalog::search`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceFilter {
    pub category: Option<Category>,
    /// Case-insensitive substring matched against name and description
    #[serde(rename = "q")]
    pub query: Option<String>,
}

/// A place together with its distance from a search origin
#[derive(Debug, Clone, Serialize)]
pub struct NearbyPlace {
    #[serde(flatten)]
    pub place: Place,
    pub distance_km: f64,
}

#[derive(Debug, Clone)]
pub struct PlaceCatalog {
    places: Vec<Place>,
    index: HashMap<String, usize>,
}

impl PlaceCatalog {
    /// Build a catalog, validating ids and ratings
    pub fn new(places: Vec<Place>) -> Result<Self> {
        let mut index = HashMap::with_capacity(places.len());

        for (pos, place) in places.iter().enumerate() {
            if place.id.trim().is_empty() {
                return Err(Error::invalid_argument(format!(
                    "place at position {} has an empty id",
                    pos
                )));
            }
            if !(0.0..=5.0).contains(&place.rating) {
                return Err(Error::invalid_argument(format!(
                    "place '{}' has rating {} outside 0-5",
                    place.id, place.rating
                )));
            }
            if index.insert(place.id.clone(), pos).is_some() {
                return Err(Error::invalid_argument(format!(
                    "duplicate place id '{}'",
                    place.id
                )));
            }
        }

        Ok(Self { places, index })
    }

    /// The bundled demo data set
    pub fn builtin() -> Result<Self> {
        Self::new(builtin::places()?)
    }

    /// Load places from a JSON array on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let places: Vec<Place> = serde_json::from_slice(&data)?;
        tracing::info!(path = %path.display(), count = places.len(), "Loaded places from file");
        Self::new(places)
    }

    pub fn get(&self, id: &str) -> Option<&Place> {
        self.index.get(id).map(|&pos| &self.places[pos])
    }

    pub fn all(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Categories present in the catalog, sorted
    pub fn categories(&self) -> Vec<Category> {
        self.places
            .iter()
            .map(|p| p.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Places matching every criterion set in `filter`, in catalog order
    pub fn search(&self, filter: &PlaceFilter) -> Vec<&Place> {
        let needle = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        self.places
            .iter()
            .filter(|p| filter.category.map_or(true, |c| p.category == c))
            .filter(|p| match &needle {
                Some(q) => {
                    p.name.to_lowercase().contains(q) || p.description.to_lowercase().contains(q)
                }
                None => true,
            })
            .collect()
    }

    /// Places within `radius_km` of `origin`, closest first
    pub fn nearby(
        &self,
        origin: Coordinate,
        radius_km: f64,
        limit: Option<usize>,
    ) -> Result<Vec<NearbyPlace>> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(Error::invalid_argument(format!(
                "radius_km must be a non-negative number, got {}",
                radius_km
            )));
        }

        let mut hits: Vec<NearbyPlace> = self
            .places
            .iter()
            .filter_map(|place| {
                let d = origin.distance_to(&place.coordinate);
                (d <= radius_km).then(|| NearbyPlace {
                    place: place.clone(),
                    distance_km: d,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        if let Some(limit) = limit {
            hits.truncate(limit);
        }

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, category: Category, lat: f64, lon: f64) -> Place {
        Place {
            id: id.to_string(),
            name: id.replace('-', " "),
            category,
            coordinate: Coordinate::new(lat, lon).unwrap(),
            description: String::new(),
            rating: 4.0,
        }
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = PlaceCatalog::new(vec![
            place("a", Category::Park, 0.0, 0.0),
            place("a", Category::Museum, 1.0, 1.0),
        ]);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_bad_rating() {
        let mut p = place("a", Category::Park, 0.0, 0.0);
        p.rating = 7.5;
        assert!(PlaceCatalog::new(vec![p]).is_err());
    }

    #[test]
    fn test_search_by_category_and_text() {
        let catalog = PlaceCatalog::new(vec![
            place("old-temple", Category::Temple, 20.0, 85.0),
            place("city-park", Category::Park, 20.1, 85.1),
            place("temple-garden", Category::Park, 20.2, 85.2),
        ])
        .unwrap();

        let parks = catalog.search(&PlaceFilter {
            category: Some(Category::Park),
            query: None,
        });
        assert_eq!(parks.len(), 2);

        let temple_parks = catalog.search(&PlaceFilter {
            category: Some(Category::Park),
            query: Some("TEMPLE".to_string()),
        });
        assert_eq!(temple_parks.len(), 1);
        assert_eq!(temple_parks[0].id, "temple-garden");

        let blank = catalog.search(&PlaceFilter {
            category: None,
            query: Some("   ".to_string()),
        });
        assert_eq!(blank.len(), 3);
    }

    #[test]
    fn test_nearby_sorted_and_limited() {
        let catalog = PlaceCatalog::new(vec![
            place("far", Category::Landmark, 21.0, 85.0),
            place("near", Category::Landmark, 20.01, 85.0),
            place("mid", Category::Landmark, 20.1, 85.0),
        ])
        .unwrap();
        let origin = Coordinate::new(20.0, 85.0).unwrap();

        let hits = catalog.nearby(origin, 50.0, None).unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.place.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid"]);

        let limited = catalog.nearby(origin, 500.0, Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].place.id, "near");

        assert!(catalog.nearby(origin, -1.0, None).is_err());
        assert!(catalog.nearby(origin, f64::NAN, None).is_err());
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = PlaceCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.all().len(), catalog.len());
        assert!(catalog.get("lingaraj-temple").is_some());
        assert!(catalog.categories().contains(&Category::University));
    }
}
