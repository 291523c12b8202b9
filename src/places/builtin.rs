//! Bundled demo data: landmarks around Bhubaneswar

use crate::geo::Coordinate;
use crate::types::{Category, Place};
use crate::Result;

const PLACES: &[(&str, &str, Category, f64, f64, &str, f32)] = &[
    (
        "lingaraj-temple",
        "Lingaraj Temple",
        Category::Temple,
        20.2376,
        85.8346,
        "11th century temple dedicated to Harihara",
        4.7,
    ),
    (
        "kiit-university",
        "KIIT University",
        Category::University,
        20.3499,
        85.8181,
        "Main university campus in Patia",
        4.4,
    ),
    (
        "master-canteen",
        "Master Canteen Square",
        Category::Landmark,
        20.2961,
        85.8245,
        "Central junction near the old bus stand",
        3.9,
    ),
    (
        "bhubaneswar-station",
        "Bhubaneswar Railway Station",
        Category::Transit,
        20.2647,
        85.8341,
        "Main railway station of the city",
        4.0,
    ),
    (
        "odisha-state-museum",
        "Odisha State Museum",
        Category::Museum,
        20.2572,
        85.8413,
        "Palm-leaf manuscripts, sculpture and natural history galleries",
        4.3,
    ),
    (
        "mukteshwar-temple",
        "Mukteshwar Temple",
        Category::Temple,
        20.2425,
        85.8388,
        "Sandstone temple known for its carved torana",
        4.6,
    ),
    (
        "udayagiri-caves",
        "Udayagiri and Khandagiri Caves",
        Category::Landmark,
        20.2630,
        85.7855,
        "Rock-cut Jain caves from the 2nd century BCE",
        4.5,
    ),
    (
        "ekamra-kanan",
        "Ekamra Kanan Botanical Gardens",
        Category::Park,
        20.3025,
        85.8213,
        "Botanical garden with a lake and rose garden",
        4.2,
    ),
    (
        "nandankanan",
        "Nandankanan Zoological Park",
        Category::Park,
        20.3956,
        85.8252,
        "Zoo and botanical garden north of the city",
        4.4,
    ),
    (
        "unit-1-market",
        "Unit-1 Market",
        Category::Market,
        20.2720,
        85.8380,
        "Daily market for produce and textiles",
        3.8,
    ),
    (
        "bpi-airport",
        "Biju Patnaik International Airport",
        Category::Transit,
        20.2444,
        85.8178,
        "City airport",
        4.1,
    ),
];

pub(super) fn places() -> Result<Vec<Place>> {
    PLACES
        .iter()
        .map(|&(id, name, category, lat, lon, description, rating)| {
            Ok(Place {
                id: id.to_string(),
                name: name.to_string(),
                category,
                coordinate: Coordinate::new(lat, lon)?,
                description: description.to_string(),
                rating,
            })
        })
        .collect()
}
