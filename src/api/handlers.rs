//! API handlers

use axum::{
    extract::{OriginalUri, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiJson, ApiQuery, AppState};
use crate::geo::{distance, Coordinate};
use crate::places::{NearbyPlace, PlaceCatalog, PlaceFilter};
use crate::routing::RouteEstimate;
use crate::types::{Category, Place, TravelMode};
use crate::{Error, Result};

/// Health check with system status
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        node_id: state.node_id().to_string(),
        places: state.catalog.len(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub node_id: String,
    pub places: usize,
}

/// List places, optionally filtered by `category` and `q`
pub async fn list_locations(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<PlaceFilter>,
) -> Json<Vec<Place>> {
    let places = state.catalog.search(&filter).into_iter().cloned().collect();
    Json(places)
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Place>> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::not_found(format!("place '{}'", id)))
}

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: Option<f64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub origin: Coordinate,
    pub radius_km: f64,
    pub results: Vec<NearbyPlace>,
}

/// Places around a coordinate, closest first
pub async fn nearby_locations(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<NearbyParams>,
) -> Result<Json<NearbyResponse>> {
    let origin = Coordinate::new(params.lat, params.lon)?;
    let radius_km = params.radius_km.unwrap_or(state.default_radius_km);
    let results = state.catalog.nearby(origin, radius_km, params.limit)?;

    Ok(Json(NearbyResponse {
        origin,
        radius_km,
        results,
    }))
}

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog.categories())
}

/// One end of a route: a known place or a bare coordinate
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Place { place_id: String },
    Point { lat: f64, lon: f64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub coordinate: Coordinate,
}

impl Endpoint {
    fn resolve(&self, catalog: &PlaceCatalog) -> Result<ResolvedEndpoint> {
        match self {
            Endpoint::Place { place_id } => {
                let place = catalog
                    .get(place_id)
                    .ok_or_else(|| Error::not_found(format!("place '{}'", place_id)))?;
                Ok(ResolvedEndpoint {
                    place_id: Some(place.id.clone()),
                    name: Some(place.name.clone()),
                    coordinate: place.coordinate,
                })
            }
            Endpoint::Point { lat, lon } => Ok(ResolvedEndpoint {
                place_id: None,
                name: None,
                coordinate: Coordinate::new(*lat, *lon)?,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub from: Endpoint,
    pub to: Endpoint,
    #[serde(default)]
    pub mode: TravelMode,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    #[serde(flatten)]
    pub route: RouteEstimate,
    pub from: ResolvedEndpoint,
    pub to: ResolvedEndpoint,
}

/// Fabricate a route between two endpoints
pub async fn create_route(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RouteRequest>,
) -> Result<Json<RouteResponse>> {
    let from = payload.from.resolve(&state.catalog)?;
    let to = payload.to.resolve(&state.catalog)?;

    let route = state
        .estimator
        .estimate(from.coordinate, to.coordinate, payload.mode);

    tracing::info!(
        route_id = %route.id,
        mode = ?route.mode,
        distance_km = route.distance_km,
        duration_minutes = route.duration_minutes,
        "Route created"
    );

    Ok(Json(RouteResponse { route, from, to }))
}

#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub from: Coordinate,
    pub to: Coordinate,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_km: f64,
}

/// Great-circle distance between two coordinates
pub async fn compute_distance(
    ApiJson(DistanceRequest { from, to }): ApiJson<DistanceRequest>,
) -> Json<DistanceResponse> {
    Json(DistanceResponse {
        from,
        to,
        distance_km: distance(from, to),
    })
}

/// JSON 404 for paths outside the API
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Error {
    Error::not_found(format!("no route for {}", uri.path()))
}
