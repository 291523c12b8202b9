//! API server state

use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::places::PlaceCatalog;
use crate::routing::RouteEstimator;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Read-only place registry
    pub catalog: Arc<PlaceCatalog>,

    /// Mock route generator
    pub estimator: Arc<RouteEstimator>,

    /// Radius used by `/api/locations/nearby` when none is given
    pub default_radius_km: f64,

    node_id: String,
}

impl AppState {
    pub fn new(
        catalog: Arc<PlaceCatalog>,
        estimator: Arc<RouteEstimator>,
        default_radius_km: f64,
        node_id: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            estimator,
            default_radius_km,
            node_id: node_id.into(),
        }
    }

    /// Build state from configuration
    pub fn from_config(config: &AppConfig, node_id: impl Into<String>) -> anyhow::Result<Self> {
        let catalog = config.place_catalog()?;
        let estimator = RouteEstimator::new(config.route_settings())
            .context("invalid routing configuration")?;

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(estimator),
            config.places.default_radius_km,
            node_id,
        ))
    }

    /// Get this node's ID
    pub fn node_id(&self) -> &str {
        &self.node_id
    }
}
