//! Mock route estimation
//!
//! There is no road graph behind this module. A route's length is the
//! great-circle distance stretched by a random detour factor, and its
//! duration follows from the average speed of the travel mode.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;
use uuid::Uuid;

use crate::geo::{distance, Coordinate};
use crate::types::TravelMode;
use crate::{Error, Result};

/// Estimator settings
#[derive(Debug, Clone)]
pub struct RouteSettings {
    pub min_detour: f64,
    pub max_detour: f64,
    pub walking_kmh: f64,
    pub cycling_kmh: f64,
    pub driving_kmh: f64,
    /// Fixed RNG seed for reproducible estimates
    pub seed: Option<u64>,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            min_detour: 1.1,
            max_detour: 1.6,
            walking_kmh: 5.0,
            cycling_kmh: 15.0,
            driving_kmh: 30.0,
            seed: None,
        }
    }
}

impl RouteSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.min_detour.is_finite() || self.min_detour < 1.0 {
            return Err(Error::invalid_argument(format!(
                "min_detour must be at least 1.0, got {}",
                self.min_detour
            )));
        }
        if !self.max_detour.is_finite() || self.max_detour < self.min_detour {
            return Err(Error::invalid_argument(format!(
                "max_detour ({}) must not be below min_detour ({})",
                self.max_detour, self.min_detour
            )));
        }
        for (mode, speed) in [
            ("walking", self.walking_kmh),
            ("cycling", self.cycling_kmh),
            ("driving", self.driving_kmh),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(Error::invalid_argument(format!(
                    "{} speed must be positive, got {}",
                    mode, speed
                )));
            }
        }
        Ok(())
    }

    pub fn speed_kmh(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Walking => self.walking_kmh,
            TravelMode::Cycling => self.cycling_kmh,
            TravelMode::Driving => self.driving_kmh,
        }
    }
}

/// A fabricated route between two coordinates
#[derive(Debug, Clone, Serialize)]
pub struct RouteEstimate {
    pub id: Uuid,
    pub mode: TravelMode,
    pub straight_line_km: f64,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub created_at: DateTime<Utc>,
}

pub struct RouteEstimator {
    settings: RouteSettings,
    rng: Mutex<fastrand::Rng>,
}

impl RouteEstimator {
    pub fn new(settings: RouteSettings) -> Result<Self> {
        settings.validate()?;

        let rng = match settings.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        Ok(Self {
            settings,
            rng: Mutex::new(rng),
        })
    }

    pub fn estimate(&self, from: Coordinate, to: Coordinate, mode: TravelMode) -> RouteEstimate {
        let straight_line_km = distance(from, to);
        let detour = self.detour_factor();
        let distance_km = straight_line_km * detour;
        let duration_minutes = distance_km / self.settings.speed_kmh(mode) * 60.0;

        tracing::debug!(
            straight_line_km,
            detour,
            distance_km,
            ?mode,
            "Estimated route"
        );

        RouteEstimate {
            id: Uuid::new_v4(),
            mode,
            straight_line_km,
            distance_km,
            duration_minutes,
            created_at: Utc::now(),
        }
    }

    fn detour_factor(&self) -> f64 {
        let span = self.settings.max_detour - self.settings.min_detour;
        let sample = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.f64()
        };
        self.settings.min_detour + span * sample
    }
}
