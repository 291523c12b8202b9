use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::places::PlaceCatalog;
use crate::routing::RouteSettings;

const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024; // 64 KiB

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsSection,
    pub logging: LoggingSection,
    pub places: PlacesSection,
    pub routing: RoutingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    ///
    /// The file path comes from `CITYNAV_CONFIG` (default `config.toml`).
    pub fn load() -> Result<Self> {
        let config_path = env::var("CITYNAV_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Some(Path::new(&config_path)))
    }

    /// Load configuration from an explicit file (if it exists) and environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                builder = builder.add_source(config::File::from(PathBuf::from(path)));
            }
        }

        // CITYNAV_SERVER__PORT=8080 -> server.port
        builder = builder.add_source(
            config::Environment::with_prefix("CITYNAV")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        config.validate()?;

        Ok(config)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.body_limit_bytes == 0 {
            bail!("server.body_limit_bytes must be greater than zero");
        }

        let radius = self.places.default_radius_km;
        if !radius.is_finite() || radius <= 0.0 {
            bail!("places.default_radius_km must be positive, got {}", radius);
        }

        self.route_settings()
            .validate()
            .context("invalid routing configuration")?;

        Ok(())
    }

    /// Resolve estimator settings from the routing section.
    pub fn route_settings(&self) -> RouteSettings {
        let r = &self.routing;
        RouteSettings {
            min_detour: r.min_detour,
            max_detour: r.max_detour,
            walking_kmh: r.walking_kmh,
            cycling_kmh: r.cycling_kmh,
            driving_kmh: r.driving_kmh,
            seed: r.seed,
        }
    }

    /// Build the place catalog from the configured data file or the bundled set.
    pub fn place_catalog(&self) -> Result<PlaceCatalog> {
        match &self.places.data_path {
            Some(path) if !path.trim().is_empty() => PlaceCatalog::from_json_file(path.trim())
                .with_context(|| format!("failed to load places from {}", path)),
            _ => PlaceCatalog::builtin().context("bundled place data is invalid"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub node_id: Option<String>,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            node_id: None,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSection {
    /// `*` or a comma-separated list of origins
    pub allowed_origins: String,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlacesSection {
    /// JSON file replacing the bundled places
    pub data_path: Option<String>,
    pub default_radius_km: f64,
}

impl Default for PlacesSection {
    fn default() -> Self {
        Self {
            data_path: None,
            default_radius_km: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingSection {
    pub min_detour: f64,
    pub max_detour: f64,
    pub walking_kmh: f64,
    pub cycling_kmh: f64,
    pub driving_kmh: f64,
    pub seed: Option<u64>,
}

impl Default for RoutingSection {
    fn default() -> Self {
        let defaults = RouteSettings::default();
        Self {
            min_detour: defaults.min_detour,
            max_detour: defaults.max_detour,
            walking_kmh: defaults.walking_kmh,
            cycling_kmh: defaults.cycling_kmh,
            driving_kmh: defaults.driving_kmh,
            seed: defaults.seed,
        }
    }
}
