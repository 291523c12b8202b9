//! citynav - points of interest and mock routes for a city navigation demo
//!
//! The crate provides:
//! - Great-circle distance over validated coordinates (haversine)
//! - An immutable registry of points of interest with search and proximity queries
//! - Mock route estimation derived from straight-line distance
//! - A small HTTP API with CORS, request tracing and body limits
//! - A deployment health checker for a running server

pub mod api;
pub mod check;
pub mod config;
pub mod error;
pub mod geo;
pub mod places;
pub mod routing;
pub mod types;

pub use error::{Error, Result};
