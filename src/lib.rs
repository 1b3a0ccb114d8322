//! Service Finder - geolocation search for the local services marketplace
//!
//! Customers send a location, a radius and optional filters; the engine
//! measures every candidate service with the Haversine formula and returns
//! the survivors split into nearby and distant groups.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, SearchEngine, SearchError, NEARBY_THRESHOLD_KM};
pub use crate::models::{Coordinate, ProviderService, SearchFilters, SearchQuery, SearchResult, SearchResults, SortOrder};
pub use crate::services::{InMemoryCatalog, ServiceCatalog};
