use thiserror::Error;

use crate::services::CatalogError;

/// Errors raised by the search pipeline
///
/// Input errors are detected before any distance is computed. Catalog
/// failures pass through untouched.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid radius: {0} km")]
    InvalidRadius(f64),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl SearchError {
    /// Short machine-readable kind, used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::InvalidCoordinate { .. } => "invalid_coordinate",
            SearchError::InvalidRadius(_) => "invalid_radius",
            SearchError::InvalidFilter(_) => "invalid_filter",
            SearchError::Catalog(_) => "catalog_error",
        }
    }

    /// True for errors caused by caller input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SearchError::Catalog(_))
    }
}
