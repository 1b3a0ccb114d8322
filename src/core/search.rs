use crate::core::{
    distance::{haversine_unchecked, validate_coordinate},
    error::SearchError,
    filters::{matches_filters, validate_filters},
    ranking::{compare_results, estimate_travel_minutes, is_nearby},
};
use crate::models::{ProviderService, SearchQuery, SearchResult, SearchResults};
use crate::services::ServiceCatalog;

/// Default upper bound on the search radius
pub const DEFAULT_MAX_RADIUS_KM: f64 = 50.0;

/// Search orchestrator - implements the filter, score and partition pipeline
///
/// # Pipeline Stages
/// 1. Query validation (coordinate, radius, filters)
/// 2. Attribute filtering (active, category, price, rating)
/// 3. Distance computation and radius cut-off
/// 4. Nearby/distant partition and per-group ordering
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine {
    max_radius_km: f64,
}

impl SearchEngine {
    pub fn new(max_radius_km: f64) -> Self {
        Self { max_radius_km }
    }

    pub fn max_radius_km(&self) -> f64 {
        self.max_radius_km
    }

    /// Validate a query without touching any candidate data
    pub fn validate(&self, query: &SearchQuery) -> Result<(), SearchError> {
        validate_coordinate(&query.origin)?;

        let radius = query.radius_km;
        if !radius.is_finite() || radius <= 0.0 || radius > self.max_radius_km {
            return Err(SearchError::InvalidRadius(radius));
        }

        validate_filters(&query.filters)
    }

    /// Search the catalog around the query origin
    ///
    /// The query is validated before the catalog is consulted. Catalog
    /// errors are returned unchanged.
    pub async fn search(
        &self,
        catalog: &dyn ServiceCatalog,
        query: &SearchQuery,
    ) -> Result<SearchResults, SearchError> {
        self.validate(query)?;

        let candidates = catalog
            .list_active_services(query.filters.category.as_deref())
            .await?;

        tracing::debug!(
            "Ranking {} candidates around ({}, {}) within {} km",
            candidates.len(),
            query.origin.latitude,
            query.origin.longitude,
            query.radius_km
        );

        self.rank(query, candidates)
    }

    /// Filter, measure, partition and sort a candidate snapshot
    ///
    /// # Arguments
    /// * `query` - The customer's search parameters
    /// * `candidates` - Point-in-time view of the catalog
    ///
    /// # Returns
    /// SearchResults with the nearby and distant groups in display order
    pub fn rank(
        &self,
        query: &SearchQuery,
        candidates: Vec<ProviderService>,
    ) -> Result<SearchResults, SearchError> {
        self.validate(query)?;

        let total_candidates = candidates.len();
        let mut nearby = Vec::new();
        let mut distant = Vec::new();

        for service in candidates {
            // Stage 2: attribute filters
            if !matches_filters(&service, &query.filters) {
                continue;
            }

            // Stage 3: distance and radius
            if !service.location.is_valid() {
                tracing::warn!(
                    "Skipping service {} with invalid location ({}, {})",
                    service.id,
                    service.location.latitude,
                    service.location.longitude
                );
                continue;
            }

            let distance_km = if service.location == query.origin {
                0.0
            } else {
                haversine_unchecked(&query.origin, &service.location)
            };

            if distance_km > query.radius_km {
                continue;
            }

            let result = SearchResult {
                service,
                distance_km,
                estimated_travel_minutes: estimate_travel_minutes(distance_km),
            };

            // Stage 4: partition
            if is_nearby(distance_km) {
                nearby.push(result);
            } else {
                distant.push(result);
            }
        }

        nearby.sort_by(|a, b| compare_results(a, b, query.sort));
        distant.sort_by(|a, b| compare_results(a, b, query.sort));

        Ok(SearchResults {
            nearby,
            distant,
            total_candidates,
        })
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RADIUS_KM)
    }
}
