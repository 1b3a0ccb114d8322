use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::{Coordinate, SearchFilters, SearchQuery, SortOrder};

/// Request to search for services around a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub category: Option<String>,
    #[serde(alias = "min_rating", rename = "minRating", default)]
    pub min_rating: Option<f64>,
    #[serde(alias = "max_price", rename = "maxPrice", default)]
    pub max_price: Option<Decimal>,
    #[serde(alias = "sort_by", rename = "sortBy", default)]
    pub sort_by: SortOrder,
}

fn default_radius() -> f64 {
    10.0
}

impl SearchRequest {
    /// Build the engine query; range checks happen in the engine
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery::new(Coordinate::new(self.latitude, self.longitude), self.radius)
            .with_filters(SearchFilters {
                category: self.category.clone(),
                min_rating: self.min_rating,
                max_price: self.max_price,
            })
            .sorted_by(self.sort_by)
    }
}

/// Request to record a review for a service
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordReviewRequest {
    #[serde(alias = "service_id", rename = "serviceId")]
    pub service_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
}
