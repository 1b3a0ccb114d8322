use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::ranking::round_distance;
use crate::models::domain::{ProviderService, SearchResult};

/// Service entry in a search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceWithDistance {
    pub id: Uuid,
    #[serde(rename = "providerId")]
    pub provider_id: Uuid,
    #[serde(rename = "providerName")]
    pub provider_name: String,
    pub name: String,
    pub category: String,
    #[serde(rename = "pricePerHour")]
    pub price_per_hour: Decimal,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "totalReviews")]
    pub total_reviews: u32,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "estimatedTravelMinutes")]
    pub estimated_travel_minutes: Option<u32>,
    #[serde(rename = "isNearby")]
    pub is_nearby: bool,
}

impl ServiceWithDistance {
    pub fn from_result(result: SearchResult, is_nearby: bool) -> Self {
        let SearchResult { service, distance_km, estimated_travel_minutes } = result;

        Self {
            id: service.id,
            provider_id: service.provider_id,
            provider_name: service.provider_name,
            name: service.name,
            category: service.category,
            price_per_hour: service.price_per_hour,
            latitude: service.location.latitude,
            longitude: service.location.longitude,
            average_rating: service.average_rating,
            total_reviews: service.total_reviews,
            distance_km: round_distance(distance_km),
            estimated_travel_minutes,
            is_nearby,
        }
    }
}

/// Echo of the search parameters with group totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    #[serde(rename = "totalNearby")]
    pub total_nearby: usize,
    #[serde(rename = "totalDistant")]
    pub total_distant: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "nearbyServices")]
    pub nearby_services: Vec<ServiceWithDistance>,
    #[serde(rename = "distantServices")]
    pub distant_services: Vec<ServiceWithDistance>,
    #[serde(rename = "searchParams")]
    pub search_params: SearchParams,
}

/// Rating aggregate after a review was recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordReviewResponse {
    pub success: bool,
    #[serde(rename = "serviceId")]
    pub service_id: Uuid,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "totalReviews")]
    pub total_reviews: u32,
}

impl From<ProviderService> for RecordReviewResponse {
    fn from(service: ProviderService) -> Self {
        Self {
            success: true,
            service_id: service.id,
            average_rating: service.average_rating,
            total_reviews: service.total_reviews,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
