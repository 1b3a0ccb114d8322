use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::{SearchEngine, SearchError};
use crate::models::{
    ErrorResponse, HealthResponse, RecordReviewRequest, RecordReviewResponse, Review,
    SearchParams, SearchRequest, SearchResponse, ServiceWithDistance,
};
use crate::services::{CatalogError, ServiceCatalog};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ServiceCatalog>,
    pub engine: SearchEngine,
}

/// Configure all service-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/services/search", web::post().to(search_services))
        .route("/services/categories", web::get().to(list_categories))
        .route("/reviews", web::post().to(record_review));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.catalog.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_failed(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

fn search_error_response(err: &SearchError) -> HttpResponse {
    if err.is_client_error() {
        HttpResponse::BadRequest().json(ErrorResponse {
            error: err.kind().to_string(),
            message: err.to_string(),
            status_code: 400,
        })
    } else {
        HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to load services".to_string(),
            message: err.to_string(),
            status_code: 500,
        })
    }
}

/// Search services endpoint
///
/// POST /api/v1/services/search
///
/// Request body:
/// ```json
/// {
///   "latitude": 40.7128,
///   "longitude": -74.0060,
///   "radius": 10,
///   "category": "electrician",
///   "minRating": 4.0,
///   "maxPrice": "75.00",
///   "sortBy": "distance|rating|price|reviews"
/// }
/// ```
async fn search_services(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return validation_failed(errors.to_string());
    }

    let query = req.to_query();

    tracing::info!(
        "Searching services around ({}, {}) within {} km",
        query.origin.latitude,
        query.origin.longitude,
        query.radius_km
    );

    let results = match state.engine.search(state.catalog.as_ref(), &query).await {
        Ok(results) => results,
        Err(e) => {
            if e.is_client_error() {
                tracing::info!("Rejected search request: {}", e);
            } else {
                tracing::error!("Search failed: {}", e);
            }
            return search_error_response(&e);
        }
    };

    let total_candidates = results.total_candidates;
    let nearby_services: Vec<ServiceWithDistance> = results
        .nearby
        .into_iter()
        .map(|r| ServiceWithDistance::from_result(r, true))
        .collect();
    let distant_services: Vec<ServiceWithDistance> = results
        .distant
        .into_iter()
        .map(|r| ServiceWithDistance::from_result(r, false))
        .collect();

    tracing::info!(
        "Returning {} nearby and {} distant services (from {} candidates)",
        nearby_services.len(),
        distant_services.len(),
        total_candidates
    );

    HttpResponse::Ok().json(SearchResponse {
        search_params: SearchParams {
            latitude: query.origin.latitude,
            longitude: query.origin.longitude,
            radius: query.radius_km,
            total_nearby: nearby_services.len(),
            total_distant: distant_services.len(),
            total_candidates,
        },
        nearby_services,
        distant_services,
    })
}

/// List active service categories
///
/// GET /api/v1/services/categories
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.list_categories().await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => {
            tracing::error!("Failed to list categories: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list categories".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Record a review and return the service's updated rating
///
/// POST /api/v1/reviews
///
/// Request body:
/// ```json
/// {
///   "serviceId": "uuid",
///   "rating": 5
/// }
/// ```
async fn record_review(
    state: web::Data<AppState>,
    req: web::Json<RecordReviewRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors.to_string());
    }

    let review = Review {
        id: Uuid::new_v4(),
        service_id: req.service_id,
        rating: req.rating,
        created_at: chrono::Utc::now(),
    };

    match state.catalog.record_review(review).await {
        Ok(service) => {
            tracing::info!(
                "Recorded review for service {} ({:.2} over {} reviews)",
                service.id,
                service.average_rating,
                service.total_reviews
            );
            HttpResponse::Ok().json(RecordReviewResponse::from(service))
        }
        Err(CatalogError::NotFound(message)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Service not found".to_string(),
            message,
            status_code: 404,
        }),
        Err(CatalogError::InvalidReview(message)) => validation_failed(message),
        Err(e) => {
            tracing::error!("Failed to record review for {}: {}", req.service_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record review".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
