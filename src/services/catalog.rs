use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{ProviderService, Review, ServiceCategory};

/// Errors that can occur when reading or updating the service catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid review: {0}")]
    InvalidReview(String),
}

/// Source of provider services for the search engine
///
/// Implementations may narrow `list_active_services` by the category hint,
/// but callers must not rely on it.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// All active services, optionally narrowed to a category
    async fn list_active_services(
        &self,
        category_hint: Option<&str>,
    ) -> Result<Vec<ProviderService>, CatalogError>;

    /// Active service categories ordered by name
    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, CatalogError>;

    /// Store a review and return the service with its recomputed rating
    async fn record_review(&self, review: Review) -> Result<ProviderService, CatalogError>;

    /// Health check for the backing store
    async fn health_check(&self) -> Result<bool, CatalogError>;
}

pub(crate) fn check_review_rating(rating: u8) -> Result<(), CatalogError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(CatalogError::InvalidReview(format!(
            "rating must be between 1 and 5, got {}",
            rating
        )))
    }
}

#[derive(Debug, Default)]
struct CatalogData {
    services: Vec<ProviderService>,
    categories: Vec<ServiceCategory>,
    reviews: Vec<Review>,
}

/// In-memory catalog for local development and tests
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    data: RwLock<CatalogData>,
}

impl InMemoryCatalog {
    pub fn new(services: Vec<ProviderService>, categories: Vec<ServiceCategory>) -> Self {
        Self {
            data: RwLock::new(CatalogData {
                services,
                categories,
                reviews: Vec::new(),
            }),
        }
    }

    pub async fn insert_service(&self, service: ProviderService) {
        self.data.write().await.services.push(service);
    }

    pub async fn get_service(&self, id: Uuid) -> Option<ProviderService> {
        self.data
            .read()
            .await
            .services
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryCatalog {
    async fn list_active_services(
        &self,
        category_hint: Option<&str>,
    ) -> Result<Vec<ProviderService>, CatalogError> {
        let data = self.data.read().await;

        Ok(data
            .services
            .iter()
            .filter(|s| s.is_active)
            .filter(|s| category_hint.map_or(true, |c| s.category == c))
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, CatalogError> {
        let data = self.data.read().await;

        let mut categories: Vec<ServiceCategory> = data
            .categories
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(categories)
    }

    async fn record_review(&self, review: Review) -> Result<ProviderService, CatalogError> {
        check_review_rating(review.rating)?;

        let mut data = self.data.write().await;
        let service_id = review.service_id;

        if !data.services.iter().any(|s| s.id == service_id) {
            return Err(CatalogError::NotFound(format!("Service {} not found", service_id)));
        }

        data.reviews.push(review);
        let ratings: Vec<u8> = data
            .reviews
            .iter()
            .filter(|r| r.service_id == service_id)
            .map(|r| r.rating)
            .collect();

        let service = data
            .services
            .iter_mut()
            .find(|s| s.id == service_id)
            .ok_or_else(|| CatalogError::NotFound(format!("Service {} not found", service_id)))?;
        service.recompute_rating(&ratings);

        tracing::debug!(
            "Service {} rating is now {:.2} over {} reviews",
            service_id,
            service.average_rating,
            service.total_reviews
        );

        Ok(service.clone())
    }

    async fn health_check(&self) -> Result<bool, CatalogError> {
        Ok(true)
    }
}
