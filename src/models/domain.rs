use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both components are finite and inside their valid ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One service offered by one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderService {
    pub id: Uuid,
    #[serde(rename = "providerId")]
    pub provider_id: Uuid,
    #[serde(rename = "providerName")]
    pub provider_name: String,
    pub name: String,
    pub category: String,
    #[serde(rename = "pricePerHour")]
    pub price_per_hour: Decimal,
    pub location: Coordinate,
    #[serde(rename = "averageRating", default)]
    pub average_rating: f64,
    #[serde(rename = "totalReviews", default)]
    pub total_reviews: u32,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

impl ProviderService {
    /// Recompute the rating aggregate from every review rating of this service
    pub fn recompute_rating(&mut self, ratings: &[u8]) {
        if ratings.is_empty() {
            self.average_rating = 0.0;
            self.total_reviews = 0;
            return;
        }

        let sum: u32 = ratings.iter().map(|&r| r as u32).sum();
        self.average_rating = sum as f64 / ratings.len() as f64;
        self.total_reviews = ratings.len() as u32;
    }
}

fn default_true() -> bool { true }

/// Service category (plumbing, electrical, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

/// Customer review of a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    #[serde(rename = "serviceId")]
    pub service_id: Uuid,
    pub rating: u8,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Optional search filters, each independently nullable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub min_rating: Option<f64>,
    pub max_price: Option<Decimal>,
}

/// Ordering applied inside each partition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Distance,
    Rating,
    Price,
    Reviews,
}

/// Per-request search parameters, never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub origin: Coordinate,
    pub radius_km: f64,
    pub filters: SearchFilters,
    pub sort: SortOrder,
}

impl SearchQuery {
    pub fn new(origin: Coordinate, radius_km: f64) -> Self {
        Self {
            origin,
            radius_km,
            filters: SearchFilters::default(),
            sort: SortOrder::default(),
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// A candidate that survived filtering, with its distance from the customer
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub service: ProviderService,
    pub distance_km: f64,
    pub estimated_travel_minutes: Option<u32>,
}

/// Ranked results split into the nearby and distant groups
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub nearby: Vec<SearchResult>,
    pub distant: Vec<SearchResult>,
    pub total_candidates: usize,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.nearby.len() + self.distant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nearby.is_empty() && self.distant.is_empty()
    }

    /// Single ordered sequence, nearby group first
    pub fn into_ordered(self) -> Vec<SearchResult> {
        let mut ordered = self.nearby;
        ordered.extend(self.distant);
        ordered
    }
}
