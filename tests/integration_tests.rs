// Integration tests for Service Finder

use async_trait::async_trait;
use rust_decimal::Decimal;
use service_finder::core::{SearchEngine, SearchError, NEARBY_THRESHOLD_KM};
use service_finder::models::{
    Coordinate, ProviderService, Review, SearchFilters, SearchQuery, ServiceCategory,
};
use service_finder::services::{CatalogError, InMemoryCatalog, ServiceCatalog};
use uuid::Uuid;

/// Kilometers per degree along a meridian for the 6371 km sphere
const KM_PER_DEGREE: f64 = 6371.0 * std::f64::consts::PI / 180.0;

fn create_test_service(id: u128, north_km: f64, rating: f64, category: &str) -> ProviderService {
    ProviderService {
        id: Uuid::from_u128(id),
        provider_id: Uuid::from_u128(1_000 + id),
        provider_name: format!("Provider {}", id),
        name: format!("Service {}", id),
        category: category.to_string(),
        price_per_hour: Decimal::new(50 + id as i64, 0),
        location: Coordinate::new(north_km / KM_PER_DEGREE, 0.0),
        average_rating: rating,
        total_reviews: 4,
        is_active: true,
    }
}

fn origin_query(radius_km: f64) -> SearchQuery {
    SearchQuery::new(Coordinate::new(0.0, 0.0), radius_km)
}

/// Catalog whose backing store is always down
struct UnavailableCatalog;

#[async_trait]
impl ServiceCatalog for UnavailableCatalog {
    async fn list_active_services(
        &self,
        _category_hint: Option<&str>,
    ) -> Result<Vec<ProviderService>, CatalogError> {
        Err(CatalogError::NotFound("store unavailable".to_string()))
    }

    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, CatalogError> {
        Err(CatalogError::NotFound("store unavailable".to_string()))
    }

    async fn record_review(&self, _review: Review) -> Result<ProviderService, CatalogError> {
        Err(CatalogError::NotFound("store unavailable".to_string()))
    }

    async fn health_check(&self) -> Result<bool, CatalogError> {
        Ok(false)
    }
}

/// Catalog that ignores the category hint entirely
struct HintIgnoringCatalog(Vec<ProviderService>);

#[async_trait]
impl ServiceCatalog for HintIgnoringCatalog {
    async fn list_active_services(
        &self,
        _category_hint: Option<&str>,
    ) -> Result<Vec<ProviderService>, CatalogError> {
        Ok(self.0.clone())
    }

    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, CatalogError> {
        Ok(vec![])
    }

    async fn record_review(&self, review: Review) -> Result<ProviderService, CatalogError> {
        Err(CatalogError::NotFound(review.service_id.to_string()))
    }

    async fn health_check(&self) -> Result<bool, CatalogError> {
        Ok(true)
    }
}

#[tokio::test]
async fn test_integration_nearby_distant_scenario() {
    // A sits just inside the 10 km threshold, B at 5 km, C at 15 km
    let catalog = InMemoryCatalog::new(
        vec![
            create_test_service(1, 9.999, 4.5, "plumber"),
            create_test_service(2, 5.0, 4.0, "plumber"),
            create_test_service(3, 15.0, 5.0, "plumber"),
        ],
        vec![],
    );

    let results = SearchEngine::default()
        .search(&catalog, &origin_query(20.0))
        .await
        .unwrap();

    let nearby: Vec<_> = results.nearby.iter().map(|r| r.service.id).collect();
    let distant: Vec<_> = results.distant.iter().map(|r| r.service.id).collect();

    assert_eq!(nearby, vec![Uuid::from_u128(2), Uuid::from_u128(1)]);
    assert_eq!(distant, vec![Uuid::from_u128(3)]);

    let ordered: Vec<_> = results.into_ordered().iter().map(|r| r.service.id).collect();
    assert_eq!(ordered, vec![Uuid::from_u128(2), Uuid::from_u128(1), Uuid::from_u128(3)]);
}

#[tokio::test]
async fn test_equal_distance_prefers_higher_rating() {
    // Same spot, so the distances are bit-for-bit identical
    let low = create_test_service(1, 8.0, 4.0, "plumber");
    let high = create_test_service(2, 8.0, 4.8, "plumber");

    let catalog = InMemoryCatalog::new(vec![low, high], vec![]);
    let results = SearchEngine::default()
        .search(&catalog, &origin_query(20.0))
        .await
        .unwrap();

    assert_eq!(results.nearby.len(), 2);
    assert_eq!(results.nearby[0].service.id, Uuid::from_u128(2));
    assert_eq!(results.nearby[1].service.id, Uuid::from_u128(1));
}

#[tokio::test]
async fn test_category_filter_reapplied_when_hint_ignored() {
    let catalog = HintIgnoringCatalog(vec![
        create_test_service(1, 1.0, 4.0, "plumber"),
        create_test_service(2, 12.0, 4.0, "electrician"),
        create_test_service(3, 0.5, 5.0, "cleaner"),
    ]);

    let query = origin_query(20.0).with_filters(SearchFilters {
        category: Some("electrician".to_string()),
        ..Default::default()
    });

    let results = SearchEngine::default().search(&catalog, &query).await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results.nearby.is_empty());
    assert_eq!(results.distant[0].service.category, "electrician");
}

#[tokio::test]
async fn test_empty_catalog_is_not_an_error() {
    let catalog = InMemoryCatalog::default();

    let results = SearchEngine::default()
        .search(&catalog, &origin_query(10.0))
        .await
        .unwrap();

    assert!(results.is_empty());
    assert!(results.into_ordered().is_empty());
}

#[tokio::test]
async fn test_invalid_radius_before_catalog_access() {
    // The unavailable catalog proves validation runs first
    for radius in [0.0, -1.0] {
        let result = SearchEngine::default()
            .search(&UnavailableCatalog, &origin_query(radius))
            .await;
        assert!(matches!(result, Err(SearchError::InvalidRadius(_))));
    }
}

#[tokio::test]
async fn test_invalid_query_coordinate() {
    let query = SearchQuery::new(Coordinate::new(200.0, 0.0), 10.0);
    let result = SearchEngine::default().search(&UnavailableCatalog, &query).await;

    assert!(matches!(result, Err(SearchError::InvalidCoordinate { .. })));
}

#[tokio::test]
async fn test_catalog_failure_propagates() {
    let result = SearchEngine::default()
        .search(&UnavailableCatalog, &origin_query(10.0))
        .await;

    match result {
        Err(SearchError::Catalog(CatalogError::NotFound(message))) => {
            assert_eq!(message, "store unavailable");
        }
        other => panic!("Expected catalog error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_result_invariants_over_scattered_candidates() {
    let origin = Coordinate::new(48.8566, 2.3522); // Paris
    let candidates: Vec<ProviderService> = (0..200u128)
        .map(|i| {
            let mut service = create_test_service(i, 0.0, (i % 6) as f64 * 0.9, "plumber");
            let angle = i as f64 * 0.37;
            let reach = (i % 40) as f64 * 0.01;
            service.location = Coordinate::new(
                origin.latitude + reach * angle.sin(),
                origin.longitude + reach * angle.cos(),
            );
            service.is_active = i % 17 != 0;
            service
        })
        .collect();

    let catalog = InMemoryCatalog::new(candidates, vec![]);
    let radius = 25.0;
    let query = SearchQuery::new(origin, radius);

    let results = SearchEngine::default().search(&catalog, &query).await.unwrap();
    assert!(!results.nearby.is_empty());
    assert!(!results.distant.is_empty());

    for r in &results.nearby {
        assert!(r.distance_km <= NEARBY_THRESHOLD_KM);
        assert!(r.service.is_active);
    }
    for r in &results.distant {
        assert!(r.distance_km > NEARBY_THRESHOLD_KM);
        assert!(r.distance_km <= radius);
    }
    for group in [&results.nearby, &results.distant] {
        for pair in group.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    // Distances are exactly what the calculator reports for the same points
    for r in results.nearby.iter().chain(results.distant.iter()) {
        let expected = service_finder::haversine_distance(&origin, &r.service.location).unwrap();
        assert_eq!(r.distance_km, expected);
    }
}

#[tokio::test]
async fn test_review_feeds_rating_filter() {
    let catalog = InMemoryCatalog::new(vec![create_test_service(1, 2.0, 0.0, "plumber")], vec![]);
    let query = origin_query(10.0).with_filters(SearchFilters {
        min_rating: Some(4.0),
        ..Default::default()
    });

    let engine = SearchEngine::default();
    assert!(engine.search(&catalog, &query).await.unwrap().is_empty());

    catalog
        .record_review(Review {
            id: Uuid::new_v4(),
            service_id: Uuid::from_u128(1),
            rating: 5,
            created_at: chrono::Utc::now(),
        })
        .await
        .unwrap();

    let results = engine.search(&catalog, &query).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results.nearby[0].service.average_rating, 5.0);
}
