use std::cmp::Ordering;

use crate::models::{SearchResult, SortOrder};

/// Results at or under this distance form the nearby group
pub const NEARBY_THRESHOLD_KM: f64 = 10.0;

/// Average urban travel speed used for travel time estimates
pub const AVERAGE_TRAVEL_SPEED_KMH: f64 = 30.0;

#[inline]
pub fn is_nearby(distance_km: f64) -> bool {
    distance_km <= NEARBY_THRESHOLD_KM
}

/// Whole minutes needed to cover `distance_km` at the average speed
///
/// Returns None for zero distance, where there is nothing to travel.
pub fn estimate_travel_minutes(distance_km: f64) -> Option<u32> {
    if distance_km <= 0.0 || !distance_km.is_finite() {
        return None;
    }

    let minutes = (distance_km * 60.0 / AVERAGE_TRAVEL_SPEED_KMH).trunc();
    Some(minutes as u32)
}

/// Round a distance to two decimals for display
#[inline]
pub fn round_distance(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}

/// Total order for results within one partition
///
/// `Distance` sorts by distance ascending, then rating descending. The other
/// orders lead with their own key and fall back to distance. Every order ends
/// on the service id so the output is deterministic.
pub fn compare_results(a: &SearchResult, b: &SearchResult, sort: SortOrder) -> Ordering {
    let by_distance = || a.distance_km.total_cmp(&b.distance_km);
    let by_rating = || {
        b.service
            .average_rating
            .total_cmp(&a.service.average_rating)
    };
    let by_id = || a.service.id.cmp(&b.service.id);

    match sort {
        SortOrder::Distance => by_distance().then_with(by_rating),
        SortOrder::Rating => by_rating().then_with(by_distance),
        SortOrder::Price => a
            .service
            .price_per_hour
            .cmp(&b.service.price_per_hour)
            .then_with(by_distance),
        SortOrder::Reviews => b
            .service
            .total_reviews
            .cmp(&a.service.total_reviews)
            .then_with(by_distance),
    }
    .then_with(by_id)
}
