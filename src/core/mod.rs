// Core algorithm exports
pub mod distance;
pub mod error;
pub mod filters;
pub mod ranking;
pub mod search;

pub use distance::{haversine_distance, validate_coordinate, EARTH_RADIUS_KM};
pub use error::SearchError;
pub use filters::{matches_filters, validate_filters};
pub use ranking::{compare_results, estimate_travel_minutes, NEARBY_THRESHOLD_KM};
pub use search::SearchEngine;
