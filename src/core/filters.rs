use rust_decimal::Decimal;

use crate::core::error::SearchError;
use crate::models::{ProviderService, SearchFilters};

/// Highest average rating a service can carry
pub const MAX_RATING: f64 = 5.0;

/// Reject malformed filter values before the pipeline runs
pub fn validate_filters(filters: &SearchFilters) -> Result<(), SearchError> {
    if let Some(category) = &filters.category {
        if category.trim().is_empty() {
            return Err(SearchError::InvalidFilter("category must not be empty".into()));
        }
    }

    if let Some(min_rating) = filters.min_rating {
        if !min_rating.is_finite() || !(0.0..=MAX_RATING).contains(&min_rating) {
            return Err(SearchError::InvalidFilter(format!(
                "min rating must be between 0 and {}, got {}",
                MAX_RATING, min_rating
            )));
        }
    }

    if let Some(max_price) = filters.max_price {
        if max_price < Decimal::ZERO {
            return Err(SearchError::InvalidFilter(format!(
                "max price must not be negative, got {}",
                max_price
            )));
        }
    }

    Ok(())
}

/// Check whether a candidate passes the attribute filters
///
/// Covers everything except distance: inactive services, category (exact
/// match), price ceiling and rating floor.
#[inline]
pub fn matches_filters(service: &ProviderService, filters: &SearchFilters) -> bool {
    // Catalogs should only yield active services, but do not trust that
    if !service.is_active {
        return false;
    }

    if let Some(category) = &filters.category {
        if &service.category != category {
            return false;
        }
    }

    if let Some(max_price) = filters.max_price {
        if service.price_per_hour > max_price {
            return false;
        }
    }

    if let Some(min_rating) = filters.min_rating {
        if service.average_rating < min_rating {
            return false;
        }
    }

    true
}
