use crate::core::error::SearchError;
use crate::models::Coordinate;

/// Earth's mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Check a coordinate before it is used in any computation
pub fn validate_coordinate(coord: &Coordinate) -> Result<(), SearchError> {
    if coord.is_valid() {
        Ok(())
    } else {
        Err(SearchError::InvalidCoordinate {
            latitude: coord.latitude,
            longitude: coord.longitude,
        })
    }
}

/// Calculate the Haversine distance between two points in kilometers
///
/// Both coordinates are validated first. The longitude difference is
/// folded into [0, 180] so points on either side of the antimeridian
/// come out close together.
///
/// # Returns
/// Distance in kilometers, exactly 0 for identical coordinates
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> Result<f64, SearchError> {
    validate_coordinate(from)?;
    validate_coordinate(to)?;

    if from == to {
        return Ok(0.0);
    }

    Ok(haversine_unchecked(from, to))
}

/// Haversine without range checks, for callers that already validated
#[inline]
pub(crate) fn haversine_unchecked(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = normalize_longitude_delta(to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] near the poles
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Absolute longitude difference folded into [0, 180]
#[inline]
fn normalize_longitude_delta(delta: f64) -> f64 {
    let d = delta.abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}
