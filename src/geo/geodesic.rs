//! Geographic coordinates and distances on the Earth's surface.
//!
//! Distances are computed on the WGS-84 ellipsoid with Vincenty's inverse
//! formula. For nearly antipodal points, where the iteration may fail to
//! converge, the spherical haversine distance is returned instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{Result, RainmapError};

/// WGS-84 semi-major axis in metres
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// Mean Earth radius in kilometres (IUGG)
pub const MEAN_EARTH_RADIUS_KM: f64 = 6_371.008_8;

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_TOLERANCE: f64 = 1e-12;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting out-of-range or non-finite coordinates
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(RainmapError::InvalidCoordinates {
                message: format!("Latitude must be in the range -90 to 90, got {}", lat),
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(RainmapError::InvalidCoordinates {
                message: format!("Longitude must be in the range -180 to 180, got {}", lon),
            });
        }
        Ok(Self { lat, lon })
    }

    /// `[lat, lon]`, the order map front-ends expect
    pub fn to_lat_lon(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Normalize a longitude value to the range [-180, 180)
pub fn normalize_longitude(lon: f64) -> f64 {
    let mut normalized = ((lon + 180.0) % 360.0 + 360.0) % 360.0 - 180.0;

    if normalized == 180.0 {
        normalized = -180.0;
    }

    normalized
}

/// Point halfway between `a` and `b` in coordinate space.
///
/// Longitudes are averaged across the dateline when the points straddle it.
pub fn midpoint(a: GeoPoint, b: GeoPoint) -> GeoPoint {
    let lat = (a.lat + b.lat) / 2.0;
    let lon = if (a.lon - b.lon).abs() > 180.0 {
        normalize_longitude((a.lon + b.lon + 360.0) / 2.0)
    } else {
        (a.lon + b.lon) / 2.0
    };
    GeoPoint { lat, lon }
}

/// Great-circle distance on a sphere of mean Earth radius, in kilometres
pub fn haversine_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Vincenty inverse distance on WGS-84 in kilometres, `None` if it fails to converge
pub fn vincenty_distance_km(a: GeoPoint, b: GeoPoint) -> Option<f64> {
    let f = WGS84_F;
    let major = WGS84_A;
    let minor = (1.0 - f) * major;

    let l = (b.lon - a.lon).to_radians();
    let u1 = ((1.0 - f) * a.lat.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * b.lat.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();

        // Coincident points
        if sin_sigma == 0.0 {
            return Some(0.0);
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // Both points on the equator
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < VINCENTY_TOLERANCE {
            let u_sq = cos_sq_alpha * (major * major - minor * minor) / (minor * minor);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

            return Some(minor * big_a * (sigma - delta_sigma) / 1000.0);
        }
    }

    None
}

/// Ellipsoidal distance in kilometres, haversine when Vincenty does not converge
pub fn geodesic_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    match vincenty_distance_km(a, b) {
        Some(distance) => distance,
        None => {
            debug!(from = %a, to = %b, "Vincenty did not converge, using haversine");
            haversine_distance_km(a, b)
        }
    }
}
