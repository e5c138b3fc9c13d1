//! Geographic utilities.

pub mod geodesic;

pub use geodesic::{
    geodesic_distance_km, haversine_distance_km, midpoint, normalize_longitude,
    vincenty_distance_km, GeoPoint,
};
