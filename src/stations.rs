//! Weather stations and the distance between a pair of them.

use serde::Serialize;

use crate::geo::{geodesic_distance_km, midpoint, GeoPoint};

/// A weather station with a fixed location
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Station {
    /// Display name
    pub name: &'static str,
    /// GHCN station identifier
    pub id: &'static str,
    pub location: GeoPoint,
}

/// Wellington Aero AWS
pub const WELLINGTON_AERO: Station = Station {
    name: "Wellington Aero AWS",
    id: "NZM00093439",
    location: GeoPoint {
        lat: -41.3272,
        lon: 174.8052,
    },
};

/// Paraparaumu AWS
pub const PARAPARAUMU: Station = Station {
    name: "Paraparaumu AWS",
    id: "NZ000093417",
    location: GeoPoint {
        lat: -40.9044,
        lon: 174.9894,
    },
};

/// Two stations compared with each other
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationPair {
    pub first: Station,
    pub second: Station,
}

impl StationPair {
    pub fn new(first: Station, second: Station) -> Self {
        Self { first, second }
    }

    /// Geodesic distance between the two stations in kilometres
    pub fn distance_km(&self) -> f64 {
        geodesic_distance_km(self.first.location, self.second.location)
    }

    /// Map centre between the two stations
    pub fn center(&self) -> GeoPoint {
        midpoint(self.first.location, self.second.location)
    }
}

impl Default for StationPair {
    fn default() -> Self {
        Self::new(WELLINGTON_AERO, PARAPARAUMU)
    }
}
