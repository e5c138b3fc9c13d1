//! # rainmap
//!
//! Country rainfall choropleths and weather-station distance maps.
//!
//! ## Rainfall pipeline
//!
//! - **Loading**: reads the rainfall-by-country table and the country-code
//!   conversion table, keeps one year and left-joins ISO-3166 alpha-3 codes
//! - **Diagnostics**: reports how many countries can be mapped and which ones
//!   have rainfall but no ISO code
//! - **Rendering**: writes a plotly.js choropleth page coloured with a
//!   sequential colormap
//!
//! ## Station distance
//!
//! - **Geodesy**: ellipsoidal (Vincenty) distance with a haversine fallback
//! - **Rendering**: writes a Leaflet page with both stations and the line
//!   between them

pub mod colormaps;
pub mod config;
pub mod data_loader;
pub mod diagnostics;
pub mod enrichment;
pub mod error;
pub mod geo;
pub mod logging;
pub mod pipeline;
pub mod records;
pub mod render;
pub mod stations;

pub use config::Config;
pub use diagnostics::{check_missing_data, MissingDataReport, UnmappedCountry};
pub use enrichment::assign_missing_iso_codes;
pub use error::{RainmapError, Result};
pub use geo::GeoPoint;
pub use logging::{
    generate_operation_id, init_tracing, log_data_load_stats, log_error, log_operation_end,
    log_operation_start, log_timed_operation,
};
pub use records::{CountryCodeRow, RainfallRecord, RainfallRow};
pub use stations::{Station, StationPair, PARAPARAUMU, WELLINGTON_AERO};
