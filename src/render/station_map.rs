//! Station map: two markers, the line between them and the distance.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{html_page, script_json, write_html};
use crate::error::Result;
use crate::stations::{Station, StationPair};

const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Initial zoom of the station map
pub const DEFAULT_ZOOM: u8 = 10;

/// A point marker with an HTML popup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub location: [f64; 2],
    pub popup: String,
}

/// A line through a sequence of points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub locations: Vec<[f64; 2]>,
    pub color: String,
}

/// Everything Leaflet needs to draw the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMap {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub lines: Vec<Polyline>,
}

fn station_popup(station: &Station, distance_km: f64) -> String {
    format!(
        "{} ({})<br>Distance: {:.2} km",
        html_escape::encode_text(station.name),
        html_escape::encode_text(station.id),
        distance_km
    )
}

/// Lay out markers for both stations and a blue line between them
pub fn build_station_map(pair: &StationPair) -> StationMap {
    let distance_km = pair.distance_km();

    StationMap {
        center: pair.center().to_lat_lon(),
        zoom: DEFAULT_ZOOM,
        markers: [pair.first, pair.second]
            .iter()
            .map(|station| Marker {
                location: station.location.to_lat_lon(),
                popup: station_popup(station, distance_km),
            })
            .collect(),
        lines: vec![Polyline {
            locations: vec![pair.first.location.to_lat_lon(), pair.second.location.to_lat_lon()],
            color: "blue".to_string(),
        }],
    }
}

/// Render the Leaflet page for `map`
pub fn render_station_map(map: &StationMap) -> Result<String> {
    let payload = script_json(map)?;
    let tiles = script_json(&TILE_URL)?;
    let attribution = script_json(&TILE_ATTRIBUTION)?;

    let head = format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n\
         <script src=\"{}\"></script>\n\
         <style>html, body, #map {{ height: 100%; margin: 0; }}</style>",
        LEAFLET_CSS, LEAFLET_JS
    );
    let body = format!(
        "<div id=\"map\"></div>\n\
         <script>\n\
         const spec = {payload};\n\
         const map = L.map(\"map\").setView(spec.center, spec.zoom);\n\
         L.tileLayer({tiles}, {{maxZoom: 19, attribution: {attribution}}}).addTo(map);\n\
         for (const m of spec.markers) {{ L.marker(m.location).bindPopup(m.popup).addTo(map); }}\n\
         for (const l of spec.lines) {{ L.polyline(l.locations, {{color: l.color}}).addTo(map); }}\n\
         </script>"
    );

    Ok(html_page("Station distance", &head, &body))
}

/// Render the map for `pair` and write it to `output`
pub fn save_station_map(pair: &StationPair, output: &Path) -> Result<PathBuf> {
    let map = build_station_map(pair);
    let html = render_station_map(&map)?;
    write_html(output, &html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::{PARAPARAUMU, WELLINGTON_AERO};
    use tempfile::TempDir;

    #[test]
    fn test_build_station_map() {
        let map = build_station_map(&StationPair::default());

        assert_eq!(map.zoom, 10);
        assert_eq!(map.markers.len(), 2);
        assert_eq!(map.lines.len(), 1);
        assert_eq!(map.lines[0].color, "blue");
        assert_eq!(
            map.lines[0].locations,
            vec![[-41.3272, 174.8052], [-40.9044, 174.9894]]
        );
        assert_eq!(map.markers[0].location, [-41.3272, 174.8052]);
    }

    #[test]
    fn test_popups_carry_name_id_and_distance() {
        let map = build_station_map(&StationPair::new(WELLINGTON_AERO, PARAPARAUMU));

        assert_eq!(
            map.markers[0].popup,
            "Wellington Aero AWS (NZM00093439)<br>Distance: 49.44 km"
        );
        assert!(map.markers[1]
            .popup
            .starts_with("Paraparaumu AWS (NZ000093417)<br>Distance: "));
    }

    #[test]
    fn test_save_station_map() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stations_distance.html");

        save_station_map(&StationPair::default(), &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("L.map(\"map\")"));
        assert!(html.contains("NZM00093439"));
        assert!(html.contains("\"color\":\"blue\""));
    }
}
