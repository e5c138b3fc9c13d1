//! Country rainfall choropleth.
//!
//! Only records with an ISO alpha-3 code reach the map. The figure is handed
//! to plotly.js as JSON; everything about drawing country shapes happens in
//! the browser.

use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{html_page, script_json, write_html};
use crate::colormaps::{get_colormap, plotly_colorscale};
use crate::config::{default_title, Config, DEFAULT_YEAR};
use crate::error::{Result, RainmapError};
use crate::logging::log_timed_operation;
use crate::records::RainfallRecord;

/// plotly.js bundle loaded by the page
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Number of colour stops sampled from the colormap
const COLORSCALE_STOPS: usize = 9;

/// One country on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethPoint {
    pub iso_alpha3: String,
    pub average_rainfall: Option<f64>,
    pub country_name: Option<String>,
}

/// How the choropleth is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethOptions {
    pub title: String,
    /// Values at or beyond these bounds take the end colours
    pub color_range: (f64, f64),
    pub colormap: String,
    /// Colour bar and hover label for the value
    pub value_label: String,
}

impl Default for ChoroplethOptions {
    fn default() -> Self {
        Self {
            title: default_title(DEFAULT_YEAR),
            color_range: (0.0, 2000.0),
            colormap: "blues".to_string(),
            value_label: "Average Rainfall (mm)".to_string(),
        }
    }
}

impl ChoroplethOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.title(),
            color_range: (config.render.color_min, config.render.color_max),
            colormap: config.render.colormap.clone(),
            ..Default::default()
        }
    }
}

/// Records that can be placed on the map, as `(iso, rainfall, name)`
pub fn valid_iso_records(records: &[RainfallRecord]) -> Vec<ChoroplethPoint> {
    records
        .iter()
        .filter_map(|r| {
            r.iso_alpha3.as_ref().map(|iso| ChoroplethPoint {
                iso_alpha3: iso.clone(),
                average_rainfall: r.average_rainfall,
                country_name: r.country_name.clone(),
            })
        })
        .collect()
}

/// Build the plotly figure for the given points
pub fn choropleth_figure(points: &[ChoroplethPoint], options: &ChoroplethOptions) -> Result<Value> {
    let (min, max) = options.color_range;
    if !(min.is_finite() && max.is_finite()) || min >= max {
        return Err(RainmapError::InvalidParameter {
            param: "color_range".to_string(),
            message: format!("[{}, {}] is not an increasing finite range", min, max),
        });
    }

    let colormap = get_colormap(&options.colormap)?;
    let colorscale: Vec<Value> = plotly_colorscale(colormap.as_ref(), COLORSCALE_STOPS)
        .into_iter()
        .map(|(t, color)| json!([t, color]))
        .collect();

    let locations: Vec<&str> = points.iter().map(|p| p.iso_alpha3.as_str()).collect();
    let values: Vec<Option<f64>> = points.iter().map(|p| p.average_rainfall).collect();
    let names: Vec<&str> = points
        .iter()
        .map(|p| p.country_name.as_deref().unwrap_or(p.iso_alpha3.as_str()))
        .collect();

    Ok(json!({
        "data": [{
            "type": "choropleth",
            "locationmode": "ISO-3",
            "locations": locations,
            "z": values,
            "text": names,
            "hovertemplate": format!(
                "<b>%{{text}}</b><br>ISO-3166_alpha3=%{{location}}<br>{}=%{{z}}<extra></extra>",
                options.value_label
            ),
            "colorscale": colorscale,
            "zmin": min,
            "zmax": max,
            "colorbar": { "title": { "text": options.value_label } },
            "marker": { "line": { "color": "rgb(255,255,255)", "width": 0.5 } }
        }],
        "layout": {
            "title": { "text": options.title },
            "geo": {
                "showframe": false,
                "showcoastlines": true,
                "projection": { "type": "natural earth" }
            },
            "margin": { "l": 0, "r": 0, "t": 50, "b": 0 }
        }
    }))
}

/// Render the HTML page for the given points
pub fn render_choropleth(points: &[ChoroplethPoint], options: &ChoroplethOptions) -> Result<String> {
    let figure = choropleth_figure(points, options)?;
    let payload = script_json(&figure)?;

    let head = format!(
        "<script src=\"{}\" charset=\"utf-8\"></script>\n\
         <style>html, body, #map {{ height: 100%; margin: 0; }}</style>",
        PLOTLY_JS
    );
    let body = format!(
        "<div id=\"map\"></div>\n\
         <script>\n\
         const figure = {};\n\
         Plotly.newPlot(\"map\", figure.data, figure.layout, {{responsive: true}});\n\
         </script>",
        payload
    );

    Ok(html_page(&options.title, &head, &body))
}

/// Filter to mappable records, render them and write the page to `output`
pub fn plot_rainfall_map(
    records: &[RainfallRecord],
    options: &ChoroplethOptions,
    output: &Path,
) -> Result<PathBuf> {
    let points = valid_iso_records(records);
    debug!(
        records = records.len(),
        mapped = points.len(),
        "Selected records with ISO codes"
    );

    if points.is_empty() {
        info!("No records have an ISO code, rendering an empty map");
    }

    let html = log_timed_operation("render_choropleth", || render_choropleth(&points, options))?;
    write_html(output, &html)
}
