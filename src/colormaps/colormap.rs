//! Colormap trait and utilities.
//!
//! This module defines the common interface for all colormaps and the
//! conversion into the colour-scale form the choropleth page expects.

use crate::error::{Result, RainmapError};

/// Trait for color mapping implementations
pub trait Colormap: Send + Sync {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f32) -> [u8; 4];

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    use super::sequential::*;

    match name.to_lowercase().as_str() {
        "blues" => Ok(Box::new(Blues)),
        "greens" => Ok(Box::new(Greens)),
        "viridis" => Ok(Box::new(Viridis)),
        _ => Err(RainmapError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Unknown colormap: {}", name),
        }),
    }
}

/// Linear interpolation between two colors
pub fn lerp_color(c1: [u8; 3], c2: [u8; 3], t: f32) -> [u8; 3] {
    [
        (c1[0] as f32 * (1.0 - t) + c2[0] as f32 * t) as u8,
        (c1[1] as f32 * (1.0 - t) + c2[1] as f32 * t) as u8,
        (c1[2] as f32 * (1.0 - t) + c2[2] as f32 * t) as u8,
    ]
}

/// Piecewise-linear lookup into an evenly spaced table of colors
pub fn interpolate_table(colors: &[[u8; 3]], value: f32) -> [u8; 4] {
    let Some(last) = colors.last() else {
        return [0, 0, 0, 0];
    };

    let value = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let position = value * (colors.len() - 1) as f32;
    let index = position.floor() as usize;

    if index >= colors.len() - 1 {
        return [last[0], last[1], last[2], 255];
    }

    let t = position - index as f32;
    let rgb = lerp_color(colors[index], colors[index + 1], t);
    [rgb[0], rgb[1], rgb[2], 255]
}

/// Sample a colormap into `[[t, "rgb(r,g,b)"], ...]` with `stops` evenly spaced entries
pub fn plotly_colorscale(colormap: &dyn Colormap, stops: usize) -> Vec<(f64, String)> {
    let stops = stops.max(2);

    (0..stops)
        .map(|i| {
            let t = i as f64 / (stops - 1) as f64;
            let [r, g, b, _] = colormap.map_normalized(t as f32);
            (t, format!("rgb({},{},{})", r, g, b))
        })
        .collect()
}
