//! Sequential colormaps (single-hue progression).
//!
//! These colormaps are suitable for data that progresses from low to high,
//! such as rainfall totals.

use super::colormap::{interpolate_table, Colormap};

/// ColorBrewer Blues, light to dark
const BLUES: [[u8; 3]; 9] = [
    [247, 251, 255],
    [222, 235, 247],
    [198, 219, 239],
    [158, 202, 225],
    [107, 174, 214],
    [66, 146, 198],
    [33, 113, 181],
    [8, 81, 156],
    [8, 48, 107],
];

/// ColorBrewer Greens, light to dark
const GREENS: [[u8; 3]; 9] = [
    [247, 252, 245],
    [229, 245, 224],
    [199, 233, 192],
    [161, 217, 155],
    [116, 196, 118],
    [65, 171, 93],
    [35, 139, 69],
    [0, 109, 44],
    [0, 68, 27],
];

/// Viridis sampled at nine points
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 45, 123],
    [59, 82, 139],
    [44, 114, 142],
    [33, 145, 140],
    [40, 174, 128],
    [94, 201, 98],
    [173, 220, 48],
    [253, 231, 37],
];

/// Blues colormap - the default for rainfall
pub struct Blues;

impl Colormap for Blues {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        interpolate_table(&BLUES, value)
    }

    fn name(&self) -> &str {
        "blues"
    }
}

/// Greens colormap
pub struct Greens;

impl Colormap for Greens {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        interpolate_table(&GREENS, value)
    }

    fn name(&self) -> &str {
        "greens"
    }
}

/// Viridis colormap - perceptually uniform, colorblind-friendly
pub struct Viridis;

impl Colormap for Viridis {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        interpolate_table(&VIRIDIS, value)
    }

    fn name(&self) -> &str {
        "viridis"
    }
}
