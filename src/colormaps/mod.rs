//! Colormap implementations for map rendering.
//!
//! This module provides ColorBrewer- and matplotlib-inspired colormaps for
//! colouring countries by rainfall.

pub mod colormap;
pub mod sequential;

pub use colormap::{get_colormap, plotly_colorscale, Colormap};

// Re-export commonly used colormaps
pub use sequential::{Blues, Greens, Viridis};
