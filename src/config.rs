//! Configuration management for rainmap.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)
//!
//! Every flag is optional, so running either binary without arguments
//! reads and writes the default file names in the working directory.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::colormaps::get_colormap;
use crate::error::{Result, RainmapError};

/// Default year kept by the loader
pub const DEFAULT_YEAR: i32 = 2023;

/// Choropleth title for `year`, used when no title is configured
pub fn default_title(year: i32) -> String {
    format!("Average Rainfall in {} by Country", year)
}

/// Default station map output
pub const DEFAULT_STATION_OUTPUT: &str = "stations_distance.html";

/// Command-line arguments for the rainfall map
#[derive(Parser, Debug, Default)]
#[command(name = "rainmap")]
#[command(author, version, about = "Render a country rainfall choropleth", long_about = None)]
pub struct Args {
    /// Comma-separated rainfall-by-country table
    #[arg(long, env = "RAINMAP_RAINFALL_FILE")]
    pub rainfall_file: Option<PathBuf>,

    /// Tab-separated country-code conversion table
    #[arg(long, env = "RAINMAP_COUNTRY_CODES_FILE")]
    pub country_codes_file: Option<PathBuf>,

    /// Year to keep
    #[arg(short, long, env = "RAINMAP_YEAR")]
    pub year: Option<i32>,

    /// Map title
    #[arg(short, long, env = "RAINMAP_TITLE")]
    pub title: Option<String>,

    /// Where to write the HTML map
    #[arg(short, long, env = "RAINMAP_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Colormap for the choropleth (blues, greens, viridis)
    #[arg(long, env = "RAINMAP_COLORMAP")]
    pub colormap: Option<String>,

    /// Write the map without opening it
    #[arg(long, env = "RAINMAP_NO_OPEN")]
    pub no_open: bool,

    /// Path to JSON configuration file
    #[arg(short, long, env = "RAINMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RAINMAP_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Command-line arguments for the station distance map
#[derive(Parser, Debug)]
#[command(name = "station_distance")]
#[command(author, version, about = "Map two weather stations and the distance between them", long_about = None)]
pub struct StationArgs {
    /// Where to write the HTML map
    #[arg(short, long, env = "RAINMAP_STATION_OUTPUT", default_value = DEFAULT_STATION_OUTPUT)]
    pub output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RAINMAP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Input data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Rainfall-by-country table
    #[serde(default = "default_rainfall_file")]
    pub rainfall_file: PathBuf,

    /// Country-code conversion table
    #[serde(default = "default_country_codes_file")]
    pub country_codes_file: PathBuf,

    /// Year to keep
    #[serde(default = "default_year")]
    pub year: i32,
}

/// Choropleth rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Map title; derived from the data year when unset
    #[serde(default)]
    pub title: Option<String>,

    /// Where to write the HTML map
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Colormap name
    #[serde(default = "default_colormap")]
    pub colormap: String,

    /// Lower bound of the colour range (mm)
    #[serde(default)]
    pub color_min: f64,

    /// Upper bound of the colour range (mm)
    #[serde(default = "default_color_max")]
    pub color_max: f64,

    /// Open the written map in the system viewer
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input data configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Rendering configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Config::default(),
        };

        config.apply_args(args);
        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Override with every argument that was actually given
    fn apply_args(&mut self, args: Args) {
        if let Some(path) = args.rainfall_file {
            self.data.rainfall_file = path;
        }
        if let Some(path) = args.country_codes_file {
            self.data.country_codes_file = path;
        }
        if let Some(year) = args.year {
            self.data.year = year;
        }
        if let Some(title) = args.title {
            self.render.title = Some(title);
        }
        if let Some(output) = args.output {
            self.render.output = output;
        }
        if let Some(colormap) = args.colormap {
            self.render.colormap = colormap;
        }
        if args.no_open {
            self.render.open_browser = false;
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
    }

    /// Title of the choropleth, falling back to one naming the data year
    pub fn title(&self) -> String {
        self.render
            .title
            .clone()
            .unwrap_or_else(|| default_title(self.data.year))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.data.rainfall_file.as_os_str().is_empty() {
            return Err(RainmapError::Config {
                message: "Rainfall file path cannot be empty".to_string(),
            });
        }

        if self.data.country_codes_file.as_os_str().is_empty() {
            return Err(RainmapError::Config {
                message: "Country code file path cannot be empty".to_string(),
            });
        }

        if self.render.output.as_os_str().is_empty() {
            return Err(RainmapError::Config {
                message: "Output path cannot be empty".to_string(),
            });
        }

        validate_log_level(&self.log_level)?;

        get_colormap(&self.render.colormap).map_err(|_| RainmapError::Config {
            message: format!(
                "Invalid colormap: {}. Must be one of: blues, greens, viridis",
                self.render.colormap
            ),
        })?;

        if self.render.color_min.partial_cmp(&self.render.color_max) != Some(Ordering::Less) {
            return Err(RainmapError::Config {
                message: format!(
                    "Colour range [{}, {}] must be increasing",
                    self.render.color_min, self.render.color_max
                ),
            });
        }

        Ok(())
    }
}

/// Reject anything tracing's level names don't cover
pub fn validate_log_level(level: &str) -> Result<()> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(RainmapError::Config {
            message: format!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                level
            ),
        }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            render: RenderConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            rainfall_file: default_rainfall_file(),
            country_codes_file: default_country_codes_file(),
            year: default_year(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: None,
            output: default_output(),
            colormap: default_colormap(),
            color_min: 0.0,
            color_max: default_color_max(),
            open_browser: default_open_browser(),
        }
    }
}

// Default value functions for serde
fn default_rainfall_file() -> PathBuf {
    PathBuf::from("avg_rainfall_by_country.csv")
}

fn default_country_codes_file() -> PathBuf {
    PathBuf::from("countrycode_convert.csv")
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}

fn default_output() -> PathBuf {
    PathBuf::from("average_rainfall_2023.html")
}

fn default_colormap() -> String {
    "blues".to_string()
}

fn default_color_max() -> f64 {
    2000.0
}

fn default_open_browser() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
