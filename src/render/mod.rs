//! Map rendering.
//!
//! Maps are written as self-contained HTML pages that hand the data to a
//! browser-side library: plotly.js for the choropleth, Leaflet for the
//! station map.

pub mod choropleth;
pub mod station_map;

pub use choropleth::{
    plot_rainfall_map, render_choropleth, valid_iso_records, ChoroplethOptions, ChoroplethPoint,
};
pub use station_map::{
    build_station_map, render_station_map, save_station_map, Marker, Polyline, StationMap,
};

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::error::{Result, RainmapError};

/// Wrap head and body fragments into a complete HTML document
pub(crate) fn html_page(title: &str, head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <!-- generated by rainmap {} at {} -->\n\
         <title>{}</title>\n\
         {}\n\
         </head>\n\
         <body>\n\
         {}\n\
         </body>\n\
         </html>\n",
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        html_escape::encode_text(title),
        head,
        body
    )
}

/// Serialize a value for embedding inside a `<script>` element
pub(crate) fn script_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    // Keep the payload from closing the script element early
    Ok(json.replace("</", "<\\/"))
}

/// Write a rendered page, creating parent directories as needed
pub fn write_html(path: &Path, html: &str) -> Result<PathBuf> {
    if html.is_empty() {
        return Err(RainmapError::Render {
            message: format!("Refusing to write an empty page to {}", path.display()),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;

    info!(
        file_path = %path.display(),
        bytes = html.len(),
        "Map written"
    );

    Ok(path.to_path_buf())
}

/// Ask the desktop to open `path` in its default viewer
pub fn open_in_browser(path: &Path) -> Result<()> {
    let mut command = opener_command(path);
    debug!(command = ?command, "Opening map");

    let status = command.status()?;
    if !status.success() {
        return Err(RainmapError::Render {
            message: format!("Viewer exited with {} for {}", status, path.display()),
        });
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
