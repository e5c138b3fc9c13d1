//! rainmap - country rainfall choropleth
//!
//! Loads the rainfall and country-code tables, prints the missing-data
//! diagnostic and writes the choropleth map.

use tracing::{error, info};

use rainmap::pipeline;
use rainmap::{init_tracing, log_error, Config, Result};

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    init_tracing(&config.log_level);
    info!("Starting rainmap v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut stdout = std::io::stdout().lock();
    let outcome = pipeline::run(&config, &mut stdout).map_err(|e| {
        log_error(&e, "rainfall pipeline");
        e
    })?;

    info!(
        records = outcome.records.len(),
        mapped = outcome.report.with_iso,
        map = %outcome.map_path.display(),
        "Done"
    );

    Ok(())
}
