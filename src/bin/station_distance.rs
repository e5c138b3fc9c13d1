//! Map the Wellington Aero and Paraparaumu weather stations with the
//! geodesic distance between them.

use anyhow::Context;
use clap::Parser;
use tracing::info;

use rainmap::config::{validate_log_level, StationArgs};
use rainmap::render::save_station_map;
use rainmap::{init_tracing, StationPair};

fn main() -> anyhow::Result<()> {
    let args = StationArgs::parse();
    validate_log_level(&args.log_level)?;
    init_tracing(&args.log_level);

    let pair = StationPair::default();
    let distance_km = pair.distance_km();
    info!(
        from = pair.first.name,
        to = pair.second.name,
        distance_km = distance_km,
        "Computed station distance"
    );

    let path = save_station_map(&pair, &args.output)
        .with_context(|| format!("writing station map to {}", args.output.display()))?;

    info!(file_path = %path.display(), "Station map saved");
    Ok(())
}
