//! The rainfall pipeline, end to end.
//!
//! load -> diagnostic -> missing-ISO assignment -> choropleth. The diagnostic
//! is written to the caller's writer (stdout in the binary) and never stops
//! the run.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::Config;
use crate::data_loader::load_data;
use crate::diagnostics::{check_missing_data, MissingDataReport};
use crate::enrichment::assign_missing_iso_codes;
use crate::error::Result;
use crate::logging::{log_operation_end, log_operation_start};
use crate::records::RainfallRecord;
use crate::render::{open_in_browser, plot_rainfall_map, ChoroplethOptions};

/// What a pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub records: Vec<RainfallRecord>,
    pub report: MissingDataReport,
    pub map_path: PathBuf,
}

/// Run the rainfall pipeline, writing the diagnostic report to `out`
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<PipelineOutcome> {
    let start = Instant::now();
    log_operation_start("rainfall_pipeline", None);

    let records = load_data(&config.data)?;

    let report = check_missing_data(&records);
    write!(out, "{}", report)?;
    out.flush()?;

    let records = assign_missing_iso_codes(records);

    let options = ChoroplethOptions::from_config(config);
    let map_path = plot_rainfall_map(&records, &options, &config.render.output)?;

    if config.render.open_browser {
        match open_in_browser(&map_path) {
            Ok(()) => info!(file_path = %map_path.display(), "Opened map"),
            Err(e) => warn!(
                error = %e,
                file_path = %map_path.display(),
                "Could not open map, open the file manually"
            ),
        }
    }

    log_operation_end("rainfall_pipeline", start, true);

    Ok(PipelineOutcome {
        records,
        report,
        map_path,
    })
}
