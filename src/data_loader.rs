//! Rainfall data loading and merging.
//!
//! This module reads the rainfall-by-country table and the country-code
//! conversion table, keeps the rows for the requested year and left-joins the
//! ISO-3166 alpha-3 code onto each of them.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::DataConfig;
use crate::error::{Result, RainmapError};
use crate::logging::{log_data_load_stats, log_operation_end, log_operation_start};
use crate::records::{
    canonical_code, finite, non_blank, CountryCodeRow, RainfallRecord, RainfallRow, COUNTRY_CODE_COLUMNS,
    RAINFALL_COLUMNS,
};

/// Field delimiter of the rainfall table
pub const RAINFALL_DELIMITER: u8 = b',';

/// Field delimiter of the conversion table
pub const COUNTRY_CODE_DELIMITER: u8 = b'\t';

/// Load both tables and produce the merged records for the configured year
pub fn load_data(config: &DataConfig) -> Result<Vec<RainfallRecord>> {
    let start = Instant::now();
    log_operation_start(
        "load_data",
        Some(&format!(
            "rainfall={}, country_codes={}, year={}",
            config.rainfall_file.display(),
            config.country_codes_file.display(),
            config.year
        )),
    );

    let rows = load_rainfall_rows(&config.rainfall_file)?;
    let codes = load_country_codes(&config.country_codes_file)?;
    let lookup = build_iso_lookup(&codes);
    let records = merge_records(&rows, &lookup, config.year);

    let matched = records.iter().filter(|r| r.has_iso()).count();
    log_data_load_stats(
        &config.rainfall_file.display().to_string(),
        rows.len(),
        records.len(),
        lookup.len(),
        matched,
    );
    log_operation_end("load_data", start, true);

    Ok(records)
}

/// Read the comma-separated rainfall-by-country table
pub fn load_rainfall_rows(path: &Path) -> Result<Vec<RainfallRow>> {
    read_table(path, RAINFALL_DELIMITER, &RAINFALL_COLUMNS)
}

/// Read the tab-separated country-code conversion table
pub fn load_country_codes(path: &Path) -> Result<Vec<CountryCodeRow>> {
    read_table(path, COUNTRY_CODE_DELIMITER, &COUNTRY_CODE_COLUMNS)
}

/// Build the code -> ISO alpha-3 lookup used by the join.
///
/// Keys are canonical codes (see [`canonical_code`]). Rows with a blank ISO
/// code are not mappings. When a code appears more than once the first row
/// wins, so the join never multiplies rainfall rows.
pub fn build_iso_lookup(rows: &[CountryCodeRow]) -> HashMap<String, String> {
    let mut lookup = HashMap::with_capacity(rows.len());

    for row in rows {
        let Some(iso) = non_blank(row.iso_alpha3.clone()) else {
            debug!(country_code = %row.country_code, "Conversion row has no ISO code");
            continue;
        };

        let key = canonical_code(&row.country_code);
        if let Some(existing) = lookup.get(&key) {
            warn!(
                country_code = %row.country_code,
                kept = %existing,
                ignored = %iso,
                "Duplicate country code in conversion table"
            );
            continue;
        }

        lookup.insert(key, iso);
    }

    lookup
}

/// Keep the rows for `year` and left-join their ISO codes.
///
/// Output order follows the rainfall table. Rows without a conversion entry
/// are kept with `iso_alpha3 = None`. The record keeps the code as written in
/// the rainfall table.
pub fn merge_records(
    rows: &[RainfallRow],
    lookup: &HashMap<String, String>,
    year: i32,
) -> Vec<RainfallRecord> {
    rows.iter()
        .filter(|row| row.is_year(year))
        .map(|row| RainfallRecord {
            country_code: row.country_code.clone(),
            country_name: non_blank(row.country_name.clone()),
            year,
            average_rainfall: finite(row.average_rainfall),
            iso_alpha3: lookup.get(&canonical_code(&row.country_code)).cloned(),
        })
        .collect()
}

/// Open a delimited table, check its header and deserialize every row.
///
/// Rows shorter than the header are accepted; their trailing fields read as
/// missing.
fn read_table<T: DeserializeOwned>(
    path: &Path,
    delimiter: u8,
    required: &[&str],
) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(RainmapError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    check_columns(path, &headers, required)?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }

    info!(
        file_path = %path.display(),
        rows = rows.len(),
        "Read table"
    );

    Ok(rows)
}

/// Fail with `MissingColumn` for the first required column the header lacks
fn check_columns(path: &Path, headers: &StringRecord, required: &[&str]) -> Result<()> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(RainmapError::MissingColumn {
                file: path.display().to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}
