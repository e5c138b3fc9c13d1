//! Test data generation utilities.
//!
//! This module writes small rainfall and country-code tables with known
//! contents, in the same layouts the loader reads.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rainmap::config::{Config, DataConfig, RenderConfig};

/// Header of the rainfall table
pub const RAINFALL_HEADER: &str = "CountryCode,Year,AverageRainfall,CountryName";

/// Header of the conversion table
pub const COUNTRY_CODE_HEADER: &str = "CountryCode\tISO-3166_alpha3";

/// Writes a comma-separated rainfall table.
///
/// # Arguments
///
/// * `dir` - Directory to write into
/// * `rows` - `(code, year, rainfall, name)` tuples, written verbatim
pub fn write_rainfall_csv(dir: &Path, rows: &[(&str, &str, &str, &str)]) -> PathBuf {
    let mut contents = format!("{}\n", RAINFALL_HEADER);
    for (code, year, rainfall, name) in rows {
        contents.push_str(&format!("{},{},{},{}\n", code, year, rainfall, name));
    }

    let path = dir.join("avg_rainfall_by_country.csv");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Writes a tab-separated conversion table of `(code, iso)` pairs.
pub fn write_country_codes_tsv(dir: &Path, rows: &[(&str, &str)]) -> PathBuf {
    let mut contents = format!("{}\n", COUNTRY_CODE_HEADER);
    for (code, iso) in rows {
        contents.push_str(&format!("{}\t{}\n", code, iso));
    }

    let path = dir.join("countrycode_convert.csv");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Writes a small but varied pair of tables.
///
/// 2023 rows: US (matched), ZZ (unmatched, rainfall), FR (matched, no
/// rainfall), QQ (unmatched, no rainfall). One 2022 row for US.
pub fn create_sample_tables(dir: &Path) -> (PathBuf, PathBuf) {
    let rainfall = write_rainfall_csv(
        dir,
        &[
            ("US", "2023", "900", "United States"),
            ("US", "2022", "850", "United States"),
            ("ZZ", "2023", "500", "Unknown"),
            ("FR", "2023", "", "France"),
            ("QQ", "2023", "", "Nowhere"),
        ],
    );
    let codes = write_country_codes_tsv(dir, &[("US", "USA"), ("FR", "FRA"), ("GM", "DEU")]);
    (rainfall, codes)
}

/// Config pointing at the given tables, writing into `dir` and never opening a viewer
pub fn config_for(dir: &Path, rainfall: PathBuf, codes: PathBuf) -> Config {
    Config {
        data: DataConfig {
            rainfall_file: rainfall,
            country_codes_file: codes,
            ..Default::default()
        },
        render: RenderConfig {
            output: dir.join("average_rainfall_2023.html"),
            open_browser: false,
            ..Default::default()
        },
        ..Default::default()
    }
}
