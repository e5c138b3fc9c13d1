//! Integration tests for rainmap
//!
//! These tests run both pipelines end-to-end against files on disk.

mod common;

use common::{assertions, test_data};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use rainmap::data_loader::load_data;
use rainmap::render::{plot_rainfall_map, save_station_map, valid_iso_records, ChoroplethOptions};
use rainmap::{check_missing_data, pipeline, RainfallRecord, RainmapError, StationPair};

#[test]
fn test_year_filter_and_join() {
    let dir = TempDir::new().unwrap();
    let rainfall = test_data::write_rainfall_csv(
        dir.path(),
        &[
            ("US", "2023", "900", "United States"),
            ("US", "2022", "850", "United States"),
        ],
    );
    let codes = test_data::write_country_codes_tsv(dir.path(), &[("US", "USA")]);
    let config = test_data::config_for(dir.path(), rainfall, codes);

    let records = load_data(&config.data).unwrap();

    assert_eq!(
        records,
        vec![RainfallRecord {
            country_code: "US".to_string(),
            country_name: Some("United States".to_string()),
            year: 2023,
            average_rainfall: Some(900.0),
            iso_alpha3: Some("USA".to_string()),
        }]
    );
}

#[test]
fn test_unmatched_country_is_reported_not_rendered() {
    let dir = TempDir::new().unwrap();
    let rainfall =
        test_data::write_rainfall_csv(dir.path(), &[("ZZ", "2023", "500", "Unknown")]);
    let codes = test_data::write_country_codes_tsv(dir.path(), &[("US", "USA")]);
    let config = test_data::config_for(dir.path(), rainfall, codes);

    let records = load_data(&config.data).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].iso_alpha3, None);

    let report = check_missing_data(&records);
    assert_eq!(report.missing_iso.len(), 1);
    assert_eq!(report.missing_iso[0].country_name.as_deref(), Some("Unknown"));
    assertions::assert_approx_eq(report.missing_iso[0].average_rainfall, 500.0, None);

    assert!(valid_iso_records(&records).is_empty());
}

#[test]
fn test_left_join_preserves_cardinality() {
    let dir = TempDir::new().unwrap();
    let (rainfall, codes) = test_data::create_sample_tables(dir.path());
    let config = test_data::config_for(dir.path(), rainfall, codes);

    let records = load_data(&config.data).unwrap();

    // Four 2023 rows in, four records out
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.year == 2023));

    let matched: Vec<&str> = records
        .iter()
        .filter_map(|r| r.iso_alpha3.as_deref())
        .collect();
    assert_eq!(matched, vec!["USA", "FRA"]);

    let report = check_missing_data(&records);
    assert_eq!(report.with_iso, 2);
    assert_eq!(report.with_rainfall, 2);
    assert!(report.with_iso + report.missing_iso.len() <= report.total);
}

#[test]
fn test_loading_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let (rainfall, codes) = test_data::create_sample_tables(dir.path());
    let config = test_data::config_for(dir.path(), rainfall, codes);

    let first = load_data(&config.data).unwrap();
    let second = load_data(&config.data).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_no_rows_for_year() {
    let dir = TempDir::new().unwrap();
    let rainfall =
        test_data::write_rainfall_csv(dir.path(), &[("US", "2022", "850", "United States")]);
    let codes = test_data::write_country_codes_tsv(dir.path(), &[("US", "USA")]);
    let config = test_data::config_for(dir.path(), rainfall, codes);

    let records = load_data(&config.data).unwrap();
    assert!(records.is_empty());

    let report = check_missing_data(&records);
    assert_eq!(report.with_iso, 0);
    assert_eq!(report.with_rainfall, 0);

    // An empty map is still a map
    let path = plot_rainfall_map(
        &records,
        &ChoroplethOptions::default(),
        &config.render.output,
    )
    .unwrap();
    assert!(std::fs::metadata(path).unwrap().len() > 0);
}

#[test]
fn test_missing_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let rainfall = test_data::write_rainfall_csv(dir.path(), &[("US", "2023", "900", "US")]);
    let codes = dir.path().join("countrycode_convert.csv");
    std::fs::write(&codes, "CountryCode\tISO\nUS\tUSA\n").unwrap();
    let config = test_data::config_for(dir.path(), rainfall, codes);

    match load_data(&config.data) {
        Err(RainmapError::MissingColumn { column, .. }) => assert_eq!(column, "ISO-3166_alpha3"),
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let codes = test_data::write_country_codes_tsv(dir.path(), &[("US", "USA")]);
    let config = test_data::config_for(dir.path(), dir.path().join("absent.csv"), codes);

    assert!(matches!(load_data(&config.data), Err(RainmapError::Io(_))));
}

#[test]
fn test_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();
    let (rainfall, codes) = test_data::create_sample_tables(dir.path());
    let config = test_data::config_for(dir.path(), rainfall, codes);

    let mut stdout = Vec::new();
    let outcome = pipeline::run(&config, &mut stdout).unwrap();

    let printed = String::from_utf8(stdout).unwrap();
    assert!(printed.contains("Number of countries with valid ISO codes: 2"));
    assert!(printed.contains("Number of countries with rainfall data: 2"));
    assert!(printed.contains("Unknown"));
    assert!(!printed.contains("Nowhere"));

    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.map_path, config.render.output);

    let html = std::fs::read_to_string(&outcome.map_path).unwrap();
    assert!(html.contains("<title>Average Rainfall in 2023 by Country</title>"));
    assert!(html.contains("\"locations\":[\"USA\",\"FRA\"]"));
    assert!(!html.contains("\"ZZ\""));
}

#[test]
fn test_loose_exports_still_join() {
    let dir = TempDir::new().unwrap();
    let rainfall = dir.path().join("avg_rainfall_by_country.csv");
    std::fs::write(
        &rainfall,
        "CountryCode,Year,AverageRainfall,CountryName\n\
         4,2021.0,300,Afghanistan\n\
         ZZ,2021,500\n\
         US,2022,850,United States\n",
    )
    .unwrap();
    let codes = test_data::write_country_codes_tsv(dir.path(), &[("004", "AFG")]);
    let mut config = test_data::config_for(dir.path(), rainfall, codes);
    config.data.year = 2021;

    let mut stdout = Vec::new();
    let outcome = pipeline::run(&config, &mut stdout).unwrap();

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].country_code, "4");
    assert_eq!(outcome.records[0].iso_alpha3.as_deref(), Some("AFG"));
    assert_eq!(outcome.records[1].country_name, None);
    assert_eq!(outcome.report.missing_iso.len(), 1);

    let printed = String::from_utf8(stdout).unwrap();
    assert!(printed.contains("(unnamed)"));

    let html = std::fs::read_to_string(&outcome.map_path).unwrap();
    assert!(html.contains("<title>Average Rainfall in 2021 by Country</title>"));
    assert!(html.contains("\"locations\":[\"AFG\"]"));
}

#[test]
fn test_station_distance_map() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stations_distance.html");
    let pair = StationPair::default();

    assertions::assert_in_range(pair.distance_km(), 49.0, 51.0);

    let written = save_station_map(&pair, &path).unwrap();
    assert_eq!(written, path);

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(!html.is_empty());
    assert!(html.contains("Wellington Aero AWS (NZM00093439)"));
    assert!(html.contains("Paraparaumu AWS (NZ000093417)"));
    assert!(html.contains("Distance: 49.44 km"));
}
