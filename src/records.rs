//! Record types for the rainfall pipeline.
//!
//! Raw rows mirror the two input tables column for column. `RainfallRecord`
//! is the typed, post-merge row every later stage works with.

use serde::Deserialize;

/// Column holding the join key in both input tables
pub const COL_COUNTRY_CODE: &str = "CountryCode";
/// Column holding the observation year
pub const COL_YEAR: &str = "Year";
/// Column holding the average rainfall in millimetres
pub const COL_AVERAGE_RAINFALL: &str = "AverageRainfall";
/// Column holding the human-readable country name
pub const COL_COUNTRY_NAME: &str = "CountryName";
/// Column holding the ISO-3166 alpha-3 code in the conversion table
pub const COL_ISO_ALPHA3: &str = "ISO-3166_alpha3";

/// Columns the rainfall table must carry
pub const RAINFALL_COLUMNS: [&str; 4] = [
    COL_COUNTRY_CODE,
    COL_YEAR,
    COL_AVERAGE_RAINFALL,
    COL_COUNTRY_NAME,
];

/// Columns the conversion table must carry
pub const COUNTRY_CODE_COLUMNS: [&str; 2] = [COL_COUNTRY_CODE, COL_ISO_ALPHA3];

/// One row of the rainfall-by-country table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RainfallRow {
    #[serde(rename = "CountryCode")]
    pub country_code: String,

    /// Read as a float so exports that write `2023.0` still match; blank or
    /// unparsable years deserialize to `None`
    #[serde(rename = "Year", default, deserialize_with = "csv::invalid_option")]
    pub year: Option<f64>,

    #[serde(rename = "AverageRainfall", default, deserialize_with = "csv::invalid_option")]
    pub average_rainfall: Option<f64>,

    #[serde(rename = "CountryName", default)]
    pub country_name: Option<String>,
}

/// One row of the country-code conversion table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryCodeRow {
    #[serde(rename = "CountryCode")]
    pub country_code: String,

    #[serde(rename = "ISO-3166_alpha3", default)]
    pub iso_alpha3: Option<String>,
}

/// A rainfall row after the year filter and the left join
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallRecord {
    /// Join key, kept as text
    pub country_code: String,
    /// Human-readable label
    pub country_name: Option<String>,
    /// Observation year, always the filter year
    pub year: i32,
    /// Average rainfall in millimetres
    pub average_rainfall: Option<f64>,
    /// ISO-3166 alpha-3 code, absent when the join found no match
    pub iso_alpha3: Option<String>,
}

impl RainfallRow {
    /// Whether the row's year is exactly `year`. `2023.0` counts, `2023.5`
    /// does not.
    pub fn is_year(&self, year: i32) -> bool {
        self.year.is_some_and(|y| y.fract() == 0.0 && y == f64::from(year))
    }
}

impl RainfallRecord {
    /// Whether the record can be placed on the map
    pub fn has_iso(&self) -> bool {
        self.iso_alpha3.is_some()
    }

    /// Whether the record carries a rainfall value
    pub fn has_rainfall(&self) -> bool {
        self.average_rainfall.is_some()
    }
}

/// Normalise a country code for joining.
///
/// Purely numeric codes are compared as numbers: leading zeros and an
/// all-zero fractional part are dropped, so `004`, `4` and `4.0` meet. Any
/// other code is only trimmed.
pub fn canonical_code(code: &str) -> String {
    let code = code.trim();
    let integral = match code.split_once('.') {
        Some((int, frac)) if !frac.is_empty() && frac.bytes().all(|b| b == b'0') => int,
        Some(_) => return code.to_string(),
        None => code,
    };

    if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
        return code.to_string();
    }

    match integral.trim_start_matches('0') {
        "" => "0".to_string(),
        digits => digits.to_string(),
    }
}

/// Treat blank strings as missing
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Treat NaN and infinities as missing
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
