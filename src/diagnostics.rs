//! Missing-data diagnostic for the merged rainfall records.
//!
//! The report is informational only: the pipeline carries on whatever the
//! counts are.

use serde::Serialize;
use std::fmt;

use crate::records::RainfallRecord;

const HEADER: &str = "CountryName";
const UNNAMED: &str = "(unnamed)";

/// A country that has rainfall data but no ISO code to place it on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmappedCountry {
    pub country_name: Option<String>,
    pub average_rainfall: f64,
}

/// Counts of usable records and the list of countries that cannot be mapped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingDataReport {
    /// Number of merged records
    pub total: usize,
    /// Records with an ISO alpha-3 code
    pub with_iso: usize,
    /// Records with a rainfall value
    pub with_rainfall: usize,
    /// Records with rainfall but without an ISO code, in input order
    pub missing_iso: Vec<UnmappedCountry>,
}

/// Build the report. Does not touch the records.
pub fn check_missing_data(records: &[RainfallRecord]) -> MissingDataReport {
    let with_iso = records.iter().filter(|r| r.has_iso()).count();
    let with_rainfall = records.iter().filter(|r| r.has_rainfall()).count();

    let missing_iso = records
        .iter()
        .filter(|r| !r.has_iso())
        .filter_map(|r| {
            r.average_rainfall.map(|rainfall| UnmappedCountry {
                country_name: r.country_name.clone(),
                average_rainfall: rainfall,
            })
        })
        .collect();

    MissingDataReport {
        total: records.len(),
        with_iso,
        with_rainfall,
        missing_iso,
    }
}

impl fmt::Display for MissingDataReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Number of countries with valid ISO codes: {}",
            self.with_iso
        )?;
        writeln!(
            f,
            "Number of countries with rainfall data: {}",
            self.with_rainfall
        )?;
        writeln!(f, "Countries without valid ISO codes:")?;

        if self.missing_iso.is_empty() {
            return writeln!(f, "  (none)");
        }

        let width = self
            .missing_iso
            .iter()
            .map(|c| {
                c.country_name
                    .as_deref()
                    .unwrap_or(UNNAMED)
                    .chars()
                    .count()
            })
            .max()
            .unwrap_or(0)
            .max(HEADER.len());

        writeln!(f, "  {:<width$}  AverageRainfall", HEADER)?;
        for country in &self.missing_iso {
            writeln!(
                f,
                "  {:<width$}  {}",
                country.country_name.as_deref().unwrap_or(UNNAMED),
                country.average_rainfall
            )?;
        }

        Ok(())
    }
}
