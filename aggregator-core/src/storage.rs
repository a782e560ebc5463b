//! File-backed persistence: the JSON country-cache snapshot and the CSV
//! weather export.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{Continent, Country, WeatherData, WindScale};

/// One export row: a (country, weather) pair flattened for CSV.
///
/// Field order fixes the column order; the PascalCase rename drives the
/// header names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportRecord {
    pub country_name: String,
    pub weather_description: Option<String>,
    pub temperature: f64,
    pub feels_like_temperature: f64,
    pub humidity: f64,
    pub wind_speed: WindScale,
    pub pressure: f64,
}

impl ExportRecord {
    /// Field-for-field projection, with the raw wind speed bucketed.
    pub fn from_pair(country: &Country, weather: &WeatherData) -> Self {
        Self {
            country_name: country.name.clone(),
            weather_description: weather.description.clone(),
            temperature: weather.temperature_c,
            feels_like_temperature: weather.feels_like_c,
            humidity: weather.humidity_pct,
            wind_speed: WindScale::from_mps(weather.wind_speed_mps),
            pressure: weather.pressure_hpa,
        }
    }
}

/// Load the country-cache snapshot.
///
/// A missing, unreadable or malformed file yields an empty map: the cache
/// starts cold instead of failing construction.
pub fn load_snapshot(path: &Path) -> HashMap<Continent, Vec<Country>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            if err.kind() != ErrorKind::NotFound {
                warn!(path = %path.display(), %err, "could not read cache snapshot, starting cold");
            }
            return HashMap::new();
        }
    };

    if raw.trim().is_empty() {
        return HashMap::new();
    }

    match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed cache snapshot, starting cold");
            HashMap::new()
        }
    }
}

/// Rewrite the full snapshot. Unlike loading, a failed write is an error.
pub fn store_snapshot(path: &Path, snapshot: &HashMap<Continent, Vec<Country>>) -> Result<()> {
    let json = serde_json::to_string(snapshot)
        .map_err(|err| Error::persistence("encode cache snapshot for", path, err))?;

    fs::write(path, json).map_err(|err| Error::persistence("write cache snapshot", path, err))
}

/// Write all export rows in one batch, header row first.
pub fn write_export(path: &Path, records: &[ExportRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|err| Error::persistence("open export file", path, err))?;

    for record in records {
        writer
            .serialize(record)
            .map_err(|err| Error::persistence("write export row to", path, err))?;
    }

    writer.flush().map_err(|err| Error::persistence("flush export file", path, err))
}

/// Read back an export file. Not part of the aggregation flow itself.
pub fn read_export(path: &Path) -> Result<Vec<ExportRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|err| Error::persistence("open export file", path, err))?;

    reader
        .deserialize()
        .map(|row| row.map_err(|err| Error::persistence("read export row from", path, err)))
        .collect()
}
