//! Geocoding exchange files
//!
//! The outbound request lists `id,post,address` without a header, UTF-8 with
//! a byte-order mark, as expected by the address-matching service. The
//! inbound result is a CSV with a header row that carries at least the
//! longitude and latitude columns, and usually the submitted id.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::config::GeoConfig;
use crate::error::{PipelineError, Result};
use crate::models::FacilityRecord;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// UTF-8 byte-order mark
const BOM: &str = "\u{feff}";

/// Coordinates read from a geocoding result file, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinates {
    /// Facility id of each row, when the file carries an id column
    pub ids: Option<Vec<Option<i64>>>,
    /// Longitude of each row
    pub lon: Vec<Option<f64>>,
    /// Latitude of each row
    pub lat: Vec<Option<f64>>,
}

impl Coordinates {
    /// Number of result rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.lon.len()
    }

    /// Whether the file had no result rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }
}

/// Write the outbound geocoding request
///
/// # Errors
/// Returns an error if the file cannot be written
pub fn export_addresses(records: &[FacilityRecord], path: &Path) -> Result<()> {
    let start = Instant::now();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut out = BufWriter::new(file);
    out.write_all(BOM.as_bytes())
        .map_err(|e| PipelineError::io(path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    for record in records {
        writer.serialize((record.id, &record.post, &record.address))?;
    }
    writer.flush().map_err(|e| PipelineError::io(path, e))?;

    log_operation_complete("wrote", path, records.len(), Some(start.elapsed()));
    Ok(())
}

/// Parse an optional numeric cell
fn parse_number<T: std::str::FromStr>(cell: Option<&str>) -> Option<T> {
    cell.map(str::trim)
        .filter(|c| !c.is_empty())
        .and_then(|c| c.parse().ok())
}

/// Read the inbound geocoding result
///
/// # Returns
/// `Ok(None)` when the file does not exist
///
/// # Errors
/// Returns an error if the file cannot be parsed or lacks the longitude or
/// latitude column
pub fn read_coordinates(path: &Path, config: &GeoConfig) -> Result<Option<Coordinates>> {
    if !path.is_file() {
        return Ok(None);
    }

    let start = Instant::now();
    log_operation_start("Reading geocoding result", path);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches(BOM).trim().to_string())
        .collect();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let lon_col = position(&config.lon_column)
        .ok_or_else(|| PipelineError::MissingColumn(config.lon_column.clone()))?;
    let lat_col = position(&config.lat_column)
        .ok_or_else(|| PipelineError::MissingColumn(config.lat_column.clone()))?;
    let id_col = position(&config.id_column);

    let mut coordinates = Coordinates {
        ids: id_col.map(|_| Vec::new()),
        ..Default::default()
    };
    for row in reader.records() {
        let row = row?;
        coordinates.lon.push(parse_number(row.get(lon_col)));
        coordinates.lat.push(parse_number(row.get(lat_col)));
        if let (Some(ids), Some(col)) = (coordinates.ids.as_mut(), id_col) {
            ids.push(parse_number(row.get(col)));
        }
    }

    log_operation_complete("read", path, coordinates.len(), Some(start.elapsed()));
    Ok(Some(coordinates))
}
