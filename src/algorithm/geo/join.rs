//! Coordinate join
//!
//! Adds nullable `lon` and `lat` columns to a table. Coordinates are matched
//! on the facility id when the result file carries one; otherwise the result
//! rows are taken to be in submission order. The table never gains or loses
//! rows.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::algorithm::geo::exchange::Coordinates;
use crate::error::Result;
use crate::utils::arrow::{append_columns, int64_values};
use crate::utils::logging::log_warning;

/// Name of the longitude column of the joined table
pub const LON_COLUMN: &str = "lon";
/// Name of the latitude column of the joined table
pub const LAT_COLUMN: &str = "lat";

type LonLat = (Option<f64>, Option<f64>);

/// Coordinates of each table row, matched on id
fn by_id(table_ids: &[Option<i64>], result_ids: &[Option<i64>], coords: &Coordinates) -> Vec<LonLat> {
    let mut lookup: FxHashMap<i64, LonLat> = FxHashMap::default();
    for (k, id) in result_ids.iter().enumerate() {
        if let Some(id) = id {
            lookup.entry(*id).or_insert((coords.lon[k], coords.lat[k]));
        }
    }

    let matched = table_ids
        .iter()
        .filter(|id| id.is_some_and(|id| lookup.contains_key(&id)))
        .count();
    if matched < table_ids.len() {
        log_warning(
            &format!(
                "{} of {} facilities have no geocoding result",
                table_ids.len() - matched,
                table_ids.len()
            ),
            None,
        );
    }

    table_ids
        .iter()
        .map(|id| id.and_then(|id| lookup.get(&id).copied()).unwrap_or((None, None)))
        .collect()
}

/// Coordinates of each table row, matched on position
fn by_position(rows: usize, coords: &Coordinates) -> Vec<LonLat> {
    log_warning(
        "Geocoding result has no id column, joining coordinates by row position",
        None,
    );
    if coords.len() != rows {
        log_warning(
            &format!(
                "Geocoding result has {} rows, table has {rows}; coordinates may be misaligned",
                coords.len()
            ),
            None,
        );
    }

    (0..rows)
        .map(|k| {
            (
                coords.lon.get(k).copied().flatten(),
                coords.lat.get(k).copied().flatten(),
            )
        })
        .collect()
}

fn coordinate_column(name: &str, values: impl Iterator<Item = Option<f64>>) -> (Field, ArrayRef) {
    let array: Float64Array = values.collect();
    (Field::new(name, DataType::Float64, true), Arc::new(array) as ArrayRef)
}

/// Append `lon` and `lat` to a table
///
/// # Arguments
/// * `batch` - Table with an `Int64` `id` column when joining on id
/// * `coordinates` - Geocoding result, `None` when no result file exists
///
/// # Returns
/// The table with two more columns, null wherever no coordinate is known
///
/// # Errors
/// Returns an error if an id join is needed and the table has no usable id column
pub fn join_coordinates(batch: &RecordBatch, coordinates: Option<&Coordinates>) -> Result<RecordBatch> {
    let rows = batch.num_rows();

    let values: Vec<LonLat> = match coordinates {
        None => vec![(None, None); rows],
        Some(coords) => match &coords.ids {
            Some(result_ids) => by_id(&int64_values(batch, "id")?, result_ids, coords),
            None => by_position(rows, coords),
        },
    };

    append_columns(
        batch,
        vec![
            coordinate_column(LON_COLUMN, values.iter().map(|v| v.0)),
            coordinate_column(LAT_COLUMN, values.iter().map(|v| v.1)),
        ],
    )
}
