//! Typed records to and from record batches via `serde_arrow`

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::Result;

/// Convert records into a record batch with a schema traced from `T`
///
/// The schema comes from the type rather than from samples, so an empty slice
/// still produces every column.
///
/// # Errors
/// Returns an error if `T` cannot be represented as Arrow columns
pub fn records_to_batch<T: Serialize + DeserializeOwned>(records: &[T]) -> Result<RecordBatch> {
    let fields = Vec::<FieldRef>::from_type::<T>(TracingOptions::default())?;
    Ok(serde_arrow::to_record_batch(&fields, &records)?)
}

/// Convert a record batch back into typed records
///
/// # Errors
/// Returns an error if the batch columns do not match the fields of `T`
pub fn batch_to_records<T: DeserializeOwned>(batch: &RecordBatch) -> Result<Vec<T>> {
    Ok(serde_arrow::from_record_batch(batch)?)
}
