//! Column-level helpers for widening record batches

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::{PipelineError, Result};

/// Get a column by name
///
/// # Errors
/// Returns [`PipelineError::MissingColumn`] if the batch has no such column
pub fn get_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
}

/// Values of an `Int64` column, nulls as `None`
///
/// # Errors
/// Returns an error if the column is missing or not `Int64`
pub fn int64_values(batch: &RecordBatch, name: &str) -> Result<Vec<Option<i64>>> {
    let column = get_column(batch, name)?;
    let values = column
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| {
            PipelineError::Validation(format!(
                "column '{name}' has type {}, expected Int64",
                column.data_type()
            ))
        })?;
    Ok(values.iter().collect())
}

/// Non-nullable Boolean column
#[must_use]
pub fn boolean_column(name: &str, values: impl IntoIterator<Item = bool>) -> (Field, ArrayRef) {
    let array: BooleanArray = values.into_iter().map(Some).collect();
    (
        Field::new(name, arrow::datatypes::DataType::Boolean, false),
        Arc::new(array) as ArrayRef,
    )
}

/// Append columns to the right of a batch
///
/// # Errors
/// Returns an error if a column length differs from the batch row count
pub fn append_columns(batch: &RecordBatch, columns: Vec<(Field, ArrayRef)>) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut arrays: Vec<ArrayRef> = batch.columns().to_vec();

    for (field, array) in columns {
        if array.len() != batch.num_rows() {
            return Err(PipelineError::Validation(format!(
                "column '{}' has {} rows, table has {}",
                field.name(),
                array.len(),
                batch.num_rows()
            )));
        }
        fields.push(field);
        arrays.push(array);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}
