//! Parquet table files
//!
//! Every stage reads one complete table and writes one complete table. Typed
//! records go through `serde_arrow`; wider tables assembled column by column
//! are written as plain record batches.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PipelineError, Result};
use crate::utils::arrow::{batch_to_records, records_to_batch};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Create the parent directory of an output file
fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Write a record batch to a Parquet file, replacing any existing file
///
/// # Errors
/// Returns an error if the file cannot be created or written
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let start = Instant::now();
    ensure_parent(path)?;

    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}

/// Read a whole Parquet file into a single record batch
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid Parquet
pub fn read_parquet(path: &Path) -> Result<RecordBatch> {
    let start = Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let batches = builder
        .build()?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;

    log_operation_complete("read", path, batch.num_rows(), Some(start.elapsed()));
    Ok(batch)
}

/// Serialize typed records into a Parquet file
///
/// # Errors
/// Returns an error if the records cannot be converted or the file written
pub fn write_records<T: Serialize + DeserializeOwned>(path: &Path, records: &[T]) -> Result<()> {
    let batch = records_to_batch(records)?;
    write_parquet(path, &batch)
}

/// Read typed records from a Parquet file
///
/// # Errors
/// Returns an error if the file cannot be read or its columns do not match `T`
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let batch = read_parquet(path)?;
    batch_to_records(&batch)
}

/// Parquet files in a directory, sorted by file name
///
/// # Errors
/// Returns an error if the directory cannot be listed
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for parquet files in", dir);

    let entries = std::fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;
    let files = entries
        .map(|entry| entry.map(|e| e.path()).map_err(|e| PipelineError::io(dir, e)))
        .filter_ok(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "parquet"))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    if files.is_empty() {
        log_warning("No Parquet files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, files.len(), None);
    }
    Ok(files)
}
