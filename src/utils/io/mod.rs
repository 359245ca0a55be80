//! File formats read and written by the pipeline
//!
//! Raw region sheets are `.xlsx` and every intermediate and final table is a
//! Parquet file.

pub mod excel;
pub mod parquet;

pub use excel::read_region_sheet;
pub use parquet::{
    find_parquet_files, read_parquet, read_records, write_parquet, write_records,
};
