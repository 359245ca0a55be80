//! Arrow record batch helpers
//!
//! Conversion between typed records and record batches, and the column-level
//! operations used to widen a table with derived columns.

pub mod columns;
pub mod conversion;

pub use columns::{append_columns, boolean_column, get_column, int64_values};
pub use conversion::{batch_to_records, records_to_batch};
