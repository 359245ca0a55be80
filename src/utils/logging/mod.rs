//! Logging and progress reporting
//!
//! Uniform log lines for stage start/finish and warnings, plus indicatif
//! progress bars for the long per-record and per-region loops.

pub mod log;
pub mod progress;

pub use log::{log_operation_complete, log_operation_start, log_warning};
pub use progress::{
    add_group_progress_bar, create_main_progress_bar, create_multi_progress, create_spinner,
    finish_progress_bar,
};
