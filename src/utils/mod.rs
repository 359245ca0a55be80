//! Shared utilities: Arrow helpers, file formats and logging

pub mod arrow;
pub mod io;
pub mod logging;
