//! Geocoding exchange and coordinate join
//!
//! Geocoding itself happens outside the pipeline: the prepare phase writes an
//! address request, the request is submitted to a geocoding service by hand,
//! and the geo phase joins the returned coordinates onto the classified
//! table.

pub mod exchange;
pub mod join;

pub use exchange::{Coordinates, export_addresses, read_coordinates};
pub use join::{LAT_COLUMN, LON_COLUMN, join_coordinates};
