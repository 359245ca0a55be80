//! Pipeline stage implementations
//!
//! Each submodule is one stage of the facility registry pipeline, in data-flow
//! order: row repair, consolidation, department parsing, taxonomy
//! classification and the geocoding exchange.

pub mod classification;
pub mod consolidate;
pub mod department;
pub mod geo;
pub mod repair;
