//! Medical facility registry pipeline.
//!
//! Turns per-region registry spreadsheets into one clean facility table,
//! classifies each facility's free-text department listing against a
//! specialty taxonomy, and joins externally geocoded coordinates.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

// Core types
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::Pipeline;

// Models
pub use models::{
    ClassifiedFacility, DepartmentList, FacilityRecord, RegionRecord, Specialty, SpecialtyFlags,
};

// Stage entry points
pub use algorithm::classification::{Classifier, SimilarityIndex, SpecialtyTaxonomy, similarity};
pub use algorithm::consolidate::consolidate;
pub use algorithm::department::parse_departments;
pub use algorithm::geo::{export_addresses, join_coordinates, read_coordinates};
pub use algorithm::repair::{RawTable, repair_region};

// Arrow types
pub use arrow::record_batch::RecordBatch;
