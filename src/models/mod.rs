//! Data models for the facility registry pipeline
//!
//! Region rows, consolidated facility records, classified facilities and the
//! static reference sets (specialties, status and reason indicators).

pub mod classified;
pub mod facility;
pub mod indicators;
pub mod region;
pub mod specialty;

pub use classified::{BedAnnotation, ClassifiedFacility, DepartmentList, SpecialtyFlags};
pub use facility::{EraDate, FacilityRecord};
pub use indicators::{ReasonFlag, StatusFlag};
pub use region::{PLACEHOLDER, RegionRecord, prefecture_name};
pub use specialty::Specialty;
