//! Classified facility models
//!
//! Output of the department parser and the taxonomy classifier, kept
//! alongside the consolidated [`FacilityRecord`].

use serde::{Deserialize, Serialize};

use crate::models::facility::FacilityRecord;

/// A `label:beds` annotation found in a department field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedAnnotation {
    /// Text in front of the colon (ward type or department)
    pub label: String,
    /// Number of beds
    pub beds: u64,
}

/// Parsed department field of one facility
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentList {
    /// Department mentions with bed counts removed, in field order
    pub department_tokens: Vec<String>,
    /// Every `label:beds` annotation in field order
    pub bed_annotations: Vec<BedAnnotation>,
    /// Sum of every numeric annotation in the field
    pub bed_total: u64,
}

impl DepartmentList {
    /// Whether the field produced no department mentions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.department_tokens.is_empty()
    }
}

/// Specialty flags of one facility, indexed by taxonomy position
///
/// Flags only ever go from unset to set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialtyFlags {
    flags: Vec<bool>,
}

impl SpecialtyFlags {
    /// All flags unset for a taxonomy of `len` specialties
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            flags: vec![false; len],
        }
    }

    /// Set the flag at a taxonomy position
    ///
    /// # Panics
    /// Panics if `index` is outside the taxonomy
    pub fn set(&mut self, index: usize) {
        self.flags[index] = true;
    }

    /// Whether the flag at a taxonomy position is set
    #[must_use]
    pub fn is_set(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Number of taxonomy positions
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the taxonomy is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of flags set
    #[must_use]
    pub fn count_set(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// Taxonomy positions whose flag is set, ascending
    pub fn set_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.then_some(i))
    }
}

/// Facility with parsed departments and specialty flags
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFacility {
    /// Consolidated record
    pub record: FacilityRecord,
    /// Parsed department field
    pub departments: DepartmentList,
    /// Specialty flags for the taxonomy used
    pub specialties: SpecialtyFlags,
}
