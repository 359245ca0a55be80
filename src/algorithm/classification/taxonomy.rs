//! Specialty taxonomy
//!
//! An ordered list of `(code, name)` entries. The order is the column order
//! of the specialty flags and the scan order of the classifier.

use rustc_hash::FxHashSet;

use crate::error::{PipelineError, Result};
use crate::models::Specialty;

/// One taxonomy entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    /// Stable code, unique within the taxonomy
    pub code: String,
    /// Canonical department name
    pub name: String,
}

/// Ordered specialty reference list with unique codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialtyTaxonomy {
    entries: Vec<TaxonomyEntry>,
}

impl SpecialtyTaxonomy {
    /// Build a taxonomy from `(code, name)` pairs
    ///
    /// # Errors
    /// Returns an error if the list is empty or a code occurs twice
    pub fn new<I, C, N>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        let entries: Vec<TaxonomyEntry> = entries
            .into_iter()
            .map(|(code, name)| TaxonomyEntry {
                code: code.into(),
                name: name.into(),
            })
            .collect();

        if entries.is_empty() {
            return Err(PipelineError::Taxonomy("taxonomy has no entries".to_string()));
        }

        let mut seen = FxHashSet::default();
        for entry in &entries {
            if !seen.insert(entry.code.as_str()) {
                return Err(PipelineError::Taxonomy(format!(
                    "duplicate specialty code '{}'",
                    entry.code
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The static medical specialty taxonomy
    #[must_use]
    pub fn medical() -> Self {
        Self {
            entries: Specialty::ALL
                .iter()
                .map(|s| TaxonomyEntry {
                    code: s.code().to_string(),
                    name: s.display_name().to_string(),
                })
                .collect(),
        }
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the taxonomy has no entries (never true for a constructed taxonomy)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order
    #[must_use]
    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    /// Entry at a position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TaxonomyEntry> {
        self.entries.get(index)
    }

    /// Position of a code
    #[must_use]
    pub fn position(&self, code: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.code == code)
    }
}

impl Default for SpecialtyTaxonomy {
    fn default() -> Self {
        Self::medical()
    }
}
