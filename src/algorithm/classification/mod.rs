//! Department taxonomy classification
//!
//! This module maps free-text department mentions onto the specialty
//! taxonomy. It includes:
//!
//! 1. The Ratcliff/Obershelp similarity ratio
//! 2. The specialty taxonomy with unique codes
//! 3. The tie-aware classifier with sequential and parallel paths
//! 4. The classified table layout

pub mod classifier;
pub mod output;
pub mod parallel;
pub mod sequential;
pub mod similarity;
pub mod taxonomy;

pub use classifier::{Classifier, SimilarityIndex, TokenMatch};
pub use output::classified_batch;
pub use similarity::{PreparedName, similarity};
pub use taxonomy::{SpecialtyTaxonomy, TaxonomyEntry};
