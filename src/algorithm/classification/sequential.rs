//! Sequential classification
//!
//! Classifies department lists one after another on the calling thread.
//! Used for small inputs where spinning up a thread pool costs more than it
//! saves.

use log::info;

use crate::algorithm::classification::classifier::SimilarityIndex;
use crate::models::{DepartmentList, SpecialtyFlags};
use crate::utils::logging::progress;

/// Classify department lists sequentially, preserving input order
pub fn classify_sequential(index: &SimilarityIndex, lists: &[DepartmentList]) -> Vec<SpecialtyFlags> {
    info!("Using sequential classification for {} facilities", lists.len());

    let pb = progress::create_main_progress_bar(lists.len() as u64, Some("Classifying departments"));

    let flags = lists
        .iter()
        .map(|list| {
            let flags = index.classify_tokens(list.department_tokens.as_slice());
            pb.inc(1);
            flags
        })
        .collect();

    progress::finish_progress_bar(&pb, Some("Classification complete"));
    flags
}
