//! Parallel classification
//!
//! Classification of one facility depends only on its own tokens, so the
//! department lists are split across a Rayon pool. Results come back in
//! input order and are identical to the sequential path.

use log::info;
use rayon::prelude::*;

use crate::algorithm::classification::classifier::SimilarityIndex;
use crate::error::{PipelineError, Result};
use crate::models::{DepartmentList, SpecialtyFlags};
use crate::utils::logging::progress;

/// Classify department lists on a dedicated thread pool, preserving input order
///
/// # Errors
/// Returns an error if the thread pool cannot be created
pub fn classify_parallel(
    index: &SimilarityIndex,
    lists: &[DepartmentList],
    num_threads: usize,
) -> Result<Vec<SpecialtyFlags>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads.max(1))
        .build()
        .map_err(|e| PipelineError::Config(format!("failed to build thread pool: {e}")))?;

    info!(
        "Using parallel classification with {} threads for {} facilities",
        pool.current_num_threads(),
        lists.len()
    );

    let pb = progress::create_main_progress_bar(lists.len() as u64, Some("Classifying departments"));

    let flags = pool.install(|| {
        lists
            .par_iter()
            .map(|list| {
                let flags = index.classify_tokens(list.department_tokens.as_slice());
                pb.inc(1);
                flags
            })
            .collect()
    });

    progress::finish_progress_bar(&pb, Some("Classification complete"));
    Ok(flags)
}
