//! Progress reporting for long-running loops
//!
//! Thin wrappers over indicatif so every stage draws its bars the same way.
//! Bars draw to stderr and hide themselves when it is not a terminal.

use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Template of a main progress bar
pub const DEFAULT_MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Template of a group progress bar
pub const DEFAULT_GROUP_TEMPLATE: &str =
    "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// Template of a spinner
const SPINNER_TEMPLATE: &str = "{spinner:.green} {elapsed_precise} {msg}";

/// Bar style for a template, falling back to the plain indicatif bar
fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn styled_bar(length: u64, template: &str, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(bar_style(template));
    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }
    pb
}

/// Create a main progress bar
///
/// # Arguments
/// * `length` - Total number of steps
/// * `description` - Optional initial message
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    styled_bar(length, DEFAULT_MAIN_TEMPLATE, description)
}

/// Create a multi-progress setup with a main progress bar
///
/// # Returns
/// The `MultiProgress` instance and its main `ProgressBar`
#[must_use]
pub fn create_multi_progress(total: u64, description: Option<&str>) -> (MultiProgress, ProgressBar) {
    let mp = MultiProgress::new();
    let main_pb = mp.add(create_main_progress_bar(total, description));
    (mp, main_pb)
}

/// Add a group progress bar below the bars already in `mp`
#[must_use]
pub fn add_group_progress_bar(mp: &MultiProgress, length: u64, description: Option<&str>) -> ProgressBar {
    mp.add(styled_bar(length, DEFAULT_GROUP_TEMPLATE, description))
}

/// Create a spinner for operations without a known length
#[must_use]
pub fn create_spinner(message: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    if let Some(msg) = message {
        pb.set_message(msg.to_string());
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar, optionally replacing its message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    match message {
        Some(msg) => pb.finish_with_message(msg.to_string()),
        None => pb.finish(),
    }
}
