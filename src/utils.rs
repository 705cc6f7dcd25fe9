/// Utility functions shared by the pipeline stages
///
/// Size formatting, ratio arithmetic and progress bar construction live here
/// so that the scan, stage and report steps print sizes the same way.
use crate::constants::{PROGRESS_BAR_TEMPLATE, SIZE_STEP, SIZE_UNITS};
use indicatif::{ProgressBar, ProgressStyle};

/// Rounds to 2 decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format file size in human-readable format
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Size in the largest unit of `b`, `k`, `m`, `g` where the value is at least 1,
///   rounded to 2 decimals (e.g. "1023 b", "1.5 k", "5 g")
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= SIZE_STEP && unit_index < SIZE_UNITS.len() - 1 {
        size /= SIZE_STEP;
        unit_index += 1;
    }

    format!("{} {}", round2(size), SIZE_UNITS[unit_index])
}

/// Ratio of the new total to the original total, rounded to 2 decimals.
///
/// Returns `None` when the original total is zero, where the ratio is undefined.
pub fn compression_ratio(original_total: u64, new_total: u64) -> Option<f64> {
    if original_total == 0 {
        return None;
    }
    Some(round2(new_total as f64 / original_total as f64))
}

/// Renders an optional ratio, using "n/a" for the undefined case.
pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => r.to_string(),
        None => "n/a".to_string(),
    }
}

/// Create a progress bar with consistent styling
///
/// The bar is hidden when the logger runs in quiet mode.
pub fn create_progress_bar(len: u64) -> ProgressBar {
    if !crate::logger::progress_visible() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
