/// Size formatting utilities for human-readable byte counts.
///
/// Build reports give sizes as fractional kb/mb values; they are converted
/// to bytes first and only formatted at the display boundary.

/// Format a byte count for display.
///
/// Uses binary units (KiB = 1024) but labels them with the short forms
/// (KB, MB, GB) the editor's build report uses.
pub fn format_size(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes.max(0.0);
    if b < KB {
        format!("{} B", b.round() as u64)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else {
        format!("{:.2} GB", b / GB)
    }
}

/// Format a percentage with one decimal, as the build report prints it.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}
