//! Progress feedback for directory scans.
//!
//! Suppressed entirely when --quiet is set, so machine-readable output
//! stays clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for scans with an unknown amount of work.
pub fn spinner(message: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("spinner template is valid"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Progress bar over a known number of directories.
pub fn progress_bar(total: u64, message: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {bar:32.cyan/blue} {pos}/{len}")
            .expect("bar template is valid"),
    );
    pb.set_message(message.to_string());
    Some(pb)
}

/// Finish a spinner with a summary message.
pub fn finish_spinner(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix:.green} {msg}")
                .expect("finish template is valid"),
        );
        pb.set_prefix("✓");
        pb.finish_with_message(message.to_string());
    }
}

/// Clear a finished progress bar.
pub fn finish_progress(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
