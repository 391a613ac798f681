// pixconv/src/processors/reporter.rs
use crate::core::{ConversionJob, ConversionStatus, ConvertError};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Prints one status line per job while a progress bar tracks the batch.
pub struct Reporter {
    progress: ProgressBar,
    format: String,
}

impl Reporter {
    pub fn new(total: usize, format: &str) -> Self {
        let progress = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            progress.set_style(style.progress_chars("#>-"));
        }

        Self {
            progress,
            format: format.to_string(),
        }
    }

    /// Output goes through `suspend` so neither stdout lines nor stderr logs tear the bar.
    pub fn report(&self, job: &ConversionJob, status: &ConversionStatus) {
        match status {
            ConversionStatus::Failed(e) => self.report_failure(&job.input_path, e),
            _ => {
                if let Some(line) = status_line(job, status, &self.format) {
                    self.progress.suspend(|| println!("{}", line));
                }
                self.progress.inc(1);
            }
        }
    }

    pub fn report_failure(&self, input_path: &Path, error: &ConvertError) {
        let message = failure_message(input_path, error);
        self.progress.suspend(|| log::error!("{}", message));
        self.progress.inc(1);
    }

    pub fn finish(&self) {
        self.progress.finish_and_clear();
    }
}

pub fn failure_message(input_path: &Path, error: &ConvertError) -> String {
    format!("Failed to convert {}: {}", input_path.display(), error)
}

/// Failures have no stdout line; they are logged at error level instead.
pub fn status_line(job: &ConversionJob, status: &ConversionStatus, format: &str) -> Option<String> {
    match status {
        ConversionStatus::Converted { size } => Some(format!(
            "Converted: {} ({}x{}) (quality: {}) (format: {})",
            job.output_path.display(),
            size,
            size,
            job.quality,
            format
        )),
        ConversionStatus::Skipped => Some(format!(
            "Skipped: {}, already exists",
            job.output_path.display()
        )),
        ConversionStatus::Failed(_) => None,
    }
}
