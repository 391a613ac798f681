// pixconv/src/processors/batch.rs
use crate::core::processor::ImageConverter;
use crate::core::{BatchSummary, ConversionJob, ConversionStatus, ConvertConfig, Result};
use crate::processors::Reporter;
use crate::utils::{has_extension, is_hidden};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub struct BatchProcessor {
    config: ConvertConfig,
    converter: ImageConverter,
}

impl BatchProcessor {
    pub fn new(config: ConvertConfig) -> Self {
        let converter = ImageConverter::new(config.optimize_png);
        Self { config, converter }
    }

    /// Converts every candidate file in order. Only precondition failures return `Err`.
    pub fn run(&self) -> Result<BatchSummary> {
        let format = self.config.validate()?;

        if self.config.mode != "RGB" {
            log::debug!("Color mode {} is accepted but not applied", self.config.mode);
        }

        std::fs::create_dir_all(&self.config.output_dir)?;

        let input_paths = self.collect_input_paths(&self.config.input_dir, self.config.recursive)?;

        if input_paths.is_empty() {
            log::warn!("No files found in {}", self.config.input_dir.display());
            return Ok(BatchSummary::default());
        }

        log::info!(
            "Converting {} files from {} to {}",
            input_paths.len(),
            self.config.input_dir.display(),
            self.config.output_dir.display()
        );

        let reporter = Reporter::new(input_paths.len(), &self.config.format);
        let mut summary = BatchSummary::default();

        for input_path in &input_paths {
            let status = match ConversionJob::new(input_path, &self.config, format) {
                Ok(job) => {
                    let status = self.converter.convert(&job);
                    reporter.report(&job, &status);
                    status
                }
                Err(e) => {
                    reporter.report_failure(input_path, &e);
                    ConversionStatus::Failed(e)
                }
            };
            summary.record(&status);
        }

        reporter.finish();

        log::info!(
            "Batch finished: {} converted, {} skipped, {} failed",
            summary.converted,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    /// Lists `name.ext` files under `input_dir`, descending only when `recursive`.
    pub fn collect_input_paths(&self, input_dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        let walker = if recursive {
            WalkDir::new(input_dir).follow_links(true)
        } else {
            WalkDir::new(input_dir).follow_links(true).max_depth(1)
        };

        let mut paths = Vec::new();
        for entry in walker
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    log::warn!("Cannot read directory entry: {}", e);
                    continue;
                }
            };

            if is_candidate(&entry) {
                paths.push(entry.into_path());
            }
        }

        Ok(paths)
    }
}

fn is_candidate(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && has_extension(entry.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn flat_listing_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("top.jpg"));
        touch(&dir.path().join("sub/nested.jpg"));

        let processor = BatchProcessor::new(ConvertConfig::default());
        let paths = processor.collect_input_paths(dir.path(), false).unwrap();

        assert_eq!(paths, vec![dir.path().join("top.jpg")]);
    }

    #[test]
    fn recursive_listing_finds_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("top.jpg"));
        touch(&dir.path().join("sub/deeper/nested.png"));

        let processor = BatchProcessor::new(ConvertConfig::default());
        let paths = processor.collect_input_paths(dir.path(), true).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&dir.path().join("sub/deeper/nested.png")));
    }

    #[test]
    fn hidden_and_extensionless_entries_are_not_candidates() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("README"));
        touch(&dir.path().join(".hidden.png"));
        touch(&dir.path().join(".cache/inside.png"));
        touch(&dir.path().join("keep.gif"));

        let processor = BatchProcessor::new(ConvertConfig::default());
        let paths = processor.collect_input_paths(dir.path(), true).unwrap();

        assert_eq!(paths, vec![dir.path().join("keep.gif")]);
    }
}
