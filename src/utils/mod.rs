// pixconv/src/utils/mod.rs
use crate::core::{ConvertError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Mirrors `input_path` from under `input_dir` to under `output_dir`, with the
/// extension replaced by `format`.
///
/// Always derived from the caller's output root, never from a previous result.
pub fn map_output_path(
    input_path: &Path,
    input_dir: &Path,
    output_dir: &Path,
    format: &str,
) -> Result<PathBuf> {
    let relative = input_path.strip_prefix(input_dir).map_err(|_| {
        ConvertError::InvalidPath(format!(
            "{} is not under {}",
            input_path.display(),
            input_dir.display()
        ))
    })?;

    if relative.file_name().is_none() {
        return Err(ConvertError::InvalidPath(format!(
            "Invalid file name: {}",
            input_path.display()
        )));
    }

    Ok(output_dir.join(relative).with_extension(format))
}

/// Names starting with a dot are treated as hidden.
pub fn is_hidden(name: &OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}

/// A candidate file must look like `name.ext`.
pub fn has_extension(path: &Path) -> bool {
    path.extension().map(|ext| !ext.is_empty()).unwrap_or(false)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_nested_path_and_replaces_extension() {
        let out = map_output_path(
            Path::new("in/a/b/photo.jpg"),
            Path::new("in"),
            Path::new("out"),
            "png",
        )
        .unwrap();

        assert_eq!(out, PathBuf::from("out/a/b/photo.png"));
    }

    #[test]
    fn only_last_extension_is_replaced() {
        let out = map_output_path(
            Path::new("in/scan.v2.TIFF"),
            Path::new("in"),
            Path::new("out"),
            "jpg",
        )
        .unwrap();

        assert_eq!(out, PathBuf::from("out/scan.v2.jpg"));
    }

    #[test]
    fn successive_files_share_the_output_root() {
        let root = Path::new("out");
        let first = map_output_path(Path::new("in/x/deep/a.bmp"), Path::new("in"), root, "png").unwrap();
        let second = map_output_path(Path::new("in/b.bmp"), Path::new("in"), root, "png").unwrap();

        assert_eq!(first, PathBuf::from("out/x/deep/a.png"));
        assert_eq!(second, PathBuf::from("out/b.png"));
    }

    #[test]
    fn rejects_paths_outside_input_dir() {
        let result = map_output_path(
            Path::new("elsewhere/a.png"),
            Path::new("in"),
            Path::new("out"),
            "png",
        );

        assert!(matches!(result, Err(ConvertError::InvalidPath(_))));
    }

    #[test]
    fn hidden_and_extension_checks() {
        assert!(is_hidden(OsStr::new(".git")));
        assert!(!is_hidden(OsStr::new("photo.jpg")));
        assert!(has_extension(Path::new("photo.jpg")));
        assert!(!has_extension(Path::new("README")));
        assert!(!has_extension(Path::new(".bashrc")));
    }

    #[test]
    fn file_sizes_are_human_readable() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.00 B");
        assert_eq!(format_file_size(2048), "2.00 KB");
    }
}
