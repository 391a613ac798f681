// pixconv/src/cli.rs
use crate::core::ConvertConfig;
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Convert images to a specific format
#[derive(Parser, Debug)]
#[command(name = "pixconv", version, about, long_about = None)]
pub struct Cli {
    /// Input directory
    #[arg(long = "input_dir", value_name = "DIR", default_value = "input")]
    pub input_dir: PathBuf,

    /// Output directory, mirrored from the input tree
    #[arg(long = "output_dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Output format, also used as the output file extension
    #[arg(long, default_value = "png")]
    pub format: String,

    /// Output quality, clamped to 0-100
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub quality: i64,

    /// Edge length of the square output; 0 uses the larger source dimension
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub size: i64,

    /// Color mode (currently not applied)
    #[arg(long, default_value = "RGB")]
    pub mode: String,

    /// Descend into subdirectories
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = FalseyValueParser::new()
    )]
    pub recursive: bool,

    /// Replace output files that already exist
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = FalseyValueParser::new()
    )]
    pub overwrite: bool,

    /// Losslessly recompress PNG output with oxipng
    #[arg(
        long = "optimize_png",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = FalseyValueParser::new()
    )]
    pub optimize_png: bool,
}

impl Cli {
    /// Clamps numeric flags and normalizes the format name. Never fails.
    pub fn into_config(self) -> ConvertConfig {
        ConvertConfig {
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            format: self.format.to_lowercase(),
            quality: self.quality.clamp(0, 100) as u8,
            size: self.size.clamp(0, u32::MAX as i64) as u32,
            mode: self.mode,
            recursive: self.recursive,
            overwrite: self.overwrite,
            optimize_png: self.optimize_png,
        }
    }
}
