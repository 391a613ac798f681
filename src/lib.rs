mod cli;
mod core;
mod processors;
mod utils;

pub use cli::Cli;
pub use crate::core::processor::ImageConverter;
pub use crate::core::{
    BatchSummary, ConversionJob, ConversionStatus, ConvertConfig, ConvertError, OutputFormat,
    Result,
};
pub use processors::{
    failure_message, status_line, BatchProcessor, Compressor, Loader, Reporter, Resizer,
};
pub use utils::{format_file_size, map_output_path};
