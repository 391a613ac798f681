// pixconv/src/processors/mod.rs
mod batch;
mod compressor;
mod loader;
mod reporter;
mod resizer;

pub use batch::BatchProcessor;
pub use compressor::Compressor;
pub use loader::Loader;
pub use reporter::{failure_message, status_line, Reporter};
pub use resizer::Resizer;
