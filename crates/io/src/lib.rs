//! # cdi-io
//!
//! Reads gridded inputs from a directory of JSON files and writes
//! indicator results as JSON. Bridges on-disk data into the
//! [`Retriever`](cdi_components::Retriever) seam used by the components.

mod error;
mod reader;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::{JsonRetriever, read_variable};
pub use writer::{OutputFormat, WriteOutcome, WriterConfig, output_file_name, write_json};
