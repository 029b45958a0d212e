//! Signal Ingestion
//!
//! Reads one floating-point sample per line from a text source. Lines that
//! do not parse are skipped with a warning instead of aborting the read.

mod error;
mod reader;

pub use error::ReadError;
pub use reader::{read_signal, SampleReader, Signal};
