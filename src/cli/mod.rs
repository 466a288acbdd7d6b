//! Command-line host for the volume discount function.

use std::io;

use thiserror::Error;
use volume_discount::report::ReportError;

pub mod config;
pub mod logging;

pub use config::CliConfig;

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input document could not be read.
    #[error("failed to read input: {0}")]
    ReadInput(#[source] io::Error),

    /// The output document could not be written.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] io::Error),

    /// The output document could not be serialized.
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The evaluation report could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),
}
