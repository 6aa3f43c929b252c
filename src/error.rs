use std::path::PathBuf;

use thiserror::Error;

/// The engine only fails outright on I/O problems; every pattern or numeric
/// mismatch inside a job leaves the field unset instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
