use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline errors. Everything else in the error taxonomy degrades to
/// a warning (skipped file) or a per-item tagged outcome in the report.
#[derive(Debug, Error)]
pub enum PorterError {
    #[error("scan root is not accessible: {path}: {source}")]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PorterError>;
