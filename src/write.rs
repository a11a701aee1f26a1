//! Reference [`Writer`] implementation: persists converted artifacts under
//! an output root with idempotent overwrite semantics.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::contract::{CollaboratorError, Writer};

pub struct FsWriter {
    output_root: PathBuf,
}

impl FsWriter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }
}

#[async_trait]
impl Writer for FsWriter {
    async fn write(&self, relative_path: &Path, content: &str) -> Result<(), CollaboratorError> {
        let full_path = self.output_root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        debug!(path = %full_path.display(), bytes = content.len(), "Wrote converted file");
        Ok(())
    }
}
