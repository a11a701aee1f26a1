use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::SuffixRule;

pub const DEFAULT_TARGET_EXTENSION: &str = "jsx";
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Directory names never descended into unless configuration overrides.
pub fn default_excluded_dirs() -> Vec<String> {
    ["node_modules", ".git", "dist", "target", "bower_components"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Fully resolved runtime configuration for one pipeline run. No secrets:
/// the converter API key is read from the environment at client
/// construction, never from this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PorterConfig {
    pub scan: ScanConfig,
    pub classify: ClassifyConfig,
    pub output: OutputConfig,
    pub convert: ConvertConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root of the source project tree.
    pub root: PathBuf,
    pub excluded_dirs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Extra suffix→subkind rules, consulted before the default table.
    pub suffix_rules: Vec<SuffixRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root the writer resolves target-relative paths under.
    pub root: PathBuf,
    /// Extension for converted definition files.
    pub target_extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Conversion service endpoint. Required for `migrate`, unused for
    /// inventory-only runs.
    pub endpoint: Option<String>,
    /// Maximum in-flight conversion calls.
    pub concurrency: usize,
}

impl PorterConfig {
    pub fn trace_loaded(&self) {
        info!(
            scan_root = %self.scan.root.display(),
            output_root = %self.output.root.display(),
            excluded_dirs = self.scan.excluded_dirs.len(),
            extra_suffix_rules = self.classify.suffix_rules.len(),
            concurrency = self.convert.concurrency,
            "Loaded PorterConfig"
        );
        debug!(?self, "PorterConfig loaded (full debug)");
    }
}
