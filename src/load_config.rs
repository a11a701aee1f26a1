use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{error, info};

use crate::classify::SuffixRule;
use crate::config::{
    default_excluded_dirs, ClassifyConfig, ConvertConfig, OutputConfig, PorterConfig, ScanConfig,
    DEFAULT_CONCURRENCY, DEFAULT_TARGET_EXTENSION,
};

/// Static YAML file shape. Optional sections fall back to defaults when
/// merged into the runtime config; secrets never appear here.
#[derive(Deserialize)]
struct StaticConfig {
    scan: ScanSection,
    #[serde(default)]
    classify: ClassifySection,
    output: OutputSection,
    #[serde(default)]
    convert: ConvertSection,
}

#[derive(Deserialize)]
struct ScanSection {
    root: std::path::PathBuf,
    #[serde(default)]
    excluded_dirs: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
struct ClassifySection {
    #[serde(default)]
    suffix_rules: Vec<SuffixRule>,
}

#[derive(Deserialize)]
struct OutputSection {
    root: std::path::PathBuf,
    #[serde(default)]
    target_extension: Option<String>,
}

#[derive(Deserialize, Default)]
struct ConvertSection {
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    concurrency: Option<usize>,
}

/// Load a static YAML config file and merge defaults into a full
/// `PorterConfig`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PorterConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read config file {:?}", path_ref))?;

    let static_conf: StaticConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let config = PorterConfig {
        scan: ScanConfig {
            root: static_conf.scan.root,
            excluded_dirs: static_conf
                .scan
                .excluded_dirs
                .unwrap_or_else(default_excluded_dirs),
        },
        classify: ClassifyConfig {
            suffix_rules: static_conf.classify.suffix_rules,
        },
        output: OutputConfig {
            root: static_conf.output.root,
            target_extension: static_conf
                .output
                .target_extension
                .unwrap_or_else(|| DEFAULT_TARGET_EXTENSION.to_string()),
        },
        convert: ConvertConfig {
            endpoint: static_conf.convert.endpoint,
            concurrency: static_conf
                .convert
                .concurrency
                .unwrap_or(DEFAULT_CONCURRENCY),
        },
    };

    config.trace_loaded();
    Ok(config)
}
