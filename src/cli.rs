use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::convert::LlmConverter;
use crate::load_config::load_config;
use crate::migrate::{build_project_inventory, migrate};
use crate::write::FsWriter;

/// CLI for llm-porter: classify, group and port UI-framework source trees.
#[derive(Parser)]
#[clap(
    name = "llm-porter",
    version,
    about = "Classify and group a UI-framework source tree and port each logical unit to a target framework via an LLM conversion service"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full migration pipeline using the given config file
    Migrate {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
    /// Scan, classify and group only; print the inventory as JSON
    Inventory {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Migrate { config } => {
            let config = load_config(config)?;
            let endpoint = config
                .convert
                .endpoint
                .clone()
                .ok_or_else(|| anyhow::anyhow!("convert.endpoint must be set to run migrate"))?;
            let converter = LlmConverter::new_from_env(endpoint)
                .map_err(|e| anyhow::anyhow!("Failed to construct converter: {e}"))?;
            let writer = FsWriter::new(config.output.root.clone());

            println!("Migration starting...");
            match migrate(&config, &converter, &writer, None).await {
                Ok(report) => {
                    println!("Migration complete.\nReport:");
                    println!("{report:#?}");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("[ERROR] Migration failed: {e}");
                    Err(anyhow::Error::new(e))
                }
            }
        }
        Commands::Inventory { config } => {
            let config = load_config(config)?;
            let inventory = build_project_inventory(&config)?;
            println!("{}", serde_json::to_string_pretty(&inventory)?);
            Ok(())
        }
    }
}
