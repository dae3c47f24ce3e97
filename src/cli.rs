use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::format::{SortKey, SortOptions, SortOrder};
use crate::load_config::load_config;
use crate::store::{build_store, GetImagesOptions};

/// CLI for gallery-source: emit gallery data as JSON for a static site build.
#[derive(Parser)]
#[clap(
    name = "gallery-source",
    version,
    about = "Aggregate Immich or Cloudinary albums into gallery image data for static site builds"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the gallery image list as JSON
    Images {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Only images from this collection (case-insensitive)
        #[clap(long)]
        collection: Option<String>,
        #[clap(long, value_enum)]
        sort_by: Option<SortKey>,
        #[clap(long, value_enum, default_value_t = SortOrder::Asc)]
        order: SortOrder,
    },
    /// Print the collection list as JSON
    Collections {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Collection names to leave out (repeatable, case-insensitive)
        #[clap(long)]
        exclude: Vec<String>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Images {
            config,
            collection,
            sort_by,
            order,
        } => {
            let config = load_config(config)?;
            let store = build_store(&config);
            let options = GetImagesOptions {
                collection,
                sort: SortOptions { sort_by, order },
            };
            let images = store.get_images(&options).await?;
            tracing::info!(count = images.len(), "Gallery images ready");
            println!("{}", serde_json::to_string_pretty(&images)?);
        }
        Commands::Collections { config, exclude } => {
            let config = load_config(config)?;
            let store = build_store(&config);
            let collections = store.get_collections(&exclude).await?;
            tracing::info!(count = collections.len(), "Collections ready");
            println!("{}", serde_json::to_string_pretty(&collections)?);
        }
    }
    Ok(())
}
