//! NDP Pipeline - Netflix catalog dataset batch tool

use anyhow::Result;
use clap::{Parser, Subcommand};
use ndp_common::logging::{init_logging, LogConfig, LogLevel};
use ndp_pipeline::{
    DatasetSource, KaggleClient, KaggleCredentials, Pipeline, PipelineConfig, TitleSchema,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ndp-pipeline")]
#[command(author, version, about = "Netflix catalog dataset pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full pipeline: fetch, clean, transform, save
    Run {
        /// Dataset slug, owner/name
        #[arg(long)]
        dataset: Option<String>,

        /// Local data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output file (relative paths land in the data directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Download and extract the raw dataset only
    Fetch {
        /// Dataset slug, owner/name
        #[arg(long)]
        dataset: Option<String>,

        /// Local data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Clean, transform, and save an already-downloaded raw file
    Process {
        /// Raw input file (relative paths resolve in the data directory)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output file (relative paths land in the data directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env().unwrap_or_else(|_| {
        LogConfig::builder().log_file_prefix("ndp-pipeline").build()
    });
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }
    init_logging(&log_config)?;

    let config = PipelineConfig::from_env();
    let schema = TitleSchema::current();

    match cli.command {
        Commands::Run {
            dataset,
            data_dir,
            output,
        } => {
            let mut config = config;
            if let Some(dataset) = dataset {
                config.dataset = dataset;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            if let Some(output) = output {
                config.output_filename = output.to_string_lossy().into_owned();
            }
            config.validate().map_err(anyhow::Error::msg)?;

            let pipeline = Pipeline::with_kaggle(config, schema)?;
            let stats = pipeline.run().await?;
            info!(
                "Run finished: {} raw, {} cleaned, {} written to {}",
                stats.rows_read,
                stats.rows_cleaned,
                stats.rows_transformed,
                pipeline.config().output_path().display()
            );
        },
        Commands::Fetch { dataset, data_dir } => {
            let mut config = config;
            if let Some(dataset) = dataset {
                config.dataset = dataset;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            config.validate().map_err(anyhow::Error::msg)?;

            let credentials = KaggleCredentials::from_env()?;
            let client = KaggleClient::new(&config, credentials)?;
            client.fetch(&config.dataset, &config.data_dir).await?;
            info!("Dataset saved in {}", config.data_dir.display());
        },
        Commands::Process { input, output } => {
            let mut config = config;
            if let Some(input) = input {
                config.raw_filename = input.to_string_lossy().into_owned();
            }
            if let Some(output) = output {
                config.output_filename = output.to_string_lossy().into_owned();
            }
            config.validate().map_err(anyhow::Error::msg)?;

            let pipeline = Pipeline::offline(config, schema);
            let stats = pipeline.process()?;
            info!(
                "Process finished: {} raw, {} cleaned, {} written to {}",
                stats.rows_read,
                stats.rows_cleaned,
                stats.rows_transformed,
                pipeline.config().output_path().display()
            );
        },
    }

    Ok(())
}
