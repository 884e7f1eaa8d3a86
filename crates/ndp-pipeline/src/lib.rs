//! NDP Pipeline Library
//!
//! A batch pipeline for the public Netflix catalog dataset hosted on Kaggle:
//! fetch the raw archive, clean out incomplete rows, reshape the columns to
//! the catalog schema, and write the result as CSV.
//!
//! Stages run in strict sequence; any stage failure aborts the run:
//!
//! 1. **Fetch** ([`downloader`]): authenticate with Kaggle credentials from
//!    the environment, download the dataset archive, extract it locally.
//! 2. **Clean** ([`clean`]): validate the raw header, drop rows with missing
//!    required values, drop irrelevant columns.
//! 3. **Transform** ([`transform`]): rename columns, derive the single-genre
//!    column, coerce the release year to an integer.
//! 4. **Save** ([`pipeline`]): write the final table to the output CSV.
//!
//! # Example
//!
//! ```no_run
//! use ndp_pipeline::{Pipeline, PipelineConfig, TitleSchema};
//!
//! fn main() -> ndp_pipeline::Result<()> {
//!     // Reprocess an already-downloaded raw file, no network required
//!     let pipeline = Pipeline::offline(PipelineConfig::default(), TitleSchema::current());
//!     let stats = pipeline.process()?;
//!     println!("wrote {} rows", stats.rows_transformed);
//!     Ok(())
//! }
//! ```

pub mod clean;
pub mod config;
pub mod downloader;
pub mod pipeline;
pub mod schema;
pub mod table;
pub mod transform;

// Re-export main types
pub use config::PipelineConfig;
pub use downloader::{DatasetSource, KaggleClient, KaggleCredentials};
pub use pipeline::{Pipeline, PipelineStats};
pub use schema::TitleSchema;
pub use table::Table;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error types for the pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema mismatch: missing required column(s): {}", .0.join(", "))]
    SchemaMismatch(Vec<String>),

    #[error(transparent)]
    Common(#[from] ndp_common::NdpError),
}
