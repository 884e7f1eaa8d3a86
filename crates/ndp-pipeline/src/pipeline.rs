// Pipeline Orchestration
//
// Runs the stages in strict sequence: fetch, clean, transform, save.
// Any stage failure aborts the run; the output file is only written as
// the final step, so a failed run never replaces previous output.

use crate::clean::clean;
use crate::config::PipelineConfig;
use crate::downloader::{DatasetSource, KaggleClient, KaggleCredentials};
use crate::schema::TitleSchema;
use crate::table::Table;
use crate::transform::transform;
use crate::{PipelineError, Result};
use tracing::info;

/// Row counts observed across a pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Rows in the raw table
    pub rows_read: usize,
    /// Rows surviving the cleaning stage
    pub rows_cleaned: usize,
    /// Rows written to the output file
    pub rows_transformed: usize,
}

/// Batch pipeline over one dataset
pub struct Pipeline {
    config: PipelineConfig,
    schema: TitleSchema,
    source: Option<Box<dyn DatasetSource>>,
}

impl Pipeline {
    /// Create a pipeline with an explicit dataset source
    pub fn new(
        config: PipelineConfig,
        schema: TitleSchema,
        source: Option<Box<dyn DatasetSource>>,
    ) -> Self {
        Pipeline {
            config,
            schema,
            source,
        }
    }

    /// Create a pipeline fetching from Kaggle with credentials from the
    /// environment. Fails before any network call when credentials are
    /// missing or blank.
    pub fn with_kaggle(config: PipelineConfig, schema: TitleSchema) -> Result<Self> {
        let credentials = KaggleCredentials::from_env()?;
        let client = KaggleClient::new(&config, credentials)?;
        Ok(Self::new(config, schema, Some(Box::new(client))))
    }

    /// Create a pipeline with no dataset source; only `process` works
    pub fn offline(config: PipelineConfig, schema: TitleSchema) -> Self {
        Self::new(config, schema, None)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline: fetch, then clean, transform, and save
    pub async fn run(&self) -> Result<PipelineStats> {
        let source = self.source.as_ref().ok_or_else(|| {
            PipelineError::Config("no dataset source configured".to_string())
        })?;

        info!("Fetching dataset {}", self.config.dataset);
        source
            .fetch(&self.config.dataset, &self.config.data_dir)
            .await?;

        let raw_path = self.config.raw_path();
        if !raw_path.exists() {
            return Err(PipelineError::Download(format!(
                "raw dataset file {} not found after fetch",
                raw_path.display()
            )));
        }

        self.process()
    }

    /// Clean, transform, and save an already-present raw file
    pub fn process(&self) -> Result<PipelineStats> {
        let raw_path = self.config.raw_path();

        info!("Loading raw table from {}", raw_path.display());
        let table = Table::from_path(&raw_path)?;
        let rows_read = table.len();

        info!("Cleaning {} row(s) against schema {}", rows_read, self.schema.version);
        let cleaned = clean(table, &self.schema)?;
        let rows_cleaned = cleaned.len();

        info!("Transforming {} row(s)", rows_cleaned);
        let transformed = transform(cleaned, &self.schema)?;
        let rows_transformed = transformed.len();

        let output_path = self.config.output_path();
        info!("Writing {} row(s) to {}", rows_transformed, output_path.display());
        transformed.to_path(&output_path)?;

        let stats = PipelineStats {
            rows_read,
            rows_cleaned,
            rows_transformed,
        };
        info!(
            "Pipeline completed: {} read, {} cleaned, {} written",
            stats.rows_read, stats.rows_cleaned, stats.rows_transformed
        );

        Ok(stats)
    }
}

// ============================================================================
// Tests
// ============================================================================
