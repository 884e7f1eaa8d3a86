// Pipeline Configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Defaults
// ============================================================================

/// Kaggle dataset slug (owner/name) downloaded by default.
pub const DEFAULT_DATASET: &str = "octopusteam/full-netflix-dataset";

/// Base URL of the Kaggle REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://www.kaggle.com/api/v1";

/// Directory the raw and transformed files live in.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Name of the tabular file inside the dataset archive.
pub const DEFAULT_RAW_FILENAME: &str = "data.csv";

/// Name of the output file written by the pipeline.
pub const DEFAULT_OUTPUT_FILENAME: &str = "transformed_dataset.csv";

/// Configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Kaggle dataset slug, "owner/name"
    pub dataset: String,

    /// Local directory for the raw and transformed files
    pub data_dir: PathBuf,

    /// File name of the raw table inside the data directory
    pub raw_filename: String,

    /// File name of the transformed output. An absolute path here escapes
    /// the data directory, which is how the CLI passes explicit paths.
    pub output_filename: String,

    /// Base URL of the dataset host API (overridable for tests)
    pub api_base_url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            dataset: DEFAULT_DATASET.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            raw_filename: DEFAULT_RAW_FILENAME.to_string(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 600,
        }
    }
}

impl PipelineConfig {
    /// Create a builder for fluent configuration
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Environment variables:
    /// - `NDP_DATASET`: dataset slug ("owner/name")
    /// - `NDP_DATA_DIR`: local data directory
    /// - `NDP_RAW_FILENAME`: raw file name inside the archive
    /// - `NDP_OUTPUT_FILENAME`: output file name
    /// - `NDP_API_BASE_URL`: dataset host API base URL
    /// - `NDP_TIMEOUT_SECS`: HTTP timeout in seconds
    pub fn from_env() -> Self {
        let default = Self::default();

        PipelineConfig {
            dataset: std::env::var("NDP_DATASET").unwrap_or(default.dataset),
            data_dir: std::env::var("NDP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.data_dir),
            raw_filename: std::env::var("NDP_RAW_FILENAME").unwrap_or(default.raw_filename),
            output_filename: std::env::var("NDP_OUTPUT_FILENAME")
                .unwrap_or(default.output_filename),
            api_base_url: std::env::var("NDP_API_BASE_URL").unwrap_or(default.api_base_url),
            timeout_secs: std::env::var("NDP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
        }
    }

    /// Path of the raw file produced by the fetch stage
    pub fn raw_path(&self) -> PathBuf {
        self.data_dir.join(&self.raw_filename)
    }

    /// Path of the transformed output file
    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_filename)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.dataset.trim().is_empty() {
            return Err("Dataset slug cannot be empty".to_string());
        }

        if !self.dataset.contains('/') {
            return Err(format!(
                "Dataset slug '{}' must be of the form owner/name",
                self.dataset
            ));
        }

        if self.raw_filename.trim().is_empty() {
            return Err("Raw file name cannot be empty".to_string());
        }

        if self.output_filename.trim().is_empty() {
            return Err("Output file name cannot be empty".to_string());
        }

        if self.api_base_url.trim().is_empty() {
            return Err("API base URL cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Builder for PipelineConfig
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    dataset: Option<String>,
    data_dir: Option<PathBuf>,
    raw_filename: Option<String>,
    output_filename: Option<String>,
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl PipelineConfigBuilder {
    pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn raw_filename(mut self, name: impl Into<String>) -> Self {
        self.raw_filename = Some(name.into());
        self
    }

    pub fn output_filename(mut self, name: impl Into<String>) -> Self {
        self.output_filename = Some(name.into());
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();

        PipelineConfig {
            dataset: self.dataset.unwrap_or(default.dataset),
            data_dir: self.data_dir.unwrap_or(default.data_dir),
            raw_filename: self.raw_filename.unwrap_or(default.raw_filename),
            output_filename: self.output_filename.unwrap_or(default.output_filename),
            api_base_url: self.api_base_url.unwrap_or(default.api_base_url),
            timeout_secs: self.timeout_secs.unwrap_or(default.timeout_secs),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.dataset, DEFAULT_DATASET);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.raw_filename, DEFAULT_RAW_FILENAME);
        assert_eq!(config.output_filename, DEFAULT_OUTPUT_FILENAME);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_secs, 600);
    }

    #[test]
    fn test_paths() {
        let config = PipelineConfig::builder().data_dir("/tmp/ndp").build();
        assert_eq!(config.raw_path(), PathBuf::from("/tmp/ndp/data.csv"));
        assert_eq!(
            config.output_path(),
            PathBuf::from("/tmp/ndp/transformed_dataset.csv")
        );
    }

    #[test]
    fn test_absolute_output_filename_escapes_data_dir() {
        let config = PipelineConfig::builder()
            .data_dir("/tmp/ndp")
            .output_filename("/elsewhere/out.csv")
            .build();
        assert_eq!(config.output_path(), PathBuf::from("/elsewhere/out.csv"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = PipelineConfig::builder()
            .dataset("someone/some-dataset")
            .timeout_secs(30)
            .api_base_url("http://localhost:1234")
            .build();

        assert_eq!(config.dataset, "someone/some-dataset");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_base_url, "http://localhost:1234");
        assert_eq!(config.raw_filename, DEFAULT_RAW_FILENAME);
    }

    #[test]
    fn test_validate() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid = config.clone();
        invalid.dataset = "no-slash".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = config.clone();
        invalid.output_filename = "  ".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = config;
        invalid.timeout_secs = 0;
        assert!(invalid.validate().is_err());
    }
}
