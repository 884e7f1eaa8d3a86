// Kaggle Dataset Downloader
//
// Fetches a public dataset archive from the Kaggle API with basic-auth
// credentials taken from the environment, streams it to disk, and
// extracts it into the local data directory.

use crate::config::PipelineConfig;
use crate::{PipelineError, Result};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use ndp_common::checksum::{compute_file_checksum, ChecksumAlgorithm};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Environment variable holding the Kaggle account name
pub const KAGGLE_USERNAME_VAR: &str = "KAGGLE_USERNAME";

/// Environment variable holding the Kaggle API key
pub const KAGGLE_KEY_VAR: &str = "KAGGLE_KEY";

const USER_AGENT: &str = concat!("ndp-pipeline/", env!("CARGO_PKG_VERSION"));

/// Source of raw dataset files.
///
/// The narrow seam between the acquisition step and the rest of the
/// pipeline: everything downstream only sees files in the destination
/// directory, so tests can substitute a local source.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the named dataset into `dest_dir`, returning the extracted
    /// file paths.
    async fn fetch(&self, dataset: &str, dest_dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Kaggle API credentials
#[derive(Debug, Clone)]
pub struct KaggleCredentials {
    pub username: String,
    pub key: String,
}

impl KaggleCredentials {
    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        KaggleCredentials {
            username: username.into(),
            key: key.into(),
        }
    }

    /// Read credentials from `KAGGLE_USERNAME` and `KAGGLE_KEY`.
    ///
    /// Both must be set and non-empty; this is checked up front so a
    /// misconfigured run fails before any network traffic.
    pub fn from_env() -> Result<Self> {
        Self::from_parts(
            std::env::var(KAGGLE_USERNAME_VAR).ok(),
            std::env::var(KAGGLE_KEY_VAR).ok(),
        )
    }

    /// Build credentials from optional raw values, rejecting blanks
    pub fn from_parts(username: Option<String>, key: Option<String>) -> Result<Self> {
        let username = normalize(username);
        let key = normalize(key);

        match (username, key) {
            (Some(username), Some(key)) => Ok(KaggleCredentials { username, key }),
            (username, key) => {
                let mut missing = Vec::new();
                if username.is_none() {
                    missing.push(KAGGLE_USERNAME_VAR);
                }
                if key.is_none() {
                    missing.push(KAGGLE_KEY_VAR);
                }
                Err(PipelineError::Config(format!(
                    "{} must be set to non-empty values",
                    missing.join(" and ")
                )))
            },
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// HTTP client for downloading Kaggle dataset archives
pub struct KaggleClient {
    client: Client,
    base_url: String,
    credentials: KaggleCredentials,
}

impl KaggleClient {
    /// Create a new client from the pipeline configuration
    pub fn new(config: &PipelineConfig, credentials: KaggleCredentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(KaggleClient {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Download URL for a dataset slug
    pub fn download_url(&self, dataset: &str) -> String {
        format!("{}/datasets/download/{}", self.base_url, dataset)
    }

    /// Stream a URL to a file with a progress bar
    async fn download_to_file(&self, url: &str, output_path: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PipelineError::Download(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let total_size = response.content_length().unwrap_or(0);

        let pb = ProgressBar::new(total_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(format!(
            "Downloading {}",
            output_path.file_name().unwrap_or_default().to_string_lossy()
        ));

        let mut file = std::fs::File::create(output_path)?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        use futures::StreamExt;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            std::io::Write::write_all(&mut file, &chunk)?;
            downloaded += chunk.len() as u64;
            pb.set_position(downloaded);
        }

        pb.finish_with_message(format!("Downloaded {} bytes", downloaded));

        Ok(())
    }
}

#[async_trait]
impl DatasetSource for KaggleClient {
    async fn fetch(&self, dataset: &str, dest_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dest_dir)?;

        let url = self.download_url(dataset);
        info!("Downloading dataset {} from {}", dataset, url);

        let archive_path = dest_dir.join(archive_filename(dataset));
        self.download_to_file(&url, &archive_path).await?;

        let digest = compute_file_checksum(&archive_path, ChecksumAlgorithm::Sha256)?;
        info!("Archive sha256: {}", digest);

        let extracted = extract_archive(&archive_path, dest_dir)?;
        std::fs::remove_file(&archive_path)?;

        info!(
            "Extracted {} file(s) into {}",
            extracted.len(),
            dest_dir.display()
        );

        Ok(extracted)
    }
}

/// File name the dataset archive is saved under before extraction
pub fn archive_filename(dataset: &str) -> String {
    let name = dataset.rsplit('/').next().unwrap_or(dataset);
    format!("{}.zip", name)
}

/// Extract every file entry of a zip archive into `dest_dir`, overwriting
/// existing files of the same name. Returns the extracted paths.
pub fn extract_archive(archive_path: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>> {
    let file = std::fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut extracted = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        // enclosed_name rejects entries that would escape the destination
        let relative = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                warn!("Skipping archive entry with unsafe path: {}", entry.name());
                continue;
            },
        };

        let output_path = dest_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut output = std::fs::File::create(&output_path)?;
        std::io::copy(&mut entry, &mut output)?;
        debug!("Extracted {} ({} bytes)", output_path.display(), entry.size());

        extracted.push(output_path);
    }

    Ok(extracted)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_credentials_from_parts() {
        let creds =
            KaggleCredentials::from_parts(Some("user".to_string()), Some("key".to_string()))
                .unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.key, "key");
    }

    #[test]
    fn test_credentials_missing_key() {
        let err = KaggleCredentials::from_parts(Some("user".to_string()), None).unwrap_err();
        assert!(err.to_string().contains(KAGGLE_KEY_VAR));
        assert!(!err.to_string().contains(KAGGLE_USERNAME_VAR));
    }

    #[test]
    fn test_credentials_blank_values_rejected() {
        let err = KaggleCredentials::from_parts(Some("  ".to_string()), Some(String::new()))
            .unwrap_err();
        assert!(err.to_string().contains(KAGGLE_USERNAME_VAR));
        assert!(err.to_string().contains(KAGGLE_KEY_VAR));
    }

    #[test]
    fn test_archive_filename() {
        assert_eq!(
            archive_filename("octopusteam/full-netflix-dataset"),
            "full-netflix-dataset.zip"
        );
        assert_eq!(archive_filename("plain"), "plain.zip");
    }

    #[test]
    fn test_download_url() {
        let config = PipelineConfig::builder()
            .api_base_url("http://localhost:9999/")
            .build();
        let client = KaggleClient::new(&config, KaggleCredentials::new("u", "k")).unwrap();
        assert_eq!(
            client.download_url("owner/name"),
            "http://localhost:9999/datasets/download/owner/name"
        );
    }

    #[test]
    fn test_extract_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("bundle.zip");

        let mut zip = zip::ZipWriter::new(std::fs::File::create(&archive_path).unwrap());
        zip.start_file("data.csv", zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(b"a,b\n1,2\n").unwrap();
        zip.finish().unwrap();

        let extracted = extract_archive(&archive_path, dir.path()).unwrap();
        assert_eq!(extracted, vec![dir.path().join("data.csv")]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("data.csv")).unwrap(),
            "a,b\n1,2\n"
        );
    }

    #[test]
    fn test_extract_archive_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.csv"), "stale").unwrap();

        let archive_path = dir.path().join("bundle.zip");
        let mut zip = zip::ZipWriter::new(std::fs::File::create(&archive_path).unwrap());
        zip.start_file("data.csv", zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(b"fresh").unwrap();
        zip.finish().unwrap();

        extract_archive(&archive_path, dir.path()).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("data.csv")).unwrap(),
            "fresh"
        );
    }
}
