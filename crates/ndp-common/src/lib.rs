//! NDP Common Library
//!
//! Shared foundations for the NDP workspace:
//!
//! - **Error Handling**: the common error and result types
//! - **Logging**: tracing configuration and initialization
//! - **Checksums**: file integrity helpers
//!
//! # Example
//!
//! ```no_run
//! use ndp_common::checksum::{compute_file_checksum, ChecksumAlgorithm};
//! use ndp_common::Result;
//!
//! fn digest(path: &str) -> Result<String> {
//!     compute_file_checksum(path, ChecksumAlgorithm::Sha256)
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{NdpError, Result};
