//! Processing result types.

use std::path::PathBuf;

/// Result of materializing the jobs of a single pull request.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// Job definitions were written.
    Generated {
        /// Pull request number.
        pull_request: u64,
        /// File holding the materialized job collection.
        path: PathBuf,
        /// Number of job definitions written.
        jobs: usize,
    },

    /// Materialization failed.
    Failed {
        /// Pull request number.
        pull_request: u64,
        /// Error message.
        error: String,
    },
}
