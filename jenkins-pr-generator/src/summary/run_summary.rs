//! Run summary types.

use super::result::ProcessingResult;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of open pull requests found.
    pub open_prs: usize,

    /// Number of pull requests whose jobs were written.
    pub prs_generated: usize,

    /// Number of pull requests whose jobs could not be written.
    pub prs_failed: usize,

    /// Number of job definitions written across all pull requests.
    pub jobs_generated: usize,

    /// Names of the jobs deleted because their pull request closed.
    pub jobs_deleted: Vec<String>,

    /// Whether this was a debug run.
    pub debug: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        match result {
            ProcessingResult::Generated { jobs, .. } => {
                self.prs_generated += 1;
                self.jobs_generated += jobs;
            }
            ProcessingResult::Failed { .. } => self.prs_failed += 1,
        }
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.prs_failed > 0
    }

    /// Returns true if all operations were successful.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.prs_failed == 0
    }
}
