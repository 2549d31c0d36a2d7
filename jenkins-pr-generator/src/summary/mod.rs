//! Per pull request outcomes and the totals reported at the end of a run.

mod result;
mod run_summary;

pub use result::ProcessingResult;
pub use run_summary::RunSummary;
