//! Core data model for transfer runs.
//!
//! This module defines the main data structures flowing through a run:
//! - TransferJob: one resolved source -> destination transfer unit
//! - ExecutionPlan: which phases run for this invocation
//! - PhaseResult / JobOutcome: per-job results of the copy and verify phases
//! - RunSummary: the accumulated result of processing the whole batch
//! - CleanupOutcome / CleanupReport: results of the guarded deletion phase

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One resolved transfer unit: copy `source` into `destination`.
///
/// Jobs are immutable once resolved. Duplicate source/destination
/// combinations are legal and executed independently; the id tells
/// them apart in reports.
#[derive(Debug, Clone)]
pub struct TransferJob {
    /// Unique identifier for this job within the run
    pub id: Uuid,

    /// Source directory
    pub source: PathBuf,

    /// Destination directory (final directory, not a parent)
    pub destination: PathBuf,
}

impl TransferJob {
    /// Create a new job for the given source and destination directories.
    pub fn new<P: AsRef<Path>>(source: P, destination: P) -> Self {
        TransferJob {
            id: Uuid::new_v4(),
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
        }
    }
}

/// Which phases run for this invocation, derived once from the requested
/// operations.
///
/// Invariant: `cleanup_prompt` is never set without `verify` - cleanup is
/// only offered after verification has run in the same invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Run the copy phase for each job
    pub copy: bool,

    /// Run the verify phase for each job
    pub verify: bool,

    /// Offer guarded deletion of verified sources after the batch
    pub cleanup_prompt: bool,
}

/// Result of a single phase (copy or verify) for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseResult {
    /// Phase ran and completed successfully
    Success,
    /// Phase ran and failed; the reason distinguishes why
    Failed(String),
    /// Phase did not run for this job
    Skipped,
}

impl PhaseResult {
    /// Returns true if this phase failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, PhaseResult::Failed(_))
    }

    /// Returns true if this phase completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, PhaseResult::Success)
    }
}

/// The accumulated result of pushing one job through the planned phases.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// The job this outcome belongs to
    pub job: TransferJob,

    /// Result of the copy phase
    pub copy: PhaseResult,

    /// Result of the verify phase
    pub verify: PhaseResult,
}

impl JobOutcome {
    /// Returns true if no phase failed for this job.
    ///
    /// A skipped phase is not a failure: a copy-only run succeeds without
    /// verification, and a validate-only run succeeds without copying.
    pub fn succeeded(&self) -> bool {
        !self.copy.is_failed() && !self.verify.is_failed()
    }

    /// The phase annotation for a failed job ("transfer failed" or
    /// "validation failed"), or None if the job succeeded.
    pub fn failure_phase(&self) -> Option<&'static str> {
        if self.copy.is_failed() {
            Some("transfer failed")
        } else if self.verify.is_failed() {
            Some("validation failed")
        } else {
            None
        }
    }

    /// Returns true if this job's source may be offered for cleanup.
    ///
    /// Candidacy requires verification to have run and passed; a copy-only
    /// success is never a candidate.
    pub fn is_cleanup_candidate(&self) -> bool {
        self.verify.is_success()
    }
}

/// The result of processing the whole batch, returned by the runner.
#[derive(Debug)]
pub struct RunSummary {
    /// When batch processing started
    pub started_at: DateTime<Local>,

    /// When batch processing finished
    pub finished_at: DateTime<Local>,

    /// Per-job outcomes, in resolved order
    pub outcomes: Vec<JobOutcome>,
}

impl RunSummary {
    /// Outcomes for jobs where no phase failed.
    pub fn succeeded(&self) -> Vec<&JobOutcome> {
        self.outcomes.iter().filter(|o| o.succeeded()).collect()
    }

    /// Outcomes for jobs where a phase failed.
    pub fn failed(&self) -> Vec<&JobOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded()).collect()
    }

    /// Outcomes whose sources are candidates for guarded deletion.
    pub fn cleanup_candidates(&self) -> Vec<&JobOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.is_cleanup_candidate())
            .collect()
    }
}

/// What happened to a single cleanup candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// Source directory was deleted
    Deleted,
    /// The individual confirmation was declined; directory kept
    Declined,
    /// The pre-delete re-verification no longer passed; directory kept
    RecheckFailed(String),
    /// Deletion itself failed
    DeleteFailed(String),
}

/// Result of the cleanup phase across all candidates.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// True if the blanket consent prompt was declined (phase skipped)
    pub blanket_declined: bool,

    /// Per-candidate results, in candidate order
    pub results: Vec<(PathBuf, CleanupOutcome)>,
}

impl CleanupReport {
    /// Number of source directories actually deleted.
    pub fn deleted_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, outcome)| *outcome == CleanupOutcome::Deleted)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> TransferJob {
        TransferJob::new("/data/src", "/backup/src")
    }

    #[test]
    fn test_jobs_with_same_paths_have_distinct_ids() {
        let a = job();
        let b = job();
        assert_eq!(a.source, b.source);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_outcome_succeeds_when_phases_skipped() {
        let outcome = JobOutcome {
            job: job(),
            copy: PhaseResult::Success,
            verify: PhaseResult::Skipped,
        };
        assert!(outcome.succeeded());
        assert_eq!(outcome.failure_phase(), None);
        assert!(!outcome.is_cleanup_candidate());
    }

    #[test]
    fn test_outcome_failure_phase_prefers_copy() {
        let outcome = JobOutcome {
            job: job(),
            copy: PhaseResult::Failed("source missing".to_string()),
            verify: PhaseResult::Skipped,
        };
        assert!(!outcome.succeeded());
        assert_eq!(outcome.failure_phase(), Some("transfer failed"));
    }

    #[test]
    fn test_outcome_failure_phase_for_verify() {
        let outcome = JobOutcome {
            job: job(),
            copy: PhaseResult::Success,
            verify: PhaseResult::Failed("1 entry missing".to_string()),
        };
        assert_eq!(outcome.failure_phase(), Some("validation failed"));
        assert!(!outcome.is_cleanup_candidate());
    }

    #[test]
    fn test_cleanup_candidacy_requires_verify_success() {
        let verified = JobOutcome {
            job: job(),
            copy: PhaseResult::Skipped,
            verify: PhaseResult::Success,
        };
        assert!(verified.is_cleanup_candidate());

        let copy_only = JobOutcome {
            job: job(),
            copy: PhaseResult::Success,
            verify: PhaseResult::Skipped,
        };
        assert!(!copy_only.is_cleanup_candidate());
    }

    #[test]
    fn test_summary_partitions_outcomes() {
        let summary = RunSummary {
            started_at: Local::now(),
            finished_at: Local::now(),
            outcomes: vec![
                JobOutcome {
                    job: job(),
                    copy: PhaseResult::Success,
                    verify: PhaseResult::Success,
                },
                JobOutcome {
                    job: job(),
                    copy: PhaseResult::Failed("rsync exited with 23".to_string()),
                    verify: PhaseResult::Skipped,
                },
            ],
        };

        assert_eq!(summary.succeeded().len(), 1);
        assert_eq!(summary.failed().len(), 1);
        assert_eq!(summary.cleanup_candidates().len(), 1);
    }
}
