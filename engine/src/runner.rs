//! Batch coordination.
//!
//! Jobs are processed strictly sequentially in resolved order. Each job
//! moves through the planned phases independently: a failed copy skips
//! that job's verification and its cleanup candidacy, and never stops the
//! remaining jobs. The guarded cleanup phase runs after the whole batch,
//! driven by the caller once the summary has been reported.

use chrono::Local;

use crate::copy;
use crate::fs_ops;
use crate::model::{
    CleanupOutcome, CleanupReport, ExecutionPlan, JobOutcome, PhaseResult, RunSummary, TransferJob,
};
use crate::verify;

/// Interactive yes/no confirmation, answered by the user.
///
/// The engine stays headless; the CLI implements this with a real prompt
/// and tests script the answers.
pub trait Confirmer {
    /// Ask the user the given question; true means consent.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Push every job through the planned phases and accumulate outcomes.
///
/// Per-job transitions:
/// - plan.copy off: copy is Skipped
/// - copy Failed: verify is Skipped, the job is failed
/// - plan.verify off: the job succeeds on copy alone
/// - verify Passed: the job succeeds and becomes a cleanup candidate
/// - verify Failed: the job is failed
pub fn run_jobs(jobs: &[TransferJob], plan: ExecutionPlan) -> RunSummary {
    let started_at = Local::now();
    let total = jobs.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, job) in jobs.iter().enumerate() {
        log::info!(
            "[{}/{}] {} -> {}",
            index + 1,
            total,
            job.source.display(),
            job.destination.display()
        );

        let copy_result = if plan.copy {
            copy::copy_job(job)
        } else {
            PhaseResult::Skipped
        };

        let verify_result = if copy_result.is_failed() {
            log::warn!(
                "[{}/{}] transfer failed; skipping validation",
                index + 1,
                total
            );
            PhaseResult::Skipped
        } else if plan.verify {
            let report = verify::verify_transfer(&job.source, &job.destination);
            if report.passed {
                PhaseResult::Success
            } else {
                PhaseResult::Failed(report.describe())
            }
        } else {
            PhaseResult::Skipped
        };

        outcomes.push(JobOutcome {
            job: job.clone(),
            copy: copy_result,
            verify: verify_result,
        });
    }

    RunSummary {
        started_at,
        finished_at: Local::now(),
        outcomes,
    }
}

/// Run the guarded cleanup phase over the summary's candidates.
///
/// One blanket consent covers the phase; declining it skips everything.
/// Each candidate is then re-verified immediately before its individual
/// confirmation - the earlier verify result is never trusted for deletion,
/// since source or destination may have changed in the meantime. Deletion
/// is recursive and irreversible.
pub fn run_cleanup(summary: &RunSummary, confirmer: &dyn Confirmer) -> CleanupReport {
    let candidates = summary.cleanup_candidates();
    let mut report = CleanupReport::default();
    if candidates.is_empty() {
        return report;
    }

    if !confirmer.confirm(&format!(
        "Delete the source director{} of {} verified transfer(s)?",
        if candidates.len() == 1 { "y" } else { "ies" },
        candidates.len()
    )) {
        log::info!("Cleanup declined; keeping all sources");
        report.blanket_declined = true;
        return report;
    }

    for outcome in candidates {
        let source = outcome.job.source.clone();

        let recheck = verify::verify_transfer(&outcome.job.source, &outcome.job.destination);
        if !recheck.passed {
            log::warn!(
                "Keeping {}: re-validation no longer passes",
                source.display()
            );
            report
                .results
                .push((source, CleanupOutcome::RecheckFailed(recheck.describe())));
            continue;
        }

        if !confirmer.confirm(&format!("Permanently delete {}?", source.display())) {
            report.results.push((source, CleanupOutcome::Declined));
            continue;
        }

        match fs_ops::remove_dir_recursive(&outcome.job.source) {
            Ok(()) => {
                log::info!("Deleted {}", source.display());
                report.results.push((source, CleanupOutcome::Deleted));
            }
            Err(e) => {
                report
                    .results
                    .push((source, CleanupOutcome::DeleteFailed(e.to_string())));
            }
        }
    }

    report
}
