//! Job resolution: turns a configuration document into an ordered job list.
//!
//! Ordering is fixed: all explicit pairs first, in document order, followed
//! by all group expansions, in document order within each group and group
//! order across groups.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::Document;
use crate::error::EngineError;
use crate::fs_ops;
use crate::model::TransferJob;

/// Resolve a configuration document into the flat ordered job list.
///
/// Rules:
/// - A pair missing either field is dropped and contributes no job.
/// - A group missing `destination_base` is a configuration defect for that
///   group only: it is reported and skipped, its sources contribute no jobs.
/// - With name preservation, destination = `destination_base/basename(source)`.
/// - Without it, every source in the group resolves to the group's base:
///   an intentional many-to-one merge, not a collision.
///
/// # Errors
/// Returns `EngineError::EmptyJobSet` when no jobs result; an empty transfer
/// set is never silently successful.
pub fn resolve_jobs(document: &Document) -> Result<Vec<TransferJob>, EngineError> {
    let mut jobs = Vec::new();

    for pair in &document.transfers {
        match (&pair.source, &pair.destination) {
            (Some(source), Some(destination)) => {
                jobs.push(TransferJob::new(source.clone(), destination.clone()));
            }
            (source, _) => {
                log::debug!(
                    "Dropping transfer entry with missing field (source: {:?})",
                    source
                );
            }
        }
    }

    for (index, group) in document.transfer_groups.iter().enumerate() {
        let Some(base) = &group.destination_base else {
            log::warn!(
                "Transfer group {} has no destination_base; skipping its {} source(s)",
                index + 1,
                group.sources.len()
            );
            continue;
        };

        for source in &group.sources {
            let destination = if group.preserve_source_name {
                match fs_ops::basename(source) {
                    Some(name) => base.join(name),
                    None => {
                        log::warn!(
                            "No name segment in group source {}; using destination base directly",
                            source.display()
                        );
                        base.clone()
                    }
                }
            } else {
                base.clone()
            };
            jobs.push(TransferJob::new(source.clone(), destination));
        }
    }

    if jobs.is_empty() {
        return Err(EngineError::EmptyJobSet);
    }

    note_destination_overlaps(&jobs);
    Ok(jobs)
}

/// Log destinations shared by several jobs with differing sources.
///
/// Overlap is legal (merge groups depend on it) and execution is
/// last-write-wins in job order, so this is informational only.
fn note_destination_overlaps(jobs: &[TransferJob]) {
    let mut sources_by_destination: HashMap<&PathBuf, Vec<&PathBuf>> = HashMap::new();
    for job in jobs {
        sources_by_destination
            .entry(&job.destination)
            .or_default()
            .push(&job.source);
    }

    for (destination, sources) in sources_by_destination {
        let distinct = sources
            .iter()
            .any(|source| **source != *sources[0]);
        if distinct {
            log::debug!(
                "{} job(s) share destination {}; later transfers overwrite earlier ones on overlap",
                sources.len(),
                destination.display()
            );
        }
    }
}
