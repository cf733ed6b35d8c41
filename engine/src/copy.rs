//! Copy phase: delegates bulk transfer to the system rsync binary.
//!
//! rsync gives us incremental, resumable copying with streamed progress;
//! re-running after a partial failure does not re-copy unchanged data.
//! The invocation is additive only: no delete flag is ever passed, so
//! destination-only content survives every copy.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::fs_ops;
use crate::model::{PhaseResult, TransferJob};

/// Name of the external copy tool, resolved through PATH.
pub const COPY_PROGRAM: &str = "rsync";

/// Copy one job's source directory into its destination.
///
/// The source must exist; its absence is a failure with a distinct reason,
/// never a silent skip. The destination's parent hierarchy is created
/// before the tool runs. The child process inherits stdio so rsync's
/// progress stream reaches the console directly.
///
/// A nonzero exit is surfaced as a failure and not retried; re-running the
/// batch resumes the transfer where it stopped.
pub fn copy_job(job: &TransferJob) -> PhaseResult {
    if !fs_ops::dir_exists(&job.source) {
        return PhaseResult::Failed(format!("source missing: {}", job.source.display()));
    }

    if let Err(e) = fs_ops::ensure_parent_dir_exists(&job.destination) {
        return PhaseResult::Failed(e.to_string());
    }

    let mut command = Command::new(COPY_PROGRAM);
    command.args(copy_args(&job.source, &job.destination));
    log::debug!(
        "Invoking {} for {} -> {}",
        COPY_PROGRAM,
        job.source.display(),
        job.destination.display()
    );

    match command.status() {
        Ok(status) if status.success() => PhaseResult::Success,
        Ok(status) => PhaseResult::Failed(format!("{} exited with {}", COPY_PROGRAM, status)),
        Err(e) => PhaseResult::Failed(format!("failed to launch {}: {}", COPY_PROGRAM, e)),
    }
}

/// Build the rsync argument list for one source/destination pair.
///
/// - archive mode preserves structure, permissions, and times
/// - `--partial` keeps interrupted files so a re-run resumes them
/// - `--info=progress2` streams whole-transfer progress
/// - excluded artifacts match the verification exclusion list
/// - the trailing slash on the source copies its contents into the
///   destination directory rather than nesting a child under it
pub fn copy_args(source: &Path, destination: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--archive".into(),
        "--partial".into(),
        "--info=progress2".into(),
    ];
    for pattern in fs_ops::EXCLUDED_ARTIFACTS.iter().copied() {
        args.push("--exclude".into());
        args.push(pattern.into());
    }

    let mut source_with_slash = source.as_os_str().to_os_string();
    source_with_slash.push("/");
    args.push(source_with_slash);
    args.push(destination.as_os_str().to_os_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn rsync_available() -> bool {
        Command::new(COPY_PROGRAM)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_copy_args_shape() {
        let args = copy_args(Path::new("/data/src"), Path::new("/backup/dst"));
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(rendered[0], "--archive");
        assert!(rendered.contains(&"--partial".to_string()));
        assert!(rendered.contains(&"--info=progress2".to_string()));
        assert!(rendered.contains(&".DS_Store".to_string()));
        // Source carries the trailing slash; destination is last
        assert_eq!(rendered[rendered.len() - 2], "/data/src/");
        assert_eq!(rendered[rendered.len() - 1], "/backup/dst");
    }

    #[test]
    fn test_copy_args_never_delete() {
        let args = copy_args(Path::new("/data/src"), Path::new("/backup/dst"));
        for arg in &args {
            assert!(
                !arg.to_string_lossy().contains("--delete"),
                "copy must never be destructive of destination content"
            );
        }
    }

    #[test]
    fn test_missing_source_fails_without_touching_destination() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let destination = temp_dir.path().join("parent").join("dst");
        let job = TransferJob::new(
            PathBuf::from("/nonexistent/haul-src"),
            destination.clone(),
        );

        let result = copy_job(&job);
        match result {
            PhaseResult::Failed(reason) => assert!(reason.contains("source missing")),
            other => panic!("expected failure, got {:?}", other),
        }
        // The source check comes first, before any directory creation
        assert!(!destination.parent().unwrap().exists());
    }

    #[test]
    fn test_copy_job_creates_parent_and_copies_tree() {
        if !rsync_available() {
            eprintln!("rsync not installed; skipping");
            return;
        }

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let source = temp_dir.path().join("source");
        fs::create_dir_all(source.join("nested")).expect("Failed to create source");
        fs::write(source.join("a.txt"), "alpha").expect("Failed to write a.txt");
        fs::write(source.join("nested").join("b.txt"), "beta").expect("Failed to write b.txt");

        let destination = temp_dir.path().join("pool").join("source");
        let job = TransferJob::new(source.clone(), destination.clone());

        assert_eq!(copy_job(&job), PhaseResult::Success);
        assert_eq!(
            fs::read_to_string(destination.join("a.txt")).expect("Failed to read"),
            "alpha"
        );
        assert_eq!(
            fs::read_to_string(destination.join("nested").join("b.txt")).expect("Failed to read"),
            "beta"
        );
    }

    #[test]
    fn test_copy_job_preserves_destination_only_files() {
        if !rsync_available() {
            eprintln!("rsync not installed; skipping");
            return;
        }

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let source = temp_dir.path().join("source");
        fs::create_dir(&source).expect("Failed to create source");
        fs::write(source.join("a.txt"), "alpha").expect("Failed to write a.txt");

        let destination = temp_dir.path().join("dest");
        fs::create_dir(&destination).expect("Failed to create dest");
        fs::write(destination.join("keep-me.txt"), "prior transfer")
            .expect("Failed to write keeper");

        let job = TransferJob::new(source, destination.clone());
        assert_eq!(copy_job(&job), PhaseResult::Success);
        assert!(destination.join("keep-me.txt").exists());
        assert!(destination.join("a.txt").exists());
    }

    #[test]
    fn test_copy_job_skips_excluded_artifacts() {
        if !rsync_available() {
            eprintln!("rsync not installed; skipping");
            return;
        }

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let source = temp_dir.path().join("source");
        fs::create_dir(&source).expect("Failed to create source");
        fs::write(source.join("real.txt"), "data").expect("Failed to write real.txt");
        fs::write(source.join(".DS_Store"), "finder state").expect("Failed to write artifact");

        let destination = temp_dir.path().join("dest");
        let job = TransferJob::new(source, destination.clone());

        assert_eq!(copy_job(&job), PhaseResult::Success);
        assert!(destination.join("real.txt").exists());
        assert!(!destination.join(".DS_Store").exists());
    }
}
