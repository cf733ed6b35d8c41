//! # Haul Engine - Bulk Transfer Orchestration Library
//!
//! A headless engine for orchestrating bulk directory-to-directory
//! transfers, verifying them, and offering guarded deletion of verified
//! sources. Designed as the foundation for the `haul` CLI.
//!
//! ## Overview
//!
//! The engine resolves a declarative transfer configuration into an ordered
//! job list, decides which phases run from the requested operations, and
//! pushes every job through those phases sequentially. It features:
//! - Explicit pairs and source-groups with optional name preservation
//! - Table-driven phase selection from packed operation letters
//! - Copying delegated to the system rsync binary (resumable, additive)
//! - Size-based superset verification tolerant of destination extras
//! - Guarded, re-verified, individually confirmed source cleanup
//!
//! ## Basic Usage
//!
//! ```no_run
//! use engine::{resolve_jobs, resolve_plan, run_jobs, Document, OperationSet};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let operations = OperationSet::from_tokens(["tv"])?;
//! let plan = resolve_plan(operations);
//!
//! let document = Document::load(Path::new("haul.yaml"))?;
//! let jobs = resolve_jobs(&document)?;
//!
//! let summary = run_jobs(&jobs, plan);
//! for outcome in &summary.outcomes {
//!     println!("{}: {:?}", outcome.job.source.display(), outcome.failure_phase());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - **model**: Core data structures (TransferJob, ExecutionPlan, outcomes)
//! - **error**: Error types and handling
//! - **config**: Declarative document parsing (YAML and tabular input)
//! - **resolver**: Document -> ordered job list
//! - **plan**: Requested operations -> execution plan
//! - **fs_ops**: Low-level filesystem helpers and the artifact exclusion list
//! - **copy**: Copy phase, delegated to rsync
//! - **verify**: Size-based superset verification
//! - **runner**: Batch coordination and guarded cleanup

pub mod config;
pub mod copy;
pub mod error;
pub mod fs_ops;
pub mod model;
pub mod plan;
pub mod resolver;
pub mod runner;
pub mod verify;

// Re-export main types and functions
pub use config::{Document, TransferGroup, TransferPair};
pub use error::EngineError;
pub use model::{
    CleanupOutcome, CleanupReport, ExecutionPlan, JobOutcome, PhaseResult, RunSummary, TransferJob,
};
pub use plan::{resolve_plan, OperationSet, UnknownOperation};
pub use resolver::resolve_jobs;
pub use runner::{run_cleanup, run_jobs, Confirmer};
pub use verify::{verify_transfer, DiffEntry, VerifyReport};
