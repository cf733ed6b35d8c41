//! Execution-plan resolution from requested operations.
//!
//! Operations are requested as letters: `t` (transfer), `v` (validate),
//! `c` (cleanup). Letters may be packed into one token ("tc") or spread
//! over several ("t", "c"); the set is order-insensitive and repeated
//! letters are harmless. The set is then mapped to an ExecutionPlan by a
//! fixed priority table.

use std::error::Error;
use std::fmt::{self, Display};

use crate::model::ExecutionPlan;

/// The set of operations requested for this invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationSet {
    pub transfer: bool,
    pub validate: bool,
    pub cleanup: bool,
}

/// A mode token contained a letter that names no operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation {
    pub letter: char,
}

impl Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized operation letter '{}'", self.letter)
    }
}

impl Error for UnknownOperation {}

impl OperationSet {
    /// Build the set by scanning every character of every token once.
    ///
    /// # Errors
    /// Returns UnknownOperation for the first letter that names no
    /// operation; nothing is resolved or touched in that case.
    pub fn from_tokens<I, S>(tokens: I) -> Result<OperationSet, UnknownOperation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = OperationSet::default();
        for token in tokens {
            for letter in token.as_ref().chars() {
                match letter.to_ascii_lowercase() {
                    't' => set.transfer = true,
                    'v' => set.validate = true,
                    'c' => set.cleanup = true,
                    other => return Err(UnknownOperation { letter: other }),
                }
            }
        }
        Ok(set)
    }

    /// Returns true if no operation was requested.
    pub fn is_empty(&self) -> bool {
        !self.transfer && !self.validate && !self.cleanup
    }
}

/// Map a requested operation set to the phases that will run.
///
/// Priority order, first match wins:
/// 1. transfer + cleanup      -> copy, verify, cleanup prompt
/// 2. cleanup without transfer -> verify, cleanup prompt
/// 3. transfer + validate     -> copy, verify
/// 4. transfer only           -> copy
/// 5. validate only           -> verify
/// 6. nothing requested       -> the full plan (copy, verify, cleanup prompt)
///
/// The table is total over all eight combinations, and cleanup is never
/// planned without verification.
pub fn resolve_plan(operations: OperationSet) -> ExecutionPlan {
    if operations.transfer && operations.cleanup {
        ExecutionPlan {
            copy: true,
            verify: true,
            cleanup_prompt: true,
        }
    } else if operations.cleanup {
        ExecutionPlan {
            copy: false,
            verify: true,
            cleanup_prompt: true,
        }
    } else if operations.transfer && operations.validate {
        ExecutionPlan {
            copy: true,
            verify: true,
            cleanup_prompt: false,
        }
    } else if operations.transfer {
        ExecutionPlan {
            copy: true,
            verify: false,
            cleanup_prompt: false,
        }
    } else if operations.validate {
        ExecutionPlan {
            copy: false,
            verify: true,
            cleanup_prompt: false,
        }
    } else {
        ExecutionPlan {
            copy: true,
            verify: true,
            cleanup_prompt: true,
        }
    }
}
