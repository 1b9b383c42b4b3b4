//! # Engine - SET merge engine
//!
//! Reads N SET files through the [`setfile`] codec and writes one output file
//! whose header carries the combined entry count and whose body is every
//! input's entries, concatenated in argument order.
//!
//! ## Pipeline
//!
//! ```text
//!   Idle
//!    |
//!    v
//!   ReadingInputs ─────────┐    read.rs: read_input() per path, sum counts
//!    |                     |
//!    v                     |
//!   CheckingOutputTarget ──┤    write.rs: exists? ask caller (Prompt policy)
//!    |                     |
//!    v                     v
//!   WritingOutput ───────> Failed
//!    |                          write.rs: header(total) + entries, in order
//!    v
//!   Done
//! ```
//!
//! All inputs are loaded fully into memory before the output is opened, so a
//! bad input never produces an output file. The output is written in place;
//! a write failure can leave it partially written.
//!
//! ## Module Responsibilities
//!
//! | Module      | Purpose                                              |
//! |------------|------------------------------------------------------|
//! | [`lib.rs`] | `SetMerger`, `MergeState`, `MergeReport`, errors     |
//! | [`read`]   | `read_input()`, input accumulation into a plan      |
//! | [`write`]  | output existence check, overwrite decision, writing |

mod read;
mod write;

pub use config::OverwritePolicy;
pub use read::read_input;
pub use setfile::Endianness;
pub use write::output_exists;

use config::MergeConfig;
use setfile::SetError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a merge.
#[derive(Debug, Error)]
pub enum MergeError {
    /// An input could not be read or is not a valid SET file.
    #[error(transparent)]
    Set(#[from] SetError),

    /// The combined entry count does not fit the 32-bit header field.
    #[error("combined entry count {total} exceeds the SET header limit of {}", u32::MAX)]
    CountOverflow { total: u64 },

    /// The output exists and the caller declined to overwrite it.
    #[error("output file {} already exists; aborting, no changes have been made", path.display())]
    UserAborted { path: PathBuf },

    /// Creating or writing the output failed.
    #[error("error writing file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Progress of a merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeState {
    #[default]
    Idle,
    ReadingInputs,
    CheckingOutputTarget,
    WritingOutput,
    Done,
    Failed,
}

/// Summary of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub files_merged: usize,
    pub total_entries: u32,
    pub output: PathBuf,
}

impl std::fmt::Display for MergeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files have been successfully merged into {}.",
            self.files_merged,
            self.output.display()
        )
    }
}

/// Merges SET files with a fixed byte order and overwrite policy.
///
/// A merger can be reused; each call to [`merge`](SetMerger::merge) starts
/// again from [`MergeState::Idle`].
#[derive(Debug, Clone)]
pub struct SetMerger {
    pub(crate) endianness: Endianness,
    pub(crate) overwrite: OverwritePolicy,
    pub(crate) state: MergeState,
}

impl SetMerger {
    #[must_use]
    pub fn new(endianness: Endianness, overwrite: OverwritePolicy) -> Self {
        Self {
            endianness,
            overwrite,
            state: MergeState::Idle,
        }
    }

    #[must_use]
    pub fn from_config(cfg: &MergeConfig) -> Self {
        Self::new(cfg.endianness, cfg.overwrite)
    }

    /// Current state of the last (or running) merge.
    #[must_use]
    pub fn state(&self) -> MergeState {
        self.state
    }

    #[must_use]
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    #[must_use]
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite
    }

    /// Merges `inputs` into `output`.
    ///
    /// `confirm` is called only when `output` already exists and the policy
    /// is [`OverwritePolicy::Prompt`]; returning `false` aborts the run with
    /// [`MergeError::UserAborted`] and leaves `output` untouched.
    ///
    /// # Errors
    ///
    /// The first input that fails to read aborts the whole run before any
    /// output is written. See [`MergeError`] for the full list.
    pub fn merge<P, F>(
        &mut self,
        inputs: &[P],
        output: &Path,
        confirm: F,
    ) -> Result<MergeReport, MergeError>
    where
        P: AsRef<Path>,
        F: FnMut(&Path) -> bool,
    {
        self.state = MergeState::Idle;
        let result = self.run(inputs, output, confirm);
        match &result {
            Ok(report) => {
                self.transition(MergeState::Done);
                info!(
                    files = report.files_merged,
                    total_entries = report.total_entries,
                    output = %report.output.display(),
                    "merge complete"
                );
            }
            Err(e) => {
                self.transition(MergeState::Failed);
                debug!(error = %e, "merge failed");
            }
        }
        result
    }

    /// Runs a merge described by `cfg`.
    pub fn merge_config<F>(&mut self, cfg: &MergeConfig, confirm: F) -> Result<MergeReport, MergeError>
    where
        F: FnMut(&Path) -> bool,
    {
        self.merge(cfg.inputs.as_slice(), &cfg.output, confirm)
    }

    fn run<P, F>(&mut self, inputs: &[P], output: &Path, confirm: F) -> Result<MergeReport, MergeError>
    where
        P: AsRef<Path>,
        F: FnMut(&Path) -> bool,
    {
        self.transition(MergeState::ReadingInputs);
        let plan = self.read_inputs(inputs)?;

        self.transition(MergeState::CheckingOutputTarget);
        self.check_output_target(output, confirm)?;

        self.transition(MergeState::WritingOutput);
        self.write_output(&plan, output)?;

        Ok(MergeReport {
            files_merged: plan.files.len(),
            total_entries: plan.total,
            output: output.to_path_buf(),
        })
    }

    pub(crate) fn transition(&mut self, next: MergeState) {
        debug!(from = ?self.state, to = ?next, "merge state");
        self.state = next;
    }
}

/// Merges `inputs` into `output` in one call.
///
/// Shorthand for [`SetMerger::new`] followed by [`SetMerger::merge`].
pub fn merge<P, F>(
    inputs: &[P],
    output: &Path,
    endianness: Endianness,
    overwrite: OverwritePolicy,
    confirm: F,
) -> Result<MergeReport, MergeError>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> bool,
{
    SetMerger::new(endianness, overwrite).merge(inputs, output, confirm)
}

#[cfg(test)]
mod tests;
