/// Write phase: output existence check, overwrite decision, and the final
/// header + entries write.
use setfile::SetWriter;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::read::MergePlan;
use crate::{MergeError, OverwritePolicy, SetMerger};

/// Returns `true` if something exists at `path`.
///
/// Any error other than "not found" (permissions, bad parent, ...) also counts
/// as existing, so the caller is asked before the path is touched.
#[must_use]
pub fn output_exists(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

impl SetMerger {
    /// Asks `confirm` before overwriting an existing output under
    /// [`OverwritePolicy::Prompt`].
    pub(crate) fn check_output_target<F>(&self, output: &Path, mut confirm: F) -> Result<(), MergeError>
    where
        F: FnMut(&Path) -> bool,
    {
        if !output_exists(output) {
            return Ok(());
        }

        match self.overwrite {
            OverwritePolicy::Force => {
                debug!(output = %output.display(), "overwriting existing output");
                Ok(())
            }
            OverwritePolicy::Prompt => {
                if confirm(output) {
                    Ok(())
                } else {
                    debug!(output = %output.display(), "overwrite declined");
                    Err(MergeError::UserAborted {
                        path: output.to_path_buf(),
                    })
                }
            }
        }
    }

    /// Writes the merged header followed by every input's entries, in order.
    pub(crate) fn write_output(&self, plan: &MergePlan, output: &Path) -> Result<(), MergeError> {
        let io_err = |source: io::Error| MergeError::Io {
            path: output.to_path_buf(),
            source,
        };

        let mut writer = SetWriter::create(output, self.endianness).map_err(io_err)?;
        writer.write_header(plan.total).map_err(io_err)?;
        for file in &plan.files {
            writer.write_entries(file.entries()).map_err(io_err)?;
        }
        debug!(entries = writer.entries_written(), "entries written");
        writer.finish_sync().map_err(io_err)?;

        Ok(())
    }
}
