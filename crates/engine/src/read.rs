/// Read phase: loads every input into memory and sums the entry counts.
///
/// Inputs are read one at a time, in argument order. The first failure stops
/// the run; nothing has been written at that point so there is nothing to
/// clean up.
use setfile::{Endianness, SetError, SetFile};
use std::path::Path;
use tracing::debug;

use crate::{MergeError, SetMerger};

/// Every input file plus the combined entry count.
#[derive(Debug)]
pub(crate) struct MergePlan {
    pub(crate) files: Vec<SetFile>,
    pub(crate) total: u32,
}

/// Reads one SET file: header, then exactly `object_count` entries from
/// offset 32.
///
/// A file that ends inside the count field reads as zero entries. A file that
/// ends before its declared entries fails with [`SetError::Truncated`].
pub fn read_input<P: AsRef<Path>>(path: P, endianness: Endianness) -> Result<SetFile, SetError> {
    let file = SetFile::open(path.as_ref(), endianness)?;
    debug!(
        path = %file.path().display(),
        object_count = file.object_count(),
        "input loaded"
    );
    Ok(file)
}

/// Adds one file's count to the running total, failing once the total no
/// longer fits the 32-bit header field.
pub(crate) fn add_count(total: u64, count: u32) -> Result<u64, MergeError> {
    let total = total + u64::from(count);
    if total > u64::from(u32::MAX) {
        return Err(MergeError::CountOverflow { total });
    }
    Ok(total)
}

impl SetMerger {
    /// Reads all `inputs` and accumulates their counts.
    ///
    /// The running total is kept in a `u64`; a sum past `u32::MAX` fails with
    /// [`MergeError::CountOverflow`] as soon as it is reached.
    pub(crate) fn read_inputs<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<MergePlan, MergeError> {
        let mut files = Vec::with_capacity(inputs.len());
        let mut total: u64 = 0;

        for path in inputs {
            let file = read_input(path, self.endianness)?;
            total = add_count(total, file.object_count())?;
            files.push(file);
        }

        let total = u32::try_from(total).map_err(|_| MergeError::CountOverflow { total })?;
        Ok(MergePlan { files, total })
    }
}
