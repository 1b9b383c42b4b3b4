use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::format::{read_header, Endianness, ENTRY_BYTES, HEADER_BYTES};
use crate::{SetEntry, SetError};

/// A SET file loaded fully into memory.
///
/// Holds the decoded object count together with every entry, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetFile {
    path: PathBuf,
    object_count: u32,
    entries: Vec<SetEntry>,
}

impl SetFile {
    /// Opens `path` and reads its header and all declared entries.
    ///
    /// # Errors
    ///
    /// - [`SetError::NotFound`] if `path` does not exist.
    /// - [`SetError::Io`] for any other open or read failure.
    /// - [`SetError::Truncated`] if the file ends before `object_count`
    ///   entries have been read.
    /// - [`SetError::TooLarge`] if the entry buffer cannot be allocated.
    pub fn open<P: AsRef<Path>>(path: P, endianness: Endianness) -> Result<SetFile, SetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SetError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                SetError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_reader(BufReader::new(file), path, endianness)
    }

    /// Reads a SET file from any seekable reader.
    ///
    /// `path` is used only to label errors. Entries are always read from
    /// offset [`HEADER_BYTES`], even when the stream held a shorter header.
    pub fn from_reader<R: Read + Seek>(
        mut r: R,
        path: &Path,
        endianness: Endianness,
    ) -> Result<SetFile, SetError> {
        let io_err = |source: io::Error| SetError::Io {
            path: path.to_path_buf(),
            source,
        };

        let header = read_header(&mut r, endianness).map_err(io_err)?;
        let declared = header.header.object_count;
        if header.is_short() {
            warn!(
                path = %path.display(),
                bytes = header.bytes_read,
                object_count = declared,
                "short SET header"
            );
        }

        let len = r.seek(SeekFrom::End(0)).map_err(io_err)?;
        r.seek(SeekFrom::Start(HEADER_BYTES as u64))
            .map_err(io_err)?;

        // Reject impossible counts before allocating for them.
        let available = len.saturating_sub(HEADER_BYTES as u64) / ENTRY_BYTES as u64;
        if u64::from(declared) > available {
            return Err(SetError::Truncated {
                path: path.to_path_buf(),
                declared,
                available,
            });
        }

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(declared as usize)
            .map_err(|_| SetError::TooLarge {
                path: path.to_path_buf(),
                declared,
            })?;

        let mut buf = [0u8; ENTRY_BYTES];
        for _ in 0..declared {
            match r.read_exact(&mut buf) {
                Ok(()) => entries.push(SetEntry::new(buf)),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(SetError::Truncated {
                        path: path.to_path_buf(),
                        declared,
                        available: entries.len() as u64,
                    });
                }
                Err(e) => return Err(io_err(e)),
            }
        }

        debug!(path = %path.display(), object_count = declared, %endianness, "read SET file");

        Ok(SetFile {
            path: path.to_path_buf(),
            object_count: declared,
            entries,
        })
    }

    /// Path this file was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Object count decoded from the header.
    #[must_use]
    pub fn object_count(&self) -> u32 {
        self.object_count
    }

    /// Entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[SetEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the file and returns its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<SetEntry> {
        self.entries
    }
}
