//! # SetFile - SET binary format
//!
//! Reading and writing of SET files: a fixed 32-byte header carrying an
//! object count, followed by that many opaque 32-byte entries.
//!
//! ## File layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ HEADER (32 bytes)                                             │
//! │                                                               │
//! │ object_count (u32, BE or LE) | reserved (28 zero bytes)       │
//! ├───────────────────────────────────────────────────────────────┤
//! │ ENTRIES (object_count * 32 bytes)                             │
//! │                                                               │
//! │ entry[0] | entry[1] | ... | entry[object_count - 1]           │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no magic number, version or checksum. The byte order of the
//! count field is chosen per run (see [`Endianness`]); entry bytes are never
//! interpreted or transformed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use setfile::{Endianness, SetEntry, SetFile, write_set_file};
//!
//! let entries = vec![SetEntry::new([7u8; 32])];
//! write_set_file("a.set", Endianness::Big, &entries).unwrap();
//!
//! let file = SetFile::open("a.set", Endianness::Big).unwrap();
//! assert_eq!(file.object_count(), 1);
//! ```

mod format;
mod reader;
mod writer;

pub use format::{
    decode_header, encode_header, read_header, Endianness, HeaderRead, SetHeader, COUNT_BYTES,
    ENTRY_BYTES, HEADER_BYTES,
};
pub use reader::SetFile;
pub use writer::{write_set_file, SetWriter};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// One opaque 32-byte record.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetEntry([u8; ENTRY_BYTES]);

impl SetEntry {
    #[must_use]
    pub fn new(bytes: [u8; ENTRY_BYTES]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ENTRY_BYTES] {
        &self.0
    }
}

impl From<[u8; ENTRY_BYTES]> for SetEntry {
    fn from(bytes: [u8; ENTRY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for SetEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SetEntry(")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

/// Errors raised while reading a SET file.
#[derive(Debug, Error)]
pub enum SetError {
    /// The input path does not exist.
    #[error("error reading file {}: no such file or directory", path.display())]
    NotFound { path: PathBuf },

    /// Any other I/O failure on a named path.
    #[error("error reading file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The header declares more entries than the file holds.
    #[error(
        "file {} is too short: header declares {declared} entries but only {available} are present. \
         Are you sure it's a SET file? Check the endianness flag (-e)",
        path.display()
    )]
    Truncated {
        path: PathBuf,
        declared: u32,
        available: u64,
    },

    /// The declared entry count cannot be buffered in memory.
    #[error(
        "file {} declares {declared} entries, too many to buffer. \
         Are you sure it's a SET file? Check the endianness flag (-e)",
        path.display()
    )]
    TooLarge { path: PathBuf, declared: u32 },
}

impl SetError {
    /// Returns `true` for the errors that usually mean a wrong endianness flag.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, SetError::Truncated { .. } | SetError::TooLarge { .. })
    }
}

#[cfg(test)]
mod tests;
