use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::format::{encode_header, Endianness};
use crate::SetEntry;

/// Sequential SET file writer.
///
/// The caller writes the header once, then any number of entry slices. The
/// writer does not check that the number of entries written matches the
/// header; [`SetWriter::entries_written`] is available for that.
pub struct SetWriter<W: Write> {
    out: W,
    endianness: Endianness,
    entries_written: u64,
}

impl SetWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` for writing.
    ///
    /// Writes go straight to the final path: a failure part-way through can
    /// leave a partially written file behind.
    pub fn create<P: AsRef<Path>>(path: P, endianness: Endianness) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::new(BufWriter::new(file), endianness))
    }

    /// Flushes buffered data and syncs the file to disk.
    pub fn finish_sync(self) -> io::Result<()> {
        self.finish()?.into_inner()?.sync_all()
    }
}

impl<W: Write> SetWriter<W> {
    /// Wraps any `Write` implementor (e.g. a `Vec<u8>` in tests).
    pub fn new(out: W, endianness: Endianness) -> Self {
        Self {
            out,
            endianness,
            entries_written: 0,
        }
    }

    /// Writes the 32-byte header for `object_count`.
    pub fn write_header(&mut self, object_count: u32) -> io::Result<()> {
        self.out
            .write_all(&encode_header(object_count, self.endianness))
    }

    /// Appends `entries` verbatim.
    pub fn write_entries(&mut self, entries: &[SetEntry]) -> io::Result<()> {
        for entry in entries {
            self.out.write_all(entry.as_bytes())?;
        }
        self.entries_written += entries.len() as u64;
        Ok(())
    }

    /// Number of entries written so far.
    #[must_use]
    pub fn entries_written(&self) -> u64 {
        self.entries_written
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Writes a complete, well-formed SET file holding `entries`.
///
/// # Errors
///
/// Returns `InvalidInput` if `entries` has more than `u32::MAX` items, or any
/// I/O error from creating or writing the file.
pub fn write_set_file<P: AsRef<Path>>(
    path: P,
    endianness: Endianness,
    entries: &[SetEntry],
) -> io::Result<()> {
    let count = u32::try_from(entries.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "too many entries for a SET header (exceeds u32::MAX)",
        )
    })?;
    let mut w = SetWriter::create(path, endianness)?;
    w.write_header(count)?;
    w.write_entries(entries)?;
    w.finish_sync()
}
