//! SET header codec.
//!
//! ## Header layout (32 bytes)
//!
//! ```text
//! [object_count: u32 (BE by default, LE with -e)][reserved: 28 bytes]
//! ```
//!
//! The reserved bytes are written as zero and never inspected on read.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{self, Read};

/// Size of the on-disk header in bytes.
pub const HEADER_BYTES: usize = 32;

/// Size of a single entry in bytes.
pub const ENTRY_BYTES: usize = 32;

/// Size of the object-count field at the start of the header.
pub const COUNT_BYTES: usize = 4;

/// Byte order of the object-count field.
///
/// Applies only to the header. Entry bytes are copied verbatim in either mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Most-significant byte first. The format default.
    #[default]
    Big,
    /// Least-significant byte first, as written by some non-conforming tools.
    Little,
}

impl Endianness {
    /// Picks little-endian when `little` is set, big-endian otherwise.
    #[must_use]
    pub fn from_flag(little: bool) -> Self {
        if little {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }
}

impl std::fmt::Display for Endianness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endianness::Big => f.write_str("big-endian"),
            Endianness::Little => f.write_str("little-endian"),
        }
    }
}

/// Parsed SET header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetHeader {
    /// Number of entries following the header.
    pub object_count: u32,
}

impl SetHeader {
    #[must_use]
    pub fn new(object_count: u32) -> Self {
        Self { object_count }
    }

    /// Decodes a header block. See [`decode_header`].
    #[must_use]
    pub fn decode(bytes: &[u8; HEADER_BYTES], endianness: Endianness) -> Self {
        Self::new(decode_header(bytes, endianness))
    }

    /// Encodes this header into a zero-padded block. See [`encode_header`].
    #[must_use]
    pub fn encode(&self, endianness: Endianness) -> [u8; HEADER_BYTES] {
        encode_header(self.object_count, endianness)
    }
}

/// Returns the object count stored in the first 4 bytes of `bytes`.
///
/// The remaining 28 bytes are ignored.
#[must_use]
pub fn decode_header(bytes: &[u8; HEADER_BYTES], endianness: Endianness) -> u32 {
    let count = &bytes[..COUNT_BYTES];
    match endianness {
        Endianness::Big => BigEndian::read_u32(count),
        Endianness::Little => LittleEndian::read_u32(count),
    }
}

/// Serializes `object_count` followed by 28 zero bytes.
#[must_use]
pub fn encode_header(object_count: u32, endianness: Endianness) -> [u8; HEADER_BYTES] {
    let mut block = [0u8; HEADER_BYTES];
    let count = &mut block[..COUNT_BYTES];
    match endianness {
        Endianness::Big => BigEndian::write_u32(count, object_count),
        Endianness::Little => LittleEndian::write_u32(count, object_count),
    }
    block
}

/// Result of reading a header from a stream that may end early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRead {
    pub header: SetHeader,
    /// Bytes actually available for the header (at most [`HEADER_BYTES`]).
    pub bytes_read: usize,
}

impl HeaderRead {
    /// Returns `true` when the stream ended before a full header was read.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.bytes_read < HEADER_BYTES
    }
}

/// Reads up to [`HEADER_BYTES`] from `r` and decodes the object count.
///
/// A stream that ends before the 4-byte count field is complete yields a
/// count of 0 rather than an error. The caller is responsible for
/// positioning the stream at the entry region afterwards.
pub fn read_header<R: Read>(r: &mut R, endianness: Endianness) -> io::Result<HeaderRead> {
    let mut block = [0u8; HEADER_BYTES];
    let mut filled = 0;

    while filled < HEADER_BYTES {
        match r.read(&mut block[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    let object_count = if filled < COUNT_BYTES {
        0
    } else {
        decode_header(&block, endianness)
    };

    Ok(HeaderRead {
        header: SetHeader::new(object_count),
        bytes_read: filled,
    })
}
