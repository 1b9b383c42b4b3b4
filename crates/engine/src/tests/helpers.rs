use setfile::{write_set_file, Endianness, SetEntry, ENTRY_BYTES, HEADER_BYTES};
use std::fs;
use std::path::{Path, PathBuf};

/// Entry tagged with `file` and `index` so concatenation order is visible.
pub fn tagged_entry(file: u8, index: u8) -> SetEntry {
    let mut bytes = [0u8; ENTRY_BYTES];
    bytes[0] = file;
    bytes[1] = index;
    for (i, b) in bytes.iter_mut().enumerate().skip(2) {
        *b = file ^ index ^ i as u8;
    }
    SetEntry::new(bytes)
}

pub fn tagged_entries(file: u8, count: u8) -> Vec<SetEntry> {
    (0..count).map(|i| tagged_entry(file, i)).collect()
}

/// Writes a well-formed SET file and returns its path.
pub fn write_input(dir: &Path, name: &str, endianness: Endianness, entries: &[SetEntry]) -> PathBuf {
    let path = dir.join(name);
    write_set_file(&path, endianness, entries).unwrap();
    path
}

/// Writes raw bytes to `dir/name` and returns the path.
pub fn write_raw(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

/// Splits a SET file into its 4 count bytes and its entry region.
pub fn split_output(path: &Path) -> ([u8; 4], Vec<u8>) {
    let data = fs::read(path).unwrap();
    assert!(data.len() >= HEADER_BYTES, "output shorter than a header");
    assert!(
        data[4..HEADER_BYTES].iter().all(|&b| b == 0),
        "reserved header bytes must be zero"
    );
    let mut count = [0u8; 4];
    count.copy_from_slice(&data[..4]);
    (count, data[HEADER_BYTES..].to_vec())
}

pub fn concat(entries: &[SetEntry]) -> Vec<u8> {
    entries.iter().flat_map(|e| e.as_bytes().iter().copied()).collect()
}

/// Decision function that must never be called.
pub fn never_asked(path: &Path) -> bool {
    panic!("unexpected overwrite prompt for {}", path.display());
}
