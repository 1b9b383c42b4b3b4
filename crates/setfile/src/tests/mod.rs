
use crate::SetEntry;

/// Builds an entry whose bytes are all `fill`.
pub(crate) fn entry(fill: u8) -> SetEntry {
    SetEntry::new([fill; 32])
}

/// Builds an entry with distinct bytes `seed, seed+1, ...` (wrapping).
pub(crate) fn patterned_entry(seed: u8) -> SetEntry {
    let mut bytes = [0u8; 32];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = seed.wrapping_add(i as u8);
    }
    SetEntry::new(bytes)
}
