//! Interactive overwrite confirmation.

use std::io::{self, Read, Write};
use std::path::Path;

/// Asks on stdout whether `path` may be overwritten and reads one byte of
/// answer from stdin.
pub fn confirm_overwrite(path: &Path) -> bool {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    ask_overwrite(path, &mut io::stdout(), &mut input)
}

/// Writes the overwrite prompt to `out` and reads a single byte from `input`.
///
/// Only `y` or `Y` accepts. Anything else, including end of input or a read
/// error, declines.
pub fn ask_overwrite<W: Write, R: Read>(path: &Path, out: &mut W, input: &mut R) -> bool {
    writeln!(out, "Output file {} already exists!", path.display()).ok();
    write!(out, "Do you want to overwrite it? [no]: ").ok();
    out.flush().ok();

    let mut answer = [0u8; 1];
    loop {
        match input.read(&mut answer) {
            Ok(1) => return matches!(answer[0], b'y' | b'Y'),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            _ => return false,
        }
    }
}
