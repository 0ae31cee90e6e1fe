//! Buffered file helpers for records.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use super::format::Record;

/// Write `value` to a new file at `path`, replacing any existing file.
pub fn save_to_path<T: Record, P: AsRef<Path>>(value: &T, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    value.write_to(&mut writer)?;
    writer.flush()
}

/// Read one record from the file at `path`.
pub fn load_from_path<T: Record, P: AsRef<Path>>(path: P) -> io::Result<T> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    T::read_from(&mut reader)
}
