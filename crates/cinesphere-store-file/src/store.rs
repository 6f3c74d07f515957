//! [`FileStore`]: The flat-file implementation of [`BookingStore`].

use std::{
  fs,
  io::ErrorKind,
  path::{Path, PathBuf},
};

use cinesphere_core::{record::BookingRecord, store::BookingStore};

use crate::{Error, Result};

/// Bookings stored as `id|showtimeKey|seats` lines in one file.
#[derive(Debug, Clone)]
pub struct FileStore {
  path: PathBuf,
}

impl FileStore {
  /// A store backed by `path`. The file is not touched until the first
  /// load or save.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// Decode `contents` line by line, skipping blank and malformed lines.
  fn decode(&self, contents: &str) -> Vec<BookingRecord> {
    let mut records = Vec::new();

    for (index, line) in contents.lines().enumerate() {
      if line.trim().is_empty() {
        continue;
      }
      match line.parse::<BookingRecord>() {
        Ok(record) => records.push(record),
        Err(e) => tracing::warn!(
          path = %self.path.display(),
          line = index + 1,
          "skipping booking line: {e}"
        ),
      }
    }

    records
  }

  fn encode(records: &[BookingRecord]) -> String {
    records.iter().map(|r| format!("{r}\n")).collect()
  }
}

impl BookingStore for FileStore {
  type Error = Error;

  /// A missing file is an empty store.
  fn load(&self) -> Result<Vec<BookingRecord>> {
    let contents = match fs::read_to_string(&self.path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        tracing::info!(path = %self.path.display(), "no booking file yet; starting fresh");
        return Ok(Vec::new());
      }
      Err(source) => {
        return Err(Error::Read { path: self.path.clone(), source });
      }
    };

    let records = self.decode(&contents);
    tracing::debug!(path = %self.path.display(), count = records.len(), "loaded booking records");
    Ok(records)
  }

  fn save(&self, records: &[BookingRecord]) -> Result<()> {
    fs::write(&self.path, Self::encode(records)).map_err(|source| Error::Write {
      path: self.path.clone(),
      source,
    })?;
    tracing::debug!(path = %self.path.display(), count = records.len(), "saved booking records");
    Ok(())
  }
}
