//! Writers for the per-page and global frequency records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use super::{PAGE_MARKER, SEPARATOR, validate_token};
use crate::error::WriteError;
use crate::freq::{Frequency, sorted_entries};

/// Appends page frequency blocks to the per-page record, one page at a time.
///
/// Pages must arrive in strictly increasing order starting at the configured
/// origin. Each page's block is serialized in full before anything is
/// written, so a failure never corrupts previously written pages, and no
/// page's frequency map is retained after its block is on disk.
pub struct PageRecordWriter {
    out: BufWriter<File>,
    origin: u32,
    last_page: Option<u32>,
}

impl PageRecordWriter {
    /// Create a per-page record at `path` with page numbering starting at 1.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, WriteError> {
        Self::with_origin(path, 1)
    }

    /// Create a per-page record with an explicit page-number origin.
    pub fn with_origin(path: impl AsRef<Path>, origin: u32) -> Result<Self, WriteError> {
        let file = File::create(path)?;
        Ok(Self {
            out: BufWriter::new(file),
            origin,
            last_page: None,
        })
    }

    /// Append one page's frequency block.
    ///
    /// Entries are written in ascending token order so the record is
    /// reproducible. An empty frequency map still writes its marker line, so
    /// empty pages survive a round trip.
    pub fn write_page(&mut self, page: u32, freq: &Frequency) -> Result<(), WriteError> {
        let min = self.last_page.map_or(self.origin, |p| p + 1);
        if page < min {
            return Err(WriteError::PageOrder { min, got: page });
        }

        let mut block = format!("{PAGE_MARKER}{page}\n");
        let mut entries: Vec<(&str, u64)> = freq.iter().map(|(t, &c)| (t.as_str(), c)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (token, count) in entries {
            validate_token(token)?;
            block.push_str(token);
            block.push(SEPARATOR);
            block.push_str(&count.to_string());
            block.push('\n');
        }

        self.out.write_all(block.as_bytes())?;
        self.out.flush()?;
        self.last_page = Some(page);
        debug!("wrote page {} ({} distinct tokens)", page, freq.len());
        Ok(())
    }

    /// Flush and close the record. It is only complete once this returns.
    pub fn finish(mut self) -> Result<(), WriteError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Write a completed global frequency map to `path`, all or nothing.
///
/// Entries are ordered descending by count with ties broken by ascending
/// token. The record is staged in a temporary file next to the destination
/// and moved into place atomically; on failure the destination is untouched
/// and the temporary is removed.
pub fn write_global(path: impl AsRef<Path>, freq: &Frequency) -> Result<(), WriteError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    for (token, count) in sorted_entries(freq) {
        validate_token(token)?;
        writeln!(tmp, "{token}{SEPARATOR}{count}")?;
    }
    tmp.flush()?;
    tmp.persist(path).map_err(|e| WriteError::Finalize {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!("wrote global record ({} distinct tokens)", freq.len());
    Ok(())
}
