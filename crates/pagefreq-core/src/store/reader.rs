//! Readers for the per-page and global frequency records.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use super::{PAGE_MARKER, SEPARATOR};
use crate::error::ParseError;
use crate::freq::Frequency;

/// Lazy reader over a per-page frequency record.
///
/// Yields one `(page number, Frequency)` pair per page block, materializing a
/// single page at a time from a buffered line stream. Re-opening a finished
/// record yields the same sequence. Any malformed line ends the iteration
/// with an error naming that line; bad records are never skipped or merged
/// into a neighboring page.
pub struct PageRecordReader {
    lines: Lines<BufReader<File>>,
    line_no: usize,
    // Marker consumed while scanning the previous page's entries.
    pending: Option<(u32, usize)>,
    last_page: Option<u32>,
    done: bool,
}

impl PageRecordReader {
    /// Open a per-page record for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
            pending: None,
            last_page: None,
            done: false,
        })
    }

    fn next_line(&mut self) -> Option<std::io::Result<String>> {
        let line = self.lines.next();
        if line.is_some() {
            self.line_no += 1;
        }
        line
    }

    fn fail(&mut self, err: ParseError) -> Option<<Self as Iterator>::Item> {
        self.done = true;
        Some(Err(err))
    }
}

fn parse_marker(line: &str, line_no: usize) -> Result<u32, ParseError> {
    line.strip_prefix(PAGE_MARKER)
        .and_then(|rest| rest.parse::<u32>().ok())
        .ok_or_else(|| ParseError::BadMarker {
            line: line_no,
            content: line.to_string(),
        })
}

fn parse_entry(line: &str, line_no: usize) -> Result<(String, u64), ParseError> {
    let bad = || ParseError::BadEntry {
        line: line_no,
        content: line.to_string(),
    };

    let Some((token, count)) = line.split_once(SEPARATOR) else {
        return Err(bad());
    };
    if token.is_empty() || token.starts_with('#') || count.contains(SEPARATOR) {
        return Err(bad());
    }
    let count: u64 = count.parse().map_err(|_| bad())?;
    // Page frequencies carry positive counts only.
    if count == 0 {
        return Err(bad());
    }
    Ok((token.to_string(), count))
}

impl Iterator for PageRecordReader {
    type Item = Result<(u32, Frequency), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (page, marker_line) = match self.pending.take() {
            Some(pending) => pending,
            None => match self.next_line()? {
                Err(e) => return self.fail(e.into()),
                Ok(line) => match parse_marker(&line, self.line_no) {
                    Ok(page) => (page, self.line_no),
                    Err(e) => return self.fail(e),
                },
            },
        };

        if let Some(prev) = self.last_page {
            if page <= prev {
                return self.fail(ParseError::PageOrder {
                    line: marker_line,
                    prev,
                    got: page,
                });
            }
        }
        self.last_page = Some(page);

        let mut freq = Frequency::new();
        loop {
            match self.next_line() {
                None => {
                    self.done = true;
                    break;
                }
                Some(Err(e)) => return self.fail(e.into()),
                Some(Ok(line)) => {
                    // Entry tokens never start with '#', so any such line
                    // must be the next page's marker.
                    if line.starts_with('#') {
                        match parse_marker(&line, self.line_no) {
                            Ok(next_page) => {
                                self.pending = Some((next_page, self.line_no));
                                break;
                            }
                            Err(e) => return self.fail(e),
                        }
                    }
                    match parse_entry(&line, self.line_no) {
                        Ok((token, count)) => {
                            if freq.insert(token.clone(), count).is_some() {
                                return self.fail(ParseError::DuplicateToken {
                                    line: self.line_no,
                                    token,
                                });
                            }
                        }
                        Err(e) => return self.fail(e),
                    }
                }
            }
        }

        Some(Ok((page, freq)))
    }
}

/// Parse a global frequency record back into a map.
///
/// Strict: a malformed or duplicate line is an error identifying the line,
/// never silently dropped.
pub fn read_global(path: impl AsRef<Path>) -> Result<Frequency, ParseError> {
    let file = File::open(path)?;
    let mut freq = Frequency::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let (token, count) = parse_entry(&line, line_no)?;
        if freq.insert(token.clone(), count).is_some() {
            return Err(ParseError::DuplicateToken {
                line: line_no,
                token,
            });
        }
    }
    Ok(freq)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::freq::count_tokens;
    use crate::store::{PageRecordWriter, write_global};

    fn write_record(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.txt");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_round_trip_reproduces_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.txt");

        let pages = vec![
            (1, count_tokens(["ai", "safety", "ai"])),
            (2, Frequency::new()),
            (3, count_tokens(["safety"])),
        ];

        let mut writer = PageRecordWriter::create(&path).unwrap();
        for (page, freq) in &pages {
            writer.write_page(*page, freq).unwrap();
        }
        writer.finish().unwrap();

        let read: Vec<(u32, Frequency)> = PageRecordReader::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read, pages);
    }

    #[test]
    fn test_reader_is_restartable() {
        let (_dir, path) = write_record("# page 1\nai 2\n# page 2\nsafety 1\n");

        let first: Vec<_> = PageRecordReader::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        let second: Vec<_> = PageRecordReader::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_record_yields_nothing() {
        let (_dir, path) = write_record("");
        assert_eq!(PageRecordReader::open(&path).unwrap().count(), 0);
    }

    #[test]
    fn test_reader_rejects_missing_marker() {
        let (_dir, path) = write_record("ai 2\n");
        let err = PageRecordReader::open(&path).unwrap().next().unwrap();
        assert!(matches!(
            err,
            Err(ParseError::BadMarker { line: 1, .. })
        ));
    }

    #[test]
    fn test_reader_rejects_malformed_entry_with_line() {
        let (_dir, path) = write_record("# page 1\nai 2\nbroken\n");
        let err = PageRecordReader::open(&path).unwrap().next().unwrap();
        assert!(matches!(err, Err(ParseError::BadEntry { line: 3, .. })));
    }

    #[test]
    fn test_reader_rejects_zero_count() {
        let (_dir, path) = write_record("# page 1\nai 0\n");
        let err = PageRecordReader::open(&path).unwrap().next().unwrap();
        assert!(matches!(err, Err(ParseError::BadEntry { line: 2, .. })));
    }

    #[test]
    fn test_reader_rejects_duplicate_token() {
        let (_dir, path) = write_record("# page 1\nai 2\nai 3\n");
        let err = PageRecordReader::open(&path).unwrap().next().unwrap();
        assert!(matches!(
            err,
            Err(ParseError::DuplicateToken { line: 3, .. })
        ));
    }

    #[test]
    fn test_reader_rejects_out_of_order_pages() {
        let (_dir, path) = write_record("# page 2\nai 1\n# page 1\nsafety 1\n");
        let mut reader = PageRecordReader::open(&path).unwrap();

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap();
        assert!(matches!(
            err,
            Err(ParseError::PageOrder {
                line: 3,
                prev: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_reader_fuses_after_error() {
        let (_dir, path) = write_record("# page 1\nbroken line here\n# page 2\nai 1\n");
        let mut reader = PageRecordReader::open(&path).unwrap();

        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_read_global_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("global.txt");

        let freq = count_tokens(["ai", "ai", "safety", "risk", "risk", "risk"]);
        write_global(&path, &freq).unwrap();

        assert_eq!(read_global(&path).unwrap(), freq);
    }

    #[test]
    fn test_read_global_rejects_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("global.txt");
        std::fs::write(&path, "ai 2\nnot-an-entry\n").unwrap();

        let err = read_global(&path).unwrap_err();
        assert!(matches!(err, ParseError::BadEntry { line: 2, .. }));
    }
}
