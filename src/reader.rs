//! Splitting decoded dump text into records.
//!
//! This module provides [`RecordReader`] for reading records one at a time
//! from the decoded text of one input file. The decoder emits records
//! separated by a blank line (two consecutive newlines); each chunk between
//! separators is parsed into a [`Record`].
//!
//! # Examples
//!
//! ```
//! use marcgrep::RecordReader;
//!
//! let text = "001 123\n245 00 $aFirst\n\n001 456\n245 00 $aSecond";
//! let mut reader = RecordReader::new(text);
//!
//! while let Some(record) = reader.read_record() {
//!     assert!(record.contains_tag("001"));
//! }
//! ```

use crate::record::Record;

/// Reads records one at a time from decoded dump text.
///
/// Splitting is exactly on `"\n\n"`: a trailing separator yields a final
/// empty chunk, which parses into the degenerate single-bucket record rather
/// than being dropped. Records arrive strictly in stream order.
#[derive(Debug)]
pub struct RecordReader<'a> {
    chunks: std::str::Split<'a, &'static str>,
}

impl<'a> RecordReader<'a> {
    /// Create a reader over the decoded text of one input file.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        RecordReader {
            chunks: text.split("\n\n"),
        }
    }

    /// Read the next record.
    ///
    /// Returns `None` once the input is exhausted. Parsing never fails:
    /// every chunk, including an empty one, yields a record.
    pub fn read_record(&mut self) -> Option<Record> {
        self.chunks.next().map(Record::parse)
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.read_record()
    }
}
