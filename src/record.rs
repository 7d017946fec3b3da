//! Line-format MARC record structure and parsing.
//!
//! This module provides [`Record`], the field-indexed form of one record from
//! a line-format MARC dump. A dump record is a block of tagged lines; the
//! field tag is everything before a line's first space character:
//!
//! ```text
//! 001 90021548
//! 245 00 $aMise en scène
//! 500 00 $aFirst note
//! 500 00 $aSecond note
//! ```
//!
//! Parsing buckets each line under its tag, keeping the raw line verbatim so
//! that printing reproduces the input byte for byte.
//!
//! # Examples
//!
//! ```
//! use marcgrep::Record;
//!
//! let record = Record::parse("001 90021548\n500 00 $aFirst note\n500 00 $aSecond note");
//! assert_eq!(record.lines("001"), Some(&["001 90021548".to_string()][..]));
//! assert_eq!(record.count("500"), Some(2));
//! assert_eq!(record.count("700"), None);
//! ```

use memchr::memchr;
use std::collections::BTreeMap;
use std::fmt;

/// One record from a line-format MARC dump, indexed by field tag.
///
/// Lines are stored verbatim in arrival order under the tag given by the
/// substring before the line's first space (the whole line when it contains
/// no space). Tag iteration is lexicographic, which is also the order fields
/// are printed in when a whole record is emitted.
///
/// A record is immutable after construction and never empty: parsing an
/// empty chunk yields a single empty-string tag bucket holding one empty
/// line. Such degenerate records satisfy no field-keyed predicate but flow
/// through evaluation and printing without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Field tag -> raw lines bearing that tag, in arrival order.
    fields: BTreeMap<String, Vec<String>>,
}

impl Record {
    /// Parse one blank-line-delimited chunk of decoder output.
    ///
    /// Every line of the chunk lands in exactly one bucket; no line is
    /// dropped, reordered within its bucket, or mutated.
    ///
    /// # Examples
    ///
    /// ```
    /// use marcgrep::Record;
    ///
    /// let record = Record::parse("245 00 $aTitle\n260 00 $aCopenhagen");
    /// assert!(record.lines("245").is_some());
    /// assert!(record.lines("999").is_none());
    /// ```
    #[must_use]
    pub fn parse(chunk: &str) -> Self {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for line in chunk.split('\n') {
            let tag = match memchr(b' ', line.as_bytes()) {
                Some(pos) => &line[..pos],
                None => line,
            };
            fields.entry(tag.to_string()).or_default().push(line.to_string());
        }
        Record { fields }
    }

    /// Get all lines stored under a tag, in arrival order.
    ///
    /// Returns `None` when the record has no field with that tag.
    #[must_use]
    pub fn lines(&self, tag: &str) -> Option<&[String]> {
        self.fields.get(tag).map(std::vec::Vec::as_slice)
    }

    /// Number of lines stored under a tag, or `None` when the tag is absent.
    ///
    /// A present tag always has at least one line.
    #[must_use]
    pub fn count(&self, tag: &str) -> Option<usize> {
        self.fields.get(tag).map(std::vec::Vec::len)
    }

    /// Check whether the record has a field with the given tag.
    #[must_use]
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.fields.contains_key(tag)
    }

    /// Iterate over field tags in lexicographic order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(std::string::String::as_str)
    }

    /// Iterate over `(tag, lines)` pairs in lexicographic tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(tag, lines)| (tag.as_str(), lines.as_slice()))
    }
}

impl fmt::Display for Record {
    /// Format the whole record: every field's lines in lexicographic tag
    /// order, newline-separated, without a trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for line in self.fields.values().flatten() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
            first = false;
        }
        Ok(())
    }
}
