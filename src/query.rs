//! Record selection and projection.
//!
//! This module provides [`Query`], the immutable search specification applied
//! to every record in a run. A query combines up to three independent
//! predicate groups with an optional output selector:
//!
//! - **Field patterns** — `(tag, regex)` pairs; each requested tag must have
//!   at least one line matching its pattern.
//! - **Record pattern** — a single regex searched across each field's joined
//!   lines.
//! - **Field counts** — `(tag, cardinality)` pairs, see [`CountExpr`].
//!
//! Groups that were not requested contribute no constraint; a record is
//! selected when every requested group is satisfied.
//!
//! # Examples
//!
//! ```
//! use marcgrep::{Query, Record};
//!
//! let record = Record::parse("001 9002\n245 00 $aMise en scène\n500 00 $aNote");
//!
//! let query = Query::new()
//!     .field_pattern("245", "sc[eèé]ne")?
//!     .field_count("500", "1+")?
//!     .output_fields(vec!["245".to_string(), "001".to_string()]);
//!
//! assert!(query.matches(&record));
//! assert_eq!(
//!     query.project(&record),
//!     vec!["245 00 $aMise en scène".to_string(), "001 9002".to_string()]
//! );
//! # Ok::<(), marcgrep::SearchError>(())
//! ```

use crate::count::CountExpr;
use crate::error::Result;
use crate::record::Record;
use indexmap::IndexMap;
use regex::Regex;

/// An immutable search specification: predicate groups plus output selector.
///
/// Built once per run with the chained constructor methods, then applied
/// read-only against every record. All patterns use unanchored substring
/// search. The regex compilation and cardinality parsing done by the
/// constructors are the only fallible steps; [`Query::matches`] and
/// [`Query::project`] are total over arbitrary record content.
#[derive(Debug, Clone)]
pub struct Query {
    /// Per-field patterns, in request order. Tags may repeat.
    field_patterns: Vec<(String, Regex)>,
    /// Pattern searched across each field's joined lines.
    record_pattern: Option<Regex>,
    /// Per-field cardinality constraints, in request order. Tags may repeat.
    field_counts: Vec<(String, CountExpr)>,
    /// Tags to print for a selected record, in print order.
    output_fields: Option<Vec<String>>,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// Create an empty query that selects every record and prints it whole.
    #[must_use]
    pub fn new() -> Self {
        Query {
            field_patterns: Vec::new(),
            record_pattern: None,
            field_counts: Vec::new(),
            output_fields: None,
        }
    }

    /// Require `tag` to have at least one line matching `pattern`.
    ///
    /// May be called any number of times; when the same tag is given twice,
    /// the later entry's result replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPattern`] if `pattern` is not a valid
    /// regular expression.
    ///
    /// [`SearchError::InvalidPattern`]: crate::SearchError::InvalidPattern
    pub fn field_pattern(mut self, tag: impl Into<String>, pattern: &str) -> Result<Self> {
        self.field_patterns.push((tag.into(), Regex::new(pattern)?));
        Ok(self)
    }

    /// Require `pattern` to match somewhere in the record.
    ///
    /// The pattern is tested against each field's newline-joined lines in
    /// turn, never against text spanning two fields.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPattern`] if `pattern` is not a valid
    /// regular expression.
    ///
    /// [`SearchError::InvalidPattern`]: crate::SearchError::InvalidPattern
    pub fn record_pattern(mut self, pattern: &str) -> Result<Self> {
        self.record_pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Constrain how many lines the record holds under `tag`.
    ///
    /// `expr` uses the [`CountExpr`] grammar. As with
    /// [`field_pattern`](Self::field_pattern), a repeated tag's later entry
    /// replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidCount`] if `expr` is malformed. This is
    /// the fatal class: callers must abort the run, not skip the record.
    ///
    /// [`SearchError::InvalidCount`]: crate::SearchError::InvalidCount
    pub fn field_count(mut self, tag: impl Into<String>, expr: &str) -> Result<Self> {
        self.field_counts.push((tag.into(), expr.parse()?));
        Ok(self)
    }

    /// Restrict output to the given tags, printed in the given order.
    ///
    /// Selected tags absent from a record are skipped silently.
    #[must_use]
    pub fn output_fields(mut self, tags: Vec<String>) -> Self {
        self.output_fields = Some(tags);
        self
    }

    /// Check whether at least one predicate group was requested.
    ///
    /// The boundary requires one; the evaluator itself treats an all-absent
    /// query as matching everything.
    #[must_use]
    pub fn has_predicates(&self) -> bool {
        !self.field_patterns.is_empty()
            || self.record_pattern.is_some()
            || !self.field_counts.is_empty()
    }

    /// Decide whether a record is selected.
    ///
    /// Every requested predicate group must be satisfied. Tags absent from
    /// the record are unsatisfied, never an error.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if !self.field_patterns.is_empty() && !self.field_patterns_satisfied(record) {
            return false;
        }
        if let Some(ref pattern) = self.record_pattern {
            let hit = record
                .iter()
                .any(|(_, lines)| pattern.is_match(&lines.join("\n")));
            if !hit {
                return false;
            }
        }
        if !self.field_counts.is_empty() && !self.field_counts_satisfied(record) {
            return false;
        }
        true
    }

    /// Group 1: AND over distinct tags, each satisfied by some line matching.
    fn field_patterns_satisfied(&self, record: &Record) -> bool {
        let mut satisfied: IndexMap<&str, bool> = IndexMap::new();
        for (tag, pattern) in &self.field_patterns {
            let hit = record
                .lines(tag)
                .is_some_and(|lines| lines.iter().any(|line| pattern.is_match(line)));
            // A repeated tag overwrites: satisfaction is tracked per tag.
            satisfied.insert(tag.as_str(), hit);
        }
        satisfied.values().all(|&hit| hit)
    }

    /// Group 3: AND over distinct tags, each count constraint evaluated
    /// against the tag's line count.
    fn field_counts_satisfied(&self, record: &Record) -> bool {
        let mut satisfied: IndexMap<&str, bool> = IndexMap::new();
        for (tag, expr) in &self.field_counts {
            satisfied.insert(tag.as_str(), expr.matches(record.count(tag)));
        }
        satisfied.values().all(|&hit| hit)
    }

    /// Produce the text blocks to print for a selected record.
    ///
    /// With an output selector, one block per selector tag present in the
    /// record, in selector order; absent tags yield nothing. Without one,
    /// one block per field in lexicographic tag order. Each block is the
    /// field's lines joined with newlines.
    #[must_use]
    pub fn project(&self, record: &Record) -> Vec<String> {
        match self.output_fields {
            Some(ref tags) => tags
                .iter()
                .filter_map(|tag| record.lines(tag).map(|lines| lines.join("\n")))
                .collect(),
            None => record.iter().map(|(_, lines)| lines.join("\n")).collect(),
        }
    }
}
