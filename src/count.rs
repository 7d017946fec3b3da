//! Field cardinality expressions.
//!
//! A cardinality expression constrains how many lines a record holds under
//! one tag. The grammar has five forms:
//!
//! | Expression | Meaning |
//! |------------|---------|
//! | `0`        | field absent |
//! | `N`        | present with exactly N lines |
//! | `N+`       | present with at least N lines |
//! | `-N`       | present with at most N lines |
//! | `N-M`      | present with N to M lines, inclusive |
//!
//! Parsing is the one place a query can carry malformed input; it fails with
//! [`SearchError::InvalidCount`], which aborts the whole run.
//!
//! # Examples
//!
//! ```
//! use marcgrep::CountExpr;
//!
//! let expr: CountExpr = "2+".parse()?;
//! assert!(expr.matches(Some(3)));
//! assert!(!expr.matches(Some(1)));
//! assert!(!expr.matches(None));
//! # Ok::<(), marcgrep::SearchError>(())
//! ```

use crate::error::SearchError;
use std::str::FromStr;

/// A parsed field cardinality constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountExpr {
    /// `0` — the field must be absent from the record.
    Absent,
    /// `N` — the field must be present with exactly N lines.
    Exact(usize),
    /// `N+` — the field must be present with at least N lines.
    AtLeast(usize),
    /// `-N` — the field must be present with at most N lines.
    AtMost(usize),
    /// `N-M` — the field must be present with N to M lines, inclusive.
    Between(usize, usize),
}

impl CountExpr {
    /// Evaluate this constraint against a field's line count.
    ///
    /// `count` is `None` when the field is absent from the record. Only
    /// [`CountExpr::Absent`] is satisfied by an absent field; every other
    /// form requires presence plus its arithmetic condition.
    #[must_use]
    pub fn matches(&self, count: Option<usize>) -> bool {
        match (self, count) {
            (CountExpr::Absent, None) => true,
            (CountExpr::Absent, Some(_)) | (_, None) => false,
            (CountExpr::Exact(n), Some(c)) => c == *n,
            (CountExpr::AtLeast(n), Some(c)) => c >= *n,
            (CountExpr::AtMost(n), Some(c)) => c <= *n,
            (CountExpr::Between(lo, hi), Some(c)) => *lo <= c && c <= *hi,
        }
    }
}

impl FromStr for CountExpr {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = |digits: &str| {
            digits
                .parse::<usize>()
                .map_err(|_| SearchError::InvalidCount(s.to_string()))
        };

        if s == "0" {
            Ok(CountExpr::Absent)
        } else if let Some(n) = s.strip_suffix('+') {
            Ok(CountExpr::AtLeast(number(n)?))
        } else if let Some(n) = s.strip_prefix('-') {
            Ok(CountExpr::AtMost(number(n)?))
        } else if let Some((lo, hi)) = s.split_once('-') {
            Ok(CountExpr::Between(number(lo)?, number(hi)?))
        } else {
            Ok(CountExpr::Exact(number(s)?))
        }
    }
}
