#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Library overview
//!
//! The crate splits into two core components and their I/O boundary:
//!
//! - [`record`] — parsing one blank-line-delimited chunk of dump text into a
//!   field-indexed [`Record`]
//! - [`query`] — the immutable [`Query`] specification: predicate groups,
//!   selection, and output projection
//! - [`count`] — the [`CountExpr`] field cardinality grammar
//! - [`reader`] — [`RecordReader`], yielding records from decoded dump text
//! - [`decoder`] — running the external decoder program, with gzip
//!   transparency and latin-1 output decoding
//! - [`error`] — [`SearchError`] and the [`Result`] alias
//!
//! # Quick start
//!
//! ```
//! use marcgrep::{Query, RecordReader};
//!
//! let text = "001 123\n245 00 $aMise en scène\n\n001 456\n245 00 $aOther title";
//!
//! let query = Query::new()
//!     .field_pattern("245", "sc[eèé]ne")?
//!     .output_fields(vec!["001".to_string()]);
//!
//! let selected: Vec<String> = RecordReader::new(text)
//!     .filter(|record| query.matches(record))
//!     .flat_map(|record| query.project(&record))
//!     .collect();
//!
//! assert_eq!(selected, vec!["001 123".to_string()]);
//! # Ok::<(), marcgrep::SearchError>(())
//! ```

pub mod count;
pub mod decoder;
pub mod error;
pub mod query;
pub mod reader;
pub mod record;

pub use count::CountExpr;
pub use error::{Result, SearchError};
pub use query::Query;
pub use reader::RecordReader;
pub use record::Record;
