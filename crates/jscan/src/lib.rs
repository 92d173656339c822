#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![deny(clippy::suspicious)]
//! Streaming JSON path extractor.
//!
//! Given a JSON document and a set of path patterns, [`scan`] returns, for
//! each pattern, the ordered list of byte ranges in the input where a
//! matching value occurred, together with its JSON [`ValueKind`] and,
//! optionally, the path at which it was found.
//!
//! This is not a JSON parser in the usual sense: no value is ever
//! materialized. A match is a `(begin, end)` byte range into the caller's
//! own buffer; extracting or decoding the substring is left to the caller.
//! This keeps a scan over a large document cheap when only a handful of
//! values, named by path, are actually wanted.
//!
//! # Example
//!
//! ```
//! use jscan::{PatternEntry, ScanOptions, ValueKind, scan};
//!
//! let input = br#"{"a":1,"b":[10,20,30]}"#;
//! let patterns = vec![
//!     vec![PatternEntry::Key("a".into())],
//!     vec![PatternEntry::Key("b".into()), PatternEntry::Index(1)],
//! ];
//!
//! let buckets = scan(input, &patterns, ScanOptions::default()).unwrap();
//! let hit = &buckets[1][0];
//! assert_eq!(hit.kind, ValueKind::Number);
//! assert_eq!(&input[hit.begin as usize..hit.end as usize], b"20");
//! ```
//!
//! # Crate layout
//!
//! - `pattern` (private) — the compiled pattern model behind [`compile`] and
//!   [`CompiledPatterns`].
//! - `path` (private) — the runtime current-path stack behind the
//!   materialized [`PathElement`]/[`PathKey`] types.
//! - `matcher` (private) — event handlers that drive the current path and
//!   emit matches.
//! - `tokenizer` (private) — the single-pass JSON tokenizer this crate scans
//!   with.
//! - `scan` (private) — the driver behind [`scan()`] and [`scan_patterns`]
//!   tying the above together.

extern crate alloc;

mod error;
mod matcher;
mod options;
mod path;
mod pattern;
mod scan;
mod tokenizer;
mod value_kind;

pub use error::{CompileError, ScanError};
pub use options::ScanOptions;
pub use path::{PathElement, PathKey};
pub use pattern::{ANY_INDEX, ANY_KEY, CompiledPatterns, PatternEntry, compile};
pub use scan::{Buckets, Error, Match, Patterns, scan, scan_patterns};
pub use value_kind::ValueKind;
