//! Error types raised by pattern compilation and by scanning.

use alloc::string::String;

use thiserror::Error;

/// A pattern (or pattern set) failed validation during [`compile`](crate::compile).
///
/// No partial state is ever produced when this error is raised: compilation
/// either fully succeeds or fails before any [`CompiledPatterns`](crate::CompiledPatterns)
/// is returned.
///
/// Unlike the dynamically-typed surface this crate's design is grounded on,
/// `PatternEntry` is a Rust enum: the "each entry must be a string, integer,
/// or range" rule is enforced by the type system and cannot fail at
/// [`compile`](crate::compile) time. Only the numeric range rules below can
/// actually be violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A range entry's start was negative.
    #[error("pattern {pattern}, entry {entry}: range start must be >= 0")]
    NegativeRangeStart {
        /// Index of the offending pattern.
        pattern: usize,
        /// Index of the offending entry within that pattern.
        entry: usize,
    },
    /// A range entry's end was less than -1.
    #[error("pattern {pattern}, entry {entry}: range end must be >= -1")]
    InvalidRangeEnd {
        /// Index of the offending pattern.
        pattern: usize,
        /// Index of the offending entry within that pattern.
        entry: usize,
    },
    /// An open-ended range (`a...`) had its end pinned to -1, which has no
    /// meaning: closed ranges use -1 to mean "infinity" already.
    #[error("pattern {pattern}, entry {entry}: open-ended range with -1 end")]
    OpenEndedRangeWithNegativeOneEnd {
        /// Index of the offending pattern.
        pattern: usize,
        /// Index of the offending entry within that pattern.
        entry: usize,
    },
}

/// The underlying tokenizer failed to parse the input.
///
/// No buckets are returned alongside this error: partial results are
/// discarded before it is raised, per the scan driver's error discipline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (consumed {bytes_consumed} bytes)")]
pub struct ScanError {
    /// The tokenizer's diagnostic message, terse or verbose depending on
    /// [`ScanOptions::verbose_error`](crate::ScanOptions::verbose_error).
    pub message: String,
    /// The tokenizer's `bytes_consumed` value at the point of failure.
    pub bytes_consumed: u64,
}
