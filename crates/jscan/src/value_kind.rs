//! The JSON value kinds a match record can report.

/// The JSON type of a matched value.
///
/// This crate never materializes values, so `ValueKind` is the only type
/// information a caller gets about a match: enough to decide how to parse
/// the raw bytes at `[begin, end)`, never what those bytes mean.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The JSON literal `null`.
    Null,
    /// The JSON literals `true` and `false`.
    Boolean,
    /// A JSON number, in whatever lexeme form it appeared in the input.
    Number,
    /// A JSON string, including its surrounding quotes.
    String,
    /// A JSON object, from its opening `{` to its closing `}`.
    Object,
    /// A JSON array, from its opening `[` to its closing `]`.
    Array,
}
