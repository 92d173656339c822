//! The scan driver: compiles (or reuses) a pattern set, feeds input bytes
//! through the tokenizer, and returns one ordered bucket of matches per
//! pattern.

use alloc::vec::Vec;

use crate::{
    ValueKind,
    error::{CompileError, ScanError},
    matcher::ScanState,
    options::ScanOptions,
    path::PathElement,
    pattern::{CompiledPatterns, PatternEntry, compile},
    tokenizer::Tokenizer,
};

/// One matched value: its byte range in the input, its JSON kind, and, if
/// [`ScanOptions::with_path`] was set, the path at which it was found.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Start of the match, inclusive.
    pub begin: u64,
    /// End of the match, exclusive. `input[begin..end]` is the matched
    /// lexeme (or container span) verbatim.
    pub end: u64,
    /// The JSON type of the matched value.
    pub kind: ValueKind,
    /// The path at which the match occurred, present iff `with_path` was
    /// requested.
    pub path: Option<Vec<PathElement>>,
}

/// The output of a scan: one ordered bucket per compiled pattern, indexed by
/// the pattern's position in the set passed to [`compile`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Buckets(Vec<Vec<Match>>);

impl Buckets {
    /// The bucket for pattern `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[Match]> {
        self.0.get(index).map(Vec::as_slice)
    }

    /// The number of buckets (equal to the number of patterns scanned).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no buckets at all (an empty pattern set).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over buckets in pattern order.
    pub fn iter(&self) -> core::slice::Iter<'_, Vec<Match>> {
        self.0.iter()
    }
}

impl core::ops::Index<usize> for Buckets {
    type Output = [Match];

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Buckets {
    type Item = &'a Vec<Match>;
    type IntoIter = core::slice::Iter<'a, Vec<Match>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Either a previously compiled pattern set (reused as-is) or a raw pattern
/// list (compiled inline and discarded after the scan).
///
/// Accepted by [`scan`] so callers with a hot pattern set can pay the
/// compilation cost once via [`compile`], while one-off callers can pass a
/// pattern list directly.
pub enum Patterns<'a> {
    /// A pattern set already produced by [`compile`].
    Compiled(&'a CompiledPatterns),
    /// A raw pattern list, compiled internally before the scan begins.
    Raw(&'a [Vec<PatternEntry>]),
}

impl<'a> From<&'a CompiledPatterns> for Patterns<'a> {
    fn from(compiled: &'a CompiledPatterns) -> Self {
        Patterns::Compiled(compiled)
    }
}

impl<'a> From<&'a [Vec<PatternEntry>]> for Patterns<'a> {
    fn from(raw: &'a [Vec<PatternEntry>]) -> Self {
        Patterns::Raw(raw)
    }
}

impl<'a> From<&'a Vec<Vec<PatternEntry>>> for Patterns<'a> {
    fn from(raw: &'a Vec<Vec<PatternEntry>>) -> Self {
        Patterns::Raw(raw.as_slice())
    }
}

/// Either half of what [`scan`] can fail with: pattern compilation or
/// tokenizer parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The inline pattern list failed compilation; see [`compile`].
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// The tokenizer failed to parse the input; see [`ScanError`].
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Scan `input` against `patterns`, returning one bucket of matches per
/// pattern.
///
/// `patterns` accepts either a previously [`compile`]d set (`&CompiledPatterns`)
/// or a raw pattern list (`&[Vec<PatternEntry>]`), compiled internally and
/// discarded once the scan completes.
///
/// # Errors
///
/// Returns [`Error::Compile`] if `patterns` is a raw list that fails
/// validation, or [`Error::Scan`] if the tokenizer fails to parse `input`.
/// No buckets are returned alongside either error: partial results are
/// always discarded, never surfaced.
pub fn scan<'a>(
    input: &[u8],
    patterns: impl Into<Patterns<'a>>,
    options: ScanOptions,
) -> Result<Buckets, Error> {
    match patterns.into() {
        Patterns::Compiled(compiled) => Ok(scan_patterns(input, compiled, options)?),
        Patterns::Raw(raw) => {
            let compiled = compile(raw)?;
            Ok(scan_patterns(input, &compiled, options)?)
        }
    }
}

/// Scan `input` against an already-compiled pattern set.
///
/// Prefer this over [`scan`] when the same [`CompiledPatterns`] is reused
/// across many scans, since compilation is paid for once up front.
///
/// # Errors
///
/// Returns [`ScanError`] if the tokenizer fails to parse `input`. No
/// buckets are returned alongside the error.
pub fn scan_patterns(
    input: &[u8],
    compiled: &CompiledPatterns,
    options: ScanOptions,
) -> Result<Buckets, ScanError> {
    let mut state = ScanState::new(compiled, options.with_path, options.symbolize_path_keys);
    let mut tokenizer = Tokenizer::new(input, options);

    if let Err(syntax_error) = tokenizer.run(&mut state) {
        return Err(ScanError {
            message: syntax_error.describe(input, options.verbose_error),
            bytes_consumed: tokenizer.bytes_consumed(),
        });
    }

    #[cfg(any(test, feature = "fuzzing"))]
    debug_assert_eq!(state.depth(), 0, "depth must return to zero at scan end (P1)");

    Ok(Buckets(state.into_buckets()))
}
