//! Path patterns: the surface-level entries callers supply, and the
//! compiled matcher elements the scan driver actually evaluates against.

use alloc::{vec, vec::Vec};

use bstr::BString;

use crate::error::CompileError;

/// One entry of a caller-supplied pattern, before compilation.
///
/// A pattern is `Vec<PatternEntry>`; a pattern set is `&[Vec<PatternEntry>]`
/// (or any `AsRef<[PatternEntry]>` sequence — see [`compile`]).
///
/// # Examples
///
/// ```
/// use jscan::PatternEntry;
///
/// let pattern = vec![PatternEntry::Key("b".into()), PatternEntry::Index(1)];
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternEntry {
    /// Match an object key exactly.
    Key(BString),
    /// Match an array index exactly. Must be non-negative.
    Index(i64),
    /// Match any object key at this depth.
    AnyKey,
    /// Match array indices in `[start, end]` (inclusive), or `[start, ∞)`
    /// when `end` is `-1` and `open_ended` is `false`.
    ///
    /// When `open_ended` is `true`, the effective upper bound is `end - 1`
    /// (mirroring an exclusive-range literal); `end == -1` together with
    /// `open_ended == true` is rejected by [`compile`] since it has no
    /// sensible meaning (closed ranges already use `-1` for infinity).
    Range {
        /// Inclusive lower bound; must be `>= 0`.
        start: i64,
        /// Upper bound, or `-1` for infinity; must be `>= -1`.
        end: i64,
        /// Whether `end` is exclusive.
        open_ended: bool,
    },
}

/// Sentinel matching any object key at its depth.
pub const ANY_KEY: PatternEntry = PatternEntry::AnyKey;

/// Sentinel matching any array index at its depth (`[0, ∞)`).
pub const ANY_INDEX: PatternEntry = PatternEntry::Range {
    start: 0,
    end: -1,
    open_ended: false,
};

/// A single compiled matcher element, evaluated against one depth of the
/// current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MatcherElement {
    /// Exact object key match, backed by owned storage.
    Key(BString),
    /// Any object key.
    AnyKey,
    /// Exact array index match.
    Index(u64),
    /// Inclusive array index range; `None` end means unbounded.
    IndexRange(u64, Option<u64>),
}

/// One compiled pattern: an ordered sequence of [`MatcherElement`]s.
pub(crate) type CompiledPattern = Vec<MatcherElement>;

/// A compiled, immutable set of patterns.
///
/// Produced by [`compile`], consumed by [`scan`](crate::scan). Patterns are
/// identified by their position in this set, which is also the bucket index
/// used for emitted matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPatterns {
    pub(crate) patterns: Vec<CompiledPattern>,
    pub(crate) max_depth: usize,
}

impl CompiledPatterns {
    /// The number of patterns (and thus the number of output buckets).
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether this set contains no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The longest pattern's length. Events at a depth greater than this are
    /// skipped by the scan driver's depth guard.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Compile a set of patterns into a [`CompiledPatterns`].
///
/// Each pattern is an ordered sequence of [`PatternEntry`]; an empty pattern
/// matches the root value. Validation happens before any pattern is
/// compiled, so a failure here never yields a partially-built set.
///
/// # Errors
///
/// Returns [`CompileError`] if a range entry's bounds are invalid (§4.1 of
/// the design: starts must be `>= 0`, ends must be `>= -1`, and an
/// open-ended range cannot end at `-1`).
///
/// # Examples
///
/// ```
/// use jscan::{PatternEntry, compile};
///
/// let patterns = vec![
///     vec![PatternEntry::Key("a".into())],
///     vec![PatternEntry::Key("b".into()), PatternEntry::Index(1)],
/// ];
/// let compiled = compile(&patterns).unwrap();
/// assert_eq!(compiled.len(), 2);
/// assert_eq!(compiled.max_depth(), 2);
/// ```
pub fn compile<P>(patterns: &[P]) -> Result<CompiledPatterns, CompileError>
where
    P: AsRef<[PatternEntry]>,
{
    for (pattern_idx, pattern) in patterns.iter().enumerate() {
        for (entry_idx, entry) in pattern.as_ref().iter().enumerate() {
            validate_entry(pattern_idx, entry_idx, entry)?;
        }
    }

    let mut compiled = Vec::with_capacity(patterns.len());
    let mut max_depth = 0;
    for pattern in patterns {
        let pattern = pattern.as_ref();
        max_depth = max_depth.max(pattern.len());
        compiled.push(pattern.iter().map(lower_entry).collect());
    }

    Ok(CompiledPatterns {
        patterns: compiled,
        max_depth,
    })
}

fn validate_entry(
    pattern_idx: usize,
    entry_idx: usize,
    entry: &PatternEntry,
) -> Result<(), CompileError> {
    let PatternEntry::Range {
        start,
        end,
        open_ended,
    } = *entry
    else {
        return Ok(());
    };
    if start < 0 {
        return Err(CompileError::NegativeRangeStart {
            pattern: pattern_idx,
            entry: entry_idx,
        });
    }
    if end < -1 {
        return Err(CompileError::InvalidRangeEnd {
            pattern: pattern_idx,
            entry: entry_idx,
        });
    }
    if open_ended && end == -1 {
        return Err(CompileError::OpenEndedRangeWithNegativeOneEnd {
            pattern: pattern_idx,
            entry: entry_idx,
        });
    }
    Ok(())
}

#[allow(clippy::cast_sign_loss)]
fn lower_entry(entry: &PatternEntry) -> MatcherElement {
    match entry {
        PatternEntry::Key(key) => MatcherElement::Key(key.clone()),
        PatternEntry::AnyKey => MatcherElement::AnyKey,
        PatternEntry::Index(n) => MatcherElement::Index(*n as u64),
        PatternEntry::Range {
            start,
            end,
            open_ended,
        } => {
            let start = *start as u64;
            match (*end, *open_ended) {
                (-1, false) => MatcherElement::IndexRange(start, None),
                (e, false) => MatcherElement::IndexRange(start, Some(e as u64)),
                // `b == 0` with an exclusive end has an effective upper bound
                // of `-1`: no non-negative index can ever satisfy it.
                // `validate_entry` only rejects `b == -1` here (already
                // infinity), so `b == 0` must still compile, just to a range
                // that can never match rather than wrapping `-1` to `u64::MAX`.
                (0, true) => MatcherElement::IndexRange(1, Some(0)),
                (e, true) => MatcherElement::IndexRange(start, Some((e - 1) as u64)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn empty_pattern_compiles() {
        let patterns: Vec<Vec<PatternEntry>> = vec![vec![]];
        let compiled = compile(&patterns).unwrap();
        assert_eq!(compiled.max_depth(), 0);
        assert_eq!(compiled.patterns[0], vec![]);
    }

    #[test]
    fn any_index_is_unbounded_from_zero() {
        let patterns = vec![vec![ANY_INDEX]];
        let compiled = compile(&patterns).unwrap();
        assert_eq!(
            compiled.patterns[0][0],
            MatcherElement::IndexRange(0, None)
        );
    }

    #[test]
    fn open_ended_range_excludes_end() {
        let patterns = vec![vec![PatternEntry::Range {
            start: 0,
            end: 5,
            open_ended: true,
        }]];
        let compiled = compile(&patterns).unwrap();
        assert_eq!(
            compiled.patterns[0][0],
            MatcherElement::IndexRange(0, Some(4))
        );
    }

    #[test]
    fn negative_range_start_is_rejected() {
        let patterns = vec![vec![PatternEntry::Range {
            start: -1,
            end: 5,
            open_ended: false,
        }]];
        assert_eq!(
            compile(&patterns),
            Err(CompileError::NegativeRangeStart {
                pattern: 0,
                entry: 0
            })
        );
    }

    #[test]
    fn open_ended_with_negative_one_end_is_rejected() {
        let patterns = vec![vec![PatternEntry::Range {
            start: 0,
            end: -1,
            open_ended: true,
        }]];
        assert_eq!(
            compile(&patterns),
            Err(CompileError::OpenEndedRangeWithNegativeOneEnd {
                pattern: 0,
                entry: 0
            })
        );
    }

    #[test]
    fn compiling_twice_is_idempotent() {
        let patterns = vec![vec![PatternEntry::Key("a".into()), ANY_INDEX]];
        assert_eq!(compile(&patterns), compile(&patterns));
    }

    #[test]
    fn open_ended_range_with_zero_end_compiles_to_an_unsatisfiable_range() {
        // `b == 0` with `open_ended` has an effective upper bound of `-1`:
        // a degenerate but valid range that can never match any index.
        let patterns = vec![vec![PatternEntry::Range {
            start: 0,
            end: 0,
            open_ended: true,
        }]];
        let compiled = compile(&patterns).unwrap();
        let MatcherElement::IndexRange(start, end) = &compiled.patterns[0][0] else {
            panic!("expected an index range");
        };
        assert!(*start > end.unwrap());
    }
}
