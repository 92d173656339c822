//! Runtime state maintained while scanning: the current path, the
//! per-depth container start offsets, and the per-event logic that decides
//! whether the current path satisfies each compiled pattern.
//!
//! The depth guard below is the one piece of this module worth reading
//! carefully: events deeper than the longest pattern must still keep the
//! depth counter correct (so that later, shallower events see the right
//! depth again), but must do nothing else — no path bookkeeping, no
//! `starts` write, no match attempt. Getting the `<=` vs `<` boundary
//! wrong here either under-matches the root value (when every pattern's
//! length, including the empty pattern, is `0`) or over-indexes the
//! `current_path`/`starts` storage, which is sized to hold exactly
//! `max_depth` path frames.

use alloc::vec::Vec;

use crate::{
    ValueKind,
    pattern::{CompiledPatterns, MatcherElement},
    path::{CurrentPath, Frame, Interner},
    scan::Match,
    tokenizer::Sink,
};

/// One match, not yet wrapped with a materialized path.
struct Hit {
    begin: u64,
    end: u64,
    kind: ValueKind,
}

/// Runtime state for one scan: the current path stack, the per-depth
/// container start offsets, and the output buckets being filled in.
pub(crate) struct ScanState<'a> {
    compiled: &'a CompiledPatterns,
    depth: usize,
    current_path: CurrentPath,
    /// `starts[k]`: byte offset of the `{`/`[` for the container open at
    /// depth `k`, for `k` in `[0, max_depth]` inclusive.
    starts: Vec<u64>,
    interner: Option<Interner>,
    with_path: bool,
    buckets: Vec<Vec<Match>>,
}

impl<'a> ScanState<'a> {
    pub(crate) fn new(
        compiled: &'a CompiledPatterns,
        with_path: bool,
        symbolize_path_keys: bool,
    ) -> Self {
        let max_depth = compiled.max_depth;
        Self {
            compiled,
            depth: 0,
            current_path: CurrentPath::with_capacity(max_depth),
            starts: alloc::vec![0u64; max_depth + 1],
            interner: (with_path && symbolize_path_keys).then(Interner::default),
            with_path,
            buckets: (0..compiled.patterns.len()).map(|_| Vec::new()).collect(),
        }
    }

    pub(crate) fn into_buckets(self) -> Vec<Vec<Match>> {
        self.buckets
    }

    /// Current depth, exposed only so the scan driver can assert P1 (depth
    /// returns to zero once every opened container is closed).
    #[cfg(any(test, feature = "fuzzing"))]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    fn max_depth(&self) -> usize {
        self.compiled.max_depth
    }

    fn emit_if_match(&mut self, hit_depth: usize, begin: u64, end: u64, kind: ValueKind) {
        let prefix = self.current_path.prefix(hit_depth);
        let mut computed: Option<Hit> = None;
        for (pattern_idx, pattern) in self.compiled.patterns.iter().enumerate() {
            if pattern.len() != hit_depth {
                continue;
            }
            if !pattern_matches(pattern, prefix) {
                continue;
            }
            let hit = computed.get_or_insert(Hit { begin, end, kind });
            let path = self
                .with_path
                .then(|| self.current_path.materialize(hit_depth, self.interner.as_mut()));
            self.buckets[pattern_idx].push(Match {
                begin: hit.begin,
                end: hit.end,
                kind: hit.kind,
                path,
            });
        }
    }
}

fn pattern_matches(pattern: &[MatcherElement], prefix: &[Frame]) -> bool {
    debug_assert_eq!(pattern.len(), prefix.len());
    pattern
        .iter()
        .zip(prefix)
        .all(|(elem, frame)| match (elem, frame) {
            (MatcherElement::Key(expected), Frame::Key(actual)) => {
                expected.as_slice() == actual.as_slice()
            }
            (MatcherElement::AnyKey, Frame::Key(_)) => true,
            (MatcherElement::Index(expected), Frame::Index(actual)) => {
                *actual >= 0 && *expected == *actual as u64
            }
            (MatcherElement::IndexRange(start, end), Frame::Index(actual)) => {
                *actual >= 0 && {
                    let actual = *actual as u64;
                    actual >= *start && end.is_none_or(|end| actual <= end)
                }
            }
            _ => false,
        })
}

impl Sink for ScanState<'_> {
    fn on_null(&mut self, begin: u64, end: u64) {
        self.scalar(ValueKind::Null, begin, end);
    }

    fn on_boolean(&mut self, _value: bool, begin: u64, end: u64) {
        self.scalar(ValueKind::Boolean, begin, end);
    }

    fn on_number(&mut self, begin: u64, end: u64) {
        self.scalar(ValueKind::Number, begin, end);
    }

    fn on_string(&mut self, _decoded: &[u8], begin: u64, end: u64) {
        self.scalar(ValueKind::String, begin, end);
    }

    fn on_start_object(&mut self, pos_after: u64) {
        self.start_container(pos_after, CurrentPath::open_object);
    }

    fn on_object_key(&mut self, decoded: &[u8]) {
        if self.depth > self.max_depth() {
            return;
        }
        self.current_path.set_key(decoded);
    }

    fn on_end_object(&mut self, pos_after: u64) {
        self.end_container(pos_after, ValueKind::Object);
    }

    fn on_start_array(&mut self, pos_after: u64) {
        self.start_container(pos_after, CurrentPath::open_array);
    }

    fn on_end_array(&mut self, pos_after: u64) {
        self.end_container(pos_after, ValueKind::Array);
    }
}

impl ScanState<'_> {
    fn scalar(&mut self, kind: ValueKind, begin: u64, end: u64) {
        if self.depth > self.max_depth() {
            return;
        }
        self.current_path.increment_array_index(self.depth);
        self.emit_if_match(self.depth, begin, end, kind);
    }

    /// `home_depth` is the depth at which a container opens: the number of
    /// containers strictly enclosing it. A frame is pushed (and later
    /// popped) only when `home_depth < max_depth`, since `current_path` has
    /// room for exactly `max_depth` frames; a match attempt happens
    /// whenever `home_depth <= max_depth`, one wider, so that a pattern as
    /// long as `max_depth` itself (including the empty pattern when
    /// `max_depth == 0`) can still match the root value.
    fn start_container(&mut self, pos_after: u64, open: fn(&mut CurrentPath, usize)) {
        let home_depth = self.depth;
        if home_depth <= self.max_depth() {
            self.current_path.increment_array_index(home_depth);
            self.starts[home_depth] = pos_after - 1;
            if home_depth < self.max_depth() {
                open(&mut self.current_path, home_depth);
            }
        }
        self.depth += 1;
    }

    fn end_container(&mut self, pos_after: u64, kind: ValueKind) {
        self.depth -= 1;
        let home_depth = self.depth;
        if home_depth <= self.max_depth() {
            if home_depth < self.max_depth() {
                self.current_path.close(home_depth);
            }
            let begin = self.starts[home_depth];
            self.emit_if_match(home_depth, begin, pos_after, kind);
        }
    }
}
