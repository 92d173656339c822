//! The current path: a stack mirroring the containers currently open around
//! the value being scanned, plus the owned, materialized form of a path
//! that is attached to a match record when requested.

use alloc::{
    borrow::ToOwned,
    collections::BTreeMap,
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};

/// One frame of the runtime current-path stack.
///
/// Object keys are copied into owned, per-depth storage the moment the
/// tokenizer reports them: the tokenizer's own key buffer is only valid for
/// the duration of the callback that delivered it (see `tokenizer::Sink`),
/// while a key frame here must remain valid until the *next* key event at
/// the same depth — i.e. for the entire time its value (and anything
/// nested inside it) is being scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frame {
    /// Awaiting (or holding) an object key at this depth.
    Key(Vec<u8>),
    /// An array index at this depth, `-1` until the first child is seen.
    Index(i64),
}

/// The stack of currently open containers around the value being produced.
///
/// Sized once to `max_depth` at construction and never reallocated beyond
/// that: the depth guard in the event handlers (see `matcher.rs`) ensures
/// depth never exceeds the space reserved here.
#[derive(Debug)]
pub(crate) struct CurrentPath {
    frames: Vec<Frame>,
}

impl CurrentPath {
    pub(crate) fn with_capacity(max_depth: usize) -> Self {
        Self {
            frames: Vec::with_capacity(max_depth),
        }
    }

    /// Frames `[0, depth)`, the path of the value currently being produced.
    pub(crate) fn prefix(&self, depth: usize) -> &[Frame] {
        &self.frames[..depth]
    }

    /// Increment the array index at `depth - 1`, if that frame is an index.
    /// A no-op at the root or when the enclosing container is an object.
    pub(crate) fn increment_array_index(&mut self, depth: usize) {
        if depth == 0 {
            return;
        }
        if let Frame::Index(i) = &mut self.frames[depth - 1] {
            *i += 1;
        }
    }

    /// Open a new frame at `depth`, initialized for an object (awaiting a
    /// key event) or an array (`Index(-1)`, about to be incremented to `0`
    /// on the first child).
    pub(crate) fn open_object(&mut self, depth: usize) {
        debug_assert_eq!(self.frames.len(), depth);
        self.frames.push(Frame::Key(Vec::new()));
    }

    /// See [`Self::open_object`].
    pub(crate) fn open_array(&mut self, depth: usize) {
        debug_assert_eq!(self.frames.len(), depth);
        self.frames.push(Frame::Index(-1));
    }

    /// Close the frame at `depth` (the frame that was most recently opened).
    pub(crate) fn close(&mut self, depth: usize) {
        debug_assert_eq!(self.frames.len(), depth + 1);
        self.frames.pop();
    }

    /// Overwrite the key at the top frame, which must be an object frame.
    pub(crate) fn set_key(&mut self, key: &[u8]) {
        if let Some(Frame::Key(buf)) = self.frames.last_mut() {
            buf.clear();
            buf.extend_from_slice(key);
        }
    }

    /// Materialize `prefix(depth)` into an owned [`PathElement`] vector.
    pub(crate) fn materialize(
        &self,
        depth: usize,
        interner: Option<&mut Interner>,
    ) -> Vec<PathElement> {
        let mut interner = interner;
        self.prefix(depth)
            .iter()
            .map(|frame| match frame {
                Frame::Key(bytes) => {
                    let text = String::from_utf8_lossy(bytes).into_owned();
                    let key = match interner.as_deref_mut() {
                        Some(interner) => PathKey::Symbol(interner.intern(&text)),
                        None => PathKey::String(text),
                    };
                    PathElement::Key(key)
                }
                Frame::Index(i) => {
                    debug_assert!(*i >= 0, "materialized index must be non-negative");
                    #[allow(clippy::cast_sign_loss)]
                    PathElement::Index(*i as u64)
                }
            })
            .collect()
    }
}

/// One component of a materialized path: an object key or an array index.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElement {
    /// An object key.
    Key(PathKey),
    /// An array index.
    Index(u64),
}

/// A materialized object key: either a plain owned string, or an interned
/// key shared across every match in the same scan (requested via
/// [`ScanOptions::symbolize_path_keys`](crate::ScanOptions::symbolize_path_keys)),
/// the closest idiomatic Rust stand-in for an interned symbol.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKey {
    /// An owned, unshared key.
    String(String),
    /// A key shared with every other occurrence of the same bytes within
    /// this scan.
    Symbol(Rc<str>),
}

impl PathKey {
    /// The key's text, regardless of representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PathKey::String(s) => s,
            PathKey::Symbol(s) => s,
        }
    }
}

/// Deduplicates materialized keys within one scan so that repeated object
/// keys share a single allocation.
#[derive(Debug, Default)]
pub(crate) struct Interner {
    table: BTreeMap<alloc::boxed::Box<str>, Rc<str>>,
}

impl Interner {
    pub(crate) fn intern(&mut self, text: &str) -> Rc<str> {
        if let Some(existing) = self.table.get(text) {
            return Rc::clone(existing);
        }
        let rc: Rc<str> = Rc::from(text);
        self.table
            .insert(text.to_owned().into_boxed_str(), Rc::clone(&rc));
        rc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interner_shares_allocation_for_repeated_keys() {
        let mut interner = Interner::default();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn array_index_increments_from_minus_one() {
        let mut path = CurrentPath::with_capacity(2);
        path.open_array(0);
        assert_eq!(path.prefix(1), &[Frame::Index(-1)]);
        path.increment_array_index(1);
        assert_eq!(path.prefix(1), &[Frame::Index(0)]);
        path.increment_array_index(1);
        assert_eq!(path.prefix(1), &[Frame::Index(1)]);
    }

    #[test]
    fn key_frame_is_overwritten_in_place() {
        let mut path = CurrentPath::with_capacity(1);
        path.open_object(0);
        path.set_key(b"a");
        assert_eq!(path.prefix(1), &[Frame::Key(alloc::vec![b'a'])]);
        path.set_key(b"bb");
        assert_eq!(path.prefix(1), &[Frame::Key(alloc::vec![b'b', b'b'])]);
    }
}
