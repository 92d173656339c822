//! A single-pass, byte-oriented, callback-driven JSON tokenizer.
//!
//! This is the "underlying incremental JSON tokenizer" the path-matcher
//! engine is built on top of. It never builds a value tree: it walks the
//! input once, validating structure and lexeme syntax, and calls one of the
//! eight [`Sink`] methods per token — the same eight-callback shape a
//! SAX-style JSON library (yajl and friends) exposes.
//!
//! Because one [`crate::scan`] call always hands the tokenizer its entire
//! input at once, this implementation has no cross-call chunk-resumption
//! state machine to maintain; each value is lexed with an ordinary
//! recursive-descent walk. Recursion depth is capped at [`MAX_NESTING_DEPTH`]
//! (tracked by `Tokenizer::depth`, checked in `enter_container`): past that
//! point `parse_object`/`parse_array` fail with a `NestingTooDeep`
//! [`SyntaxError`] instead of recursing further and risking a stack
//! overflow.

mod error;
mod number;
mod string;

use alloc::vec::Vec;

pub(crate) use error::{SyntaxError, SyntaxErrorKind};

use crate::options::ScanOptions;

/// Receives tokenizer events. Implemented by the matcher's runtime state.
///
/// Every method is infallible and returns nothing: per the tokenizer
/// contract this crate is built against, handlers always continue (the
/// matcher's own depth guard is what keeps a deep, unmatchable subtree
/// cheap, not early termination of the scan).
///
/// Byte positions are the tokenizer's absolute cursor in the input buffer;
/// for scalars and object/array boundaries, `begin`/`pos_after` always
/// bound a syntactically complete lexeme, so `input[begin..end]` round-trips
/// even when the content contains escape sequences.
pub(crate) trait Sink {
    /// `null`, spanning `[begin, end)`.
    fn on_null(&mut self, begin: u64, end: u64);
    /// `true`/`false`, spanning `[begin, end)`.
    fn on_boolean(&mut self, value: bool, begin: u64, end: u64);
    /// A number literal, spanning `[begin, end)`.
    fn on_number(&mut self, begin: u64, end: u64);
    /// A string value, decoded, spanning `[begin, end)` including quotes.
    fn on_string(&mut self, decoded: &[u8], begin: u64, end: u64);
    /// An object's `{`; `pos_after` is the byte position just past it.
    fn on_start_object(&mut self, pos_after: u64);
    /// An object key, decoded.
    fn on_object_key(&mut self, decoded: &[u8]);
    /// An object's `}`; `pos_after` is the byte position just past it.
    fn on_end_object(&mut self, pos_after: u64);
    /// An array's `[`; `pos_after` is the byte position just past it.
    fn on_start_array(&mut self, pos_after: u64);
    /// An array's `]`; `pos_after` is the byte position just past it.
    fn on_end_array(&mut self, pos_after: u64);
}

/// Leniency configuration read once at tokenizer construction.
#[derive(Debug, Clone, Copy)]
struct Config {
    allow_comments: bool,
    dont_validate_strings: bool,
    allow_trailing_garbage: bool,
    allow_multiple_values: bool,
    allow_partial_values: bool,
}

impl From<ScanOptions> for Config {
    fn from(opts: ScanOptions) -> Self {
        Self {
            allow_comments: opts.allow_comments,
            dont_validate_strings: opts.dont_validate_strings,
            allow_trailing_garbage: opts.allow_trailing_garbage,
            allow_multiple_values: opts.allow_multiple_values,
            allow_partial_values: opts.allow_partial_values,
        }
    }
}

/// Upper bound on container nesting during `parse_object`/`parse_array`
/// recursion. `parse_value` recurses once per open container, so this also
/// bounds the native call stack depth; without it, a few hundred thousand
/// `[` in a row would overflow the stack and abort the process instead of
/// producing a [`SyntaxError`].
const MAX_NESTING_DEPTH: usize = 512;

/// A single-pass tokenizer over one input buffer.
pub(crate) struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    config: Config,
    scratch: Vec<u8>,
    /// Number of object/array containers currently open, tracked so
    /// `parse_object`/`parse_array` recursion can be cut off at
    /// [`MAX_NESTING_DEPTH`] rather than recursing unboundedly.
    depth: usize,
}

type Result<T> = core::result::Result<T, SyntaxError>;

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a [u8], options: ScanOptions) -> Self {
        Self {
            input,
            pos: 0,
            config: Config::from(options),
            scratch: Vec::new(),
            depth: 0,
        }
    }

    /// Enter a container, failing once [`MAX_NESTING_DEPTH`] would be
    /// exceeded instead of letting recursion grow unbounded.
    fn enter_container(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.err(SyntaxErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        Ok(())
    }

    /// The tokenizer's running byte offset: the number of input bytes
    /// consumed up to and including the most recently completed lexeme.
    pub(crate) fn bytes_consumed(&self) -> u64 {
        self.pos as u64
    }

    /// Parse the input and, on success, call [`Self::finish`].
    ///
    /// Feeds every top-level value to `sink` (more than one only when
    /// `allow_multiple_values` is set), then validates there is nothing
    /// left over except whitespace, comments, or (if
    /// `allow_trailing_garbage`) arbitrary bytes.
    pub(crate) fn run<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        self.skip_trivia()?;
        if self.pos >= self.input.len() {
            if self.config.allow_partial_values {
                return Ok(());
            }
            return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput));
        }
        loop {
            match self.parse_value(sink) {
                Ok(()) => {}
                Err(e) if e.kind == SyntaxErrorKind::UnexpectedEndOfInput => {
                    return if self.config.allow_partial_values {
                        Ok(())
                    } else {
                        Err(e)
                    };
                }
                Err(e) => return Err(e),
            }
            let before_trivia = self.pos;
            self.skip_trivia()?;
            if self.pos >= self.input.len() {
                return Ok(());
            }
            if !self.config.allow_multiple_values {
                if self.config.allow_trailing_garbage {
                    return Ok(());
                }
                self.pos = before_trivia;
                return Err(self.err(SyntaxErrorKind::TrailingGarbage));
            }
        }
    }

    fn err(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError { kind, pos: self.pos }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn expect(&mut self, b: u8) -> Result<()> {
        match self.bump() {
            Some(found) if found == b => Ok(()),
            Some(found) => Err(self.err_at(SyntaxErrorKind::UnexpectedByte(found), self.pos - 1)),
            None => Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn err_at(&self, kind: SyntaxErrorKind, pos: usize) -> SyntaxError {
        SyntaxError { kind, pos }
    }

    /// Skip ASCII JSON whitespace and, if enabled, `//` and `/* */` comments.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => {
                    self.pos += 1;
                }
                Some(b'/') if self.config.allow_comments => {
                    self.skip_comment()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        let start = self.pos;
        self.pos += 1; // '/'
        match self.bump() {
            Some(b'/') => {
                while let Some(b) = self.peek() {
                    if b == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
                Ok(())
            }
            Some(b'*') => {
                loop {
                    match self.bump() {
                        Some(b'*') if self.peek() == Some(b'/') => {
                            self.pos += 1;
                            return Ok(());
                        }
                        Some(_) => {}
                        None => return Err(self.err_at(SyntaxErrorKind::UnterminatedComment, start)),
                    }
                }
            }
            Some(found) => Err(self.err_at(SyntaxErrorKind::UnexpectedByte(found), start + 1)),
            None => Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn parse_value<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        match self.peek() {
            Some(b'{') => self.parse_object(sink),
            Some(b'[') => self.parse_array(sink),
            Some(b'"') => {
                let (begin, end) = self.lex_string()?;
                sink.on_string(&self.scratch, begin, end);
                Ok(())
            }
            Some(b't') => self.parse_literal(b"true", LiteralEmit::True, sink),
            Some(b'f') => self.parse_literal(b"false", LiteralEmit::False, sink),
            Some(b'n') => self.parse_literal(b"null", LiteralEmit::Null, sink),
            Some(b'-' | b'0'..=b'9') => {
                let (begin, end) = self.lex_number()?;
                sink.on_number(begin, end);
                Ok(())
            }
            Some(found) => Err(self.err(SyntaxErrorKind::UnexpectedByte(found))),
            None => Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn parse_literal<S: Sink>(
        &mut self,
        literal: &'static [u8],
        emit: LiteralEmit,
        sink: &mut S,
    ) -> Result<()> {
        let begin = self.pos;
        for &expected in literal {
            if self.pos >= self.input.len() {
                return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput));
            }
            if self.input[self.pos] != expected {
                return Err(self.err(SyntaxErrorKind::UnexpectedByte(self.input[self.pos])));
            }
            self.pos += 1;
        }
        let end = self.pos as u64;
        let begin = begin as u64;
        match emit {
            LiteralEmit::Null => sink.on_null(begin, end),
            LiteralEmit::True => sink.on_boolean(true, begin, end),
            LiteralEmit::False => sink.on_boolean(false, begin, end),
        }
        Ok(())
    }

    fn parse_object<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        self.enter_container()?;
        let result = self.parse_object_body(sink);
        self.depth -= 1;
        result
    }

    fn parse_object_body<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        self.pos += 1; // '{'
        sink.on_start_object(self.pos as u64);
        self.skip_trivia()?;
        if self.peek() == Some(b'}') {
            self.pos += 1;
            sink.on_end_object(self.pos as u64);
            return Ok(());
        }
        loop {
            self.skip_trivia()?;
            if self.peek() != Some(b'"') {
                return Err(match self.peek() {
                    Some(found) => self.err(SyntaxErrorKind::UnexpectedByte(found)),
                    None => self.err(SyntaxErrorKind::UnexpectedEndOfInput),
                });
            }
            self.lex_string()?;
            sink.on_object_key(&self.scratch);
            self.skip_trivia()?;
            self.expect(b':')?;
            self.skip_trivia()?;
            self.parse_value(sink)?;
            self.skip_trivia()?;
            match self.bump() {
                Some(b',') => {}
                Some(b'}') => {
                    sink.on_end_object(self.pos as u64);
                    return Ok(());
                }
                Some(found) => return Err(self.err_at(SyntaxErrorKind::UnexpectedByte(found), self.pos - 1)),
                None => return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
            }
        }
    }

    fn parse_array<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        self.enter_container()?;
        let result = self.parse_array_body(sink);
        self.depth -= 1;
        result
    }

    fn parse_array_body<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        self.pos += 1; // '['
        sink.on_start_array(self.pos as u64);
        self.skip_trivia()?;
        if self.peek() == Some(b']') {
            self.pos += 1;
            sink.on_end_array(self.pos as u64);
            return Ok(());
        }
        loop {
            self.skip_trivia()?;
            self.parse_value(sink)?;
            self.skip_trivia()?;
            match self.bump() {
                Some(b',') => {}
                Some(b']') => {
                    sink.on_end_array(self.pos as u64);
                    return Ok(());
                }
                Some(found) => return Err(self.err_at(SyntaxErrorKind::UnexpectedByte(found), self.pos - 1)),
                None => return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
            }
        }
    }
}

/// Which literal a `parse_literal` call is lexing, resolved up front so the
/// shared loop doesn't need to re-dispatch on the first byte.
enum LiteralEmit {
    Null,
    True,
    False,
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Recorder {
        events: Vec<alloc::string::String>,
    }

    impl Sink for Recorder {
        fn on_null(&mut self, begin: u64, end: u64) {
            self.events.push(alloc::format!("null@{begin}:{end}"));
        }
        fn on_boolean(&mut self, value: bool, begin: u64, end: u64) {
            self.events.push(alloc::format!("bool({value})@{begin}:{end}"));
        }
        fn on_number(&mut self, begin: u64, end: u64) {
            self.events.push(alloc::format!("number@{begin}:{end}"));
        }
        fn on_string(&mut self, decoded: &[u8], begin: u64, end: u64) {
            self.events.push(alloc::format!(
                "string({:?})@{begin}:{end}",
                core::str::from_utf8(decoded).unwrap()
            ));
        }
        fn on_start_object(&mut self, pos_after: u64) {
            self.events.push(alloc::format!("start_object@{pos_after}"));
        }
        fn on_object_key(&mut self, decoded: &[u8]) {
            self.events.push(alloc::format!(
                "key({:?})",
                core::str::from_utf8(decoded).unwrap()
            ));
        }
        fn on_end_object(&mut self, pos_after: u64) {
            self.events.push(alloc::format!("end_object@{pos_after}"));
        }
        fn on_start_array(&mut self, pos_after: u64) {
            self.events.push(alloc::format!("start_array@{pos_after}"));
        }
        fn on_end_array(&mut self, pos_after: u64) {
            self.events.push(alloc::format!("end_array@{pos_after}"));
        }
    }

    fn run(input: &str, options: ScanOptions) -> Result<Recorder> {
        let mut recorder = Recorder::default();
        let mut tokenizer = Tokenizer::new(input.as_bytes(), options);
        tokenizer.run(&mut recorder)?;
        Ok(recorder)
    }

    #[test]
    fn scalars_have_exact_spans() {
        let r = run("null", ScanOptions::default()).unwrap();
        assert_eq!(r.events, vec!["null@0:4"]);
    }

    #[test]
    fn object_reports_keys_and_container_spans() {
        let r = run(r#"{"a":1,"b":2}"#, ScanOptions::default()).unwrap();
        assert_eq!(
            r.events,
            vec![
                "start_object@1",
                "key(\"a\")",
                "number@5:6",
                "key(\"b\")",
                "number@11:12",
                "end_object@13",
            ]
        );
    }

    #[test]
    fn rejects_trailing_garbage_by_default() {
        assert!(run("1 2", ScanOptions::default()).is_err());
    }

    #[test]
    fn allows_trailing_garbage_when_configured() {
        let opts = ScanOptions {
            allow_trailing_garbage: true,
            ..Default::default()
        };
        assert!(run("1 garbage", opts).is_ok());
    }

    #[test]
    fn allows_multiple_values_when_configured() {
        let opts = ScanOptions {
            allow_multiple_values: true,
            ..Default::default()
        };
        let r = run("1 2 3", opts).unwrap();
        assert_eq!(r.events.len(), 3);
    }

    #[test]
    fn rejects_truncated_input_by_default() {
        assert!(run("{\"a\":", ScanOptions::default()).is_err());
    }

    #[test]
    fn allows_partial_values_when_configured() {
        let opts = ScanOptions {
            allow_partial_values: true,
            ..Default::default()
        };
        assert!(run("{\"a\":", opts).is_ok());
    }

    #[test]
    fn rejects_nesting_past_the_depth_limit() {
        let mut input = alloc::string::String::new();
        for _ in 0..(MAX_NESTING_DEPTH + 1) {
            input.push('[');
        }
        let err = run(&input, ScanOptions::default()).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::NestingTooDeep);
    }

    #[test]
    fn accepts_nesting_at_the_depth_limit() {
        let mut input = alloc::string::String::new();
        for _ in 0..MAX_NESTING_DEPTH {
            input.push('[');
        }
        for _ in 0..MAX_NESTING_DEPTH {
            input.push(']');
        }
        assert!(run(&input, ScanOptions::default()).is_ok());
    }

    #[test]
    fn skips_comments_when_allowed() {
        let opts = ScanOptions {
            allow_comments: true,
            ..Default::default()
        };
        let r = run("/* hi */ 1 // trailing\n", opts).unwrap();
        assert_eq!(r.events, vec!["number@9:10"]);
    }
}
