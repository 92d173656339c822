//! Tokenizer-level syntax errors.

use alloc::{borrow::ToOwned, format, string::String};

/// A byte position paired with the error that occurred there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub(crate) kind: SyntaxErrorKind,
    pub(crate) pos: usize,
}

impl SyntaxError {
    /// Render this error as the message attached to [`crate::ScanError`].
    ///
    /// Terse form is just the error kind and byte offset; verbose form adds
    /// the 1-based line/column and a short excerpt of the surrounding input.
    pub(crate) fn describe(&self, input: &[u8], verbose: bool) -> String {
        if !verbose {
            return format!("{} at byte {}", self.kind, self.pos);
        }
        let (line, col) = line_col(input, self.pos);
        let excerpt = excerpt(input, self.pos);
        format!(
            "{} at byte {} (line {line}, column {col}): {excerpt}",
            self.kind, self.pos
        )
    }
}

/// 1-based `(line, column)` of `pos` within `input`.
fn line_col(input: &[u8], pos: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for &b in input.iter().take(pos.min(input.len())) {
        if b == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// A short, lossily-decoded excerpt of `input` centered on `pos`.
fn excerpt(input: &[u8], pos: usize) -> String {
    const RADIUS: usize = 16;
    let start = pos.saturating_sub(RADIUS);
    let end = (pos + RADIUS).min(input.len());
    String::from_utf8_lossy(&input[start..end]).into_owned()
}

/// What went wrong while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyntaxErrorKind {
    UnexpectedByte(u8),
    UnexpectedEndOfInput,
    InvalidNumber,
    InvalidEscape(u8),
    InvalidUnicodeEscape,
    InvalidUtf8,
    TrailingGarbage,
    UnterminatedComment,
    NestingTooDeep,
}

impl core::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnexpectedByte(b) if b.is_ascii_graphic() || *b == b' ' => {
                write!(f, "unexpected character '{}'", *b as char)
            }
            Self::UnexpectedByte(b) => write!(f, "unexpected byte 0x{b:02x}"),
            Self::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            Self::InvalidNumber => write!(f, "invalid number literal"),
            Self::InvalidEscape(b) if b.is_ascii_graphic() => {
                write!(f, "invalid escape sequence '\\{}'", *b as char)
            }
            Self::InvalidEscape(b) => write!(f, "invalid escape sequence '\\0x{b:02x}'"),
            Self::InvalidUnicodeEscape => write!(f, "invalid unicode escape sequence"),
            Self::InvalidUtf8 => write!(f, "invalid UTF-8 in string"),
            Self::TrailingGarbage => write!(f, "trailing garbage after JSON value"),
            Self::UnterminatedComment => write!(f, "unterminated comment"),
            Self::NestingTooDeep => write!(f, "maximum nesting depth exceeded"),
        }
    }
}
