//! String lexing: decodes a quoted JSON string into the tokenizer's scratch
//! buffer and reports its raw `[begin, end)` span (quotes included).

use super::{SyntaxErrorKind, Tokenizer};

type Result<T> = core::result::Result<T, super::SyntaxError>;

impl Tokenizer<'_> {
    /// Lex a string starting at the current `"`. On success, the decoded
    /// content is left in `self.scratch` and `(begin, end)` is returned,
    /// where `begin` is the opening quote and `end` is just past the
    /// closing quote.
    pub(super) fn lex_string(&mut self) -> Result<(u64, u64)> {
        let begin = self.pos;
        self.pos += 1; // opening quote
        self.scratch.clear();

        if self.config.dont_validate_strings {
            self.lex_string_raw()?;
        } else {
            self.lex_string_strict()?;
        }

        Ok((begin as u64, self.pos as u64))
    }

    /// Copy bytes verbatim until an unescaped `"`, without interpreting
    /// escape letters or validating UTF-8 — only `\"` is special-cased so
    /// the terminator can still be found.
    fn lex_string_raw(&mut self) -> Result<()> {
        loop {
            match self.bump() {
                Some(b'"') => return Ok(()),
                Some(b'\\') => {
                    self.scratch.push(b'\\');
                    match self.bump() {
                        Some(b) => self.scratch.push(b),
                        None => return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
                    }
                }
                Some(b) => self.scratch.push(b),
                None => return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
            }
        }
    }

    /// Decode standard JSON string escapes and validate the result is
    /// well-formed UTF-8.
    fn lex_string_strict(&mut self) -> Result<()> {
        loop {
            match self.bump() {
                Some(b'"') => {
                    if core::str::from_utf8(&self.scratch).is_err() {
                        return Err(self.err(SyntaxErrorKind::InvalidUtf8));
                    }
                    return Ok(());
                }
                Some(b'\\') => self.lex_escape()?,
                Some(b) if b < 0x20 => {
                    return Err(self.err_at(SyntaxErrorKind::UnexpectedByte(b), self.pos - 1));
                }
                Some(b) => self.scratch.push(b),
                None => return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
            }
        }
    }

    fn lex_escape(&mut self) -> Result<()> {
        match self.bump() {
            Some(b'"') => self.scratch.push(b'"'),
            Some(b'\\') => self.scratch.push(b'\\'),
            Some(b'/') => self.scratch.push(b'/'),
            Some(b'b') => self.scratch.push(0x08),
            Some(b'f') => self.scratch.push(0x0C),
            Some(b'n') => self.scratch.push(b'\n'),
            Some(b'r') => self.scratch.push(b'\r'),
            Some(b't') => self.scratch.push(b'\t'),
            Some(b'u') => {
                let cp = self.lex_unicode_escape()?;
                let cp = if (0xD800..=0xDBFF).contains(&cp) {
                    self.lex_surrogate_pair(cp)?
                } else {
                    cp
                };
                let ch = char::from_u32(cp).ok_or_else(|| self.err(SyntaxErrorKind::InvalidUnicodeEscape))?;
                let mut buf = [0u8; 4];
                self.scratch.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            Some(b) => return Err(self.err_at(SyntaxErrorKind::InvalidEscape(b), self.pos - 1)),
            None => return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
        }
        Ok(())
    }

    fn lex_surrogate_pair(&mut self, high: u32) -> Result<u32> {
        if self.bump() != Some(b'\\') || self.bump() != Some(b'u') {
            return Err(self.err(SyntaxErrorKind::InvalidUnicodeEscape));
        }
        let low = self.lex_unicode_escape()?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(self.err(SyntaxErrorKind::InvalidUnicodeEscape));
        }
        Ok(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
    }

    fn lex_unicode_escape(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        for _ in 0..4 {
            let digit = match self.bump() {
                Some(b) => (b as char)
                    .to_digit(16)
                    .ok_or_else(|| self.err_at(SyntaxErrorKind::InvalidUnicodeEscape, self.pos - 1))?,
                None => return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
            };
            value = value * 16 + digit;
        }
        Ok(value)
    }
}
