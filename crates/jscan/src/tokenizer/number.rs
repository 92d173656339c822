//! Number lexing: validates the JSON number grammar and reports the raw
//! lexeme span. The lexeme bytes are never decoded to an `f64` — this crate
//! never materializes values.

use super::{SyntaxErrorKind, Tokenizer};

type Result<T> = core::result::Result<T, super::SyntaxError>;

impl Tokenizer<'_> {
    /// Lex a number starting at the current byte. Returns `(begin, end)`.
    pub(super) fn lex_number(&mut self) -> Result<(u64, u64)> {
        let begin = self.pos;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        match self.bump() {
            Some(b'0') => {}
            Some(b @ b'1'..=b'9') => {
                let _ = b;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            }
            Some(b) => return Err(self.err_at(SyntaxErrorKind::UnexpectedByte(b), self.pos - 1)),
            None => return Err(self.err(SyntaxErrorKind::UnexpectedEndOfInput)),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            let mut any = false;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                any = true;
            }
            if !any {
                return Err(self.err(SyntaxErrorKind::InvalidNumber));
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let mut any = false;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                any = true;
            }
            if !any {
                return Err(self.err(SyntaxErrorKind::InvalidNumber));
            }
        }

        Ok((begin as u64, self.pos as u64))
    }
}
