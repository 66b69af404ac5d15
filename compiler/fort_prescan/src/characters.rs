//! Fortran source character classes.

/// Check if a byte is a blank (space or horizontal tab).
#[inline]
pub fn is_blank(ch: u8) -> bool {
    ch == b' ' || ch == b'\t'
}

/// Check if a byte may appear in a Fortran token outside a character
/// literal.
///
/// Letters, digits, `_`, and the special characters of the Fortran
/// character set that start or continue tokens. Blanks, `&`, and `!` are
/// handled separately by their callers.
#[inline]
pub fn is_valid_fortran_token_character(ch: u8) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            b'_' | b'"'
                | b'%'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b'-'
                | b'.'
                | b'/'
                | b':'
                | b';'
                | b'<'
                | b'='
                | b'>'
                | b'['
                | b']'
        )
}

/// Tracks whether bytes fall inside a character literal.
///
/// Literals are delimited by `'` or `"`; a doubled delimiter inside a
/// literal closes and immediately reopens it, so the whole `'it''s'` is
/// reported as literal text.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LiteralTracker {
    quote: Option<u8>,
}

impl LiteralTracker {
    /// Feed the next byte. Returns `true` if it belongs to a character
    /// literal, delimiters included.
    #[inline]
    pub(crate) fn step(&mut self, ch: u8) -> bool {
        match self.quote {
            Some(quote) => {
                if ch == quote {
                    self.quote = None;
                }
                true
            }
            None if ch == b'\'' || ch == b'"' => {
                self.quote = Some(ch);
                true
            }
            None => false,
        }
    }

    /// Classify every byte of `bytes`: `true` where it is literal text.
    #[cfg(test)]
    pub(crate) fn mask(bytes: &[u8]) -> Vec<bool> {
        let mut tracker = LiteralTracker::default();
        bytes.iter().map(|&ch| tracker.step(ch)).collect()
    }
}
