//! Token sequence: bytes, token boundaries, and per-byte provenance.
//!
//! # Layout
//!
//! ```text
//! chars:       c a l l f ( x y
//! offset:      0 1 2 3 4 5 6 7
//! start:       0       4 5          closed tokens "call", "f", "(xy"
//! next_start:              6        open token "xy"
//! ```
//!
//! A closed token ends where the next one starts, and the last closed token
//! runs to the end of `chars`: while bytes are open, the last token's view
//! (`"(xy"` above) includes them. Splicing and rebuilding instead work on
//! *committed* extents, where the last closed token stops at `next_start`
//! (`"("`) and the open bytes are carried separately.
//!
//! # Splicing
//!
//! Every append operation fuses its first token into the open token, if
//! there is one. The prescanner relies on this to continue a lexeme across a
//! line continuation or into the first token of a macro expansion, while
//! keeping the remaining token boundaries of the spliced text.

use std::fmt;
use std::ops::Range;

use fort_source::{CookedSink, Provenance, ProvenanceMap, ProvenanceRange};
use tracing::debug;

use crate::characters::is_blank;

mod normalize;
mod validate;

/// A contiguous run of bytes partitioned into preprocessing tokens, with
/// the provenance of every byte.
///
/// Views returned by [`token_at`](Self::token_at) and
/// [`current_open_token`](Self::current_open_token) borrow the sequence, so
/// it cannot be modified while they are alive.
#[derive(Clone, Debug, Default)]
pub struct TokenSequence {
    /// Start offset of each closed token, strictly increasing.
    start: Vec<usize>,
    /// Start offset of the open token.
    next_start: usize,
    chars: Vec<u8>,
    /// Covers exactly `chars.len()` bytes.
    provenances: ProvenanceMap,
    /// Token counts at which `close_token` found an empty open token.
    /// Each entry is undone by one `reopen_last_token`.
    empty_closes: Vec<usize>,
}

impl TokenSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        TokenSequence {
            start: Vec::new(),
            next_start: 0,
            chars: Vec::new(),
            provenances: ProvenanceMap::new(),
            empty_closes: Vec::new(),
        }
    }

    /// Create a sequence holding `text` as a single token whose bytes come
    /// from consecutive provenances starting at `provenance`.
    pub fn from_text(text: impl AsRef<[u8]>, provenance: Provenance) -> Self {
        let mut sequence = Self::new();
        sequence.put(text, provenance);
        sequence
    }

    /// Create a sequence holding a copy of `count` tokens of `that`,
    /// starting at token `at`.
    pub fn from_range(that: &TokenSequence, at: usize, count: usize) -> Self {
        let mut sequence = Self::new();
        sequence.append_range(that, at, count);
        sequence
    }

    /// Check if there are no closed tokens.
    ///
    /// An open token may still hold bytes.
    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
    }

    /// Remove all bytes, tokens, and provenance.
    pub fn clear(&mut self) {
        self.start.clear();
        self.next_start = 0;
        self.chars.clear();
        self.provenances.clear();
        self.empty_closes.clear();
    }

    /// Remove the last closed token together with its bytes and any open
    /// bytes after it.
    ///
    /// # Panics
    /// Panics if there is no closed token.
    pub fn pop_back(&mut self) {
        let Some(last) = self.start.last().copied() else {
            panic!("pop_back on a token sequence with no closed tokens");
        };
        self.truncate_chars(last);
    }

    /// Release spare capacity.
    pub fn shrink_to_fit(&mut self) {
        self.start.shrink_to_fit();
        self.chars.shrink_to_fit();
        self.provenances.shrink_to_fit();
        self.empty_closes.shrink_to_fit();
    }

    /// Exchange contents with `that`.
    pub fn swap(&mut self, that: &mut TokenSequence) {
        std::mem::swap(self, that);
    }

    /// Number of closed tokens.
    #[inline]
    pub fn size_in_tokens(&self) -> usize {
        self.start.len()
    }

    /// Number of bytes, open token included.
    #[inline]
    pub fn size_in_chars(&self) -> usize {
        self.chars.len()
    }

    /// All bytes, open token included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    /// The offset → provenance mapping of the bytes.
    #[inline]
    pub fn provenance_map(&self) -> &ProvenanceMap {
        &self.provenances
    }

    /// Byte range of a closed token; the last one runs to the end of
    /// `chars`. Bounds are checked by the callers.
    #[inline]
    fn token_range(&self, token: usize) -> Range<usize> {
        let end = self
            .start
            .get(token + 1)
            .copied()
            .unwrap_or(self.chars.len());
        self.start[token]..end
    }

    /// Like [`token_range`](Self::token_range), but the last closed token
    /// stops at `next_start`.
    fn committed_range(&self, token: usize) -> Range<usize> {
        let end = self
            .start
            .get(token + 1)
            .copied()
            .unwrap_or(self.next_start);
        self.start[token]..end
    }

    fn check_token_index(&self, token: usize) {
        assert!(
            token < self.start.len(),
            "token index {token} out of range for sequence of {} tokens",
            self.start.len()
        );
    }

    /// The bytes of closed token `token`. The last closed token includes
    /// any open bytes after it.
    ///
    /// # Panics
    /// Panics if `token >= size_in_tokens()`.
    pub fn token_at(&self, token: usize) -> &[u8] {
        self.check_token_index(token);
        &self.chars[self.token_range(token)]
    }

    /// The byte at offset `j`.
    ///
    /// # Panics
    /// Panics if `j >= size_in_chars()`.
    pub fn char_at(&self, j: usize) -> u8 {
        assert!(
            j < self.chars.len(),
            "char offset {j} out of range for sequence of {} chars",
            self.chars.len()
        );
        self.chars[j]
    }

    /// The bytes written since the last closed token.
    pub fn current_open_token(&self) -> &[u8] {
        &self.chars[self.next_start..]
    }

    /// Iterate over the closed tokens in order, with the same extents as
    /// [`token_at`](Self::token_at).
    pub fn tokens(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        (0..self.start.len()).map(move |token| &self.chars[self.token_range(token)])
    }

    /// Append one byte to the open token.
    #[inline]
    pub fn put_next_token_char(&mut self, ch: u8, provenance: Provenance) {
        self.chars.push(ch);
        self.provenances.put(ProvenanceRange::new(provenance, 1));
    }

    /// Commit the open token as the next closed token.
    ///
    /// Closing an empty open token creates no token; the next
    /// [`reopen_last_token`](Self::reopen_last_token) undoes it instead.
    pub fn close_token(&mut self) {
        if self.next_start == self.chars.len() {
            self.empty_closes.push(self.start.len());
            return;
        }
        self.start.push(self.next_start);
        self.next_start = self.chars.len();
    }

    /// Undo the most recent [`close_token`](Self::close_token), turning the
    /// last closed token back into (the front of) the open token.
    ///
    /// # Panics
    /// Panics if there is no close to undo.
    pub fn reopen_last_token(&mut self) {
        if self.empty_closes.last() == Some(&self.start.len()) {
            self.empty_closes.pop();
            return;
        }
        let Some(last) = self.start.pop() else {
            panic!("reopen_last_token on a token sequence with no closed tokens");
        };
        self.next_start = last;
    }

    /// Append `text` and close the token.
    ///
    /// Byte `j` of `text` gets provenance `provenance + j`. If a token is
    /// open, `text` extends it and the extended token is the one closed.
    pub fn put(&mut self, text: impl AsRef<[u8]>, provenance: Provenance) {
        let text = text.as_ref();
        self.put_range(text, ProvenanceRange::new(provenance, text.len()));
    }

    /// Append `text` with provenance `range` and close the token.
    ///
    /// # Panics
    /// Panics if `range` does not cover exactly `text.len()` bytes.
    pub fn put_range(&mut self, text: impl AsRef<[u8]>, range: ProvenanceRange) {
        let text = text.as_ref();
        assert_eq!(
            text.len(),
            range.len(),
            "text and provenance range differ in length"
        );
        self.chars.extend_from_slice(text);
        self.provenances.put(range);
        self.close_token();
    }

    /// Append bytes `bytes` of `that` with their provenance, leaving them in
    /// the open token.
    fn extend_from(&mut self, that: &TokenSequence, bytes: Range<usize>) {
        self.chars.extend_from_slice(&that.chars[bytes.clone()]);
        let mut at = bytes.start;
        while at < bytes.end {
            let run = that.provenances.map(at).prefix(bytes.end - at);
            self.provenances.put(run);
            at += run.len();
        }
    }

    /// Append a full copy of `that`.
    ///
    /// If a token is open, `that`'s first token is fused onto it. `that`'s
    /// remaining closed tokens follow as closed tokens, and its open bytes
    /// become this sequence's open token.
    pub fn copy_all(&mut self, that: &TokenSequence) {
        for token in 0..that.start.len() {
            self.extend_from(that, that.committed_range(token));
            self.close_token();
        }
        self.extend_from(that, that.next_start..that.chars.len());
    }

    /// Append copies of `count` closed tokens of `that` starting at token
    /// `at`, fusing the first onto the open token if there is one.
    ///
    /// Tokens are copied as [`token_at`](Self::token_at) sees them, so
    /// copying `that`'s last token also takes its open bytes.
    ///
    /// # Panics
    /// Panics if the range runs past `that.size_in_tokens()`.
    pub fn append_range(&mut self, that: &TokenSequence, at: usize, count: usize) {
        assert!(
            at + count <= that.size_in_tokens(),
            "token range {at}..{} out of range for sequence of {} tokens",
            at + count,
            that.size_in_tokens()
        );
        for token in at..at + count {
            self.extend_from(that, that.token_range(token));
            self.close_token();
        }
    }

    /// Append a copy of `that`'s bytes and token structure, giving byte `j`
    /// the provenance `range.offset_member(j)` instead of its own.
    ///
    /// Used when text is logically located somewhere other than where its
    /// bytes physically came from, e.g. after substitution.
    ///
    /// # Panics
    /// Panics if `range` does not cover exactly `that.size_in_chars()` bytes.
    pub fn copy_with_provenance(&mut self, that: &TokenSequence, range: ProvenanceRange) {
        assert_eq!(
            range.len(),
            that.size_in_chars(),
            "provenance range does not match the copied text"
        );
        let mut offset = 0;
        for index in 0..that.start.len() {
            let token = &that.chars[that.committed_range(index)];
            self.put_range(token, ProvenanceRange::new(range.offset_member(offset), token.len()));
            offset += token.len();
        }
        let open = that.current_open_token();
        self.chars.extend_from_slice(open);
        self.provenances.put(range.suffix(offset));
    }

    /// Provenance of the byte at offset `j`.
    ///
    /// # Panics
    /// Panics if `j >= size_in_chars()`.
    pub fn get_char_provenance(&self, j: usize) -> Provenance {
        self.provenances.lookup(j)
    }

    /// Provenance of byte `offset` of closed token `token`.
    ///
    /// # Panics
    /// Panics if the token or the offset within it is out of range.
    pub fn get_token_provenance(&self, token: usize, offset: usize) -> Provenance {
        self.check_token_index(token);
        let bytes = self.token_range(token);
        assert!(
            offset < bytes.len(),
            "offset {offset} past the end of token {token}"
        );
        self.provenances.lookup(bytes.start + offset)
    }

    /// Provenance of closed token `token` from byte `offset` to its end.
    ///
    /// # Panics
    /// Panics if the token or the offset within it is out of range.
    pub fn get_token_provenance_range(&self, token: usize, offset: usize) -> ProvenanceRange {
        self.check_token_index(token);
        let bytes = self.token_range(token);
        assert!(
            offset <= bytes.len(),
            "offset {offset} past the end of token {token}"
        );
        self.provenances
            .lookup_range(bytes.start + offset, bytes.len() - offset)
    }

    /// Provenance of `count` consecutive closed tokens starting at `token`.
    ///
    /// Exact only when those tokens are contiguous in the original source;
    /// otherwise the range stops at the first splice. Query single tokens
    /// when in doubt.
    ///
    /// # Panics
    /// Panics if the tokens are out of range.
    pub fn get_interval_provenance_range(&self, token: usize, count: usize) -> ProvenanceRange {
        if count == 0 {
            return ProvenanceRange::empty();
        }
        self.check_token_index(token + count - 1);
        let start = self.start[token];
        let end = self.token_range(token + count - 1).end;
        self.provenances.lookup_range(start, end - start)
    }

    /// Provenance of the whole sequence, open token included, with the same
    /// contiguity caveat as
    /// [`get_interval_provenance_range`](Self::get_interval_provenance_range).
    pub fn get_provenance_range(&self) -> ProvenanceRange {
        self.provenances.lookup_range(0, self.chars.len())
    }

    /// The first offset at or after `at` that holds a non-blank byte, or
    /// `size_in_chars()` if there is none.
    pub fn skip_blanks(&self, at: usize) -> usize {
        let len = self.chars.len();
        (at.min(len)..len)
            .find(|&j| !is_blank(self.chars[j]))
            .unwrap_or(len)
    }

    /// The last offset before `at` that holds a non-blank byte.
    ///
    /// # Panics
    /// Panics if `at > size_in_chars()`.
    pub fn skip_blanks_backwards(&self, at: usize) -> Option<usize> {
        assert!(
            at <= self.chars.len(),
            "char offset {at} out of range for sequence of {} chars",
            self.chars.len()
        );
        (0..at).rev().find(|&j| !is_blank(self.chars[j]))
    }

    /// Check if anything remains at or after offset `at` other than blanks
    /// and a trailing `!` or `//` comment.
    pub fn is_anything_left(&self, at: usize) -> bool {
        let at = self.skip_blanks(at);
        match self.chars.get(at) {
            None | Some(b'!') => false,
            Some(b'/') => self.chars.get(at + 1) != Some(&b'/'),
            Some(_) => true,
        }
    }

    /// Hand the bytes and their provenance to `sink` in one append.
    pub fn emit<S: CookedSink + ?Sized>(&self, sink: &mut S) {
        debug!(
            chars = self.chars.len(),
            tokens = self.start.len(),
            runs = self.provenances.run_count(),
            "emitting token sequence"
        );
        sink.append(&self.chars, &self.provenances);
    }

    /// Write a listing of every token with its provenance, for debugging.
    pub fn dump(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(
            out,
            "TokenSequence has {} chars; nextStart {}",
            self.chars.len(),
            self.next_start
        )?;
        for token in 0..self.start.len() {
            let bytes = self.committed_range(token);
            writeln!(
                out,
                "[{token}] @ {:?} '{}'",
                self.provenances.lookup_range(bytes.start, bytes.len()),
                self.chars[bytes].escape_ascii()
            )?;
        }
        if self.next_start < self.chars.len() {
            writeln!(
                out,
                "[open] @ {:?} '{}'",
                self.provenances
                    .lookup_range(self.next_start, self.chars.len() - self.next_start),
                self.current_open_token().escape_ascii()
            )?;
        }
        Ok(())
    }

    /// Drop every byte at and after `len`, along with tokens that start
    /// there. A token straddling `len` is shortened.
    fn truncate_chars(&mut self, len: usize) {
        while self.start.last().is_some_and(|&start| start >= len) {
            self.start.pop();
        }
        self.next_start = self.next_start.min(len);
        self.chars.truncate(len);
        self.provenances.truncate(len);
        let tokens = self.start.len();
        self.empty_closes.retain(|&count| count <= tokens);
    }

    /// Assert the structural invariants that every public operation keeps.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert!(
            self.start.windows(2).all(|pair| pair[0] < pair[1]),
            "token starts not strictly increasing: {:?}",
            self.start
        );
        if let Some(&last) = self.start.last() {
            assert!(last < self.next_start, "empty last token in {:?}", self.start);
        }
        assert!(self.next_start <= self.chars.len());
        assert_eq!(self.provenances.size_in_bytes(), self.chars.len());
    }
}

/// Sequences are equal when their bytes, token boundaries, and provenance
/// agree.
impl PartialEq for TokenSequence {
    fn eq(&self, other: &Self) -> bool {
        self.chars == other.chars
            && self.start == other.start
            && self.next_start == other.next_start
            && self.provenances == other.provenances
    }
}

impl Eq for TokenSequence {}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.chars))
    }
}
