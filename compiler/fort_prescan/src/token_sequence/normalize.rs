//! Destructive rewrites: blank removal, comment clipping and case folding.
//!
//! Removals build a fresh sequence from the retained bytes and swap it in,
//! so token boundaries and provenance are recomputed in one place.

use std::ops::Range;

use fort_source::ProvenanceRange;
use tracing::trace;

use super::TokenSequence;
use crate::characters::{is_blank, LiteralTracker};
use crate::context::ScannerContext;

impl TokenSequence {
    /// Offsets at or after `first_char` holding a blank outside a character
    /// literal. With `redundant_only`, only blanks that directly follow
    /// another blank.
    fn blank_offsets(
        &self,
        first_char: usize,
        redundant_only: bool,
    ) -> impl Iterator<Item = usize> + '_ {
        let mut literal = LiteralTracker::default();
        self.chars
            .iter()
            .enumerate()
            .filter_map(move |(j, &ch)| {
                let in_literal = literal.step(ch);
                let target = j >= first_char
                    && !in_literal
                    && is_blank(ch)
                    && (!redundant_only || (j > 0 && is_blank(self.chars[j - 1])));
                target.then_some(j)
            })
    }

    /// Check if a blank occurs outside character literals at or after
    /// `first_char`.
    pub fn has_blanks(&self, first_char: usize) -> bool {
        self.blank_offsets(first_char, false).next().is_some()
    }

    /// Check if two blanks in a row occur outside character literals at or
    /// after `first_char`.
    pub fn has_redundant_blanks(&self, first_char: usize) -> bool {
        self.blank_offsets(first_char, true).next().is_some()
    }

    /// Remove every blank outside character literals at or after
    /// `first_char`.
    pub fn remove_blanks(&mut self, first_char: usize) -> &mut Self {
        let removed: Vec<usize> = self.blank_offsets(first_char, false).collect();
        self.remove_offsets(&removed);
        self
    }

    /// Collapse each run of blanks outside character literals at or after
    /// `first_char` to its first blank.
    pub fn remove_redundant_blanks(&mut self, first_char: usize) -> &mut Self {
        let removed: Vec<usize> = self.blank_offsets(first_char, true).collect();
        self.remove_offsets(&removed);
        self
    }

    /// Rebuild without the bytes at `removed` (ascending offsets).
    ///
    /// Retained bytes keep their provenance; tokens left empty disappear and
    /// the open token stays open.
    fn remove_offsets(&mut self, removed: &[usize]) {
        if removed.is_empty() {
            return;
        }
        trace!(
            removed = removed.len(),
            chars = self.chars.len(),
            "removing blanks from token sequence"
        );
        let mut keep = vec![true; self.chars.len()];
        for &j in removed {
            keep[j] = false;
        }

        let mut result = TokenSequence::new();
        for token in 0..self.start.len() {
            result.extend_kept(self, self.committed_range(token), &keep);
            if result.next_start < result.chars.len() {
                result.close_token();
            }
        }
        result.extend_kept(self, self.next_start..self.chars.len(), &keep);
        *self = result;
    }

    fn extend_kept(&mut self, that: &TokenSequence, bytes: Range<usize>, keep: &[bool]) {
        for j in bytes.filter(|&j| keep[j]) {
            self.chars.push(that.chars[j]);
            self.provenances
                .put(ProvenanceRange::new(that.provenances.lookup(j), 1));
        }
    }

    /// Truncate at the first `!` outside character literals that starts a
    /// comment.
    ///
    /// A `!` that `context` recognizes as a compiler directive sentinel is
    /// not a comment. With `skip_first`, the first comment candidate is kept
    /// as well (it is a continuation marker, not a comment).
    pub fn clip_comment(
        &mut self,
        context: &(impl ScannerContext + ?Sized),
        skip_first: bool,
    ) -> &mut Self {
        let mut skip_first = skip_first;
        let mut literal = LiteralTracker::default();
        let mut comment = None;
        for (j, &ch) in self.chars.iter().enumerate() {
            if literal.step(ch) || ch != b'!' {
                continue;
            }
            if context.is_compiler_directive_sentinel(&self.chars[j + 1..]) {
                continue;
            }
            if skip_first {
                skip_first = false;
                continue;
            }
            comment = Some(j);
            break;
        }
        if let Some(at) = comment {
            trace!(at, chars = self.chars.len(), "clipping comment");
            self.truncate_chars(at);
        }
        self
    }

    /// Fold bytes outside character literals to ASCII lower case. Literal
    /// bodies keep their case; token boundaries and provenance are
    /// unchanged.
    pub fn to_lower_case(&mut self) -> &mut Self {
        let mut literal = LiteralTracker::default();
        for ch in &mut self.chars {
            if !literal.step(*ch) {
                ch.make_ascii_lowercase();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests;
