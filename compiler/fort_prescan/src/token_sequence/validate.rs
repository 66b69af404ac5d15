//! Read-only checks that report problems in the user's source.
//!
//! Checks never modify the sequence and return it, so several can be
//! chained over the same line.

use fort_diagnostic::{Diagnostic, ErrorCode, Messages};
use fort_source::ProvenanceRange;

use super::TokenSequence;
use crate::characters::{is_blank, is_valid_fortran_token_character, LiteralTracker};
use crate::context::ScannerContext;

/// First parenthesis that breaks nesting, by offset.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Imbalance {
    /// `)` with nothing open.
    UnmatchedClose(usize),
    /// Innermost `(` still open at the end.
    UnmatchedOpen(usize),
}

impl TokenSequence {
    /// Report each byte outside character literals that is not in the
    /// Fortran character set.
    ///
    /// `&` is accepted when `allow_ampersand` is set. A `!` starting a
    /// compiler directive sentinel ends the check; the directive's text is
    /// checked by whoever parses it.
    pub fn check_bad_fortran_characters(
        &self,
        messages: &mut Messages,
        context: &(impl ScannerContext + ?Sized),
        allow_ampersand: bool,
    ) -> &Self {
        let mut literal = LiteralTracker::default();
        for (j, &ch) in self.chars.iter().enumerate() {
            if literal.step(ch) || is_blank(ch) || is_valid_fortran_token_character(ch) {
                continue;
            }
            match ch {
                b'&' if allow_ampersand => continue,
                b'!' if context.is_compiler_directive_sentinel(&self.chars[j + 1..]) => break,
                _ => {}
            }
            messages.say(
                Diagnostic::error(ErrorCode::E0001)
                    .with_message(format!(
                        "bad character ('{}') in Fortran token",
                        ch.escape_ascii()
                    ))
                    .at(ProvenanceRange::new(self.get_char_provenance(j), 1)),
            );
        }
        self
    }

    fn find_parenthesis_imbalance(&self) -> Option<Imbalance> {
        let mut literal = LiteralTracker::default();
        let mut open = Vec::new();
        for (j, &ch) in self.chars.iter().enumerate() {
            if literal.step(ch) {
                continue;
            }
            match ch {
                b'(' => open.push(j),
                b')' => {
                    if open.pop().is_none() {
                        return Some(Imbalance::UnmatchedClose(j));
                    }
                }
                _ => {}
            }
        }
        open.pop().map(Imbalance::UnmatchedOpen)
    }

    /// Check if parentheses outside character literals fail to nest: a `)`
    /// closes nothing, or a `(` is never closed.
    pub fn badly_nested_parentheses(&self) -> bool {
        self.find_parenthesis_imbalance().is_some()
    }

    /// Report one diagnostic covering the whole sequence if its parentheses
    /// are badly nested.
    pub fn check_bad_parentheses(&self, messages: &mut Messages) -> &Self {
        if let Some(imbalance) = self.find_parenthesis_imbalance() {
            let (code, message, at) = match imbalance {
                Imbalance::UnmatchedClose(at) => (ErrorCode::E0003, "Unmatched ')'", at),
                Imbalance::UnmatchedOpen(at) => (ErrorCode::E0002, "Unmatched '('", at),
            };
            messages.say(
                Diagnostic::error(code)
                    .with_message(message)
                    .at(self.get_provenance_range())
                    .with_note(format!(
                        "the unmatched parenthesis is at {}",
                        self.get_char_provenance(at)
                    )),
            );
        }
        self
    }
}
