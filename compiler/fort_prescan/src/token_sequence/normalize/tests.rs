use super::*;
use crate::context::{DirectiveSentinels, NoDirectives};
use fort_source::Provenance;
use pretty_assertions::assert_eq;

fn p(raw: usize) -> Provenance {
    Provenance::new(raw)
}

fn tokens_of(sequence: &TokenSequence) -> Vec<String> {
    sequence
        .tokens()
        .map(|token| String::from_utf8_lossy(token).into_owned())
        .collect()
}

/// One token per piece, each piece placed right after the previous one.
fn sequence_of(pieces: &[&str]) -> TokenSequence {
    let mut sequence = TokenSequence::new();
    let mut at = 0;
    for piece in pieces {
        sequence.put(piece, p(at));
        at += piece.len();
    }
    sequence
}

fn provenances_of(sequence: &TokenSequence) -> Vec<usize> {
    (0..sequence.size_in_chars())
        .map(|j| sequence.get_char_provenance(j).raw())
        .collect()
}

// === Blank queries ===

#[test]
fn test_has_blanks() {
    let sequence = TokenSequence::from_text("a 'b c'", p(0));
    assert!(sequence.has_blanks(0));
    assert!(sequence.has_blanks(1));
    // The only blank left is inside the literal.
    assert!(!sequence.has_blanks(2));
    assert!(!TokenSequence::from_text("x='a b'", p(0)).has_blanks(0));
}

#[test]
fn test_has_redundant_blanks() {
    assert!(TokenSequence::from_text("a  b", p(0)).has_redundant_blanks(0));
    assert!(TokenSequence::from_text("a \tb", p(0)).has_redundant_blanks(0));
    assert!(!TokenSequence::from_text("a b c", p(0)).has_redundant_blanks(0));
    assert!(!TokenSequence::from_text("a '  ' b", p(0)).has_redundant_blanks(0));
    assert!(!TokenSequence::from_text("a  b", p(0)).has_redundant_blanks(3));
}

// === Blank removal ===

#[test]
fn test_remove_blanks_drops_blank_tokens() {
    let mut sequence = sequence_of(&["x", " ", "=", " ", "1"]);
    sequence.remove_blanks(0);

    assert_eq!(tokens_of(&sequence), vec!["x", "=", "1"]);
    assert_eq!(provenances_of(&sequence), vec![0, 2, 4]);
    sequence.assert_invariants();
}

#[test]
fn test_remove_blanks_inside_token() {
    let mut sequence = TokenSequence::from_text("a = ' b '", p(10));
    sequence.remove_blanks(0);

    assert_eq!(tokens_of(&sequence), vec!["a=' b '"]);
    assert_eq!(provenances_of(&sequence), vec![10, 12, 14, 15, 16, 17, 18]);
}

#[test]
fn test_remove_blanks_from_first_char() {
    let mut sequence = TokenSequence::from_text("  x y", p(0));
    sequence.remove_blanks(2);
    assert_eq!(sequence.as_bytes(), b"  xy");
}

#[test]
fn test_remove_blanks_keeps_open_token_open() {
    let mut sequence = TokenSequence::from_text("go to", p(0));
    for (j, &ch) in b" 10".iter().enumerate() {
        sequence.put_next_token_char(ch, p(20 + j));
    }
    sequence.remove_blanks(0);

    assert_eq!(sequence.size_in_tokens(), 1);
    assert_eq!(sequence.as_bytes(), b"goto10");
    assert_eq!(sequence.current_open_token(), b"10");
    assert_eq!(sequence.get_char_provenance(4), p(21));
    sequence.assert_invariants();
}

#[test]
fn test_remove_blanks_all_blank() {
    let mut sequence = sequence_of(&[" ", "\t"]);
    sequence.remove_blanks(0);
    assert_eq!(sequence, TokenSequence::new());
}

#[test]
fn test_remove_blanks_without_blanks_is_noop() {
    let mut sequence = sequence_of(&["a", "+", "b"]);
    let before = sequence.clone();
    sequence.remove_blanks(0);
    assert_eq!(sequence, before);
}

#[test]
fn test_remove_redundant_blanks() {
    let mut sequence = sequence_of(&["a", "   ", "b", " ", "'  '", "\t\t", "c"]);
    sequence.remove_redundant_blanks(0);

    assert_eq!(tokens_of(&sequence), vec!["a", " ", "b", " ", "'  '", "\t", "c"]);
    assert!(!sequence.has_redundant_blanks(0));
    assert_eq!(sequence.get_char_provenance(1), p(1));
    assert_eq!(sequence.get_char_provenance(2), p(4));
    sequence.assert_invariants();
}

#[test]
fn test_remove_redundant_blanks_from_first_char() {
    let mut sequence = TokenSequence::from_text("    x  y", p(0));
    sequence.remove_redundant_blanks(4);
    assert_eq!(sequence.as_bytes(), b"    x y");
}

// === Comment clipping ===

#[test]
fn test_clip_comment() {
    let mut sequence = TokenSequence::from_text("x = 1 ! comment", p(100));
    sequence.clip_comment(&NoDirectives, false);

    assert_eq!(sequence.as_bytes(), b"x = 1 ");
    assert_eq!(provenances_of(&sequence), vec![100, 101, 102, 103, 104, 105]);
    sequence.assert_invariants();
}

#[test]
fn test_clip_comment_drops_following_tokens() {
    let mut sequence = sequence_of(&["x", " ", "! note", " ", "more"]);
    sequence.clip_comment(&NoDirectives, false);

    assert_eq!(tokens_of(&sequence), vec!["x", " "]);
    assert!(sequence.current_open_token().is_empty());
    sequence.assert_invariants();
}

#[test]
fn test_clip_comment_in_open_token() {
    let mut sequence = TokenSequence::from_text("y", p(0));
    for (j, &ch) in b"=2!c".iter().enumerate() {
        sequence.put_next_token_char(ch, p(1 + j));
    }
    sequence.clip_comment(&NoDirectives, false);

    assert_eq!(tokens_of(&sequence), vec!["y=2"]);
    assert_eq!(sequence.current_open_token(), b"=2");
}

#[test]
fn test_clip_comment_ignores_literals() {
    let mut sequence = TokenSequence::from_text("print *, 'hi!' ! greet", p(0));
    sequence.clip_comment(&NoDirectives, false);
    assert_eq!(sequence.as_bytes(), b"print *, 'hi!' ");
}

#[test]
fn test_clip_comment_skip_first() {
    let mut sequence = TokenSequence::from_text("a ! b ! c", p(0));
    sequence.clip_comment(&NoDirectives, true);
    assert_eq!(sequence.as_bytes(), b"a ! b ");

    let mut single = TokenSequence::from_text("a ! b", p(0));
    single.clip_comment(&NoDirectives, true);
    assert_eq!(single.as_bytes(), b"a ! b");
}

#[test]
fn test_clip_comment_keeps_directive_sentinel() {
    let sentinels = DirectiveSentinels::default();
    let mut directive = TokenSequence::from_text("!$OMP parallel ! team", p(0));
    directive.clip_comment(&sentinels, false);
    assert_eq!(directive.as_bytes(), b"!$OMP parallel ");

    let mut comment = TokenSequence::from_text("!$OMP parallel", p(0));
    comment.clip_comment(&NoDirectives, false);
    assert!(comment.as_bytes().is_empty());
    assert!(comment.is_empty());
}

#[test]
fn test_clip_comment_keeps_directive_without_blank() {
    let sentinels = DirectiveSentinels::default();
    let mut ivdep = TokenSequence::from_text("!DIR$IVDEP", p(0));
    ivdep.clip_comment(&sentinels, false);
    assert_eq!(ivdep.as_bytes(), b"!DIR$IVDEP");

    let mut continued = TokenSequence::from_text("!$omp& private(x) ! why", p(0));
    continued.clip_comment(&sentinels, false);
    assert_eq!(continued.as_bytes(), b"!$omp& private(x) ");
}

#[test]
fn test_clip_comment_without_comment_is_noop() {
    let mut sequence = sequence_of(&["a", "=", "'!'"]);
    let before = sequence.clone();
    sequence.clip_comment(&NoDirectives, false);
    assert_eq!(sequence, before);
}

// === Case folding ===

#[test]
fn test_to_lower_case() {
    let mut sequence = sequence_of(&["CALL", " ", "Foo", "(", "'ABC'", ")"]);
    let before = sequence.clone();
    sequence.to_lower_case();

    assert_eq!(sequence.as_bytes(), b"call foo('ABC')");
    assert_eq!(sequence.size_in_tokens(), before.size_in_tokens());
    assert_eq!(sequence.provenance_map(), before.provenance_map());
}

#[test]
fn test_to_lower_case_keeps_literal_bodies() {
    let mut sequence = TokenSequence::from_text("PRINT *, \"It's\", 'DON''T', X", p(0));
    sequence.to_lower_case();
    assert_eq!(sequence.as_bytes(), b"print *, \"It's\", 'DON''T', x");
}

#[test]
fn test_rewrites_chain() {
    let mut sequence = TokenSequence::from_text("X  =  Y   ! Done", p(0));
    sequence
        .clip_comment(&NoDirectives, false)
        .remove_redundant_blanks(0)
        .to_lower_case();
    assert_eq!(sequence.as_bytes(), b"x = y ");
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_normalize {
    use super::super::TokenSequence;
    use crate::characters::is_blank;
    use fort_source::Provenance;
    use proptest::prelude::*;

    fn piece() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![
                Just(b' '),
                Just(b'\t'),
                Just(b'a'),
                Just(b'\''),
                Just(b'='),
                Just(b'!'),
            ],
            0..6,
        )
    }

    fn sequence() -> impl Strategy<Value = TokenSequence> {
        (proptest::collection::vec(piece(), 0..8), piece()).prop_map(|(pieces, open)| {
            let mut sequence = TokenSequence::new();
            let mut at = 0;
            for piece in &pieces {
                sequence.put(piece, Provenance::new(at));
                at += piece.len() + 1;
            }
            for &ch in &open {
                sequence.put_next_token_char(ch, Provenance::new(at));
                at += 1;
            }
            sequence
        })
    }

    proptest! {
        #[test]
        fn remove_blanks_leaves_none(mut sequence in sequence(), first in 0usize..8) {
            let non_blank_before = sequence.as_bytes().iter().filter(|&&ch| !is_blank(ch)).count();
            sequence.remove_blanks(first);
            sequence.assert_invariants();
            prop_assert!(!sequence.has_blanks(first));
            let non_blank_after = sequence.as_bytes().iter().filter(|&&ch| !is_blank(ch)).count();
            prop_assert_eq!(non_blank_before, non_blank_after);
        }

        #[test]
        fn remove_redundant_blanks_is_idempotent(mut sequence in sequence(), first in 0usize..8) {
            sequence.remove_redundant_blanks(first);
            sequence.assert_invariants();
            prop_assert!(!sequence.has_redundant_blanks(first));
            let once = sequence.clone();
            sequence.remove_redundant_blanks(first);
            prop_assert_eq!(sequence, once);
        }

        #[test]
        fn clip_comment_keeps_prefix(sequence in sequence()) {
            let mut clipped = sequence.clone();
            clipped.clip_comment(&crate::NoDirectives, false);
            clipped.assert_invariants();
            let kept = clipped.size_in_chars();
            prop_assert_eq!(clipped.as_bytes(), &sequence.as_bytes()[..kept]);
            for j in 0..kept {
                prop_assert_eq!(clipped.get_char_provenance(j), sequence.get_char_provenance(j));
            }
        }
    }
}
