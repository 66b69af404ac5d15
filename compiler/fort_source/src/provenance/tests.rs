use super::*;
use pretty_assertions::assert_eq;

fn range(start: usize, len: usize) -> ProvenanceRange {
    ProvenanceRange::new(Provenance::new(start), len)
}

#[test]
fn test_provenance_arithmetic() {
    let mut p = Provenance::new(10);
    assert_eq!(p + 5, Provenance::new(15));
    p += 3;
    assert_eq!(p.raw(), 13);
}

#[test]
fn test_range_bounds() {
    let r = range(100, 10);
    assert_eq!(r.start(), Provenance::new(100));
    assert_eq!(r.end(), Provenance::new(110));
    assert_eq!(r.len(), 10);
    assert!(!r.is_empty());
    assert!(r.contains(Provenance::new(100)));
    assert!(r.contains(Provenance::new(109)));
    assert!(!r.contains(Provenance::new(110)));
    assert!(ProvenanceRange::empty().is_empty());
}

#[test]
fn test_offset_member() {
    let r = range(40, 4);
    assert_eq!(r.offset_member(0), Provenance::new(40));
    assert_eq!(r.offset_member(3), Provenance::new(43));
    assert_eq!(r.offset_member(4), r.end());
}

#[test]
#[should_panic(expected = "outside provenance range")]
fn test_offset_member_past_end() {
    let _ = range(40, 4).offset_member(5);
}

#[test]
fn test_prefix_and_suffix() {
    let r = range(20, 8);
    assert_eq!(r.prefix(3), range(20, 3));
    assert_eq!(r.prefix(100), r);
    assert_eq!(r.suffix(3), range(23, 5));
    assert_eq!(r.suffix(8), range(28, 0));
}

#[test]
fn test_annex() {
    let mut r = range(0, 5);
    assert!(r.annexed_by(range(5, 2)));
    assert!(!r.annexed_by(range(6, 2)));

    r.annex(range(5, 2));
    assert_eq!(r, range(0, 7));

    assert!(!r.annex_if_predecessor(range(10, 1)));
    assert_eq!(r, range(0, 7));
    assert!(r.annex_if_predecessor(range(7, 1)));
    assert_eq!(r, range(0, 8));
}

#[test]
#[should_panic(expected = "cannot annex")]
fn test_annex_gap_panics() {
    let mut r = range(0, 5);
    r.annex(range(9, 1));
}

#[test]
fn test_cover_and_contains_range() {
    let a = range(10, 5);
    let b = range(30, 2);
    let covered = a.cover(b);
    assert_eq!(covered, range(10, 22));
    assert!(covered.contains_range(a));
    assert!(covered.contains_range(b));
    assert!(!a.contains_range(b));
}

#[test]
fn test_formatting() {
    assert_eq!(format!("{:?}", range(3, 4)), "@3..7");
    assert_eq!(format!("{}", range(3, 4)), "[3, 7)");
    assert_eq!(format!("{:?}", Provenance::new(9)), "@9");
}
