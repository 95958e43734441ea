//! End-to-end coverage of phrase-level correction through the public
//! `SpellCorrector` API, mirroring the worked examples described in
//! spec.md's compound-lookup section.

use spellcheck::{SpellCheckerConfig, SpellCorrector};

fn corrector_with(words: &[(&str, u64)]) -> SpellCorrector {
    let config = SpellCheckerConfig {
        enable_compound_check: true,
        ..SpellCheckerConfig::default()
    };
    let mut c = SpellCorrector::new("en", config).unwrap();
    for (w, n) in words {
        c.add_word_to_dictionary(w, *n);
    }
    c
}

#[test]
fn independent_misspellings_are_each_corrected() {
    let c = corrector_with(&[
        ("the", 100),
        ("problem", 50),
        ("with", 80),
        ("this", 90),
        ("solution", 40),
    ]);
    let result = c.suggest_compound_correction("the problm with this solutin");
    assert_eq!(result.term, "the problem with this solution");
}

#[test]
fn missing_space_is_split_apart() {
    let c = corrector_with(&[("the", 100), ("problem", 50), ("with", 80), ("this", 90)]);
    let result = c.suggest_compound_correction("the problemwith this");
    assert_eq!(result.term, "the problem with this");
}

#[test]
fn space_deletion_error_is_split_apart() {
    let c = corrector_with(&[("the", 100), ("problem", 50)]);
    let result = c.suggest_compound_correction("thep roblem");
    assert_eq!(result.term, "the problem");
}

#[test]
fn empty_dictionary_returns_input_unchanged() {
    let c = corrector_with(&[]);
    let result = c.suggest_compound_correction("the problm with this solutin");
    assert_eq!(result.term, "the problm with this solutin");
    assert_eq!(result.count, 0);
}

#[test]
fn correct_dispatches_to_compound_when_enabled() {
    let mut c = corrector_with(&[("the", 100), ("problem", 50)]);
    match c.correct("the problm") {
        spellcheck::Correction::Compound(s) => assert_eq!(s.term, "the problem"),
        spellcheck::Correction::Words(_) => panic!("expected compound dispatch"),
    }
}
