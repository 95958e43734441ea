//! Keyboard-weighted "typo" distance.
//!
//! Grounded on `original_source/symspellcompound/typo_distance.py`: a
//! Levenshtein-style dynamic-programming matrix where insertion and
//! substitution costs are `base_cost + euclidean_key_distance(c1, c2)` and
//! deletion is a flat cost. Missing keyboard coordinates fall back to the
//! flat base cost instead of the source's null-deref risk (per spec ''7
//! Error Handling Design).

use unicode_normalization::UnicodeNormalization;

use crate::distance::{Distance, EditDistance};

const INSERTION_COST: f64 = 1.0;
const DELETION_COST: f64 = 1.0;
const SUBSTITUTION_COST: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    Qwerty,
    Azerty,
}

impl Keyboard {
    fn coords(self, c: char) -> Option<(f64, f64)> {
        let rows: &[&str] = match self {
            Keyboard::Qwerty => &["qwertyuiop", "asdfghjkl", "zxcvbnm"],
            Keyboard::Azerty => &["azertyuiop", "qsdfghjklm", "wxcvbn"],
        };
        for (row_idx, row) in rows.iter().enumerate() {
            if let Some(col_idx) = row.find(c) {
                // Each row is staggered by half a keycap, matching a physical keyboard.
                let x = col_idx as f64 + row_idx as f64 * 0.5;
                let y = row_idx as f64;
                return Some((x, y));
            }
        }
        None
    }
}

fn euclidean_key_distance(kb: Keyboard, c1: char, c2: char) -> f64 {
    match (kb.coords(c1), kb.coords(c2)) {
        (Some((x1, y1)), Some((x2, y2))) => ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt(),
        // Unknown character: fall back to a flat cost rather than the
        // source's missing-coordinate crash.
        _ => 0.0,
    }
}

fn insertion_cost(kb: Keyboard, prev: char, c: char) -> f64 {
    INSERTION_COST + euclidean_key_distance(kb, prev, c)
}

fn substitution_cost(kb: Keyboard, s_char: char, t_char: char) -> f64 {
    SUBSTITUTION_COST + euclidean_key_distance(kb, s_char, t_char)
}

/// Unicode-to-ASCII folding stand-in for the original's `unidecode`: strips
/// combining marks via NFKD normalization so accented input is charged
/// against the base-letter keyboard position.
fn fold(s: &str) -> Vec<char> {
    s.nfkd().filter(|c| !c.is_mark_nonspacing()).collect()
}

trait CharExt {
    fn is_mark_nonspacing(&self) -> bool;
}

impl CharExt for char {
    fn is_mark_nonspacing(&self) -> bool {
        // Combining diacritical marks block, the common case after NFKD.
        matches!(*self as u32, 0x0300..=0x036F)
    }
}

pub fn typo_distance(s: &str, t: &str, layout: Keyboard) -> f64 {
    let s_chars = fold(s);
    let t_chars = fold(t);
    let (slen, tlen) = (s_chars.len(), t_chars.len());

    if slen == 0 {
        return t_chars.iter().count() as f64 * INSERTION_COST;
    }
    if tlen == 0 {
        return s_chars.iter().count() as f64 * DELETION_COST;
    }

    let mut d = vec![vec![0.0f64; tlen + 1]; slen + 1];
    for i in 1..=slen {
        d[i][0] = d[i - 1][0] + DELETION_COST;
    }
    for j in 1..=tlen {
        let prev = if j >= 2 { t_chars[j - 2] } else { '\0' };
        d[0][j] = d[0][j - 1] + insertion_cost(layout, prev, t_chars[j - 1]);
    }

    for j in 1..=tlen {
        for i in 1..=slen {
            if s_chars[i - 1] == t_chars[j - 1] {
                d[i][j] = d[i - 1][j - 1];
            } else {
                let del = d[i - 1][j] + DELETION_COST;
                let prev = if i >= 2 { s_chars[i - 2] } else { '\0' };
                let ins = d[i][j - 1] + insertion_cost(layout, prev, t_chars[j - 1]);
                let sub = d[i - 1][j - 1] + substitution_cost(layout, s_chars[i - 1], t_chars[j - 1]);
                d[i][j] = del.min(ins).min(sub);
            }
        }
    }

    d[slen][tlen]
}

/// `Distance` adapter over `typo_distance` for a fixed keyboard layout.
#[derive(Debug, Clone, Copy)]
pub struct Typo(pub Keyboard);

impl Distance for Typo {
    fn distance(&self, a: &str, b: &str) -> EditDistance {
        EditDistance(typo_distance(a, b, self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_zero_distance() {
        assert_eq!(typo_distance("cette", "cette", Keyboard::Azerty), 0.0);
    }

    #[test]
    fn adjacent_key_substitution_cheaper_than_distant() {
        // On QWERTY, 's' is adjacent to 'a' but far from 'p'.
        let close = typo_distance("cat", "cas", Keyboard::Qwerty);
        let far = typo_distance("cat", "cap", Keyboard::Qwerty);
        assert!(close < far, "close={close} far={far}");
    }

    #[test]
    fn unknown_character_falls_back_to_flat_cost() {
        // digits are absent from the layout map; must not panic.
        let d = typo_distance("a1b", "a2b", Keyboard::Qwerty);
        assert!(d.is_finite());
    }
}
