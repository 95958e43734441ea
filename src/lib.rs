//! Symmetric-delete spelling correction and compound-word segmentation.
//!
//! The core is [`index::SymSpellIndex`]: a dictionary plus a
//! delete-neighborhood index, with `lookup` (single-word correction) and
//! `lookup_compound` (phrase-level space-insertion/omission repair) built
//! on top of it. [`corrector::SpellCorrector`] is the batteries-included
//! wrapper most callers want: config, caching, parallel batch correction,
//! and persistence.

pub mod config;
pub mod corrector;
pub mod distance;
pub mod error;
pub mod index;
pub mod tokenizer;
pub mod typo;

pub use config::SpellCheckerConfig;
pub use corrector::{Correction, SpellCorrector, SuggestedCorrection};
pub use distance::{DamerauLevenshtein, Distance, EditDistance};
pub use error::{Result, SpellError};
pub use index::{IndexSnapshot, Suggestion, SymSpellIndex, Verbosity, WordId};
pub use typo::{Keyboard, Typo};
