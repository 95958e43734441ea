//! Configuration surface described in spec.md ''6: a named or custom
//! distance function, the maximum edit distance, the verbosity level, and
//! whether compound (phrase) correction is enabled.

use serde::{Deserialize, Serialize};

use crate::distance::{DamerauLevenshtein, Distance};
use crate::error::{Result, SpellError};
use crate::index::{SymSpellIndex, Verbosity};
use crate::typo::{Keyboard, Typo};

/// Resolves a named built-in distance function. Unrecognized names fail
/// with `SpellError::UnknownDistance` per spec.md ''6/''7 ("Unrecognized
/// names fail with a configuration error").
pub fn resolve_distance(name: &str) -> Result<Box<dyn Distance>> {
    match name {
        "dameraulevenshtein" => Ok(Box::new(DamerauLevenshtein)),
        "typo" | "typo:qwerty" => Ok(Box::new(Typo(Keyboard::Qwerty))),
        "typo:azerty" => Ok(Box::new(Typo(Keyboard::Azerty))),
        other => Err(SpellError::UnknownDistance(other.to_string())),
    }
}

/// Construction-time configuration for a [`SymSpellIndex`] / `SpellCorrector`.
///
/// `distance` names a built-in (`"dameraulevenshtein"`, `"typo"`,
/// `"typo:azerty"`) resolved via [`resolve_distance`]. Callers who need a
/// fully custom distance function should build the index directly with
/// [`SymSpellIndex::new`] and a hand-rolled [`Distance`] implementation
/// instead of going through this config, which is serde-serializable and
/// thus limited to named built-ins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCheckerConfig {
    pub distance: String,
    pub edit_distance_max: u32,
    pub verbose: Verbosity,
    pub enable_compound_check: bool,
}

impl Default for SpellCheckerConfig {
    fn default() -> Self {
        SpellCheckerConfig {
            distance: "dameraulevenshtein".to_string(),
            edit_distance_max: 2,
            verbose: Verbosity::Top,
            enable_compound_check: false,
        }
    }
}

impl SpellCheckerConfig {
    /// Compound lookup requires `verbose = 0` (`Verbosity::Top`) per
    /// spec.md ''6.
    pub fn validate(&self) -> Result<()> {
        if self.enable_compound_check && self.verbose != Verbosity::Top {
            return Err(SpellError::InvalidConfig(
                "enable_compound_check requires verbose = Top".to_string(),
            ));
        }
        Ok(())
    }

    pub fn build_index(&self) -> Result<SymSpellIndex> {
        self.validate()?;
        let distance_fn = resolve_distance(&self.distance)?;
        Ok(SymSpellIndex::new(self.edit_distance_max, self.verbose, distance_fn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_distance_name_fails() {
        assert!(resolve_distance("soundex").is_err());
    }

    #[test]
    fn compound_check_requires_top_verbosity() {
        let cfg = SpellCheckerConfig {
            enable_compound_check: true,
            verbose: Verbosity::All,
            ..SpellCheckerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SpellCheckerConfig::default().validate().is_ok());
    }
}
