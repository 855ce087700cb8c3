//! Engine configuration with documented constants
//!
//! Every tunable the allocation engine uses lives here, with the default
//! matching the behaviour players see in game.

use serde::{Deserialize, Serialize};

/// Deepest contest recursion allowed before a seat is deferred
pub const MAX_CONTEST_DEPTH: u32 = 5;

/// How strongly curated memento combos are favoured over generated ones
pub const SPECIFIC_WEIGHT: usize = 3;

/// How the first fallback step samples an unused civilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackSampling {
    /// Uniform over civilizations not yet claimed this pass
    Filtered,
    /// Index drawn from `0..(total - used)` into the full list.
    ///
    /// Can return a civilization that is already claimed when the claimed
    /// entries are not at the tail of the list.
    BoundedIndex,
}

impl Default for FallbackSampling {
    fn default() -> Self {
        Self::Filtered
    }
}

/// Configuration for the allocation engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Recursion limit for contested civilizations.
    ///
    /// Each contest won by a higher-priority leader re-resolves the blocker
    /// one level deeper. Past this depth the seat is handed to the random
    /// cleanup pass instead.
    pub max_contest_depth: u32,

    /// Multiplier applied to curated memento combos.
    ///
    /// Curated combos are first replicated so they roughly match the number
    /// of generated ones, then multiplied by this weight.
    pub specific_weight: usize,

    /// Sampling used by the true-random fallback
    pub fallback_sampling: FallbackSampling,

    /// Seed for deterministic runs. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_contest_depth: MAX_CONTEST_DEPTH,
            specific_weight: SPECIFIC_WEIGHT,
            fallback_sampling: FallbackSampling::Filtered,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same defaults with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.max_contest_depth > MAX_CONTEST_DEPTH {
            return Err(format!(
                "max_contest_depth ({}) must not exceed {}",
                self.max_contest_depth, MAX_CONTEST_DEPTH
            ));
        }

        if self.specific_weight == 0 {
            return Err("specific_weight must be at least 1".into());
        }

        Ok(())
    }
}
