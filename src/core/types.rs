//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Leader (or persona) type, e.g. `LEADER_AUGUSTUS`
    LeaderId
);
string_id!(
    /// Civilization type, e.g. `CIVILIZATION_ROME`
    FactionId
);
string_id!(
    /// Memento type, e.g. `MEMENTO_FOUNDATION_SHISA_NECKLACE`
    MementoId
);
string_id!(
    /// Curated combo identifier
    ComboId
);

/// Player slot index in the setup
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(pub u32);

/// Suffix the game data uses for persona variants of a base leader
pub const PERSONA_SUFFIX: &str = "_ALT";

/// Game age. Doubles as the domain tag gating which civilizations are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Age {
    #[serde(rename = "AGE_ANTIQUITY", alias = "AntiquityAgeCivilizations")]
    Antiquity,
    #[serde(rename = "AGE_EXPLORATION", alias = "ExplorationAgeCivilizations")]
    Exploration,
    #[serde(rename = "AGE_MODERN", alias = "ModernAgeCivilizations")]
    Modern,
}

impl Age {
    /// Age type as stored in setup parameters
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Antiquity => "AGE_ANTIQUITY",
            Self::Exploration => "AGE_EXPLORATION",
            Self::Modern => "AGE_MODERN",
        }
    }
}

impl Default for Age {
    fn default() -> Self {
        Self::Antiquity
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Order-normalized key for memento pair synergies.
///
/// `MementoPairKey::new(a, b) == MementoPairKey::new(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MementoPairKey(MementoId, MementoId);

impl MementoPairKey {
    pub fn new(a: &MementoId, b: &MementoId) -> Self {
        if a <= b {
            Self(a.clone(), b.clone())
        } else {
            Self(b.clone(), a.clone())
        }
    }

    pub fn first(&self) -> &MementoId {
        &self.0
    }

    pub fn second(&self) -> &MementoId {
        &self.1
    }
}
