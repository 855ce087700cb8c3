//! Rows of the read-only configuration tables

use serde::{Deserialize, Serialize};

use crate::core::types::{Age, ComboId, FactionId, LeaderId, MementoId};

fn default_owned() -> bool {
    true
}

/// A selectable leader (or persona)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderRecord {
    pub id: LeaderId,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_owned")]
    pub owned: bool,
    /// Persona variant of this base leader, if one exists
    #[serde(default)]
    pub persona: Option<LeaderId>,
}

impl LeaderRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: LeaderId::new(id),
            locked: false,
            owned: true,
            persona: None,
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(LeaderId::new(persona));
        self
    }

    /// Unlocked and owned
    pub fn is_selectable(&self) -> bool {
        !self.locked && self.owned
    }
}

/// A selectable civilization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionRecord {
    pub id: FactionId,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_owned")]
    pub owned: bool,
    pub domain: Age,
}

impl FactionRecord {
    pub fn new(id: impl Into<String>, domain: Age) -> Self {
        Self {
            id: FactionId::new(id),
            locked: false,
            owned: true,
            domain,
        }
    }

    pub fn is_selectable(&self) -> bool {
        !self.locked && self.owned
    }
}

/// Preference strength of a leader for a civilization within an age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasEntry {
    pub leader: LeaderId,
    pub faction: FactionId,
    pub domain: Age,
    pub weight: i32,
}

/// Tie-break strength used only when two seats contest a civilization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityEntry {
    pub leader: LeaderId,
    pub faction: FactionId,
    pub priority: i32,
}

/// Leader to memento synergy, scoped to an age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderSynergy {
    pub leader: LeaderId,
    pub memento: MementoId,
    pub age: Age,
}

/// Civilization to memento synergy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionSynergy {
    pub faction: FactionId,
    pub memento: MementoId,
}

/// Memento to memento synergy. Lookup order is irrelevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MementoPairSynergy {
    pub primary: MementoId,
    pub secondary: MementoId,
}

/// Curated memento pair tied to a leader, a civilization, or both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificCombo {
    pub id: ComboId,
    #[serde(default)]
    pub leader: Option<LeaderId>,
    #[serde(default)]
    pub faction: Option<FactionId>,
    /// Applies to every age when absent
    #[serde(default)]
    pub age: Option<Age>,
    pub primary: MementoId,
    pub secondary: MementoId,
}

impl SpecificCombo {
    pub fn applies_to_age(&self, age: Age) -> bool {
        self.age.map_or(true, |a| a == age)
    }
}
