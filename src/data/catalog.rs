//! In-memory configuration catalog

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::core::error::{RandomiserError, Result};
use crate::core::types::{Age, FactionId, LeaderId, MementoId, MementoPairKey, PERSONA_SUFFIX};
use crate::data::records::{
    BiasEntry, FactionRecord, FactionSynergy, LeaderRecord, LeaderSynergy, MementoPairSynergy,
    PriorityEntry, SpecificCombo,
};
use crate::data::ConfigProvider;

/// Raw configuration tables, as they appear in a setup file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogTables {
    pub leaders: Vec<LeaderRecord>,
    pub factions: Vec<FactionRecord>,
    pub biases: Vec<BiasEntry>,
    pub priorities: Vec<PriorityEntry>,
    pub mementos: Vec<MementoId>,
    pub leader_synergies: Vec<LeaderSynergy>,
    pub faction_synergies: Vec<FactionSynergy>,
    pub memento_synergies: Vec<MementoPairSynergy>,
    pub specific_combos: Vec<SpecificCombo>,
}

/// Validated tables with lookup indices
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: CatalogTables,
    priority_index: AHashMap<(LeaderId, FactionId), i32>,
    pair_index: AHashSet<MementoPairKey>,
}

impl Catalog {
    /// Validate tables and build indices.
    ///
    /// Base leaders without an explicit persona pick up `<ID>_ALT` when such
    /// a leader exists.
    pub fn from_tables(mut tables: CatalogTables) -> Result<Self> {
        let mut leader_ids = AHashSet::new();
        for leader in &tables.leaders {
            if !leader_ids.insert(leader.id.clone()) {
                return Err(RandomiserError::DuplicateId {
                    kind: "leader",
                    id: leader.id.to_string(),
                });
            }
        }

        let mut faction_ids = AHashSet::new();
        for faction in &tables.factions {
            if !faction_ids.insert(faction.id.clone()) {
                return Err(RandomiserError::DuplicateId {
                    kind: "civilization",
                    id: faction.id.to_string(),
                });
            }
        }

        for bias in &tables.biases {
            if !leader_ids.contains(&bias.leader) {
                return Err(RandomiserError::UnknownReference {
                    kind: "leader",
                    id: bias.leader.to_string(),
                });
            }
            if !faction_ids.contains(&bias.faction) {
                return Err(RandomiserError::UnknownReference {
                    kind: "civilization",
                    id: bias.faction.to_string(),
                });
            }
        }

        let mut combo_ids = AHashSet::new();
        for combo in &tables.specific_combos {
            if combo.leader.is_none() && combo.faction.is_none() {
                return Err(RandomiserError::UnanchoredCombo(combo.id.to_string()));
            }
            if !combo_ids.insert(combo.id.clone()) {
                return Err(RandomiserError::DuplicateId {
                    kind: "combo",
                    id: combo.id.to_string(),
                });
            }
        }

        for leader in tables.leaders.iter_mut() {
            if leader.persona.is_none() && !leader.id.as_str().ends_with(PERSONA_SUFFIX) {
                let alt = LeaderId::new(format!("{}{}", leader.id, PERSONA_SUFFIX));
                if leader_ids.contains(&alt) {
                    leader.persona = Some(alt);
                }
            }
        }

        let priority_index = tables
            .priorities
            .iter()
            .map(|p| ((p.leader.clone(), p.faction.clone()), p.priority))
            .collect();

        let pair_index = tables
            .memento_synergies
            .iter()
            .map(|s| MementoPairKey::new(&s.primary, &s.secondary))
            .collect();

        Ok(Self {
            tables,
            priority_index,
            pair_index,
        })
    }

    pub fn tables(&self) -> &CatalogTables {
        &self.tables
    }
}

impl ConfigProvider for Catalog {
    fn leaders(&self) -> &[LeaderRecord] {
        &self.tables.leaders
    }

    fn factions(&self, age: Age) -> Vec<&FactionRecord> {
        self.tables
            .factions
            .iter()
            .filter(|f| f.domain == age)
            .collect()
    }

    fn biases(&self, leader: &LeaderId, age: Age) -> Vec<&BiasEntry> {
        self.tables
            .biases
            .iter()
            .filter(|b| &b.leader == leader && b.domain == age)
            .collect()
    }

    fn priorities(&self) -> &[PriorityEntry] {
        &self.tables.priorities
    }

    fn leader_synergies(&self, age: Age) -> Vec<&LeaderSynergy> {
        self.tables
            .leader_synergies
            .iter()
            .filter(|s| s.age == age)
            .collect()
    }

    fn faction_synergies(&self) -> &[FactionSynergy] {
        &self.tables.faction_synergies
    }

    fn memento_pair_synergies(&self) -> &[MementoPairSynergy] {
        &self.tables.memento_synergies
    }

    fn specific_combos(&self, age: Age) -> Vec<&SpecificCombo> {
        self.tables
            .specific_combos
            .iter()
            .filter(|c| c.applies_to_age(age))
            .collect()
    }

    fn mementos(&self) -> &[MementoId] {
        &self.tables.mementos
    }

    fn priority(&self, leader: &LeaderId, faction: &FactionId) -> i32 {
        self.priority_index
            .get(&(leader.clone(), faction.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn has_pair_synergy(&self, a: &MementoId, b: &MementoId) -> bool {
        self.pair_index.contains(&MementoPairKey::new(a, b))
    }
}
