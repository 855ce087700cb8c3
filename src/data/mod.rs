//! Read-only configuration tables consumed by the allocation engine

pub mod catalog;
pub mod loader;
pub mod records;

pub use catalog::{Catalog, CatalogTables};
pub use loader::{load_setup, parse_setup, SeatLock, Setup, SetupFile};
pub use records::{
    BiasEntry, FactionRecord, FactionSynergy, LeaderRecord, LeaderSynergy, MementoPairSynergy,
    PriorityEntry, SpecificCombo,
};

use crate::core::types::{Age, FactionId, LeaderId, MementoId};

/// Query surface over the game's configuration database.
///
/// Implementations are read-only for the lifetime of a resolve pass.
pub trait ConfigProvider {
    fn leaders(&self) -> &[LeaderRecord];

    /// Civilizations whose domain is `age`
    fn factions(&self, age: Age) -> Vec<&FactionRecord>;

    /// Bias rows for `leader` in `age`, in table order
    fn biases(&self, leader: &LeaderId, age: Age) -> Vec<&BiasEntry>;

    fn priorities(&self) -> &[PriorityEntry];

    fn leader_synergies(&self, age: Age) -> Vec<&LeaderSynergy>;

    fn faction_synergies(&self) -> &[FactionSynergy];

    fn memento_pair_synergies(&self) -> &[MementoPairSynergy];

    fn specific_combos(&self, age: Age) -> Vec<&SpecificCombo>;

    /// Full memento catalog
    fn mementos(&self) -> &[MementoId];

    fn leader(&self, id: &LeaderId) -> Option<&LeaderRecord> {
        self.leaders().iter().find(|l| &l.id == id)
    }

    /// The other half of a base/persona pair, in either direction
    fn persona_counterpart(&self, id: &LeaderId) -> Option<LeaderId> {
        if let Some(persona) = self.leader(id).and_then(|l| l.persona.clone()) {
            return Some(persona);
        }
        self.leaders()
            .iter()
            .find(|l| l.persona.as_ref() == Some(id))
            .map(|l| l.id.clone())
    }

    /// Contest priority, 0 when no row exists
    fn priority(&self, leader: &LeaderId, faction: &FactionId) -> i32 {
        self.priorities()
            .iter()
            .find(|p| &p.leader == leader && &p.faction == faction)
            .map(|p| p.priority)
            .unwrap_or(0)
    }

    fn has_pair_synergy(&self, a: &MementoId, b: &MementoId) -> bool {
        self.memento_pair_synergies().iter().any(|s| {
            (&s.primary == a && &s.secondary == b) || (&s.primary == b && &s.secondary == a)
        })
    }
}
