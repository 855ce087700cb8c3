//! MementoSynergyEngine - picks a major/minor memento pair for a seat
//!
//! Two candidate pools are merged before a uniform draw:
//! - dynamic combos, generated from leader, civilization and memento-pair
//!   synergy tables
//! - specific combos, curated pairs tied to a leader and/or civilization
//!
//! Curated combos are far fewer than generated ones, so each is counted
//! `floor(dynamic / specific) * specific_weight` times whenever that ratio
//! exceeds 1.

use ahash::AHashSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Age, FactionId, LeaderId, MementoId, SeatId};
use crate::data::ConfigProvider;
use crate::state::{GameStateProvider, SeatField};

/// Where a memento pair came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboSource {
    /// Seat already had both slots filled
    Retained,
    Dynamic,
    Specific,
    /// No candidate existed, both slots cleared
    Empty,
}

/// Result of a memento generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MementoPair {
    pub primary: Option<MementoId>,
    pub secondary: Option<MementoId>,
    pub source: ComboSource,
}

impl MementoPair {
    fn empty() -> Self {
        Self {
            primary: None,
            secondary: None,
            source: ComboSource::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComboCandidate {
    pub primary: MementoId,
    pub secondary: MementoId,
    pub source: ComboSource,
}

/// Merged candidate pool with curated combos weighted by replication count
#[derive(Debug, Clone, Default)]
pub struct ComboPool {
    pub dynamic: Vec<ComboCandidate>,
    pub specific: Vec<ComboCandidate>,
    specific_copies: usize,
}

impl ComboPool {
    fn new(
        dynamic: Vec<ComboCandidate>,
        specific: Vec<ComboCandidate>,
        specific_weight: usize,
    ) -> Self {
        let ratio = if specific.is_empty() {
            0
        } else {
            dynamic.len() / specific.len()
        };
        let specific_copies = if ratio > 1 { ratio * specific_weight } else { 1 };
        Self {
            dynamic,
            specific,
            specific_copies,
        }
    }

    /// How many times each curated combo appears in the merged pool
    pub fn specific_copies(&self) -> usize {
        self.specific_copies
    }

    /// Size of the merged pool after replication
    pub fn len(&self) -> usize {
        self.dynamic.len() + self.specific.len() * self.specific_copies
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uniform draw over the merged pool
    pub fn pick(&self, rng: &mut impl Rng) -> Option<&ComboCandidate> {
        if self.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.len());
        if idx < self.dynamic.len() {
            self.dynamic.get(idx)
        } else {
            self.specific
                .get((idx - self.dynamic.len()) / self.specific_copies)
        }
    }
}

pub struct MementoSynergyEngine<'a, C: ConfigProvider + ?Sized> {
    config: &'a C,
    age: Age,
    specific_weight: usize,
}

impl<'a, C: ConfigProvider + ?Sized> MementoSynergyEngine<'a, C> {
    pub fn new(config: &'a C, age: Age, specific_weight: usize) -> Self {
        Self {
            config,
            age,
            specific_weight,
        }
    }

    fn leader_mementos(&self, leader: Option<&LeaderId>) -> Vec<&'a MementoId> {
        let config: &'a C = self.config;
        match leader {
            Some(leader) => config
                .leader_synergies(self.age)
                .into_iter()
                .filter(|s| &s.leader == leader)
                .map(|s| &s.memento)
                .collect(),
            None => Vec::new(),
        }
    }

    fn faction_mementos(&self, faction: Option<&FactionId>) -> Vec<&'a MementoId> {
        let config: &'a C = self.config;
        match faction {
            Some(faction) => config
                .faction_synergies()
                .iter()
                .filter(|s| &s.faction == faction)
                .map(|s| &s.memento)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Build the merged candidate pool.
    ///
    /// `fixed_primary` pins the primary candidate set to one memento, used
    /// when the seat already has one slot filled.
    pub fn pool(
        &self,
        leader: Option<&LeaderId>,
        faction: Option<&FactionId>,
        fixed_primary: Option<&MementoId>,
    ) -> ComboPool {
        let leader_mementos = self.leader_mementos(leader);
        let faction_mementos = self.faction_mementos(faction);

        let primaries: Vec<&MementoId> = match fixed_primary {
            Some(primary) => vec![primary],
            None => {
                let mut seen = AHashSet::new();
                leader_mementos
                    .iter()
                    .chain(faction_mementos.iter())
                    .copied()
                    .filter(|m| seen.insert(*m))
                    .collect()
            }
        };

        let mut dynamic = Vec::new();
        for primary in &primaries {
            for secondary in self.config.mementos() {
                if *primary == secondary {
                    continue;
                }
                if self.config.has_pair_synergy(primary, secondary)
                    || leader_mementos.contains(&secondary)
                    || faction_mementos.contains(&secondary)
                {
                    dynamic.push(ComboCandidate {
                        primary: (*primary).clone(),
                        secondary: secondary.clone(),
                        source: ComboSource::Dynamic,
                    });
                }
            }
        }

        let mut seen_combos = AHashSet::new();
        let specific: Vec<ComboCandidate> = self
            .config
            .specific_combos(self.age)
            .into_iter()
            .filter(|c| {
                let leader_match = leader.is_some() && c.leader.as_ref() == leader;
                let faction_match = faction.is_some() && c.faction.as_ref() == faction;
                (leader_match && c.faction.is_none())
                    || (faction_match && c.leader.is_none())
                    || (leader_match && faction_match)
            })
            .filter(|c| c.primary != c.secondary)
            .filter(|c| seen_combos.insert(c.id.clone()))
            .map(|c| ComboCandidate {
                primary: c.primary.clone(),
                secondary: c.secondary.clone(),
                source: ComboSource::Specific,
            })
            .collect();

        ComboPool::new(dynamic, specific, self.specific_weight)
    }

    /// Pick mementos for a seat and write them to its slots.
    ///
    /// Filled slots are kept outside age transitions. With only one slot
    /// filled, that memento becomes the primary and a partner is drawn.
    pub fn generate<S: GameStateProvider + ?Sized>(
        &self,
        state: &mut S,
        rng: &mut impl Rng,
        seat: SeatId,
        leader: Option<&LeaderId>,
        faction: Option<&FactionId>,
        is_age_transition: bool,
    ) -> MementoPair {
        let (major, minor) = state
            .seat(seat)
            .map(|s| (s.major_memento, s.minor_memento))
            .unwrap_or((None, None));

        let fixed_primary = if is_age_transition {
            None
        } else {
            match (&major, &minor) {
                (Some(primary), Some(secondary)) => {
                    tracing::debug!("Seat {} keeps mementos {} / {}", seat, primary, secondary);
                    return MementoPair {
                        primary: major.clone(),
                        secondary: minor.clone(),
                        source: ComboSource::Retained,
                    };
                }
                (Some(kept), None) | (None, Some(kept)) => Some(kept.clone()),
                (None, None) => None,
            }
        };

        let pool = self.pool(leader, faction, fixed_primary.as_ref());
        tracing::debug!(
            "Seat {}: {} dynamic, {} specific (x{}) memento combos",
            seat,
            pool.dynamic.len(),
            pool.specific.len(),
            pool.specific_copies()
        );

        let pair = match pool.pick(rng) {
            Some(combo) => MementoPair {
                primary: Some(combo.primary.clone()),
                secondary: Some(combo.secondary.clone()),
                source: combo.source,
            },
            None => {
                tracing::debug!("No memento combos for seat {}", seat);
                MementoPair::empty()
            }
        };

        state.write(seat, SeatField::MajorMemento(pair.primary.clone()));
        state.write(seat, SeatField::MinorMemento(pair.secondary.clone()));
        pair
    }

    /// Clear both slots and draw a fresh pair
    pub fn regenerate<S: GameStateProvider + ?Sized>(
        &self,
        state: &mut S,
        rng: &mut impl Rng,
        seat: SeatId,
        leader: Option<&LeaderId>,
        faction: Option<&FactionId>,
    ) -> MementoPair {
        state.write(seat, SeatField::MajorMemento(None));
        state.write(seat, SeatField::MinorMemento(None));
        self.generate(state, rng, seat, leader, faction, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ComboId;
    use crate::data::{
        Catalog, CatalogTables, FactionRecord, FactionSynergy, LeaderRecord, LeaderSynergy,
        MementoPairSynergy, SpecificCombo,
    };
    use crate::state::{SeatState, SeatStatus, SetupTable};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn memento(id: &str) -> MementoId {
        MementoId::from(id)
    }

    fn combo(id: &str, leader: Option<&str>, faction: Option<&str>, a: &str, b: &str) -> SpecificCombo {
        SpecificCombo {
            id: ComboId::from(id),
            leader: leader.map(LeaderId::from),
            faction: faction.map(FactionId::from),
            age: None,
            primary: memento(a),
            secondary: memento(b),
        }
    }

    /// Leader synergy with M1, M2 and M3 over a catalog of M1..M5.
    /// Every primary pairs with the other two leader mementos, plus M1-M4 and
    /// M2-M5 pair synergies: 3*2 + 1 + 1 = 8 dynamic combos.
    fn catalog() -> Catalog {
        let leader = LeaderId::from("LEADER_AUGUSTUS");
        let leader_synergies = ["M1", "M2", "M3"]
            .iter()
            .map(|m| LeaderSynergy {
                leader: leader.clone(),
                memento: memento(m),
                age: Age::Antiquity,
            })
            .collect();
        Catalog::from_tables(CatalogTables {
            leaders: vec![LeaderRecord::new("LEADER_AUGUSTUS")],
            factions: vec![FactionRecord::new("CIVILIZATION_ROME", Age::Antiquity)],
            mementos: ["M1", "M2", "M3", "M4", "M5"].iter().map(|m| memento(m)).collect(),
            leader_synergies,
            memento_synergies: vec![
                MementoPairSynergy {
                    primary: memento("M4"),
                    secondary: memento("M1"),
                },
                MementoPairSynergy {
                    primary: memento("M2"),
                    secondary: memento("M5"),
                },
            ],
            specific_combos: vec![
                combo("AUG_A", Some("LEADER_AUGUSTUS"), None, "M4", "M5"),
                combo("ROME_A", None, Some("CIVILIZATION_ROME"), "M5", "M3"),
                combo("OTHER", Some("LEADER_AMINA"), None, "M1", "M2"),
                combo("SAME", Some("LEADER_AUGUSTUS"), None, "M2", "M2"),
            ],
            ..CatalogTables::default()
        })
        .unwrap()
    }

    fn table(seat: SeatState) -> SetupTable {
        SetupTable::new(vec![seat], SeatId(9), Age::Antiquity)
    }

    #[test]
    fn test_dynamic_pool_uses_leader_and_pair_synergies() {
        let catalog = catalog();
        let engine = MementoSynergyEngine::new(&catalog, Age::Antiquity, 3);
        let pool = engine.pool(Some(&LeaderId::from("LEADER_AUGUSTUS")), None, None);

        assert_eq!(pool.dynamic.len(), 8);
        assert!(pool
            .dynamic
            .iter()
            .any(|c| c.primary == memento("M1") && c.secondary == memento("M4")));
        assert!(pool
            .dynamic
            .iter()
            .any(|c| c.primary == memento("M2") && c.secondary == memento("M5")));
        assert!(pool.dynamic.iter().all(|c| c.primary != c.secondary));
    }

    #[test]
    fn test_specific_pool_matches_leader_and_faction() {
        let catalog = catalog();
        let engine = MementoSynergyEngine::new(&catalog, Age::Antiquity, 3);
        let pool = engine.pool(
            Some(&LeaderId::from("LEADER_AUGUSTUS")),
            Some(&FactionId::from("CIVILIZATION_ROME")),
            None,
        );
        // AUG_A and ROME_A; OTHER is for another leader, SAME has equal slots
        assert_eq!(pool.specific.len(), 2);
    }

    #[test]
    fn test_specific_replication_follows_ratio() {
        // 12 dynamic, 2 specific, weight 3 => ratio 6 => 18 copies each
        let dynamic = (0..12)
            .map(|i| ComboCandidate {
                primary: memento(&format!("D{}", i)),
                secondary: memento("X"),
                source: ComboSource::Dynamic,
            })
            .collect();
        let specific = (0..2)
            .map(|i| ComboCandidate {
                primary: memento(&format!("S{}", i)),
                secondary: memento("Y"),
                source: ComboSource::Specific,
            })
            .collect();
        let pool = ComboPool::new(dynamic, specific, 3);
        assert_eq!(pool.specific_copies(), 18);
        assert_eq!(pool.len(), 12 + 36);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let draws = 4800;
        let specific_draws = (0..draws)
            .filter(|_| pool.pick(&mut rng).unwrap().source == ComboSource::Specific)
            .count();
        // Expected share 36/48 = 0.75
        let share = specific_draws as f64 / draws as f64;
        assert!((0.70..0.80).contains(&share), "specific share {}", share);
    }

    #[test]
    fn test_low_ratio_keeps_single_copy() {
        let one = |s: &str| ComboCandidate {
            primary: memento(s),
            secondary: memento("Z"),
            source: ComboSource::Dynamic,
        };
        let pool = ComboPool::new(vec![one("A")], vec![one("B"), one("C")], 3);
        assert_eq!(pool.specific_copies(), 1);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_filled_slots_are_retained() {
        let catalog = catalog();
        let engine = MementoSynergyEngine::new(&catalog, Age::Antiquity, 3);
        let mut state = table(SeatState::new(1, SeatStatus::Computer).with_mementos("M3", "M4"));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let pair = engine.generate(
            &mut state,
            &mut rng,
            SeatId(1),
            Some(&LeaderId::from("LEADER_AUGUSTUS")),
            None,
            false,
        );
        assert_eq!(pair.source, ComboSource::Retained);
        assert_eq!(pair.primary, Some(memento("M3")));
    }

    #[test]
    fn test_age_transition_redraws_filled_slots() {
        let catalog = catalog();
        let engine = MementoSynergyEngine::new(&catalog, Age::Antiquity, 3);
        let mut state = table(SeatState::new(1, SeatStatus::Computer).with_mementos("M3", "M3"));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let pair = engine.generate(
            &mut state,
            &mut rng,
            SeatId(1),
            Some(&LeaderId::from("LEADER_AUGUSTUS")),
            None,
            true,
        );
        assert_ne!(pair.source, ComboSource::Retained);
        assert_ne!(pair.primary, pair.secondary);
        let seat = state.seat(SeatId(1)).unwrap();
        assert_eq!(seat.major_memento, pair.primary);
        assert_eq!(seat.minor_memento, pair.secondary);
    }

    #[test]
    fn test_single_filled_slot_becomes_primary() {
        let catalog = catalog();
        let engine = MementoSynergyEngine::new(&catalog, Age::Antiquity, 3);
        let mut seat = SeatState::new(1, SeatStatus::Computer);
        seat.minor_memento = Some(memento("M4"));
        let mut state = table(seat);

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pair = engine.generate(
                &mut state,
                &mut rng,
                SeatId(1),
                Some(&LeaderId::from("LEADER_AUGUSTUS")),
                None,
                false,
            );
            if pair.source == ComboSource::Dynamic {
                assert_eq!(pair.primary, Some(memento("M4")));
            }
            // Reset to the single filled slot for the next draw
            state.write(SeatId(1), SeatField::MajorMemento(None));
            state.write(SeatId(1), SeatField::MinorMemento(Some(memento("M4"))));
        }
    }

    #[test]
    fn test_empty_pool_clears_slots() {
        let catalog = catalog();
        let engine = MementoSynergyEngine::new(&catalog, Age::Antiquity, 3);
        let mut state = table(SeatState::new(1, SeatStatus::Computer));
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let pair = engine.generate(&mut state, &mut rng, SeatId(1), None, None, false);
        assert_eq!(pair, MementoPair::empty());
        let seat = state.seat(SeatId(1)).unwrap();
        assert_eq!(seat.major_memento, None);
        assert_eq!(seat.minor_memento, None);
    }

    #[test]
    fn test_faction_synergy_feeds_primary_candidates() {
        let mut tables = catalog().tables().clone();
        tables.faction_synergies.push(FactionSynergy {
            faction: FactionId::from("CIVILIZATION_ROME"),
            memento: memento("M5"),
        });
        let catalog = Catalog::from_tables(tables).unwrap();
        let engine = MementoSynergyEngine::new(&catalog, Age::Antiquity, 3);

        let pool = engine.pool(None, Some(&FactionId::from("CIVILIZATION_ROME")), None);
        // M5 pairs with M2 through the pair table
        assert_eq!(pool.dynamic.len(), 1);
        assert_eq!(pool.dynamic[0].primary, memento("M5"));
        assert_eq!(pool.dynamic[0].secondary, memento("M2"));
    }
}
