//! Randomiser - runs one resolve pass over every seat of the setup table
//!
//! Pass structure:
//! 1. Observe the mode flag. A change since the last pass re-resolves every
//!    computer seat.
//! 2. Disabled: clear leader, civilization and mementos of computer seats.
//! 3. Enabled: seed the session from values that stay (human seats always),
//!    then walk seats in slot order: leader draw, bias resolution, fallback
//!    chain, memento pair. Seats deferred along the way get a random unused
//!    civilization in a final cleanup pass.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::EngineConfig;
use crate::core::error::{RandomiserError, Result};
use crate::core::types::{Age, FactionId, SeatId};
use crate::data::ConfigProvider;
use crate::engine::bias::CivBiasResolver;
use crate::engine::fallback::FactionFallback;
use crate::engine::leader::LeaderAssigner;
use crate::engine::memento::MementoSynergyEngine;
use crate::engine::report::{FactionSource, ResolveReport, SeatOutcome};
use crate::engine::session::{AssignmentSession, Holder};
use crate::state::{GameStateProvider, SeatField, SeatState};

/// Owns the pass session and RNG for one setup screen
pub struct Randomiser<C: ConfigProvider> {
    config: C,
    settings: EngineConfig,
    session: AssignmentSession,
    rng: ChaCha8Rng,
}

/// What a pass does to one computer seat
#[derive(Debug, Clone, Copy)]
struct SeatPlan {
    redraw_leader: bool,
    reresolve_faction: bool,
}

impl<C: ConfigProvider> Randomiser<C> {
    pub fn new(config: C, settings: EngineConfig) -> Result<Self> {
        settings.validate().map_err(RandomiserError::InvalidConfig)?;
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            config,
            settings,
            session: AssignmentSession::new(),
            rng,
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    pub fn session(&self) -> &AssignmentSession {
        &self.session
    }

    /// Run one pass against `state`.
    ///
    /// `assign_leaders` lets the pass draw leaders for seats on a random
    /// leader; `is_age_transition` limits each seat to its unlocked
    /// civilizations and redraws mementos.
    pub fn resolve<S: GameStateProvider + ?Sized>(
        &mut self,
        state: &mut S,
        assign_leaders: bool,
        is_age_transition: bool,
    ) -> ResolveReport {
        let enabled = state.mode_enabled();
        let toggled = self.session.observe_mode(enabled);
        tracing::debug!("Mode enabled: {}, toggled: {}", enabled, toggled);

        let report = if enabled {
            self.run_enabled(state, assign_leaders, is_age_transition, toggled)
        } else {
            self.run_disabled(state)
        };

        tracing::info!(
            "Pass complete: {} seats, {} contests, {} deferred, {} unassigned",
            report.seats.len(),
            report.contests,
            report.deferred.len(),
            report.unassigned().count()
        );
        ResolveReport { toggled, ..report }
    }

    fn run_disabled<S: GameStateProvider + ?Sized>(&mut self, state: &mut S) -> ResolveReport {
        let mut outcomes = Vec::new();
        for seat in state.seats() {
            if seat.is_closed() {
                continue;
            }
            if seat.is_human() {
                outcomes.push(outcome(&seat, FactionSource::Human));
                continue;
            }
            state.write(seat.id, SeatField::Leader(None));
            state.write(seat.id, SeatField::Faction(None));
            state.write(seat.id, SeatField::MajorMemento(None));
            state.write(seat.id, SeatField::MinorMemento(None));
            tracing::debug!("Seat {} reset", seat.id);

            let cleared = state.seat(seat.id).unwrap_or(seat);
            outcomes.push(outcome(&cleared, FactionSource::Reset));
        }
        self.session.clear();

        ResolveReport {
            enabled: false,
            seats: outcomes,
            ..ResolveReport::default()
        }
    }

    fn run_enabled<S: GameStateProvider + ?Sized>(
        &mut self,
        state: &mut S,
        assign_leaders: bool,
        is_age_transition: bool,
        toggled: bool,
    ) -> ResolveReport {
        let Self {
            config,
            settings,
            session,
            rng,
        } = self;
        let config: &C = config;

        let age = state.age();
        let human_seat = state.local_seat();
        let seats = state.seats();

        session.clear();
        let plans: Vec<SeatPlan> = seats
            .iter()
            .map(|seat| SeatPlan {
                redraw_leader: !seat.is_human()
                    && assign_leaders
                    && (seat.leader.is_none() || toggled),
                reresolve_faction: !seat.is_human() && (seat.faction.is_none() || toggled),
            })
            .collect();
        seed_session(session, &seats, &plans);

        let fallback = FactionFallback::new(
            fallback_pool(config, state, age, human_seat, is_age_transition),
            settings.fallback_sampling,
        );
        let leaders = LeaderAssigner::new(config);
        let mementos = MementoSynergyEngine::new(config, age, settings.specific_weight);
        let bias = CivBiasResolver::new(
            config,
            &mementos,
            &fallback,
            age,
            settings.max_contest_depth,
            human_seat,
        );

        let mut sources: Vec<(SeatId, FactionSource)> = Vec::new();
        for (seat, plan) in seats.iter().zip(&plans) {
            if seat.is_closed() {
                continue;
            }
            if seat.is_human() {
                sources.push((seat.id, FactionSource::Human));
                continue;
            }

            let leader = if plan.redraw_leader {
                leaders.assign(session, state, rng, seat.id)
            } else {
                seat.leader.clone()
            };

            if !plan.reresolve_faction {
                // A contest earlier in the pass may already have moved this seat
                let current = state.seat(seat.id).and_then(|s| s.faction);
                if let Some(faction) = &current {
                    if session.holder(faction).map_or(false, |h| h.seat == seat.id) {
                        let holder = Holder {
                            seat: seat.id,
                            leader: leader.clone(),
                            human: false,
                        };
                        session.hand_over(faction, holder);
                    }
                }
                sources.push((seat.id, FactionSource::Kept));
                continue;
            }

            let filter = if is_age_transition {
                Some(unlocked_unused(&*state, session, seat.id))
            } else {
                None
            };
            let holder = Holder {
                seat: seat.id,
                leader: leader.clone(),
                human: false,
            };

            let (faction, source) = match bias.resolve(
                session,
                state,
                rng,
                seat.id,
                leader.as_ref(),
                filter.as_deref(),
                0,
            ) {
                Some(faction) => (Some(faction), FactionSource::Bias),
                None => fall_back(session, rng, &fallback, filter.as_deref(), holder),
            };

            tracing::debug!("Seat {} civilization: {:?} ({:?})", seat.id, faction, source);
            state.write(seat.id, SeatField::Faction(faction.clone()));
            mementos.generate(
                state,
                rng,
                seat.id,
                leader.as_ref(),
                faction.as_ref(),
                is_age_transition,
            );
            sources.push((seat.id, source));
        }

        for seat_id in session.deferred().to_vec() {
            let Some(seat) = state.seat(seat_id) else {
                continue;
            };
            if seat.faction.is_some() {
                continue;
            }

            let restrict = if is_age_transition {
                Some(unlocked_unused(&*state, session, seat_id))
            } else {
                None
            };
            match fallback.pick_unused(session, rng, restrict.as_deref()) {
                Some(faction) => {
                    tracing::debug!("Cleanup: seat {} set to {}", seat_id, faction);
                    session.claim_faction(
                        faction.clone(),
                        Holder {
                            seat: seat_id,
                            leader: seat.leader.clone(),
                            human: false,
                        },
                    );
                    state.write(seat_id, SeatField::Faction(Some(faction.clone())));
                    mementos.generate(
                        state,
                        rng,
                        seat_id,
                        seat.leader.as_ref(),
                        Some(&faction),
                        is_age_transition,
                    );
                    set_source(&mut sources, seat_id, FactionSource::Cleanup);
                }
                None => {
                    tracing::error!("No civilizations left for deferred seat {}", seat_id);
                    set_source(&mut sources, seat_id, FactionSource::Unassigned);
                }
            }
        }

        let outcomes = sources
            .iter()
            .filter_map(|(id, source)| state.seat(*id).map(|s| outcome(&s, *source)))
            .collect();

        ResolveReport {
            enabled: true,
            toggled,
            age_transition: is_age_transition,
            seats: outcomes,
            deferred: session.deferred().to_vec(),
            relocated: session.relocated().to_vec(),
            contests: session.contests(),
        }
    }
}

/// Reserve leaders and civilizations that survive this pass
fn seed_session(session: &mut AssignmentSession, seats: &[SeatState], plans: &[SeatPlan]) {
    for (seat, plan) in seats.iter().zip(plans) {
        if seat.is_closed() {
            continue;
        }
        if !plan.redraw_leader {
            if let Some(leader) = &seat.leader {
                session.reserve_leader(leader.clone());
            }
        }
        if plan.reresolve_faction {
            continue;
        }
        if let Some(faction) = &seat.faction {
            let holder = Holder {
                seat: seat.id,
                leader: if plan.redraw_leader {
                    None
                } else {
                    seat.leader.clone()
                },
                human: seat.is_human(),
            };
            session.claim_faction(faction.clone(), holder);
        }
    }
    tracing::debug!(
        "Seeded {} leaders, {} civilizations",
        session.used_leaders().len(),
        session.used_factions().len()
    );
}

/// Civilizations the random fallbacks draw from.
///
/// During an age transition these are the options offered to the human
/// seat, otherwise every selectable civilization of the age.
fn fallback_pool<C: ConfigProvider + ?Sized, S: GameStateProvider + ?Sized>(
    config: &C,
    state: &S,
    age: Age,
    human_seat: SeatId,
    is_age_transition: bool,
) -> Vec<FactionId> {
    if is_age_transition {
        let offered: Vec<FactionId> = state
            .faction_options(human_seat)
            .into_iter()
            .map(|o| o.id)
            .collect();
        if !offered.is_empty() {
            return offered;
        }
    }
    config
        .factions(age)
        .into_iter()
        .filter(|f| f.is_selectable())
        .map(|f| f.id.clone())
        .collect()
}

/// A seat's unlocked civilizations nobody has claimed yet
fn unlocked_unused<S: GameStateProvider + ?Sized>(
    state: &S,
    session: &AssignmentSession,
    seat: SeatId,
) -> Vec<FactionId> {
    state
        .faction_options(seat)
        .into_iter()
        .filter(|o| !o.locked && !session.used_factions().contains(&o.id))
        .map(|o| o.id)
        .collect()
}

/// Fallback chain after the bias search failed.
///
/// A random pick that lands on a held civilization is reported as
/// `NonExclusive`. A seat placed here is no longer waiting on the cleanup pass, but stays
/// in the deferred list of the report.
fn fall_back(
    session: &mut AssignmentSession,
    rng: &mut ChaCha8Rng,
    fallback: &FactionFallback,
    filter: Option<&[FactionId]>,
    holder: Holder,
) -> (Option<FactionId>, FactionSource) {
    if let Some(faction) = fallback.true_random(session, rng, filter) {
        if session.used_factions().contains(&faction) {
            tracing::warn!("Seat {}: random pick {} is already held", holder.seat, faction);
            return (Some(faction), FactionSource::NonExclusive);
        }
        session.claim_faction(faction.clone(), holder);
        return (Some(faction), FactionSource::TrueRandom);
    }
    if let Some(faction) = fallback.non_exclusive(rng) {
        if !session.used_factions().contains(&faction) {
            session.claim_faction(faction.clone(), holder);
        }
        return (Some(faction), FactionSource::NonExclusive);
    }
    tracing::error!("No candidates remain for fallback assignment of seat {}", holder.seat);
    (None, FactionSource::Unassigned)
}

fn set_source(sources: &mut [(SeatId, FactionSource)], seat: SeatId, source: FactionSource) {
    if let Some(entry) = sources.iter_mut().find(|(id, _)| *id == seat) {
        entry.1 = source;
    }
}

fn outcome(seat: &SeatState, source: FactionSource) -> SeatOutcome {
    SeatOutcome {
        seat: seat.id,
        status: seat.status,
        leader: seat.leader.clone(),
        faction: seat.faction.clone(),
        major_memento: seat.major_memento.clone(),
        minor_memento: seat.minor_memento.clone(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FallbackSampling;
    use crate::core::types::{LeaderId, MementoId};
    use crate::data::{
        BiasEntry, Catalog, CatalogTables, FactionRecord, LeaderRecord, LeaderSynergy,
        MementoPairSynergy, PriorityEntry,
    };
    use crate::state::{SeatStatus, SetupTable};

    const AGE: Age = Age::Antiquity;

    fn bias(leader: &str, faction: &str) -> BiasEntry {
        BiasEntry {
            leader: LeaderId::from(leader),
            faction: FactionId::from(faction),
            domain: AGE,
            weight: 1,
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_tables(CatalogTables {
            leaders: ["A", "B", "C", "D"].iter().map(|l| LeaderRecord::new(*l)).collect(),
            factions: ["X", "Y", "Z", "W"]
                .iter()
                .map(|f| FactionRecord::new(*f, AGE))
                .collect(),
            biases: vec![bias("A", "X"), bias("A", "Y"), bias("B", "X"), bias("C", "X")],
            priorities: vec![PriorityEntry {
                leader: LeaderId::from("B"),
                faction: FactionId::from("X"),
                priority: 5,
            }],
            mementos: ["M1", "M2", "M3"].iter().map(|m| MementoId::from(*m)).collect(),
            memento_synergies: ["M2", "M3"]
                .iter()
                .map(|m| MementoPairSynergy {
                    primary: MementoId::from("M1"),
                    secondary: MementoId::from(*m),
                })
                .collect(),
            leader_synergies: ["A", "B", "C", "D"]
                .iter()
                .map(|l| LeaderSynergy {
                    leader: LeaderId::from(*l),
                    memento: MementoId::from("M1"),
                    age: AGE,
                })
                .collect(),
            ..CatalogTables::default()
        })
        .unwrap()
    }

    fn table(seats: Vec<SeatState>) -> SetupTable {
        SetupTable::new(seats, SeatId(0), AGE)
    }

    fn randomiser() -> Randomiser<Catalog> {
        Randomiser::new(catalog(), EngineConfig::seeded(42)).unwrap()
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = EngineConfig {
            specific_weight: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Randomiser::new(catalog(), settings),
            Err(RandomiserError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_higher_priority_newcomer_takes_contested_civilization() {
        let mut randomiser = randomiser();
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("D").with_faction("W"),
            SeatState::new(1, SeatStatus::Computer).with_leader("A").with_faction("X"),
            SeatState::new(2, SeatStatus::Computer).with_leader("B"),
        ]);

        let report = randomiser.resolve(&mut state, false, false);

        assert_eq!(state.seat(SeatId(2)).unwrap().faction, Some(FactionId::from("X")));
        assert_eq!(state.seat(SeatId(1)).unwrap().faction, Some(FactionId::from("Y")));
        assert_eq!(report.contests, 1);
        assert_eq!(report.relocated, vec![SeatId(1)]);
        assert_eq!(report.seat(SeatId(2)).unwrap().source, FactionSource::Bias);
        assert_eq!(
            randomiser.session().holder(&FactionId::from("Y")).unwrap().seat,
            SeatId(1)
        );
    }

    #[test]
    fn test_lower_priority_newcomer_falls_back() {
        let mut randomiser = randomiser();
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("D").with_faction("W"),
            SeatState::new(1, SeatStatus::Computer).with_leader("B"),
            SeatState::new(2, SeatStatus::Computer).with_leader("C"),
        ]);

        let report = randomiser.resolve(&mut state, false, false);

        assert_eq!(state.seat(SeatId(1)).unwrap().faction, Some(FactionId::from("X")));
        let seat2 = report.seat(SeatId(2)).unwrap();
        assert_eq!(seat2.source, FactionSource::TrueRandom);
        assert!(seat2.faction == Some(FactionId::from("Y")) || seat2.faction == Some(FactionId::from("Z")));
        assert_eq!(report.contests, 0);
        assert!(report.deferred.contains(&SeatId(2)));
    }

    #[test]
    fn test_human_seat_untouched() {
        let mut randomiser = randomiser();
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("B").with_faction("X"),
            SeatState::new(1, SeatStatus::Computer),
        ]);

        randomiser.resolve(&mut state, true, false);

        let human = state.seat(SeatId(0)).unwrap();
        assert_eq!(human.leader, Some(LeaderId::from("B")));
        assert_eq!(human.faction, Some(FactionId::from("X")));
        let computer = state.seat(SeatId(1)).unwrap();
        assert_ne!(computer.leader, Some(LeaderId::from("B")));
        assert_ne!(computer.faction, Some(FactionId::from("X")));
    }

    #[test]
    fn test_sticky_values_kept_on_repeat_pass() {
        let mut randomiser = randomiser();
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("D").with_faction("W"),
            SeatState::new(1, SeatStatus::Computer),
            SeatState::new(2, SeatStatus::Open),
        ]);

        randomiser.resolve(&mut state, true, false);
        let first = state.seats();
        let report = randomiser.resolve(&mut state, true, false);

        assert_eq!(state.seats(), first);
        assert!(report.seats.iter().skip(1).all(|s| s.source == FactionSource::Kept));
    }

    #[test]
    fn test_disabled_resets_computer_seats() {
        let mut randomiser = randomiser();
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("D").with_faction("W"),
            SeatState::new(1, SeatStatus::Computer),
            SeatState::new(2, SeatStatus::Closed),
        ]);
        randomiser.resolve(&mut state, true, false);
        assert!(state.seat(SeatId(1)).unwrap().faction.is_some());

        state.set_mode_enabled(false);
        let report = randomiser.resolve(&mut state, true, false);

        let seat = state.seat(SeatId(1)).unwrap();
        assert_eq!(seat.leader, None);
        assert_eq!(seat.faction, None);
        assert_eq!(seat.major_memento, None);
        assert_eq!(seat.minor_memento, None);
        assert!(randomiser.session().used_factions().is_empty());
        assert!(randomiser.session().used_leaders().is_empty());
        assert!(report.toggled);
        assert_eq!(report.seats.len(), 2);
        assert_eq!(state.seat(SeatId(0)).unwrap().faction, Some(FactionId::from("W")));
    }

    #[test]
    fn test_toggle_re_resolves_computer_seats() {
        let mut randomiser = randomiser();
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("D"),
            SeatState::new(1, SeatStatus::Computer).with_leader("C").with_faction("Z"),
        ]);
        state.set_mode_enabled(false);
        randomiser.resolve(&mut state, true, false);
        state.write(SeatId(1), SeatField::Leader(Some(LeaderId::from("C"))));
        state.write(SeatId(1), SeatField::Faction(Some(FactionId::from("Z"))));

        state.set_mode_enabled(true);
        let report = randomiser.resolve(&mut state, true, false);

        assert!(report.toggled);
        assert_ne!(report.seat(SeatId(1)).unwrap().source, FactionSource::Kept);
    }

    #[test]
    fn test_age_transition_uses_unlocked_options() {
        let mut randomiser = randomiser();
        let offered = ["X", "Y", "Z"].iter().map(|f| FactionId::from(*f)).collect();
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("D").with_faction("Z"),
            SeatState::new(1, SeatStatus::Computer).with_leader("A"),
        ])
        .with_offered(offered);
        state.lock_faction(SeatId(1), FactionId::from("X"));

        let report = randomiser.resolve(&mut state, false, true);

        assert!(report.age_transition);
        assert_eq!(state.seat(SeatId(1)).unwrap().faction, Some(FactionId::from("Y")));
    }

    #[test]
    fn test_mementos_assigned_with_distinct_slots() {
        let mut randomiser = randomiser();
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("D").with_faction("W"),
            SeatState::new(1, SeatStatus::Computer).with_leader("C"),
        ]);

        randomiser.resolve(&mut state, false, false);

        let seat = state.seat(SeatId(1)).unwrap();
        assert_eq!(seat.major_memento, Some(MementoId::from("M1")));
        assert!(seat.minor_memento.is_some());
        assert_ne!(seat.major_memento, seat.minor_memento);
    }

    #[test]
    fn test_bounded_index_duplicate_reported_as_non_exclusive() {
        let settings = EngineConfig {
            fallback_sampling: FallbackSampling::BoundedIndex,
            ..EngineConfig::seeded(42)
        };
        let mut randomiser = Randomiser::new(catalog(), settings).unwrap();
        // X and Y are held and sit at the head of the pool, so the bounded
        // index can only land on one of them
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("C").with_faction("X"),
            SeatState::new(1, SeatStatus::Computer).with_leader("A").with_faction("Y"),
            SeatState::new(2, SeatStatus::Computer).with_leader("D"),
        ]);

        let report = randomiser.resolve(&mut state, false, false);

        let seat2 = report.seat(SeatId(2)).unwrap();
        assert_eq!(seat2.source, FactionSource::NonExclusive);
        assert!(seat2.faction == Some(FactionId::from("X")) || seat2.faction == Some(FactionId::from("Y")));
        assert_ne!(
            randomiser.session().holder(seat2.faction.as_ref().unwrap()).unwrap().seat,
            SeatId(2)
        );
    }

    #[test]
    fn test_filtered_fallback_reported_as_true_random() {
        let mut randomiser = randomiser();
        let mut state = table(vec![
            SeatState::new(0, SeatStatus::Human).with_leader("C").with_faction("X"),
            SeatState::new(1, SeatStatus::Computer).with_leader("A").with_faction("Y"),
            SeatState::new(2, SeatStatus::Computer).with_leader("D"),
        ]);

        let report = randomiser.resolve(&mut state, false, false);

        let seat2 = report.seat(SeatId(2)).unwrap();
        assert_eq!(seat2.source, FactionSource::TrueRandom);
        assert!(seat2.faction == Some(FactionId::from("Z")) || seat2.faction == Some(FactionId::from("W")));
    }

    #[test]
    fn test_contest_loop_back_leaves_no_duplicates() {
        let bias_row = |leader: &str, faction: &str| BiasEntry {
            leader: LeaderId::from(leader),
            faction: FactionId::from(faction),
            domain: AGE,
            weight: 1,
        };
        let priority_row = |leader: &str, faction: &str, priority: i32| PriorityEntry {
            leader: LeaderId::from(leader),
            faction: FactionId::from(faction),
            priority,
        };
        let catalog = Catalog::from_tables(CatalogTables {
            leaders: ["L0", "L1", "L2", "L3"].iter().map(|l| LeaderRecord::new(*l)).collect(),
            factions: ["W", "X", "Y", "Z"]
                .iter()
                .map(|f| FactionRecord::new(*f, AGE))
                .collect(),
            biases: vec![
                bias_row("L1", "X"),
                bias_row("L1", "Y"),
                bias_row("L1", "Z"),
                bias_row("L2", "X"),
                bias_row("L3", "X"),
                bias_row("L3", "Y"),
            ],
            priorities: vec![
                priority_row("L2", "X", 10),
                priority_row("L3", "X", 5),
                priority_row("L1", "Y", 5),
            ],
            ..CatalogTables::default()
        })
        .unwrap();

        for seed in 0..64 {
            let mut randomiser = Randomiser::new(catalog.clone(), EngineConfig::seeded(seed)).unwrap();
            let mut state = table(vec![
                SeatState::new(0, SeatStatus::Human).with_leader("L0").with_faction("W"),
                SeatState::new(1, SeatStatus::Computer).with_leader("L1").with_faction("X"),
                SeatState::new(2, SeatStatus::Computer).with_leader("L2"),
                SeatState::new(3, SeatStatus::Computer).with_leader("L3").with_faction("Y"),
            ]);

            let report = randomiser.resolve(&mut state, false, false);

            let held: Vec<Option<FactionId>> = (1..4)
                .map(|i| state.seat(SeatId(i)).unwrap().faction)
                .collect();
            assert_eq!(
                held,
                vec![
                    Some(FactionId::from("Z")),
                    Some(FactionId::from("X")),
                    Some(FactionId::from("Y"))
                ],
                "seed {}",
                seed
            );
            assert_eq!(report.seat(SeatId(2)).unwrap().source, FactionSource::Bias);
            assert_eq!(report.relocated, vec![SeatId(1)], "seed {}", seed);
            for (seat, faction) in [(1, "Z"), (2, "X"), (3, "Y")] {
                assert_eq!(
                    randomiser.session().holder(&FactionId::from(faction)).unwrap().seat,
                    SeatId(seat)
                );
            }
        }
    }
}
