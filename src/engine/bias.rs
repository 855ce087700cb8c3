//! CivBiasResolver - civilization choice from leader bias with contests
//!
//! A leader's bias rows for the active age decide which civilizations it
//! will consider. Rows are ranked by weight and then shuffled, so the weight
//! only decides membership, never the draw order.
//!
//! When a wanted civilization is already held by another computer seat the
//! two leaders' contest priorities are compared. A strictly higher priority
//! re-resolves the holder one level deeper; if the holder finds a new home
//! the requester takes the civilization. Seats already in the contest chain
//! are never contested again. Holders with a random leader are moved to a
//! random free civilization without a contest.

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::{Age, FactionId, LeaderId, SeatId};
use crate::data::ConfigProvider;
use crate::engine::fallback::FactionFallback;
use crate::engine::memento::MementoSynergyEngine;
use crate::engine::session::{AssignmentSession, Holder};
use crate::state::{GameStateProvider, SeatField};

pub struct CivBiasResolver<'a, C: ConfigProvider + ?Sized> {
    config: &'a C,
    mementos: &'a MementoSynergyEngine<'a, C>,
    fallback: &'a FactionFallback,
    age: Age,
    max_depth: u32,
    human_seat: SeatId,
}

impl<'a, C: ConfigProvider + ?Sized> CivBiasResolver<'a, C> {
    pub fn new(
        config: &'a C,
        mementos: &'a MementoSynergyEngine<'a, C>,
        fallback: &'a FactionFallback,
        age: Age,
        max_depth: u32,
        human_seat: SeatId,
    ) -> Self {
        Self {
            config,
            mementos,
            fallback,
            age,
            max_depth,
            human_seat,
        }
    }

    /// Bias candidates for `leader` in the active age, in draw order
    pub fn candidates(&self, leader: Option<&LeaderId>, rng: &mut impl Rng) -> Vec<FactionId> {
        let Some(leader) = leader else {
            return Vec::new();
        };
        let mut entries = self.config.biases(leader, self.age);
        entries.sort_by(|a, b| b.weight.cmp(&a.weight));

        let mut seen = AHashSet::new();
        let mut factions: Vec<FactionId> = entries
            .into_iter()
            .filter(|b| seen.insert(b.faction.clone()))
            .map(|b| b.faction.clone())
            .collect();
        factions.shuffle(rng);
        factions
    }

    /// Find a civilization for `seat`.
    ///
    /// `filter` limits candidates to civilizations the seat has unlocked.
    /// Returns `None` and defers the seat when nothing could be claimed or
    /// the contest chain went deeper than the configured limit.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve<S: GameStateProvider + ?Sized, R: Rng>(
        &self,
        session: &mut AssignmentSession,
        state: &mut S,
        rng: &mut R,
        seat: SeatId,
        leader: Option<&LeaderId>,
        filter: Option<&[FactionId]>,
        depth: u32,
    ) -> Option<FactionId> {
        let mut chain = Vec::new();
        self.resolve_in_chain(session, state, rng, seat, leader, filter, depth, &mut chain)
    }

    /// `chain` holds the seats whose civilization is being contested above
    /// this level. They are never contested again until the chain unwinds.
    #[allow(clippy::too_many_arguments)]
    fn resolve_in_chain<S: GameStateProvider + ?Sized, R: Rng>(
        &self,
        session: &mut AssignmentSession,
        state: &mut S,
        rng: &mut R,
        seat: SeatId,
        leader: Option<&LeaderId>,
        filter: Option<&[FactionId]>,
        depth: u32,
        chain: &mut Vec<SeatId>,
    ) -> Option<FactionId> {
        if depth > self.max_depth {
            tracing::debug!("Seat {}: contest depth {} exceeded, deferring", seat, depth);
            session.defer(seat);
            return None;
        }

        chain.push(seat);
        let claimed = self.scan(session, state, rng, seat, leader, filter, depth, chain);
        chain.pop();

        if claimed.is_none() {
            tracing::debug!("Seat {}: no bias candidate could be claimed", seat);
            session.defer(seat);
        }
        claimed
    }

    #[allow(clippy::too_many_arguments)]
    fn scan<S: GameStateProvider + ?Sized, R: Rng>(
        &self,
        session: &mut AssignmentSession,
        state: &mut S,
        rng: &mut R,
        seat: SeatId,
        leader: Option<&LeaderId>,
        filter: Option<&[FactionId]>,
        depth: u32,
        chain: &mut Vec<SeatId>,
    ) -> Option<FactionId> {
        let requester = Holder {
            seat,
            leader: leader.cloned(),
            human: seat == self.human_seat,
        };

        for faction in self.candidates(leader, rng) {
            if let Some(allowed) = filter {
                if !allowed.contains(&faction) {
                    tracing::debug!("Seat {}: {} not unlocked, skipping", seat, faction);
                    continue;
                }
            }

            if !session.used_factions().contains(&faction) {
                tracing::debug!("Seat {}: {} is free", seat, faction);
                session.claim_faction(faction.clone(), requester);
                return Some(faction);
            }

            if requester.human {
                self.displace(session, state, &faction, requester);
                return Some(faction);
            }

            let Some(holder) = session.holder(&faction).cloned() else {
                continue;
            };
            if holder.human {
                continue;
            }
            if chain.contains(&holder.seat) {
                tracing::debug!("Seat {}: holder of {} is already being moved", seat, faction);
                continue;
            }

            let relocated = match &holder.leader {
                None => {
                    tracing::debug!("Seat {}: holder of {} has a random leader", seat, faction);
                    self.relocate_random(session, rng, &holder)
                }
                Some(holder_leader) => {
                    let ours = leader.map_or(0, |l| self.config.priority(l, &faction));
                    let theirs = self.config.priority(holder_leader, &faction);
                    tracing::debug!(
                        "Seat {} contests {} with seat {}: priority {} vs {}",
                        seat,
                        faction,
                        holder.seat,
                        ours,
                        theirs
                    );
                    if ours > theirs {
                        session.record_contest();
                        self.resolve_in_chain(
                            session,
                            state,
                            rng,
                            holder.seat,
                            Some(holder_leader),
                            None,
                            depth + 1,
                            chain,
                        )
                    } else {
                        None
                    }
                }
            };

            if let Some(new_faction) = relocated {
                tracing::debug!(
                    "Seat {} moved from {} to {}, {} goes to seat {}",
                    holder.seat,
                    faction,
                    new_faction,
                    faction,
                    seat
                );
                state.write(holder.seat, SeatField::Faction(Some(new_faction.clone())));
                self.mementos.regenerate(
                    state,
                    rng,
                    holder.seat,
                    holder.leader.as_ref(),
                    Some(&new_faction),
                );
                session.record_relocation(holder.seat);
                session.hand_over(&faction, requester);
                for stale in session.settle(holder.seat, &new_faction) {
                    tracing::warn!("Seat {}: released stale claim on {}", holder.seat, stale);
                }
                return Some(faction);
            }
        }

        None
    }

    /// The human seat takes a claimed civilization outright. A computer
    /// holder loses it and waits for the cleanup pass.
    fn displace<S: GameStateProvider + ?Sized>(
        &self,
        session: &mut AssignmentSession,
        state: &mut S,
        faction: &FactionId,
        requester: Holder,
    ) {
        if let Some(previous) = session.holder(faction).cloned() {
            if previous.seat != requester.seat && !previous.human {
                tracing::debug!("Seat {} loses {} to the human seat", previous.seat, faction);
                state.write(previous.seat, SeatField::Faction(None));
                session.defer(previous.seat);
            }
        }
        session.hand_over(faction, requester);
    }

    /// Move a random-leader holder to any free civilization
    fn relocate_random(
        &self,
        session: &mut AssignmentSession,
        rng: &mut impl Rng,
        holder: &Holder,
    ) -> Option<FactionId> {
        let faction = self.fallback.pick_unused(session, rng, None)?;
        session.claim_faction(faction.clone(), holder.clone());
        Some(faction)
    }
}
