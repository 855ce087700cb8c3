//! LeaderAssigner - random leader draw with persona exclusion

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::{LeaderId, SeatId};
use crate::data::ConfigProvider;
use crate::engine::session::AssignmentSession;
use crate::state::{GameStateProvider, SeatField};

pub struct LeaderAssigner<'a, C: ConfigProvider + ?Sized> {
    config: &'a C,
}

impl<'a, C: ConfigProvider + ?Sized> LeaderAssigner<'a, C> {
    pub fn new(config: &'a C) -> Self {
        Self { config }
    }

    /// Unlocked, owned leaders nobody has claimed this pass
    pub fn candidates(&self, session: &AssignmentSession) -> Vec<&'a LeaderId> {
        let config: &'a C = self.config;
        config
            .leaders()
            .iter()
            .filter(|l| l.is_selectable() && !session.used_leaders().contains(&l.id))
            .map(|l| &l.id)
            .collect()
    }

    /// True if the base/persona counterpart of `leader` is already claimed
    fn conflicts(&self, session: &AssignmentSession, leader: &LeaderId) -> bool {
        self.config
            .persona_counterpart(leader)
            .map_or(false, |other| session.used_leaders().contains(&other))
    }

    /// Draw a leader for `seat` and write it to the seat.
    ///
    /// A draw whose persona counterpart is already taken is redrawn once
    /// from the non-conflicting remainder. Returns `None` and leaves the seat
    /// on a random leader when nothing is left to draw.
    pub fn assign<S: GameStateProvider + ?Sized>(
        &self,
        session: &mut AssignmentSession,
        state: &mut S,
        rng: &mut impl Rng,
        seat: SeatId,
    ) -> Option<LeaderId> {
        let previous = state.seat(seat).and_then(|s| s.leader);
        let pool = self.candidates(session);

        let drawn = pool.choose(rng).map(|l| (*l).clone());
        let chosen = match drawn {
            Some(leader) if self.conflicts(session, &leader) => {
                tracing::debug!("Seat {}: {} conflicts with its persona, redrawing", seat, leader);
                let remainder: Vec<&LeaderId> = pool
                    .iter()
                    .copied()
                    .filter(|l| *l != &leader && !self.conflicts(session, l))
                    .collect();
                remainder.choose(rng).map(|l| (*l).clone())
            }
            other => other,
        };

        if let Some(previous) = &previous {
            session.release_leader(previous);
        }

        match &chosen {
            Some(leader) => {
                session.reserve_leader(leader.clone());
                tracing::debug!("Seat {} leader changed to {}", seat, leader);
            }
            None => tracing::warn!("No leaders left to assign to seat {}", seat),
        }
        state.write(seat, SeatField::Leader(chosen.clone()));
        chosen
    }
}
