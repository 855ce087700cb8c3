//! AssignmentSession - working state of one resolve pass

use ahash::AHashMap;

use crate::core::types::{FactionId, LeaderId, SeatId};
use crate::engine::pool::ExclusivityPool;

/// The seat currently holding a civilization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holder {
    pub seat: SeatId,
    /// `None` when the holder's leader is still random
    pub leader: Option<LeaderId>,
    pub human: bool,
}

/// Claimed leaders and civilizations, who holds what, and who was deferred.
///
/// Owned by exactly one `Randomiser`. Rebuilt from the seat table at the
/// start of every pass; only the last observed mode flag carries over.
#[derive(Debug, Clone, Default)]
pub struct AssignmentSession {
    leaders: ExclusivityPool<LeaderId>,
    factions: ExclusivityPool<FactionId>,
    holders: AHashMap<FactionId, Holder>,
    deferred: Vec<SeatId>,
    relocated: Vec<SeatId>,
    last_mode: Option<bool>,
    contests: usize,
}

impl AssignmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the mode flag for this pass, returns true if it changed since
    /// the previous pass
    pub fn observe_mode(&mut self, enabled: bool) -> bool {
        let toggled = self.last_mode.map_or(false, |last| last != enabled);
        self.last_mode = Some(enabled);
        toggled
    }

    pub fn last_mode(&self) -> Option<bool> {
        self.last_mode
    }

    /// Drop all claims, holders and deferrals
    pub fn clear(&mut self) {
        self.leaders.clear();
        self.factions.clear();
        self.holders.clear();
        self.deferred.clear();
        self.relocated.clear();
        self.contests = 0;
    }

    pub fn used_leaders(&self) -> &ExclusivityPool<LeaderId> {
        &self.leaders
    }

    pub fn used_factions(&self) -> &ExclusivityPool<FactionId> {
        &self.factions
    }

    pub fn reserve_leader(&mut self, leader: LeaderId) -> bool {
        self.leaders.reserve(leader)
    }

    pub fn release_leader(&mut self, leader: &LeaderId) -> bool {
        self.leaders.release(leader)
    }

    pub fn holder(&self, faction: &FactionId) -> Option<&Holder> {
        self.holders.get(faction)
    }

    /// Reserve a civilization and record its holder
    pub fn claim_faction(&mut self, faction: FactionId, holder: Holder) {
        self.factions.reserve(faction.clone());
        self.holders.insert(faction, holder);
    }

    /// Give an already reserved civilization to a new holder
    pub fn hand_over(&mut self, faction: &FactionId, holder: Holder) {
        debug_assert!(self.factions.contains(faction));
        self.holders.insert(faction.clone(), holder);
    }

    /// Drop every claim `seat` still has other than `keep`.
    ///
    /// Returns the civilizations whose reservation was released.
    pub fn settle(&mut self, seat: SeatId, keep: &FactionId) -> Vec<FactionId> {
        let stale: Vec<FactionId> = self
            .holders
            .iter()
            .filter(|(faction, holder)| holder.seat == seat && *faction != keep)
            .map(|(faction, _)| faction.clone())
            .collect();
        for faction in &stale {
            self.holders.remove(faction);
            self.factions.release(faction);
        }
        stale
    }

    /// Mark a seat for the random cleanup pass
    pub fn defer(&mut self, seat: SeatId) {
        if !self.deferred.contains(&seat) {
            self.deferred.push(seat);
        }
    }

    pub fn deferred(&self) -> &[SeatId] {
        &self.deferred
    }

    pub fn is_deferred(&self, seat: SeatId) -> bool {
        self.deferred.contains(&seat)
    }

    /// Note a holder that was moved off a contested civilization
    pub fn record_relocation(&mut self, seat: SeatId) {
        self.relocated.push(seat);
    }

    pub fn relocated(&self) -> &[SeatId] {
        &self.relocated
    }

    pub fn record_contest(&mut self) {
        self.contests += 1;
    }

    pub fn contests(&self) -> usize {
        self.contests
    }
}
