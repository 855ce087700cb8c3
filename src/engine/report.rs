//! Per-pass outcome summary

use serde::Serialize;

use crate::core::types::{FactionId, LeaderId, MementoId, SeatId};
use crate::state::SeatStatus;

/// How a seat's civilization was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactionSource {
    /// Sticky value carried from a previous pass
    Kept,
    /// Human seat, never touched
    Human,
    Bias,
    TrueRandom,
    /// Shares a civilization with another seat
    NonExclusive,
    /// Placed by the deferred-seat cleanup
    Cleanup,
    Unassigned,
    /// Mode disabled, seat cleared
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatOutcome {
    pub seat: SeatId,
    pub status: SeatStatus,
    pub leader: Option<LeaderId>,
    pub faction: Option<FactionId>,
    pub major_memento: Option<MementoId>,
    pub minor_memento: Option<MementoId>,
    pub source: FactionSource,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveReport {
    pub enabled: bool,
    pub toggled: bool,
    pub age_transition: bool,
    pub seats: Vec<SeatOutcome>,
    pub deferred: Vec<SeatId>,
    pub relocated: Vec<SeatId>,
    pub contests: usize,
}

impl ResolveReport {
    pub fn seat(&self, seat: SeatId) -> Option<&SeatOutcome> {
        self.seats.iter().find(|s| s.seat == seat)
    }

    /// Seats that ended the pass without a civilization
    pub fn unassigned(&self) -> impl Iterator<Item = &SeatOutcome> {
        self.seats
            .iter()
            .filter(|s| s.source == FactionSource::Unassigned)
    }
}
