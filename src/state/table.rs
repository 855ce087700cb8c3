//! In-memory seat table

use ahash::{AHashMap, AHashSet};

use crate::core::types::{Age, FactionId, SeatId};
use crate::state::{FactionOption, GameStateProvider, SeatField, SeatState};

/// Seat parameters held in memory, as the setup screen would hold them
#[derive(Debug, Clone)]
pub struct SetupTable {
    seats: Vec<SeatState>,
    local_seat: SeatId,
    mode_enabled: bool,
    age: Age,
    /// Civilizations offered on the civilization dropdown
    offered: Vec<FactionId>,
    /// Per-seat civilizations the seat has not unlocked
    locked: AHashMap<SeatId, AHashSet<FactionId>>,
}

impl SetupTable {
    pub fn new(seats: Vec<SeatState>, local_seat: SeatId, age: Age) -> Self {
        Self {
            seats,
            local_seat,
            mode_enabled: true,
            age,
            offered: Vec::new(),
            locked: AHashMap::new(),
        }
    }

    pub fn with_offered(mut self, offered: Vec<FactionId>) -> Self {
        self.offered = offered;
        self
    }

    pub fn set_mode_enabled(&mut self, enabled: bool) {
        self.mode_enabled = enabled;
    }

    pub fn set_age(&mut self, age: Age) {
        self.age = age;
    }

    pub fn lock_faction(&mut self, seat: SeatId, faction: FactionId) {
        self.locked.entry(seat).or_default().insert(faction);
    }

    pub fn seat_mut(&mut self, id: SeatId) -> Option<&mut SeatState> {
        self.seats.iter_mut().find(|s| s.id == id)
    }

    /// Snapshot of all seats in slot order
    pub fn as_slice(&self) -> &[SeatState] {
        &self.seats
    }
}

impl GameStateProvider for SetupTable {
    fn seats(&self) -> Vec<SeatState> {
        self.seats.clone()
    }

    fn seat(&self, id: SeatId) -> Option<SeatState> {
        self.seats.iter().find(|s| s.id == id).cloned()
    }

    fn local_seat(&self) -> SeatId {
        self.local_seat
    }

    fn mode_enabled(&self) -> bool {
        self.mode_enabled
    }

    fn age(&self) -> Age {
        self.age
    }

    fn faction_options(&self, seat: SeatId) -> Vec<FactionOption> {
        let locked = self.locked.get(&seat);
        self.offered
            .iter()
            .map(|id| FactionOption {
                id: id.clone(),
                locked: locked.map_or(false, |set| set.contains(id)),
            })
            .collect()
    }

    fn write(&mut self, seat: SeatId, field: SeatField) {
        match self.seat_mut(seat) {
            Some(state) => state.apply(field),
            None => tracing::warn!("Ignoring write to unknown seat {}", seat),
        }
    }
}
