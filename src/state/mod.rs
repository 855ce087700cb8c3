//! Live per-seat setup parameters

pub mod table;

pub use table::SetupTable;

use serde::{Deserialize, Serialize};

use crate::core::types::{Age, FactionId, LeaderId, MementoId, SeatId};

/// Slot status of a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Closed,
    /// Open slot, filled by a computer player at game start
    Open,
    Human,
    Computer,
}

impl SeatStatus {
    /// Seats the engine assigns leaders, civilizations and mementos to
    pub fn is_computer_controlled(&self) -> bool {
        matches!(self, Self::Open | Self::Computer)
    }
}

/// Current parameter values of a seat. `None` is the random/none sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatState {
    pub id: SeatId,
    pub status: SeatStatus,
    #[serde(default)]
    pub leader: Option<LeaderId>,
    #[serde(default)]
    pub faction: Option<FactionId>,
    #[serde(default)]
    pub major_memento: Option<MementoId>,
    #[serde(default)]
    pub minor_memento: Option<MementoId>,
}

impl SeatState {
    pub fn new(id: u32, status: SeatStatus) -> Self {
        Self {
            id: SeatId(id),
            status,
            leader: None,
            faction: None,
            major_memento: None,
            minor_memento: None,
        }
    }

    pub fn with_leader(mut self, leader: impl Into<String>) -> Self {
        self.leader = Some(LeaderId::new(leader));
        self
    }

    pub fn with_faction(mut self, faction: impl Into<String>) -> Self {
        self.faction = Some(FactionId::new(faction));
        self
    }

    pub fn with_mementos(mut self, major: impl Into<String>, minor: impl Into<String>) -> Self {
        self.major_memento = Some(MementoId::new(major));
        self.minor_memento = Some(MementoId::new(minor));
        self
    }

    pub fn is_closed(&self) -> bool {
        self.status == SeatStatus::Closed
    }

    pub fn is_human(&self) -> bool {
        self.status == SeatStatus::Human
    }

    pub fn apply(&mut self, field: SeatField) {
        match field {
            SeatField::Leader(v) => self.leader = v,
            SeatField::Faction(v) => self.faction = v,
            SeatField::MajorMemento(v) => self.major_memento = v,
            SeatField::MinorMemento(v) => self.minor_memento = v,
        }
    }
}

/// A named per-seat parameter together with its new value
#[derive(Debug, Clone, PartialEq)]
pub enum SeatField {
    Leader(Option<LeaderId>),
    Faction(Option<FactionId>),
    MajorMemento(Option<MementoId>),
    MinorMemento(Option<MementoId>),
}

/// A civilization offered to a seat, and whether the seat has it unlocked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionOption {
    pub id: FactionId,
    pub locked: bool,
}

/// Read/write access to the live setup parameters.
///
/// Writes must be visible to subsequent reads within the same pass.
pub trait GameStateProvider {
    fn seats(&self) -> Vec<SeatState>;

    fn seat(&self, id: SeatId) -> Option<SeatState>;

    /// The designated human seat on this machine
    fn local_seat(&self) -> SeatId;

    /// Whether computer memento assignment is switched on
    fn mode_enabled(&self) -> bool;

    fn age(&self) -> Age;

    /// Civilizations offered to `seat` under the current rules
    fn faction_options(&self, seat: SeatId) -> Vec<FactionOption>;

    fn write(&mut self, seat: SeatId, field: SeatField);
}
