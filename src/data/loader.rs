//! Load a setup scenario from a TOML file
//!
//! A setup file carries everything one pass needs: the configuration tables,
//! engine tuning under `[engine]`, the seat table and per-seat civilization
//! locks.

use std::path::Path;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::error::{RandomiserError, Result};
use crate::core::types::{Age, FactionId, SeatId};
use crate::data::catalog::{Catalog, CatalogTables};
use crate::data::ConfigProvider;
use crate::state::{SeatState, SetupTable};

/// A civilization a seat has not unlocked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatLock {
    pub seat: SeatId,
    pub faction: FactionId,
}

/// On-disk layout of a setup scenario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupFile {
    #[serde(default)]
    pub age: Age,
    #[serde(default)]
    pub local_seat: SeatId,
    /// Computer memento assignment switch
    #[serde(default = "default_true")]
    pub ai_mementos: bool,
    /// Civilization dropdown entries. Empty means every selectable
    /// civilization of the age.
    #[serde(default)]
    pub offered: Vec<FactionId>,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub seats: Vec<SeatState>,
    #[serde(default)]
    pub locks: Vec<SeatLock>,
    #[serde(flatten)]
    pub tables: CatalogTables,
}

fn default_true() -> bool {
    true
}

/// A validated scenario, ready to hand to a `Randomiser`
#[derive(Debug, Clone)]
pub struct Setup {
    pub catalog: Catalog,
    pub table: SetupTable,
    pub engine: EngineConfig,
}

/// Parse and validate a setup scenario from TOML text
pub fn parse_setup(content: &str) -> Result<Setup> {
    let file: SetupFile = toml::from_str(content)?;
    build_setup(file)
}

/// Load a setup scenario from disk
pub fn load_setup(path: &Path) -> Result<Setup> {
    let content = std::fs::read_to_string(path)?;
    tracing::debug!("Loading setup from {}", path.display());
    parse_setup(&content)
}

fn build_setup(file: SetupFile) -> Result<Setup> {
    file.engine
        .validate()
        .map_err(RandomiserError::InvalidConfig)?;
    let catalog = Catalog::from_tables(file.tables)?;

    let mut seat_ids = AHashSet::new();
    for seat in &file.seats {
        if !seat_ids.insert(seat.id) {
            return Err(RandomiserError::DuplicateId {
                kind: "seat",
                id: seat.id.to_string(),
            });
        }
        if let Some(leader) = &seat.leader {
            if catalog.leader(leader).is_none() {
                return Err(RandomiserError::UnknownReference {
                    kind: "leader",
                    id: leader.to_string(),
                });
            }
        }
        if let Some(faction) = &seat.faction {
            if !catalog.tables().factions.iter().any(|f| &f.id == faction) {
                return Err(RandomiserError::UnknownReference {
                    kind: "civilization",
                    id: faction.to_string(),
                });
            }
        }
    }
    if !seat_ids.contains(&file.local_seat) {
        return Err(RandomiserError::SeatNotFound(file.local_seat));
    }

    let offered = if file.offered.is_empty() {
        catalog
            .factions(file.age)
            .into_iter()
            .filter(|f| f.is_selectable())
            .map(|f| f.id.clone())
            .collect()
    } else {
        file.offered
    };

    let mut table = SetupTable::new(file.seats, file.local_seat, file.age).with_offered(offered);
    table.set_mode_enabled(file.ai_mementos);
    for lock in file.locks {
        if !seat_ids.contains(&lock.seat) {
            return Err(RandomiserError::SeatNotFound(lock.seat));
        }
        table.lock_faction(lock.seat, lock.faction);
    }

    tracing::info!(
        "Loaded setup: {} seats, {} leaders, {} civilizations in {}",
        table.as_slice().len(),
        catalog.leaders().len(),
        catalog.factions(file.age).len(),
        file.age
    );

    Ok(Setup {
        catalog,
        table,
        engine: file.engine,
    })
}
