//! Allocation engine - leaders, civilizations and memento pairs for computer seats
//!
//! The `Randomiser` drives one pass at a time. Everything a pass claims lives
//! in an `AssignmentSession` that the randomiser owns and rebuilds per pass.

pub mod bias;
pub mod fallback;
pub mod leader;
pub mod memento;
pub mod orchestrator;
pub mod pool;
pub mod report;
pub mod session;

// Re-exports for convenient access
pub use bias::CivBiasResolver;
pub use fallback::FactionFallback;
pub use leader::LeaderAssigner;
pub use memento::{ComboPool, ComboSource, MementoPair, MementoSynergyEngine};
pub use orchestrator::Randomiser;
pub use pool::ExclusivityPool;
pub use report::{FactionSource, ResolveReport, SeatOutcome};
pub use session::{AssignmentSession, Holder};
