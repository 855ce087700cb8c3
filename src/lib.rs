//! Setup Randomiser - leader, civilization and memento allocation for computer seats

pub mod core;
pub mod data;
pub mod engine;
pub mod state;
