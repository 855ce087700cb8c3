pub mod config;
pub mod error;
pub mod types;

pub use config::{EngineConfig, FallbackSampling};
pub use error::{RandomiserError, Result};
